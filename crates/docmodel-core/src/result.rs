//! Run-level result bag
//!
//! [`DocumentResult`] only accumulates what a processing run produced. It has
//! no derived state and no behavior beyond appending pages.

use crate::page::{Page, PixelBuffer};
use crate::types::TableRegion;
use image::DynamicImage;
use serde::Serialize;
use std::collections::BTreeMap;

/// Terminal output of a processing run.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "I: PixelBuffer"))]
pub struct DocumentResult<I = DynamicImage> {
    /// Processed pages
    pub pages: Vec<Page<I>>,
    /// Document split recommendations, keyed by split name
    pub split_recommend: BTreeMap<String, serde_json::Value>,
    /// Paths or ids of related documents
    pub related: Vec<String>,
    /// Table regions collected across all pages
    pub all_tables: Vec<TableRegion>,
    /// Named extraction results
    pub results: BTreeMap<String, serde_json::Value>,
    /// Post-formatted output records
    pub formatted_data: Vec<serde_json::Value>,
}

impl<I> DocumentResult<I> {
    /// Creates an empty result.
    #[inline]
    #[must_use = "creates an empty DocumentResult"]
    pub const fn new() -> Self {
        Self {
            pages: Vec::new(),
            split_recommend: BTreeMap::new(),
            related: Vec::new(),
            all_tables: Vec::new(),
            results: BTreeMap::new(),
            formatted_data: Vec::new(),
        }
    }

    /// Appends a processed page.
    #[inline]
    pub fn add_page(&mut self, page: Page<I>) {
        self.pages.push(page);
    }
}

impl<I> Default for DocumentResult<I> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ImageSize;
    use crate::types::Block;
    use serde_json::json;

    #[test]
    fn test_empty_result() {
        let result: DocumentResult<ImageSize> = DocumentResult::default();
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "pages": [],
                "split_recommend": {},
                "related": [],
                "all_tables": [],
                "results": {},
                "formatted_data": []
            })
        );
    }

    #[test]
    fn test_accumulation() {
        let mut result = DocumentResult::new();
        result.add_page(Page::new(ImageSize::new(10, 20), 1));
        result
            .all_tables
            .push(TableRegion::new(Block::new(0.0, 0.0, 1.0, 0.5)));
        result
            .results
            .insert("total".to_string(), json!({"value": "12.50"}));
        result.related.push("attachment.pdf".to_string());

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["pages"][0]["height"], 20);
        assert_eq!(value["all_tables"][0]["type"], "Table");
        assert_eq!(value["results"]["total"]["value"], "12.50");
        assert_eq!(value["related"][0], "attachment.pdf");
    }
}
