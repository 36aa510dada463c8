//! JSON serialization for documents, pages and run results
//!
//! The entities already implement `Serialize`; this wrapper adds formatting
//! options and a conversion to a plain `serde_json::Value` mapping.

use crate::document::Document;
use crate::error::Result;
use crate::page::{Page, PixelBuffer};
use crate::result::DocumentResult;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Options for JSON serialization
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonOptions {
    /// Pretty-print with indentation (default: true)
    pub pretty: bool,
    /// Indentation string when pretty=true (default: 2 spaces)
    pub indent: String,
}

impl Default for JsonOptions {
    #[inline]
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

/// JSON serializer for [`Document`], [`Page`] and [`DocumentResult`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonSerializer {
    options: JsonOptions,
}

impl JsonSerializer {
    /// Create a new JSON serializer with default options (pretty-printed)
    #[inline]
    #[must_use = "creates serializer with default options"]
    pub fn new() -> Self {
        Self {
            options: JsonOptions::default(),
        }
    }

    /// Create a new JSON serializer with custom options
    #[inline]
    #[must_use = "creates serializer with custom options"]
    pub const fn with_options(options: JsonOptions) -> Self {
        Self { options }
    }

    /// Serialize a Document to JSON
    ///
    /// # Errors
    /// Returns error if serialization fails, including dangling ids inside a page
    #[must_use = "this function returns serialized JSON that should be used"]
    pub fn serialize_document<I: PixelBuffer>(&self, doc: &Document<I>) -> Result<String> {
        self.write(doc)
    }

    /// Serialize a single Page to JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[must_use = "this function returns serialized JSON that should be used"]
    pub fn serialize_page<I: PixelBuffer>(&self, page: &Page<I>) -> Result<String> {
        self.write(page)
    }

    /// Serialize a run result to JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[must_use = "this function returns serialized JSON that should be used"]
    pub fn serialize_result<I: PixelBuffer>(&self, result: &DocumentResult<I>) -> Result<String> {
        self.write(result)
    }

    /// Convert any entity to its plain mapping form.
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[must_use = "this function returns a JSON value that should be used"]
    pub fn to_value<T: Serialize + ?Sized>(item: &T) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(item)?)
    }

    /// Serialize a Document to compact JSON (no pretty-printing)
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    #[must_use = "this function returns serialized JSON that should be used"]
    pub fn serialize_compact<I: PixelBuffer>(doc: &Document<I>) -> Result<String> {
        Ok(serde_json::to_string(doc)?)
    }

    fn write<T: Serialize + ?Sized>(&self, item: &T) -> Result<String> {
        if !self.options.pretty {
            return Ok(serde_json::to_string(item)?);
        }
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.options.indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        item.serialize(&mut serializer)?;
        String::from_utf8(buf)
            .map_err(|e| <serde_json::Error as serde::ser::Error>::custom(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ImageSize;
    use crate::types::{Block, TextBox};

    fn sample() -> Document<ImageSize> {
        let mut page = Page::new(ImageSize::new(100, 100), 1);
        page.add_word(TextBox::new(Block::new(0.1, 0.1, 0.3, 0.2), "Hello", 0.99))
            .unwrap();
        let mut doc = Document::new().with_path("hello.png");
        doc.add_page(page);
        doc
    }

    #[test]
    fn test_json_serialization_basic() {
        let json = JsonSerializer::new().serialize_document(&sample()).unwrap();

        assert!(json.contains("Hello"));
        assert!(json.contains("hello.png"));
        // Pretty-printed with the default two-space indent
        assert!(json.contains("\n  \"path\""));
    }

    #[test]
    fn test_json_serialization_compact() {
        let serializer = JsonSerializer::with_options(JsonOptions {
            pretty: false,
            indent: "  ".to_string(),
        });
        let json = serializer.serialize_document(&sample()).unwrap();

        assert!(json.contains("Hello"));
        assert!(!json.contains('\n'));
        assert_eq!(json, JsonSerializer::serialize_compact(&sample()).unwrap());
    }

    #[test]
    fn test_json_custom_indent() {
        let serializer = JsonSerializer::with_options(JsonOptions {
            pretty: true,
            indent: "\t".to_string(),
        });
        let json = serializer.serialize_page(&sample().pages[0]).unwrap();
        assert!(json.contains("\n\t\"page_number\": 1"));
    }

    #[test]
    fn test_to_value_round_trips_through_text() {
        let doc = sample();
        let value = JsonSerializer::to_value(&doc).unwrap();
        let text = JsonSerializer::new().serialize_document(&doc).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, parsed);
        assert_eq!(value["pages"][0]["words"][0]["type"], "TextBox");
    }

    #[test]
    fn test_serialize_result() {
        let mut result = DocumentResult::new();
        result.pages = sample().pages;
        let json = JsonSerializer::new().serialize_result(&result).unwrap();
        assert!(json.contains("\"split_recommend\": {}"));
        assert!(json.contains("Hello"));
    }

    #[test]
    fn test_json_serializer_default() {
        let default = JsonSerializer::default();
        let new = JsonSerializer::new();
        assert_eq!(default, new);
    }
}
