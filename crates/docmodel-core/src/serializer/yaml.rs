//! YAML serialization for documents, pages and run results
//!
//! YAML is easier to read than JSON when inspecting a page by hand.

use crate::document::Document;
use crate::error::Result;
use crate::page::{Page, PixelBuffer};
use crate::result::DocumentResult;
use serde::Serialize;

/// Options for YAML serialization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct YamlOptions {
    /// Prefix the output with a `---` document marker (default: false)
    pub document_marker: bool,
}

/// YAML serializer for [`Document`], [`Page`] and [`DocumentResult`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct YamlSerializer {
    options: YamlOptions,
}

impl YamlSerializer {
    /// Create a new YAML serializer with default options
    #[inline]
    #[must_use = "creates serializer with default options"]
    pub const fn new() -> Self {
        Self {
            options: YamlOptions {
                document_marker: false,
            },
        }
    }

    /// Create a new YAML serializer with custom options
    #[inline]
    #[must_use = "creates serializer with custom options"]
    pub const fn with_options(options: YamlOptions) -> Self {
        Self { options }
    }

    /// Serialize a Document to YAML
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[must_use = "this function returns serialized YAML that should be used"]
    pub fn serialize_document<I: PixelBuffer>(&self, doc: &Document<I>) -> Result<String> {
        self.write(doc)
    }

    /// Serialize a single Page to YAML
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[must_use = "this function returns serialized YAML that should be used"]
    pub fn serialize_page<I: PixelBuffer>(&self, page: &Page<I>) -> Result<String> {
        self.write(page)
    }

    /// Serialize a run result to YAML
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[must_use = "this function returns serialized YAML that should be used"]
    pub fn serialize_result<I: PixelBuffer>(&self, result: &DocumentResult<I>) -> Result<String> {
        self.write(result)
    }

    fn write<T: Serialize + ?Sized>(&self, item: &T) -> Result<String> {
        let body = serde_yaml::to_string(item)?;
        if self.options.document_marker {
            Ok(format!("---\n{body}"))
        } else {
            Ok(body)
        }
    }
}
