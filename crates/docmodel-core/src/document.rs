//! Document container
//!
//! A [`Document`] is an ordered list of [`Page`]s plus the source path and
//! content type. It serializes as `{path, content_type, pages}`.

use crate::page::{Page, PixelBuffer};
use image::DynamicImage;
use serde::Serialize;

/// Ordered pages of one input document.
///
/// # Examples
///
/// ```rust
/// use docmodel_core::{Document, ImageSize, Page};
///
/// let mut doc = Document::new()
///     .with_path("scans/invoice.pdf")
///     .with_content_type("application/pdf");
/// doc.add_page(Page::new(ImageSize::new(1240, 1754), 1));
///
/// let value = serde_json::to_value(&doc)?;
/// assert_eq!(value["path"], "scans/invoice.pdf");
/// assert_eq!(value["pages"][0]["width"], 1240);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "I: PixelBuffer"))]
pub struct Document<I = DynamicImage> {
    /// Source path (empty when unknown)
    pub path: String,
    /// MIME type of the source, if known
    pub content_type: Option<String>,
    /// Pages in document order
    pub pages: Vec<Page<I>>,
}

impl<I> Document<I> {
    /// Creates an empty document with no path and no content type.
    #[inline]
    #[must_use = "creates a new Document"]
    pub const fn new() -> Self {
        Self {
            path: String::new(),
            content_type: None,
            pages: Vec::new(),
        }
    }

    /// Sets the source path.
    #[inline]
    #[must_use = "returns the Document with a path"]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the content type.
    #[inline]
    #[must_use = "returns the Document with a content type"]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Appends a page. Pages keep insertion order.
    #[inline]
    pub fn add_page(&mut self, page: Page<I>) {
        self.pages.push(page);
    }

    /// Number of pages
    #[inline]
    pub fn num_pages(&self) -> usize {
        self.pages.len()
    }
}

impl<I> Default for Document<I> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
