//! Page-level container
//!
//! A [`Page`] owns the text box arena for one page together with every
//! grouping built over it. The page image stays external: the model only needs
//! its row and column extents, exposed through [`PixelBuffer`].

use crate::config::ModelOptions;
use crate::error::{DocModelError, Result};
use crate::record::{FieldRecord, GroupRecord};
use crate::types::{
    Block, Field, Key, Line, TableRegion, TextBox, TextBoxArena, TextBoxId, Value, ValueId,
};
use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;

// ============================================================================
// Pixel buffers
// ============================================================================

/// A 2D pixel buffer with row and column extents.
pub trait PixelBuffer {
    /// Number of pixel rows (image height)
    fn rows(&self) -> usize;

    /// Number of pixel columns (image width)
    fn cols(&self) -> usize;
}

impl PixelBuffer for DynamicImage {
    #[inline]
    fn rows(&self) -> usize {
        GenericImageView::dimensions(self).1 as usize
    }

    #[inline]
    fn cols(&self) -> usize {
        GenericImageView::dimensions(self).0 as usize
    }
}

impl<P, C> PixelBuffer for ImageBuffer<P, C>
where
    P: Pixel,
    C: Deref<Target = [P::Subpixel]>,
{
    #[inline]
    fn rows(&self) -> usize {
        self.height() as usize
    }

    #[inline]
    fn cols(&self) -> usize {
        self.width() as usize
    }
}

/// `H x W` or `H x W x C` arrays: the first axis is rows, the second columns.
impl<S, D> PixelBuffer for ndarray::ArrayBase<S, D>
where
    S: ndarray::RawData,
    D: ndarray::Dimension,
{
    #[inline]
    fn rows(&self) -> usize {
        self.shape().first().copied().unwrap_or(0)
    }

    #[inline]
    fn cols(&self) -> usize {
        self.shape().get(1).copied().unwrap_or(0)
    }
}

/// Bare page extents, for callers that keep the pixels elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// Pixel rows
    pub rows: usize,
    /// Pixel columns
    pub cols: usize,
}

impl ImageSize {
    /// Creates extents from a width and a height.
    #[inline]
    #[must_use = "creates a new ImageSize"]
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            rows: height,
            cols: width,
        }
    }
}

impl PixelBuffer for ImageSize {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }
}

impl<T: PixelBuffer + ?Sized> PixelBuffer for &T {
    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }
}

impl<T: PixelBuffer + ?Sized> PixelBuffer for Arc<T> {
    #[inline]
    fn rows(&self) -> usize {
        (**self).rows()
    }

    #[inline]
    fn cols(&self) -> usize {
        (**self).cols()
    }
}

// ============================================================================
// Page
// ============================================================================

/// One document page: its image, recognized words and their groupings.
///
/// Every grouping stores [`TextBoxId`]s into [`Page::textboxes`], so a word can
/// sit in the word list, a line, a field and a key at the same time. Editing it
/// through [`Page::textbox_mut`] is visible from all of them.
///
/// # Examples
///
/// ```rust
/// use docmodel_core::{Block, ImageSize, Line, Page, TextBox, TextGroup};
///
/// let mut page = Page::new(ImageSize::new(1000, 800), 1);
/// let hi = page.add_word(TextBox::new(Block::new(0.5, 0.1, 0.6, 0.15), "hi", 0.8))?;
/// let lo = page.add_word(TextBox::new(Block::new(0.1, 0.1, 0.2, 0.15), "lo", 0.6))?;
///
/// let line = Line::from_textboxes([hi, lo], &page.textboxes)?;
/// assert_eq!(line.text(&page.textboxes)?, "lo hi");
/// page.add_line(line);
///
/// assert_eq!(page.width(), 1000);
/// assert_eq!(page.doctype, "other");
/// # Ok::<(), docmodel_core::DocModelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Page<I = DynamicImage> {
    image: I,
    /// 1-based page number
    pub page_number: usize,
    /// Document type tag assigned by a classifier
    pub doctype: String,
    /// Storage for every text box on this page
    pub textboxes: TextBoxArena,
    /// Word-level boxes in detection order
    pub words: Vec<TextBoxId>,
    /// Reading lines
    pub lines: Vec<Line>,
    /// Lines grouped by the spatial dual-modality graph reasoner
    pub sdmgr_lines: Vec<Line>,
    /// Lines produced for key information extraction
    pub kie_lines: Vec<Line>,
    /// Semantic fields
    pub fields: Vec<Field>,
    /// Key side of key-value relations
    pub keys: Vec<Key>,
    /// Value side of key-value relations, linked from keys by [`ValueId`].
    /// Serialized on its own as well, so unlinked values are kept.
    pub values: Vec<Value>,
    /// Raw table regions
    pub tables: Vec<TableRegion>,
    /// Extracted single-valued facts
    pub single_values: BTreeMap<String, String>,
    /// Extracted multi-valued facts
    pub multi_values: BTreeMap<String, Vec<String>>,
    options: ModelOptions,
}

impl<I> Page<I> {
    /// Creates an empty page with default options.
    #[inline]
    #[must_use = "creates a new Page"]
    pub fn new(image: I, page_number: usize) -> Self {
        Self::with_options(image, page_number, ModelOptions::default())
    }

    /// Creates an empty page with the given options.
    #[must_use = "creates a new Page"]
    pub fn with_options(image: I, page_number: usize, options: ModelOptions) -> Self {
        Self {
            image,
            page_number,
            doctype: options.default_doctype.clone(),
            textboxes: TextBoxArena::new(),
            words: Vec::new(),
            lines: Vec::new(),
            sdmgr_lines: Vec::new(),
            kie_lines: Vec::new(),
            fields: Vec::new(),
            keys: Vec::new(),
            values: Vec::new(),
            tables: Vec::new(),
            single_values: BTreeMap::new(),
            multi_values: BTreeMap::new(),
            options,
        }
    }

    /// Page image
    #[inline]
    pub const fn image(&self) -> &I {
        &self.image
    }

    /// Options this page was created with
    #[inline]
    pub const fn options(&self) -> &ModelOptions {
        &self.options
    }

    /// Stores a word and appends it to [`Page::words`].
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::InvertedBox`] if the word's box is inverted and
    /// the page rejects inverted boxes.
    pub fn add_word(&mut self, textbox: TextBox) -> Result<TextBoxId> {
        let id = self.insert_textbox(textbox)?;
        self.words.push(id);
        Ok(id)
    }

    /// Stores a text box without listing it as a word.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::InvertedBox`] under a rejecting policy.
    pub fn insert_textbox(&mut self, textbox: TextBox) -> Result<TextBoxId> {
        textbox.block().validate(self.options.box_validation)?;
        Ok(self.textboxes.insert(textbox))
    }

    /// Looks up a text box.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownTextBox`] if `id` is not on this page.
    #[inline]
    pub fn textbox(&self, id: TextBoxId) -> Result<&TextBox> {
        self.textboxes.get(id)
    }

    /// Looks up a text box for editing.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownTextBox`] if `id` is not on this page.
    #[inline]
    pub fn textbox_mut(&mut self, id: TextBoxId) -> Result<&mut TextBox> {
        self.textboxes.get_mut(id)
    }

    /// Appends a reading line.
    #[inline]
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Appends a line from the graph-based grouping stage.
    #[inline]
    pub fn add_sdmgr_line(&mut self, line: Line) {
        self.sdmgr_lines.push(line);
    }

    /// Appends a key information extraction line.
    #[inline]
    pub fn add_kie_line(&mut self, line: Line) {
        self.kie_lines.push(line);
    }

    /// Appends a field.
    #[inline]
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Appends a key.
    #[inline]
    pub fn add_key(&mut self, key: Key) {
        self.keys.push(key);
    }

    /// Stores a value and returns the id keys link it by.
    #[inline]
    pub fn add_value(&mut self, value: Value) -> ValueId {
        self.values.push(value);
        ValueId::new(self.values.len() - 1)
    }

    /// Looks up a value.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownValue`] if `id` is not on this page.
    #[inline]
    pub fn value(&self, id: ValueId) -> Result<&Value> {
        self.values
            .get(id.index())
            .ok_or(DocModelError::UnknownValue(id))
    }

    /// Resolves a key's linked values in link order.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownValue`] for the first dangling link.
    pub fn key_values(&self, key: &Key) -> Result<Vec<&Value>> {
        key.values().iter().map(|&id| self.value(id)).collect()
    }

    /// Appends a table region.
    #[inline]
    pub fn add_table(&mut self, table: TableRegion) {
        self.tables.push(table);
    }

    /// Sets a single-valued fact, returning the previous value.
    #[inline]
    pub fn set_single_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.single_values.insert(name.into(), value.into())
    }

    /// Appends to a multi-valued fact.
    #[inline]
    pub fn push_multi_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.multi_values
            .entry(name.into())
            .or_default()
            .push(value.into());
    }
}

impl<I: PixelBuffer> Page<I> {
    /// Image width in pixels (columns)
    #[inline]
    pub fn width(&self) -> usize {
        self.image.cols()
    }

    /// Image height in pixels (rows)
    #[inline]
    pub fn height(&self) -> usize {
        self.image.rows()
    }

    /// Normalizes a pixel-space rectangle against this page's image.
    #[inline]
    #[must_use = "creates a new Block from pixel coordinates"]
    pub fn block_from_pixels(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Block {
        Block::from_pixels(x0, y0, x1, y1, self.width(), self.height())
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[derive(Serialize)]
struct PageRecord<'a> {
    page_number: usize,
    width: usize,
    height: usize,
    doctype: &'a str,
    words: Vec<&'a TextBox>,
    lines: Vec<GroupRecord<'a>>,
    sdmgr_lines: Vec<GroupRecord<'a>>,
    kie_lines: Vec<GroupRecord<'a>>,
    fields: Vec<FieldRecord<'a>>,
    keys: Vec<GroupRecord<'a>>,
    values: Vec<GroupRecord<'a>>,
    tables: &'a [TableRegion],
    single_values: &'a BTreeMap<String, String>,
    multi_values: &'a BTreeMap<String, Vec<String>>,
}

impl<'a> PageRecord<'a> {
    fn new<I: PixelBuffer>(page: &'a Page<I>) -> Result<Self> {
        let arena = &page.textboxes;
        let lines = |lines: &'a [Line]| {
            lines
                .iter()
                .map(|line| GroupRecord::line(line, arena))
                .collect::<Result<Vec<_>>>()
        };
        Ok(Self {
            page_number: page.page_number,
            width: page.width(),
            height: page.height(),
            doctype: &page.doctype,
            words: arena.resolve(&page.words)?,
            lines: lines(&page.lines)?,
            sdmgr_lines: lines(&page.sdmgr_lines)?,
            kie_lines: lines(&page.kie_lines)?,
            fields: page
                .fields
                .iter()
                .map(|field| FieldRecord::new(field, arena))
                .collect::<Result<_>>()?,
            keys: page
                .keys
                .iter()
                .map(|key| GroupRecord::key(key, arena, &page.values))
                .collect::<Result<_>>()?,
            values: page
                .values
                .iter()
                .map(|value| GroupRecord::value(value, arena))
                .collect::<Result<_>>()?,
            tables: &page.tables,
            single_values: &page.single_values,
            multi_values: &page.multi_values,
        })
    }
}

impl<I: PixelBuffer> Serialize for Page<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::Error as _;

        let record = PageRecord::new(self).map_err(S::Error::custom)?;
        log::trace!(
            "Serializing page {} ({} words, {} lines, {} fields, {} keys)",
            self.page_number,
            record.words.len(),
            record.lines.len(),
            record.fields.len(),
            record.keys.len()
        );
        record.serialize(serializer)
    }
}
