//! # Docmodel Core - Layout and OCR Result Entities
//!
//! Entity model for the output of document layout analysis and OCR: normalized
//! boxes, recognized words with their characters, reading lines, semantic
//! fields, key-value relations, and the page, document and run-level
//! containers that collect them.
//!
//! Detection, recognition and classification models live outside this crate.
//! They produce boxes, text and labels; this crate keeps the derived geometry,
//! reading order, text and confidence consistent as those results are grouped.
//!
//! ## Quick Start
//!
//! ```rust
//! use docmodel_core::{
//!     Block, Document, Field, ImageSize, JsonSerializer, Line, Page, TextBox, TextGroup,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut page = Page::new(ImageSize::new(1240, 1754), 1);
//!
//!     // Words arrive from a recognizer in arbitrary order
//!     let doe = page.add_word(TextBox::new(Block::new(0.30, 0.10, 0.38, 0.12), "Doe", 0.97))?;
//!     let john = page.add_word(TextBox::new(Block::new(0.20, 0.10, 0.28, 0.12), "John", 0.99))?;
//!
//!     // Lines keep their members left to right
//!     let line = Line::from_textboxes([doe, john], &page.textboxes)?;
//!     assert_eq!(line.text(&page.textboxes)?, "John Doe");
//!     page.add_line(line);
//!
//!     // A classifier labels the words; the field picks up the labels
//!     page.textbox_mut(john)?.update_class("name", 0.9);
//!     page.textbox_mut(doe)?.update_class("name", 0.7);
//!     let mut field = Field::new(doe);
//!     field.add_textbox(john, &page.textboxes)?;
//!     assert_eq!(field.class_name(&page.textboxes)?, Some("name"));
//!     page.add_field(field);
//!
//!     let mut doc = Document::new().with_path("scan.png");
//!     doc.add_page(page);
//!     println!("{}", JsonSerializer::new().serialize_document(&doc)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Normalized geometry**: every [`Block`] is rounded to 3 decimals at construction
//! - **Shared words**: pages store words once in a [`TextBoxArena`]; lines, fields,
//!   keys and values hold [`TextBoxId`]s, so an edit is seen by every grouping
//! - **Reading order**: lines, keys and values sort by `xmin`; fields sort by `(ymin, xmin)`
//! - **Pluggable images**: pages accept any [`PixelBuffer`] (`image` buffers,
//!   `ndarray` arrays or bare [`ImageSize`] extents)
//! - **Portable output**: every entity serializes to a mapping tagged with a
//!   `type` key, through `serde` to JSON or YAML
//!
//! ## Entities
//!
//! | Entity | Contents | Order |
//! |--------|----------|-------|
//! | [`Block`] | `xmin`, `ymin`, `xmax`, `ymax` | - |
//! | [`TextBox`] | block, text, confidence, optional class, characters | characters by `xmin` |
//! | [`Line`] | text box ids | `xmin` |
//! | [`Key`] / [`Value`] | text box ids, own class, post-processed text | `xmin` |
//! | [`Field`] | text box ids across rows | `(ymin, xmin)` |
//! | [`Page`] | arena, words, groupings, tables, facts | insertion |
//! | [`Document`] | path, content type, pages | insertion |
//! | [`DocumentResult`] | run-level accumulation | insertion |
//!
//! ## Error Handling
//!
//! Grouping never fails on well-formed input. Errors report violated
//! preconditions such as empty aggregates, dangling ids or rejected inverted
//! boxes (see [`BoxValidation`]):
//!
//! ```rust
//! use docmodel_core::{Block, DocModelError, ImageSize, ModelOptions, Page, TextBox};
//!
//! let mut page = Page::with_options(ImageSize::new(100, 100), 1, ModelOptions::strict());
//! let inverted = TextBox::new(Block::new(0.6, 0.1, 0.2, 0.3), "?", 0.5);
//! assert!(matches!(
//!     page.add_word(inverted),
//!     Err(DocModelError::InvertedBox { .. })
//! ));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod page;
mod record;
pub mod result;
pub mod serializer;
pub mod types;

// Re-exports for convenience
pub use config::*;
pub use document::*;
pub use error::*;
pub use page::*;
pub use result::*;
pub use serializer::*;
pub use types::*;
