//! Error types for entity construction, aggregation and serialization.
//!
//! The model raises no errors during normal grouping. Every variant here is a
//! violated precondition (an empty aggregate, a dangling id) or a failure
//! bubbled up from a serializer.

use crate::types::{TextBoxId, ValueId};
use thiserror::Error;

/// Error types that can occur while building or serializing the entity graph.
///
/// # Examples
///
/// ```rust
/// use docmodel_core::{Block, BoxValidation, DocModelError};
///
/// let inverted = Block::checked(0.5, 0.1, 0.2, 0.3, BoxValidation::Reject);
/// match inverted {
///     Err(DocModelError::InvertedBox { xmin, xmax, .. }) => assert!(xmin > xmax),
///     _ => panic!("expected InvertedBox"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum DocModelError {
    /// A mean or envelope was requested over an aggregate with no members.
    ///
    /// Construction always seeds at least one member, so this only occurs
    /// when the caller bypasses the constructors.
    #[error("Empty aggregate: cannot compute {0} over zero members")]
    EmptyAggregate(&'static str),

    /// A box with `xmin > xmax` or `ymin > ymax` under [`BoxValidation::Reject`].
    ///
    /// [`BoxValidation::Reject`]: crate::config::BoxValidation::Reject
    #[error("Inverted box: ({xmin}, {ymin}, {xmax}, {ymax})")]
    InvertedBox {
        /// Rounded left coordinate
        xmin: f64,
        /// Rounded top coordinate
        ymin: f64,
        /// Rounded right coordinate
        xmax: f64,
        /// Rounded bottom coordinate
        ymax: f64,
    },

    /// A text box id that does not resolve in the arena it was used with.
    #[error("Unknown text box: {0}")]
    UnknownTextBox(TextBoxId),

    /// A value id that does not resolve in the page's value list.
    #[error("Unknown value: {0}")]
    UnknownValue(ValueId),

    /// A field score was requested but a member carries no classification.
    #[error("Missing classification on text box {0}")]
    MissingClassification(TextBoxId),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Type alias for [`Result<T, DocModelError>`].
pub type Result<T> = std::result::Result<T, DocModelError>;
