//! Model options
//!
//! The entity model has two configurable decisions: what to do with boxes whose
//! corners are inverted, and which document-type tag a fresh page carries.

use serde::{Deserialize, Serialize};

/// Doctype assigned to pages before any classifier has run.
pub const DEFAULT_DOCTYPE: &str = "other";

/// Policy applied to boxes with `xmin > xmax` or `ymin > ymax`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxValidation {
    /// Accept the box as-is; width/height come out negative
    #[default]
    Permissive,
    /// Fail with [`DocModelError::InvertedBox`](crate::DocModelError::InvertedBox)
    Reject,
}

impl std::fmt::Display for BoxValidation {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Permissive => "permissive",
            Self::Reject => "reject",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for BoxValidation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "permissive" | "pass" | "passthrough" | "pass-through" => Ok(Self::Permissive),
            "reject" | "strict" => Ok(Self::Reject),
            _ => Err(format!(
                "Unknown box validation '{s}'. Expected: permissive, reject"
            )),
        }
    }
}

/// Options shared by every page of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    /// Inverted box policy applied by [`Page::add_word`](crate::Page::add_word)
    pub box_validation: BoxValidation,
    /// Doctype tag for new pages (default: `"other"`)
    pub default_doctype: String,
}

impl Default for ModelOptions {
    #[inline]
    fn default() -> Self {
        Self {
            box_validation: BoxValidation::Permissive,
            default_doctype: DEFAULT_DOCTYPE.to_string(),
        }
    }
}

impl ModelOptions {
    /// Options that reject inverted boxes.
    #[inline]
    #[must_use = "creates strict model options"]
    pub fn strict() -> Self {
        Self {
            box_validation: BoxValidation::Reject,
            ..Self::default()
        }
    }
}
