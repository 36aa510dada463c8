//! Variant tags for serialized entities

use serde::{Deserialize, Serialize};

/// Discriminator written as the `type` key of every serialized entity.
///
/// Serializes as the bare variant name (`"Block"`, `"TextBox"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Plain normalized box
    Block,
    /// Box with recognized text
    TextBox,
    /// Reading line
    Line,
    /// Key side of a key-value relation
    Key,
    /// Value side of a key-value relation
    Value,
    /// Semantic document field
    Field,
    /// Raw table region
    Table,
}

impl std::fmt::Display for EntityKind {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Block => "Block",
            Self::TextBox => "TextBox",
            Self::Line => "Line",
            Self::Key => "Key",
            Self::Value => "Value",
            Self::Field => "Field",
            Self::Table => "Table",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "block" => Ok(Self::Block),
            "textbox" | "text_box" | "text-box" => Ok(Self::TextBox),
            "line" => Ok(Self::Line),
            "key" => Ok(Self::Key),
            "value" => Ok(Self::Value),
            "field" => Ok(Self::Field),
            "table" => Ok(Self::Table),
            _ => Err(format!("unknown entity kind: '{s}'")),
        }
    }
}

/// Attaches an [`EntityKind`] to a type at its definition.
pub trait Tagged {
    /// Tag emitted as `type` when the entity is serialized
    const KIND: EntityKind;
}
