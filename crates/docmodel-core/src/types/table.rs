//! Raw table regions

use crate::types::block::{Block, Extent};
use crate::types::kind::{EntityKind, Tagged};
use serde::{Serialize, Serializer};

/// A detected table region. Cell structure is produced elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRegion {
    /// Region envelope
    pub block: Block,
    /// Detector or classifier label, if any
    pub label: Option<String>,
    /// Detection confidence, if any
    pub confidence: Option<f64>,
}

impl TableRegion {
    /// Creates an unlabeled region.
    #[inline]
    #[must_use = "creates a new TableRegion"]
    pub const fn new(block: Block) -> Self {
        Self {
            block,
            label: None,
            confidence: None,
        }
    }

    /// Sets the detection confidence.
    #[inline]
    #[must_use = "returns the TableRegion with a confidence"]
    pub const fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Sets the label.
    #[inline]
    #[must_use = "returns the TableRegion with a label"]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Extent for TableRegion {
    #[inline]
    fn xmin(&self) -> f64 {
        self.block.xmin()
    }

    #[inline]
    fn ymin(&self) -> f64 {
        self.block.ymin()
    }

    #[inline]
    fn xmax(&self) -> f64 {
        self.block.xmax()
    }

    #[inline]
    fn ymax(&self) -> f64 {
        self.block.ymax()
    }
}

impl Tagged for TableRegion {
    const KIND: EntityKind = EntityKind::Table;
}

#[derive(Serialize)]
struct TableRecord<'a> {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    #[serde(rename = "type")]
    kind: EntityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f64>,
}

impl Serialize for TableRegion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TableRecord {
            xmin: self.xmin(),
            ymin: self.ymin(),
            xmax: self.xmax(),
            ymax: self.ymax(),
            kind: Self::KIND,
            label: self.label.as_deref(),
            confidence: self.confidence,
        }
        .serialize(serializer)
    }
}
