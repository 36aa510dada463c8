//! Normalized bounding boxes
//!
//! Every coordinate handed to a [`Block`] is rounded to three decimal digits at
//! construction and only the rounded value is kept. All downstream geometry
//! (unions, reading-order sorts, serialized output) works on rounded values.

use crate::config::BoxValidation;
use crate::error::{DocModelError, Result};
use crate::types::kind::{EntityKind, Tagged};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of decimal digits kept for every normalized coordinate.
pub const COORD_DECIMALS: usize = 3;

/// Rounds a coordinate to [`COORD_DECIMALS`] decimal digits.
///
/// Rounding is decimal (`%.3f`) on the exact binary value, so `1.0005`, which is
/// stored as `1.000499...`, becomes `1.0` rather than `1.001`.
#[inline]
#[must_use = "returns the rounded coordinate"]
pub fn round_coord(value: f64) -> f64 {
    format!("{:.*}", COORD_DECIMALS, value)
        .parse()
        .unwrap_or(value)
}

/// Read access to an axis-aligned envelope, with derived geometry.
pub trait Extent {
    /// Left edge
    fn xmin(&self) -> f64;
    /// Top edge
    fn ymin(&self) -> f64;
    /// Right edge
    fn xmax(&self) -> f64;
    /// Bottom edge
    fn ymax(&self) -> f64;

    /// Horizontal midpoint
    #[inline]
    fn x_center(&self) -> f64 {
        (self.xmin() + self.xmax()) / 2.0
    }

    /// Vertical midpoint
    #[inline]
    fn y_center(&self) -> f64 {
        (self.ymin() + self.ymax()) / 2.0
    }

    /// `xmax - xmin`; negative for inverted boxes
    #[inline]
    fn width(&self) -> f64 {
        self.xmax() - self.xmin()
    }

    /// `ymax - ymin`; negative for inverted boxes
    #[inline]
    fn height(&self) -> f64 {
        self.ymax() - self.ymin()
    }

    /// `width * height`
    #[inline]
    fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Coordinates as `(xmin, ymin, xmax, ymax)`
    #[inline]
    fn coordinate(&self) -> (f64, f64, f64, f64) {
        (self.xmin(), self.ymin(), self.xmax(), self.ymax())
    }

    /// True when `xmin > xmax` or `ymin > ymax`
    #[inline]
    fn is_inverted(&self) -> bool {
        self.xmin() > self.xmax() || self.ymin() > self.ymax()
    }

    /// Copies the envelope into a standalone [`Block`]
    #[inline]
    fn bounds(&self) -> Block {
        Block::from_rounded(self.xmin(), self.ymin(), self.xmax(), self.ymax())
    }
}

/// Axis-aligned box normalized to `[0, 1]` relative to the page image.
///
/// The `[0, 1]` range is a convention of the callers and is not enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Block {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl Block {
    /// Creates a `Block`, rounding each coordinate to three decimals.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docmodel_core::{Block, Extent};
    ///
    /// let block = Block::new(0.12345, 0.2, 0.5, 0.6789);
    /// assert_eq!(block.coordinate(), (0.123, 0.2, 0.5, 0.679));
    /// ```
    #[inline]
    #[must_use = "creates a new Block with rounded coordinates"]
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self::from_rounded(
            round_coord(xmin),
            round_coord(ymin),
            round_coord(xmax),
            round_coord(ymax),
        )
    }

    /// Creates a `Block` and applies the given inverted-box policy.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::InvertedBox`] when `validation` is
    /// [`BoxValidation::Reject`] and the rounded box is inverted.
    pub fn checked(
        xmin: f64,
        ymin: f64,
        xmax: f64,
        ymax: f64,
        validation: BoxValidation,
    ) -> Result<Self> {
        let block = Self::new(xmin, ymin, xmax, ymax);
        block.validate(validation)?;
        Ok(block)
    }

    /// Normalizes a pixel-space rectangle against the page size, then rounds.
    ///
    /// A zero `width` or `height` yields non-finite coordinates.
    #[inline]
    #[must_use = "creates a new Block from pixel coordinates"]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_pixels(x0: f64, y0: f64, x1: f64, y1: f64, width: usize, height: usize) -> Self {
        let (w, h) = (width as f64, height as f64);
        Self::new(x0 / w, y0 / h, x1 / w, y1 / h)
    }

    /// Builds a block from values that are already rounded.
    #[inline]
    pub(crate) const fn from_rounded(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Checks this block against an inverted-box policy.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::InvertedBox`] for an inverted box under
    /// [`BoxValidation::Reject`].
    pub fn validate(&self, validation: BoxValidation) -> Result<()> {
        if !self.is_inverted() {
            return Ok(());
        }
        match validation {
            BoxValidation::Reject => Err(DocModelError::InvertedBox {
                xmin: self.xmin,
                ymin: self.ymin,
                xmax: self.xmax,
                ymax: self.ymax,
            }),
            BoxValidation::Permissive => {
                log::debug!("Accepting inverted box {:?}", self.coordinate());
                Ok(())
            }
        }
    }

    /// Smallest block enclosing both envelopes.
    #[inline]
    #[must_use = "returns the union envelope"]
    pub fn union(&self, other: &impl Extent) -> Self {
        Self::from_rounded(
            self.xmin.min(other.xmin()),
            self.ymin.min(other.ymin()),
            self.xmax.max(other.xmax()),
            self.ymax.max(other.ymax()),
        )
    }

    /// Converts back to pixel space for a page of the given size.
    #[inline]
    #[must_use = "returns pixel coordinates"]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_pixels(&self, width: usize, height: usize) -> (f64, f64, f64, f64) {
        let (w, h) = (width as f64, height as f64);
        (self.xmin * w, self.ymin * h, self.xmax * w, self.ymax * h)
    }
}

impl Extent for Block {
    #[inline]
    fn xmin(&self) -> f64 {
        self.xmin
    }

    #[inline]
    fn ymin(&self) -> f64 {
        self.ymin
    }

    #[inline]
    fn xmax(&self) -> f64 {
        self.xmax
    }

    #[inline]
    fn ymax(&self) -> f64 {
        self.ymax
    }
}

impl Tagged for Block {
    const KIND: EntityKind = EntityKind::Block;
}

// ============================================================================
// Serialization
// ============================================================================

#[derive(Serialize)]
struct BlockRecord {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    #[serde(rename = "type")]
    kind: EntityKind,
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        BlockRecord {
            xmin: self.xmin,
            ymin: self.ymin,
            xmax: self.xmax,
            ymax: self.ymax,
            kind: Self::KIND,
        }
        .serialize(serializer)
    }
}

/// Raw detector output; unknown keys such as `type` are ignored.
#[derive(Deserialize)]
struct RawBlock {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawBlock::deserialize(deserializer)?;
        Ok(Self::new(raw.xmin, raw.ymin, raw.xmax, raw.ymax))
    }
}
