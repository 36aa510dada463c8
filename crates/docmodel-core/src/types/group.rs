//! Reading-order aggregates: lines and key/value relations
//!
//! [`Line`], [`Key`] and [`Value`] keep their members sorted left to right by
//! `xmin`. They are separate types on purpose: keys and values carry their own
//! id and classification defaults and never go through `Line` construction.
//! The derived text, confidence and envelope are shared through [`TextGroup`].

use crate::error::{DocModelError, Result};
use crate::types::arena::{TextBoxArena, TextBoxId};
use crate::types::block::{Block, Extent};
use crate::types::kind::{EntityKind, Tagged};
use crate::types::textbox::TextBox;
use serde::{Deserialize, Serialize};

/// Score a key or value carries until a classifier overwrites it.
pub const DEFAULT_GROUP_SCORE: f64 = 1.0;

/// Computations shared by every aggregate of text boxes.
///
/// Members are stored as ids, so each computation resolves them against the
/// page's [`TextBoxArena`].
pub trait TextGroup: Tagged {
    /// Member ids in the aggregate's reading order
    fn members(&self) -> &[TextBoxId];

    /// Resolves the members in reading order.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownTextBox`] if a member is not in `arena`.
    fn textboxes<'a>(&self, arena: &'a TextBoxArena) -> Result<Vec<&'a TextBox>> {
        arena.resolve(self.members())
    }

    /// Member texts joined by single spaces, trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownTextBox`] if a member is not in `arena`.
    fn text(&self, arena: &TextBoxArena) -> Result<String> {
        let boxes = self.textboxes(arena)?;
        Ok(join_words(&boxes))
    }

    /// Arithmetic mean of member confidences.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::EmptyAggregate`] when there are no members.
    fn conf(&self, arena: &TextBoxArena) -> Result<f64> {
        let boxes = self.textboxes(arena)?;
        mean(boxes.iter().map(|t| t.confidence), "confidence")
    }

    /// Element-wise min/max envelope of the members.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::EmptyAggregate`] when there are no members.
    fn envelope(&self, arena: &TextBoxArena) -> Result<Block> {
        let boxes = self.textboxes(arena)?;
        union_all(&boxes)
    }
}

// ============================================================================
// Shared aggregation helpers
// ============================================================================

pub(crate) fn join_words(boxes: &[&TextBox]) -> String {
    boxes
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean(values: impl Iterator<Item = f64>, what: &'static str) -> Result<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return Err(DocModelError::EmptyAggregate(what));
    }
    Ok(sum / count as f64)
}

pub(crate) fn union_all(boxes: &[&TextBox]) -> Result<Block> {
    let (first, rest) = boxes
        .split_first()
        .ok_or(DocModelError::EmptyAggregate("envelope"))?;
    Ok(rest
        .iter()
        .fold(first.bounds(), |envelope, t| envelope.union(*t)))
}

/// Appends `id` and re-sorts the whole list left to right.
fn insert_by_column(
    members: &mut Vec<TextBoxId>,
    id: TextBoxId,
    arena: &TextBoxArena,
) -> Result<()> {
    arena.get(id)?;
    members.push(id);
    arena.sort_by_column(members)
}

// ============================================================================
// Line
// ============================================================================

/// One reading line: text boxes ordered left to right. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Optional external identifier
    pub id: Option<String>,
    textboxes: Vec<TextBoxId>,
    /// Class label (unset by default, never derived from members)
    pub class_name: Option<String>,
    /// Class score (defaults to [`DEFAULT_GROUP_SCORE`])
    pub class_score: f64,
}

impl Line {
    /// Starts a line from its first member.
    #[inline]
    #[must_use = "creates a new Line"]
    pub fn new(first: TextBoxId) -> Self {
        Self {
            id: None,
            textboxes: vec![first],
            class_name: None,
            class_score: DEFAULT_GROUP_SCORE,
        }
    }

    /// Sets the external identifier.
    #[inline]
    #[must_use = "returns the Line with an id"]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builds a line from several members at once.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::EmptyAggregate`] for an empty input and
    /// [`DocModelError::UnknownTextBox`] for ids not in `arena`.
    pub fn from_textboxes(
        ids: impl IntoIterator<Item = TextBoxId>,
        arena: &TextBoxArena,
    ) -> Result<Self> {
        let mut ids = ids.into_iter();
        let first = ids.next().ok_or(DocModelError::EmptyAggregate("line"))?;
        arena.get(first)?;
        let mut line = Self::new(first);
        for id in ids {
            line.add_textbox(id, arena)?;
        }
        Ok(line)
    }

    /// Appends a member and re-sorts all members by `xmin`.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownTextBox`] if `id` is not in `arena`;
    /// the line is left unchanged.
    pub fn add_textbox(&mut self, id: TextBoxId, arena: &TextBoxArena) -> Result<()> {
        insert_by_column(&mut self.textboxes, id, arena)
    }

    /// Assigns the line's own classification.
    #[inline]
    pub fn update_class(&mut self, label: impl Into<String>, score: f64) {
        self.class_name = Some(label.into());
        self.class_score = score;
    }

    /// Number of members
    #[inline]
    pub fn len(&self) -> usize {
        self.textboxes.len()
    }

    /// Always false for lines built through the public constructors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textboxes.is_empty()
    }
}

impl Tagged for Line {
    const KIND: EntityKind = EntityKind::Line;
}

impl TextGroup for Line {
    #[inline]
    fn members(&self) -> &[TextBoxId] {
        &self.textboxes
    }
}

// ============================================================================
// Key / Value
// ============================================================================

/// Index of a [`Value`] in its page's value list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueId(usize);

impl ValueId {
    /// Wraps a raw value index.
    #[inline]
    #[must_use = "creates a ValueId"]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw value index
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ValueId {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Key side of a key-value relation, with links to its values.
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    /// Optional external identifier (unset by default)
    pub id: Option<String>,
    textboxes: Vec<TextBoxId>,
    values: Vec<ValueId>,
    /// Externally corrected text (empty until a post-processor fills it)
    pub text_postprocess: String,
    /// Class label (unset by default, never derived from members)
    pub class_name: Option<String>,
    /// Class score (defaults to [`DEFAULT_GROUP_SCORE`])
    pub class_score: f64,
}

impl Key {
    /// Starts a key from its first member.
    #[inline]
    #[must_use = "creates a new Key"]
    pub fn new(first: TextBoxId) -> Self {
        Self {
            id: None,
            textboxes: vec![first],
            values: Vec::new(),
            text_postprocess: String::new(),
            class_name: None,
            class_score: DEFAULT_GROUP_SCORE,
        }
    }

    /// Sets the external identifier.
    #[inline]
    #[must_use = "returns the Key with an id"]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Appends a member and re-sorts all members by `xmin`.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownTextBox`] if `id` is not in `arena`.
    pub fn add_textbox(&mut self, id: TextBoxId, arena: &TextBoxArena) -> Result<()> {
        insert_by_column(&mut self.textboxes, id, arena)
    }

    /// Links a value. Links keep insertion order and may repeat.
    #[inline]
    pub fn add_value(&mut self, value: ValueId) {
        self.values.push(value);
    }

    /// Linked values in insertion order
    #[inline]
    pub fn values(&self) -> &[ValueId] {
        &self.values
    }

    /// Assigns the key's own classification.
    #[inline]
    pub fn update_class(&mut self, label: impl Into<String>, score: f64) {
        self.class_name = Some(label.into());
        self.class_score = score;
    }
}

impl Tagged for Key {
    const KIND: EntityKind = EntityKind::Key;
}

impl TextGroup for Key {
    #[inline]
    fn members(&self) -> &[TextBoxId] {
        &self.textboxes
    }
}

/// Value side of a key-value relation. Has no outgoing links.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    /// Optional external identifier (unset by default)
    pub id: Option<String>,
    textboxes: Vec<TextBoxId>,
    /// Externally corrected text (empty until a post-processor fills it)
    pub text_postprocess: String,
    /// Class label (unset by default, never derived from members)
    pub class_name: Option<String>,
    /// Class score (defaults to [`DEFAULT_GROUP_SCORE`])
    pub class_score: f64,
}

impl Value {
    /// Starts a value from its first member.
    #[inline]
    #[must_use = "creates a new Value"]
    pub fn new(first: TextBoxId) -> Self {
        Self {
            id: None,
            textboxes: vec![first],
            text_postprocess: String::new(),
            class_name: None,
            class_score: DEFAULT_GROUP_SCORE,
        }
    }

    /// Sets the external identifier.
    #[inline]
    #[must_use = "returns the Value with an id"]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Appends a member and re-sorts all members by `xmin`.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownTextBox`] if `id` is not in `arena`.
    pub fn add_textbox(&mut self, id: TextBoxId, arena: &TextBoxArena) -> Result<()> {
        insert_by_column(&mut self.textboxes, id, arena)
    }

    /// Assigns the value's own classification.
    #[inline]
    pub fn update_class(&mut self, label: impl Into<String>, score: f64) {
        self.class_name = Some(label.into());
        self.class_score = score;
    }
}

impl Tagged for Value {
    const KIND: EntityKind = EntityKind::Value;
}

impl TextGroup for Value {
    #[inline]
    fn members(&self) -> &[TextBoxId] {
        &self.textboxes
    }
}
