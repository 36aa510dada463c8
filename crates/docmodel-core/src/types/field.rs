//! Semantic document fields
//!
//! A field can span several visual lines, so its members are kept in row-major
//! order: by `ymin`, then by `xmin`.

use crate::error::{DocModelError, Result};
use crate::types::arena::{TextBoxArena, TextBoxId};
use crate::types::group::{mean, TextGroup};
use crate::types::kind::{EntityKind, Tagged};

/// Text boxes forming one semantic field, possibly across rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    textboxes: Vec<TextBoxId>,
}

impl Field {
    /// Starts a field from its first member.
    #[inline]
    #[must_use = "creates a new Field"]
    pub fn new(first: TextBoxId) -> Self {
        Self {
            textboxes: vec![first],
        }
    }

    /// Appends a member and re-sorts all members by `(ymin, xmin)`.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownTextBox`] if `id` is not in `arena`;
    /// the field is left unchanged.
    pub fn add_textbox(&mut self, id: TextBoxId, arena: &TextBoxArena) -> Result<()> {
        arena.get(id)?;
        self.textboxes.push(id);
        arena.sort_by_row(&mut self.textboxes)
    }

    /// Merges another field's members into this one and re-sorts.
    ///
    /// `other` keeps its own members; both fields then reference the same boxes.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownTextBox`] if any of `other`'s members is
    /// not in `arena`; the field is left unchanged.
    pub fn add_other(&mut self, other: &Self, arena: &TextBoxArena) -> Result<()> {
        arena.resolve(&other.textboxes)?;
        self.textboxes.extend_from_slice(&other.textboxes);
        log::debug!(
            "Merged field of {} boxes into field of {} boxes",
            other.textboxes.len(),
            self.textboxes.len() - other.textboxes.len()
        );
        arena.sort_by_row(&mut self.textboxes)
    }

    /// Number of members
    #[inline]
    pub fn len(&self) -> usize {
        self.textboxes.len()
    }

    /// Always false for fields built through the public constructors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textboxes.is_empty()
    }

    /// Label of the first member in `(ymin, xmin)` order.
    ///
    /// This is a positional pick, not a vote; `None` when that member is
    /// unclassified.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::EmptyAggregate`] for an empty field and
    /// [`DocModelError::UnknownTextBox`] if the first member is not in `arena`.
    pub fn class_name<'a>(&self, arena: &'a TextBoxArena) -> Result<Option<&'a str>> {
        let first = self
            .textboxes
            .first()
            .ok_or(DocModelError::EmptyAggregate("class name"))?;
        Ok(arena.get(*first)?.class_name())
    }

    /// Mean classification score over all members.
    ///
    /// Every member counts, including members whose label differs from
    /// [`Field::class_name`].
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::MissingClassification`] if a member is
    /// unclassified and [`DocModelError::EmptyAggregate`] for an empty field.
    pub fn class_score(&self, arena: &TextBoxArena) -> Result<f64> {
        let scores = self
            .textboxes
            .iter()
            .map(|&id| {
                arena
                    .get(id)?
                    .class_score()
                    .ok_or(DocModelError::MissingClassification(id))
            })
            .collect::<Result<Vec<f64>>>()?;
        mean(scores.into_iter(), "class score")
    }
}

impl Tagged for Field {
    const KIND: EntityKind = EntityKind::Field;
}

impl TextGroup for Field {
    #[inline]
    fn members(&self) -> &[TextBoxId] {
        &self.textboxes
    }
}
