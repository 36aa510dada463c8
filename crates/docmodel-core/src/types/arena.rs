//! Page-local storage for text boxes
//!
//! A word can belong to the page's word list, a line, a field and a key at the
//! same time. Instead of sharing pointers, every grouping stores [`TextBoxId`]s
//! into one [`TextBoxArena`]; an edit made through the arena is seen by every
//! grouping that holds the id.

use crate::error::{DocModelError, Result};
use crate::types::block::Extent;
use crate::types::textbox::TextBox;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Stable index of a [`TextBox`] inside a [`TextBoxArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextBoxId(usize);

impl TextBoxId {
    /// Wraps a raw arena index.
    #[inline]
    #[must_use = "creates a TextBoxId"]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw arena index
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for TextBoxId {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Append-only store of text boxes. Ids are never invalidated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBoxArena {
    boxes: Vec<TextBox>,
}

impl TextBoxArena {
    /// Creates an empty arena.
    #[inline]
    #[must_use = "creates an empty arena"]
    pub const fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Stores a text box and returns its id.
    #[inline]
    pub fn insert(&mut self, textbox: TextBox) -> TextBoxId {
        self.boxes.push(textbox);
        TextBoxId(self.boxes.len() - 1)
    }

    /// Looks up a text box.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownTextBox`] if the id is out of range.
    #[inline]
    pub fn get(&self, id: TextBoxId) -> Result<&TextBox> {
        self.boxes
            .get(id.0)
            .ok_or(DocModelError::UnknownTextBox(id))
    }

    /// Looks up a text box for editing.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownTextBox`] if the id is out of range.
    #[inline]
    pub fn get_mut(&mut self, id: TextBoxId) -> Result<&mut TextBox> {
        self.boxes
            .get_mut(id.0)
            .ok_or(DocModelError::UnknownTextBox(id))
    }

    /// Returns true if the id resolves in this arena.
    #[inline]
    pub fn contains(&self, id: TextBoxId) -> bool {
        id.0 < self.boxes.len()
    }

    /// Number of stored boxes
    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true if nothing is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Iterates over `(id, box)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (TextBoxId, &TextBox)> {
        self.boxes
            .iter()
            .enumerate()
            .map(|(index, textbox)| (TextBoxId(index), textbox))
    }

    /// Resolves a list of ids, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`DocModelError::UnknownTextBox`] for the first id that does not resolve.
    pub fn resolve(&self, ids: &[TextBoxId]) -> Result<Vec<&TextBox>> {
        ids.iter().map(|&id| self.get(id)).collect()
    }

    /// Stably re-sorts `ids` ascending by the boxes' `xmin`.
    pub(crate) fn sort_by_column(&self, ids: &mut [TextBoxId]) -> Result<()> {
        self.reorder(ids, |a, b| a.xmin().total_cmp(&b.xmin()))
    }

    /// Stably re-sorts `ids` ascending by the boxes' `(ymin, xmin)`.
    pub(crate) fn sort_by_row(&self, ids: &mut [TextBoxId]) -> Result<()> {
        self.reorder(ids, |a, b| {
            a.ymin()
                .total_cmp(&b.ymin())
                .then(a.xmin().total_cmp(&b.xmin()))
        })
    }

    /// Reorders ids only; the boxes themselves never move.
    fn reorder<F>(&self, ids: &mut [TextBoxId], compare: F) -> Result<()>
    where
        F: Fn(&TextBox, &TextBox) -> Ordering,
    {
        let mut keyed = ids
            .iter()
            .map(|&id| self.get(id).map(|textbox| (id, textbox)))
            .collect::<Result<Vec<_>>>()?;
        keyed.sort_by(|(_, a), (_, b)| compare(a, b));
        for (slot, (id, _)) in ids.iter_mut().zip(keyed) {
            *slot = id;
        }
        log::trace!("Re-sorted {} text box ids", ids.len());
        Ok(())
    }
}
