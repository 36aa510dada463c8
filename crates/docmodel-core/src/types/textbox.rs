//! Recognized text regions and their character sub-boxes

use crate::types::block::{Block, Extent};
use crate::types::kind::{EntityKind, Tagged};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Label assigned by an external classifier, with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Class label (serialized as `classId`)
    pub label: String,
    /// Classifier score (serialized as `classConfidence`)
    pub score: f64,
}

impl Classification {
    /// Creates a new classification.
    #[inline]
    #[must_use = "creates a new Classification"]
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// One recognized character merged into a parent [`TextBox`].
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    /// Character envelope
    pub block: Block,
    /// Recognized text (usually one grapheme, may be whitespace)
    pub text: String,
    /// Recognition confidence
    pub confidence: f64,
}

impl Character {
    /// Creates a new character box.
    #[inline]
    #[must_use = "creates a new Character"]
    pub fn new(block: Block, text: impl Into<String>, confidence: f64) -> Self {
        Self {
            block,
            text: text.into(),
            confidence,
        }
    }
}

impl Extent for Character {
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

impl From<TextBox> for Character {
    #[inline]
    fn from(textbox: TextBox) -> Self {
        Self {
            block: textbox.block,
            text: textbox.text,
            confidence: textbox.confidence,
        }
    }
}

/// A recognized text region: a [`Block`] plus recognition and classification output.
///
/// Once characters are added with [`TextBox::add_char`], the envelope grows to
/// cover them and `text` is rebuilt from them.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    block: Block,
    /// Optional external identifier
    pub id: Option<String>,
    /// Recognized text
    pub text: String,
    /// Text before any correction, when a corrector ran
    pub raw_text: String,
    /// Recognition confidence
    pub confidence: f64,
    /// Language tag (empty when unknown)
    pub language: String,
    /// Free-form annotations from upstream stages
    pub metadata: BTreeMap<String, serde_json::Value>,
    classification: Option<Classification>,
    characters: Vec<Character>,
}

impl TextBox {
    /// Wraps a detected block with recognized text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use docmodel_core::{Block, TextBox};
    ///
    /// let mut word = TextBox::new(Block::new(0.0, 0.0, 0.5, 0.5), "ab", 0.9);
    /// word.update_class("name", 0.8);
    /// assert_eq!(word.class_name(), Some("name"));
    /// ```
    #[inline]
    #[must_use = "creates a new TextBox"]
    pub fn new(block: Block, text: impl Into<String>, confidence: f64) -> Self {
        Self {
            block,
            id: None,
            text: text.into(),
            raw_text: String::new(),
            confidence,
            language: String::new(),
            metadata: BTreeMap::new(),
            classification: None,
            characters: Vec::new(),
        }
    }

    /// Sets the external identifier.
    #[inline]
    #[must_use = "returns the TextBox with an id"]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the language tag.
    #[inline]
    #[must_use = "returns the TextBox with a language"]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Current envelope
    #[inline]
    pub const fn block(&self) -> &Block {
        &self.block
    }

    /// Classification, if one was assigned
    #[inline]
    pub const fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    /// Class label, if classified
    #[inline]
    pub fn class_name(&self) -> Option<&str> {
        self.classification.as_ref().map(|c| c.label.as_str())
    }

    /// Class score, if classified
    #[inline]
    pub fn class_score(&self) -> Option<f64> {
        self.classification.as_ref().map(|c| c.score)
    }

    /// Characters in ascending `xmin` order
    #[inline]
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Assigns a classification. The last call wins.
    #[inline]
    pub fn update_class(&mut self, label: impl Into<String>, score: f64) {
        self.classification = Some(Classification::new(label, score));
    }

    /// Drops any assigned classification.
    #[inline]
    pub fn clear_class(&mut self) {
        self.classification = None;
    }

    /// Merges a character into this box.
    ///
    /// The envelope becomes the union with the character's envelope, the
    /// character list is stably re-sorted by `xmin` and `text` is rebuilt as
    /// the separator-free concatenation of all characters, trimmed.
    pub fn add_char(&mut self, character: Character) {
        self.block = self.block.union(&character);
        self.characters.push(character);
        self.characters.sort_by(|a, b| a.xmin().total_cmp(&b.xmin()));
        self.text = self
            .characters
            .iter()
            .map(|c| c.text.as_str())
            .collect::<String>()
            .trim()
            .to_string();
    }
}

impl Extent for TextBox {
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

impl Tagged for TextBox {
    const KIND: EntityKind = EntityKind::TextBox;
}

// ============================================================================
// Serialization
// ============================================================================

#[derive(Serialize)]
struct TextBoxRecord<'a> {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    #[serde(rename = "type")]
    kind: EntityKind,
    text: &'a str,
    confidence: f64,
    #[serde(rename = "classId", skip_serializing_if = "Option::is_none")]
    class_id: Option<&'a str>,
    #[serde(rename = "classConfidence", skip_serializing_if = "Option::is_none")]
    class_confidence: Option<f64>,
}

impl Serialize for TextBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TextBoxRecord {
            xmin: self.xmin(),
            ymin: self.ymin(),
            xmax: self.xmax(),
            ymax: self.ymax(),
            kind: Self::KIND,
            text: &self.text,
            confidence: self.confidence,
            class_id: self.class_name(),
            class_confidence: self.class_score(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ch(xmin: f64, xmax: f64, text: &str) -> Character {
        Character::new(Block::new(xmin, 0.1, xmax, 0.2), text, 0.9)
    }

    #[test]
    fn test_textbox_creation() {
        let word = TextBox::new(Block::new(0.0, 0.0, 0.5, 0.5), "ab", 0.9)
            .with_id("w0")
            .with_language("en");
        assert_eq!(word.text, "ab");
        assert_eq!(word.id.as_deref(), Some("w0"));
        assert_eq!(word.language, "en");
        assert!(word.classification().is_none());
        assert!(word.characters().is_empty());
    }

    #[test]
    fn test_update_class_last_write_wins() {
        let mut word = TextBox::new(Block::new(0.0, 0.0, 0.5, 0.5), "ab", 0.9);
        word.update_class("name", 0.8);
        word.update_class("date", 0.6);
        assert_eq!(word.class_name(), Some("date"));
        assert_eq!(word.class_score(), Some(0.6));

        word.clear_class();
        assert!(word.class_name().is_none());
    }

    #[test]
    fn test_add_char_expands_envelope() {
        let mut word = TextBox::new(Block::new(0.3, 0.15, 0.4, 0.18), "", 0.9);
        word.add_char(ch(0.1, 0.2, "a"));
        assert_eq!(word.coordinate(), (0.1, 0.1, 0.4, 0.2));
    }

    #[test]
    fn test_add_char_sorts_and_joins() {
        let mut word = TextBox::new(Block::new(0.1, 0.1, 0.2, 0.2), "", 0.9);
        word.add_char(ch(0.5, 0.6, "c"));
        word.add_char(ch(0.1, 0.2, "a"));
        assert_eq!(word.text, "ac");

        word.add_char(ch(0.3, 0.4, "b"));
        assert_eq!(word.text, "abc");
        let xmins: Vec<f64> = word.characters().iter().map(Extent::xmin).collect();
        assert_eq!(xmins, vec![0.1, 0.3, 0.5]);
    }

    #[test]
    fn test_add_char_trims_but_keeps_inner_spaces() {
        let mut word = TextBox::new(Block::new(0.1, 0.1, 0.2, 0.2), "", 0.9);
        word.add_char(ch(0.1, 0.15, " "));
        word.add_char(ch(0.2, 0.25, "a"));
        word.add_char(ch(0.3, 0.35, " "));
        word.add_char(ch(0.4, 0.45, "b"));
        word.add_char(ch(0.5, 0.55, " "));
        assert_eq!(word.text, "a b");
    }

    #[test]
    fn test_add_char_replaces_initial_text() {
        let mut word = TextBox::new(Block::new(0.1, 0.1, 0.2, 0.2), "stale", 0.9);
        word.add_char(ch(0.1, 0.2, "x"));
        assert_eq!(word.text, "x");
    }

    #[test]
    fn test_character_from_textbox() {
        let word = TextBox::new(Block::new(0.1, 0.1, 0.2, 0.2), "q", 0.7);
        let character = Character::from(word);
        assert_eq!(character.text, "q");
        assert_eq!(character.confidence, 0.7);
        assert_eq!(character.coordinate(), (0.1, 0.1, 0.2, 0.2));
    }

    #[test]
    fn test_serialization_without_class() {
        let word = TextBox::new(Block::new(0.0, 0.0, 0.5, 0.5), "ab", 0.9);
        let value = serde_json::to_value(&word).unwrap();
        assert_eq!(
            value,
            json!({
                "xmin": 0.0, "ymin": 0.0, "xmax": 0.5, "ymax": 0.5,
                "type": "TextBox", "text": "ab", "confidence": 0.9
            })
        );
        assert!(value.get("classId").is_none());
        assert!(value.get("classConfidence").is_none());
    }

    #[test]
    fn test_serialization_with_class() {
        let mut word = TextBox::new(Block::new(0.0, 0.0, 0.5, 0.5), "ab", 0.9);
        word.update_class("name", 0.8);
        let value = serde_json::to_value(&word).unwrap();
        assert_eq!(value["classId"], "name");
        assert_eq!(value["classConfidence"], 0.8);
        assert_eq!(value["type"], "TextBox");
    }
}
