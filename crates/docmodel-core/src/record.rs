//! Portable records for arena-backed aggregates
//!
//! Aggregates hold ids, not boxes, so they cannot implement `Serialize` on their
//! own. These records resolve the ids against a page's arena first; the page
//! then serializes the records.

use crate::error::{DocModelError, Result};
use crate::types::{
    Block, EntityKind, Extent, Field, Key, Line, Tagged, TextBox, TextBoxArena, TextGroup, Value,
};
use serde::Serialize;

/// Mapping for a [`Line`], [`Key`] or [`Value`].
#[derive(Debug, Serialize)]
pub(crate) struct GroupRecord<'a> {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    #[serde(rename = "type")]
    kind: EntityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    text: String,
    confidence: f64,
    #[serde(rename = "classId", skip_serializing_if = "Option::is_none")]
    class_id: Option<&'a str>,
    #[serde(rename = "classConfidence", skip_serializing_if = "Option::is_none")]
    class_confidence: Option<f64>,
    #[serde(rename = "textPostprocess", skip_serializing_if = "Option::is_none")]
    text_postprocess: Option<&'a str>,
    textboxes: Vec<&'a TextBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Vec<GroupRecord<'a>>>,
}

impl<'a> GroupRecord<'a> {
    fn resolve<G: TextGroup>(group: &G, arena: &'a TextBoxArena) -> Result<Self> {
        let textboxes = group.textboxes(arena)?;
        let envelope = group.envelope(arena)?;
        Ok(Self {
            xmin: envelope.xmin(),
            ymin: envelope.ymin(),
            xmax: envelope.xmax(),
            ymax: envelope.ymax(),
            kind: G::KIND,
            id: None,
            text: group.text(arena)?,
            confidence: group.conf(arena)?,
            class_id: None,
            class_confidence: None,
            text_postprocess: None,
            textboxes,
            values: None,
        })
    }

    pub(crate) fn line(line: &'a Line, arena: &'a TextBoxArena) -> Result<Self> {
        Ok(Self {
            id: line.id.as_deref(),
            class_id: line.class_name.as_deref(),
            class_confidence: Some(line.class_score),
            ..Self::resolve(line, arena)?
        })
    }

    pub(crate) fn value(value: &'a Value, arena: &'a TextBoxArena) -> Result<Self> {
        Ok(Self {
            id: value.id.as_deref(),
            class_id: value.class_name.as_deref(),
            class_confidence: Some(value.class_score),
            text_postprocess: non_empty(&value.text_postprocess),
            ..Self::resolve(value, arena)?
        })
    }

    /// Inlines the key's linked values, looked up in `values`.
    pub(crate) fn key(key: &'a Key, arena: &'a TextBoxArena, values: &'a [Value]) -> Result<Self> {
        let linked = key
            .values()
            .iter()
            .map(|&id| {
                values
                    .get(id.index())
                    .ok_or(DocModelError::UnknownValue(id))
                    .and_then(|value| Self::value(value, arena))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            id: key.id.as_deref(),
            class_id: key.class_name.as_deref(),
            class_confidence: Some(key.class_score),
            text_postprocess: non_empty(&key.text_postprocess),
            values: Some(linked),
            ..Self::resolve(key, arena)?
        })
    }
}

fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

/// Mapping for a [`Field`].
#[derive(Debug, Serialize)]
pub(crate) struct FieldRecord<'a> {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
    #[serde(rename = "type")]
    kind: EntityKind,
    text: String,
    confidence: f64,
    #[serde(rename = "classId", skip_serializing_if = "Option::is_none")]
    class_id: Option<&'a str>,
    #[serde(rename = "classConfidence", skip_serializing_if = "Option::is_none")]
    class_confidence: Option<f64>,
    textboxes: Vec<&'a TextBox>,
}

impl<'a> FieldRecord<'a> {
    /// Classification is emitted only when the leading member is classified;
    /// the score then requires every member to be classified.
    pub(crate) fn new(field: &Field, arena: &'a TextBoxArena) -> Result<Self> {
        let envelope: Block = field.envelope(arena)?;
        let class_id = field.class_name(arena)?;
        let class_confidence = match class_id {
            Some(_) => Some(field.class_score(arena)?),
            None => None,
        };
        Ok(Self {
            xmin: envelope.xmin(),
            ymin: envelope.ymin(),
            xmax: envelope.xmax(),
            ymax: envelope.ymax(),
            kind: Field::KIND,
            text: field.text(arena)?,
            confidence: field.conf(arena)?,
            class_id,
            class_confidence,
            textboxes: field.textboxes(arena)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueId;
    use serde_json::json;

    fn word(arena: &mut TextBoxArena, xmin: f64, text: &str) -> crate::types::TextBoxId {
        arena.insert(TextBox::new(
            Block::new(xmin, 0.1, xmin + 0.1, 0.2),
            text,
            0.5,
        ))
    }

    #[test]
    fn test_line_record() {
        let mut arena = TextBoxArena::new();
        let hi = word(&mut arena, 0.5, "hi");
        let lo = word(&mut arena, 0.1, "lo");
        let line = Line::from_textboxes([hi, lo], &arena).unwrap();

        let value = serde_json::to_value(GroupRecord::line(&line, &arena).unwrap()).unwrap();
        assert_eq!(value["type"], "Line");
        assert_eq!(value["text"], "lo hi");
        assert_eq!(value["xmin"], 0.1);
        assert_eq!(value["xmax"], 0.6);
        assert_eq!(value["textboxes"][0]["text"], "lo");
        assert!(value.get("id").is_none());
        assert!(value.get("classId").is_none());
        assert_eq!(value["classConfidence"], 1.0);
        assert!(value.get("values").is_none());
    }

    #[test]
    fn test_line_record_own_classification() {
        let mut arena = TextBoxArena::new();
        let a = word(&mut arena, 0.1, "Total");
        arena.get_mut(a).unwrap().update_class("amount", 0.3);

        let mut line = Line::new(a).with_id("l7");
        line.update_class("summary", 0.85);

        let value = serde_json::to_value(GroupRecord::line(&line, &arena).unwrap()).unwrap();
        assert_eq!(value["id"], "l7");
        assert_eq!(value["classId"], "summary");
        assert_eq!(value["classConfidence"], 0.85);
        assert_eq!(value["textboxes"][0]["classId"], "amount");
    }

    #[test]
    fn test_key_record_inlines_values() {
        let mut arena = TextBoxArena::new();
        let k = word(&mut arena, 0.1, "Total:");
        let v = word(&mut arena, 0.4, "42");

        let mut value = Value::new(v);
        value.text_postprocess = "42.00".to_string();
        let values = vec![value];
        let mut key = Key::new(k).with_id("k0");
        key.add_value(ValueId::new(0));

        let record = GroupRecord::key(&key, &arena, &values).unwrap();
        let record = serde_json::to_value(record).unwrap();
        assert_eq!(record["type"], "Key");
        assert_eq!(record["id"], "k0");
        assert_eq!(record["classConfidence"], 1.0);
        assert!(record.get("textPostprocess").is_none());
        assert_eq!(record["values"][0]["type"], "Value");
        assert_eq!(record["values"][0]["textPostprocess"], "42.00");
        assert_eq!(
            record["values"][0]["textboxes"][0],
            json!({
                "xmin": 0.4, "ymin": 0.1, "xmax": 0.5, "ymax": 0.2,
                "type": "TextBox", "text": "42", "confidence": 0.5
            })
        );
    }

    #[test]
    fn test_key_record_with_dangling_value() {
        let mut arena = TextBoxArena::new();
        let k = word(&mut arena, 0.1, "Total:");
        let mut key = Key::new(k);
        key.add_value(ValueId::new(3));

        let result = GroupRecord::key(&key, &arena, &[]);
        assert!(matches!(result, Err(DocModelError::UnknownValue(id)) if id.index() == 3));
    }

    #[test]
    fn test_field_record_classification() {
        let mut arena = TextBoxArena::new();
        let a = word(&mut arena, 0.1, "John");
        let b = word(&mut arena, 0.3, "Doe");
        let mut field = Field::new(a);
        field.add_textbox(b, &arena).unwrap();

        let record = serde_json::to_value(FieldRecord::new(&field, &arena).unwrap()).unwrap();
        assert_eq!(record["type"], "Field");
        assert!(record.get("classId").is_none());

        arena.get_mut(a).unwrap().update_class("name", 0.8);
        assert!(matches!(
            FieldRecord::new(&field, &arena),
            Err(DocModelError::MissingClassification(id)) if id == b
        ));

        arena.get_mut(b).unwrap().update_class("name", 0.6);
        let record = serde_json::to_value(FieldRecord::new(&field, &arena).unwrap()).unwrap();
        assert_eq!(record["classId"], "name");
        assert!((record["classConfidence"].as_f64().unwrap() - 0.7).abs() < 1e-12);
    }
}
