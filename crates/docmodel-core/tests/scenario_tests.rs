//! End-to-end scenarios over the entity model
//!
//! Each test builds a small page the way a recognition pipeline would and checks
//! the derived geometry, reading order and portable output.

use docmodel_core::{
    Block, Character, DocModelError, Document, DocumentResult, EntityKind, Extent, Field,
    ImageSize, JsonSerializer, Key, Line, ModelOptions, Page, TableRegion, TextBox, TextGroup,
    Value,
};
use serde_json::json;

fn word(xmin: f64, ymin: f64, text: &str, confidence: f64) -> TextBox {
    TextBox::new(
        Block::new(xmin, ymin, xmin + 0.1, ymin + 0.04),
        text,
        confidence,
    )
}

#[test]
fn test_block_portable_form() {
    let block = Block::new(0.1, 0.2, 0.3, 0.4);
    assert_eq!(
        JsonSerializer::to_value(&block).unwrap(),
        json!({"xmin": 0.1, "ymin": 0.2, "xmax": 0.3, "ymax": 0.4, "type": "Block"})
    );
}

#[test]
fn test_block_rounding_and_geometry() {
    let block = Block::new(0.12345, 0.5, 0.55555, 0.75);
    assert_eq!(block.coordinate(), (0.123, 0.5, 0.556, 0.75));
    assert!((block.width() - 0.433).abs() < 1e-9);
    assert!((block.height() - 0.25).abs() < 1e-9);
    assert!((block.x_center() - 0.3395).abs() < 1e-9);
    assert!((block.y_center() - 0.625).abs() < 1e-9);
}

#[test]
fn test_textbox_classification_portable_form() {
    let mut textbox = TextBox::new(Block::new(0.0, 0.0, 0.5, 0.5), "ab", 0.9);
    let unclassified = JsonSerializer::to_value(&textbox).unwrap();
    assert!(unclassified.get("classId").is_none());
    assert!(unclassified.get("classConfidence").is_none());

    textbox.update_class("name", 0.8);
    assert_eq!(
        JsonSerializer::to_value(&textbox).unwrap(),
        json!({
            "xmin": 0.0, "ymin": 0.0, "xmax": 0.5, "ymax": 0.5,
            "type": "TextBox", "text": "ab", "confidence": 0.9,
            "classId": "name", "classConfidence": 0.8
        })
    );
}

#[test]
fn test_characters_rebuild_word() {
    let mut textbox = TextBox::new(Block::new(0.2, 0.1, 0.25, 0.15), "", 0.9);
    textbox.add_char(Character::new(Block::new(0.3, 0.1, 0.35, 0.16), "b", 0.8));
    textbox.add_char(Character::new(Block::new(0.2, 0.09, 0.25, 0.15), "a", 0.9));
    textbox.add_char(Character::new(Block::new(0.4, 0.1, 0.45, 0.15), " ", 0.9));

    assert_eq!(textbox.text, "ab");
    assert_eq!(textbox.coordinate(), (0.2, 0.09, 0.45, 0.16));
    let order: Vec<&str> = textbox.characters().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(order, vec!["a", "b", " "]);
}

#[test]
fn test_line_reading_order() {
    let mut page = Page::new(ImageSize::new(100, 100), 1);
    let hi = page.add_word(word(0.5, 0.1, "hi", 0.8)).unwrap();
    let lo = page.add_word(word(0.1, 0.1, "lo", 0.6)).unwrap();

    let mut line = Line::new(hi);
    line.add_textbox(lo, &page.textboxes).unwrap();

    let xmins: Vec<f64> = line
        .textboxes(&page.textboxes)
        .unwrap()
        .iter()
        .map(|t| t.xmin())
        .collect();
    assert_eq!(xmins, vec![0.1, 0.5]);
    assert_eq!(line.text(&page.textboxes).unwrap(), "lo hi");
    assert!((line.conf(&page.textboxes).unwrap() - 0.7).abs() < 1e-12);
}

#[test]
fn test_field_spanning_two_rows() {
    let mut page = Page::new(ImageSize::new(100, 100), 1);
    let city = page.add_word(word(0.1, 0.3, "Springfield", 0.9)).unwrap();
    let number = page.add_word(word(0.1, 0.2, "742", 0.9)).unwrap();
    let street = page.add_word(word(0.3, 0.2, "Evergreen", 0.9)).unwrap();
    for (id, score) in [(city, 0.9), (number, 0.6), (street, 0.6)] {
        page.textbox_mut(id).unwrap().update_class("address", score);
    }

    let mut field = Field::new(city);
    field.add_textbox(street, &page.textboxes).unwrap();
    field.add_textbox(number, &page.textboxes).unwrap();

    assert_eq!(
        field.text(&page.textboxes).unwrap(),
        "742 Evergreen Springfield"
    );
    assert_eq!(field.class_name(&page.textboxes).unwrap(), Some("address"));
    assert!((field.class_score(&page.textboxes).unwrap() - 0.7).abs() < 1e-12);
}

#[test]
fn test_word_shared_across_groupings() {
    let mut page = Page::new(ImageSize::new(100, 100), 1);
    let id = page.add_word(word(0.1, 0.1, "Tota1", 0.4)).unwrap();
    page.add_line(Line::new(id));
    page.add_kie_line(Line::new(id));
    page.add_field(Field::new(id));
    page.add_key(Key::new(id));

    page.textbox_mut(id).unwrap().text = "Total".to_string();
    page.textbox_mut(id).unwrap().update_class("total_key", 0.95);

    let arena = &page.textboxes;
    assert_eq!(page.lines[0].text(arena).unwrap(), "Total");
    assert_eq!(page.kie_lines[0].text(arena).unwrap(), "Total");
    assert_eq!(page.fields[0].class_name(arena).unwrap(), Some("total_key"));
    assert_eq!(page.keys[0].text(arena).unwrap(), "Total");
    // Keys keep their own classification
    assert!(page.keys[0].class_name.is_none());
}

#[test]
fn test_key_value_page_output() {
    let mut page = Page::new(ImageSize::new(1000, 500), 1);
    let label = page.add_word(word(0.1, 0.1, "Invoice", 0.9)).unwrap();
    let colon = page.add_word(word(0.2, 0.1, "No:", 0.9)).unwrap();
    let number = page.add_word(word(0.4, 0.1, "A-17", 0.8)).unwrap();

    let mut value = Value::new(number).with_id("v0");
    value.text_postprocess = "A17".to_string();
    let value = page.add_value(value);

    let mut key = Key::new(colon).with_id("k0");
    key.add_textbox(label, &page.textboxes).unwrap();
    key.add_value(value);
    key.update_class("invoice_number", 0.88);
    page.add_key(key);

    let output = JsonSerializer::to_value(&page).unwrap();
    let key = &output["keys"][0];
    assert_eq!(key["type"], "Key");
    assert_eq!(key["text"], "Invoice No:");
    assert_eq!(key["classId"], "invoice_number");
    assert_eq!(key["classConfidence"], 0.88);
    assert_eq!(key["xmin"], 0.1);
    assert_eq!(key["xmax"], 0.3);
    assert_eq!(key["textboxes"].as_array().unwrap().len(), 2);

    let value = &key["values"][0];
    assert_eq!(value["type"], "Value");
    assert_eq!(value["id"], "v0");
    assert_eq!(value["text"], "A-17");
    assert_eq!(value["textPostprocess"], "A17");
    assert_eq!(value["classConfidence"], 1.0);
    assert!(value.get("classId").is_none());
}

#[test]
fn test_document_portable_form() {
    let mut doc = Document::new();
    let mut page = Page::new(ImageSize::new(10, 20), 1);
    page.add_word(word(0.1, 0.1, "x", 0.5)).unwrap();
    doc.add_page(page);

    let value = JsonSerializer::to_value(&doc).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(value["path"], "");
    assert!(value["content_type"].is_null());
    assert_eq!(value["pages"][0]["width"], 10);
    assert_eq!(value["pages"][0]["height"], 20);
    assert_eq!(value["pages"][0]["words"][0]["text"], "x");
}

#[test]
fn test_result_accumulates_tables() {
    let mut result = DocumentResult::new();
    let mut page = Page::new(ImageSize::new(10, 10), 1);
    let table = TableRegion::new(Block::new(0.05, 0.4, 0.95, 0.9)).with_confidence(0.8);
    page.add_table(table.clone());
    result.all_tables.push(table);
    result.add_page(page);

    let value = JsonSerializer::to_value(&result).unwrap();
    assert_eq!(value["all_tables"], value["pages"][0]["tables"]);
    assert_eq!(value["all_tables"][0]["type"], EntityKind::Table.to_string());
}

#[test]
fn test_strict_pages_reject_inverted_words() {
    let mut page = Page::with_options(ImageSize::new(10, 10), 1, ModelOptions::strict());
    let result = page.add_word(TextBox::new(Block::new(0.1, 0.5, 0.2, 0.4), "x", 0.5));
    assert!(matches!(
        result,
        Err(DocModelError::InvertedBox { ymin, ymax, .. }) if ymin > ymax
    ));
}

#[test]
fn test_dangling_ids_fail_serialization() {
    let mut page = Page::new(ImageSize::new(10, 10), 1);
    let id = page.add_word(word(0.1, 0.1, "x", 0.5)).unwrap();
    let mut key = Key::new(id);
    key.add_value(docmodel_core::ValueId::new(4));
    page.add_key(key);

    let err = JsonSerializer::new().serialize_page(&page).unwrap_err();
    assert!(err.to_string().contains("Unknown value"));
}
