//! Page Export Example
//!
//! Builds one invoice page the way a recognition pipeline would:
//! 1. Detect word boxes in pixel space and normalize them
//! 2. Group words into lines, a field and a key-value pair
//! 3. Attach classifier labels
//! 4. Export the document as JSON and YAML

use docmodel_core::{
    Document, Field, ImageSize, JsonSerializer, Key, Line, Page, TextBox, TextGroup, Value,
    YamlSerializer,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Page Export Example ===\n");

    // Step 1: Words from a detector, in pixel coordinates on a 1000x1400 scan
    let mut page = Page::new(ImageSize::new(1000, 1400), 1);
    let detections = [
        ((100.0, 140.0, 220.0, 170.0), "Invoice", 0.98),
        ((230.0, 140.0, 290.0, 170.0), "No:", 0.95),
        ((420.0, 140.0, 540.0, 170.0), "2024-117", 0.91),
        ((100.0, 210.0, 200.0, 240.0), "Jane", 0.97),
        ((210.0, 210.0, 330.0, 240.0), "Roe", 0.96),
    ];

    let mut ids = Vec::new();
    for ((x0, y0, x1, y1), text, confidence) in detections {
        let block = page.block_from_pixels(x0, y0, x1, y1);
        ids.push(page.add_word(TextBox::new(block, text, confidence))?);
    }
    println!("Step 1: {} words on a {}x{} page", ids.len(), page.width(), page.height());

    // Step 2: Lines, a field and a key-value pair
    let header = Line::from_textboxes(ids[..3].iter().copied(), &page.textboxes)?;
    let name = Line::from_textboxes(ids[3..].iter().copied(), &page.textboxes)?;
    println!(
        "Step 2: lines {:?} and {:?}",
        header.text(&page.textboxes)?,
        name.text(&page.textboxes)?
    );
    page.add_line(header);
    page.add_line(name);

    let value = page.add_value(Value::new(ids[2]));
    let mut key = Key::new(ids[1]);
    key.add_textbox(ids[0], &page.textboxes)?;
    key.add_value(value);
    key.update_class("invoice_number", 0.9);
    page.add_key(key);

    // Step 3: Classifier output on the name words
    page.textbox_mut(ids[3])?.update_class("customer", 0.88);
    page.textbox_mut(ids[4])?.update_class("customer", 0.84);
    let mut field = Field::new(ids[4]);
    field.add_textbox(ids[3], &page.textboxes)?;
    println!(
        "Step 3: field {:?} labeled {:?} ({:.2})",
        field.text(&page.textboxes)?,
        field.class_name(&page.textboxes)?,
        field.class_score(&page.textboxes)?
    );
    page.add_field(field);
    page.set_single_value("invoice_number", "2024-117");

    // Step 4: Export
    let mut doc = Document::new()
        .with_path("scans/invoice-117.png")
        .with_content_type("image/png");
    doc.add_page(page);

    println!("\nStep 4: JSON\n{}", JsonSerializer::new().serialize_document(&doc)?);
    println!("\nYAML\n{}", YamlSerializer::new().serialize_document(&doc)?);

    Ok(())
}
