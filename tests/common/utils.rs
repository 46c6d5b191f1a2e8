use formpilot::dom::document::Document;
use serde_json::{Value, json};

/// Build a document from a fixture tree. The root plays the role of the
/// page body.
pub fn doc(tree: Value) -> Document {
    Document::from_value(tree).expect("fixture tree deserializes")
}

/// A body with one contact form: a `for`-labeled email input, a hidden
/// token, and a textarea with a free-text hint before it.
pub fn contact_page() -> Document {
    doc(json!({
        "tag": "body",
        "children": [
            {
                "tag": "form",
                "action": "https://example.com/contact",
                "method": "post",
                "children": [
                    { "tag": "div", "children": [
                        { "tag": "label", "for": "email-field", "text": "Email address" },
                        { "tag": "input", "id": "email-field", "name": "email", "type": "email" }
                    ]},
                    { "tag": "input", "name": "csrf", "type": "hidden", "value": "tok-123" },
                    { "tag": "div", "children": [
                        { "tag": "div", "text": "Tell us about your request" },
                        { "tag": "textarea", "name": "message" }
                    ]}
                ]
            }
        ]
    }))
}
