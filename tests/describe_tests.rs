mod common;

use common::utils::doc;
use formpilot::scan::describe::{associated_label, describe_input, surrounding_text};
use serde_json::json;

// =========================================================================
// Label resolution
// =========================================================================

#[test]
fn label_for_attribute_wins_over_everything_else() {
    let page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "div", "text": "Sibling noise" },
            { "tag": "label", "for": "em", "text": "  Your email  " },
            { "tag": "label", "children": [
                { "tag": "input", "id": "em", "name": "email" }
            ], "text": "Wrapping caption" }
        ]
    }));
    let input = page.ids().find(|&id| page.node(id).tag == "input").unwrap();

    assert_eq!(
        associated_label(&page, input),
        "Your email",
        "for-attribute label beats the wrapping label and is trimmed"
    );
}

#[test]
fn wrapping_label_used_when_no_for_label_exists() {
    let page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "label", "text": "Full name", "children": [
                { "tag": "input", "name": "full_name" }
            ]}
        ]
    }));
    let input = page.ids().find(|&id| page.node(id).tag == "input").unwrap();

    assert_eq!(associated_label(&page, input), "Full name");
}

#[test]
fn wrapping_label_strips_the_controls_value() {
    let page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "label", "text": "Full name Jane", "children": [
                { "tag": "input", "name": "full_name", "value": "Jane" }
            ]}
        ]
    }));
    let input = page.ids().find(|&id| page.node(id).tag == "input").unwrap();

    assert_eq!(
        associated_label(&page, input),
        "Full name",
        "the control's own value is removed from the wrapping label text"
    );
}

#[test]
fn for_label_only_applies_when_the_control_has_an_id() {
    let page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "label", "for": "other", "text": "Unrelated" },
            { "tag": "input", "name": "email" }
        ]
    }));
    let input = page.ids().find(|&id| page.node(id).tag == "input").unwrap();

    assert_eq!(associated_label(&page, input), "", "no id, no wrapper, no label");
}

#[test]
fn empty_for_label_still_wins() {
    // First success wins even when the found label has no text.
    let page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "label", "for": "em", "text": "" },
            { "tag": "label", "text": "Wrapping caption", "children": [
                { "tag": "input", "id": "em", "name": "email" }
            ]}
        ]
    }));
    let input = page.ids().find(|&id| page.node(id).tag == "input").unwrap();

    assert_eq!(associated_label(&page, input), "");
}

// =========================================================================
// Surrounding text
// =========================================================================

#[test]
fn nearest_previous_sibling_with_text_wins() {
    let page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "div", "children": [
                { "tag": "p", "text": "Far" },
                { "tag": "p", "text": "Near" },
                { "tag": "span" },
                { "tag": "input", "name": "q" }
            ]}
        ]
    }));
    let input = page.ids().find(|&id| page.node(id).tag == "input").unwrap();

    assert_eq!(
        surrounding_text(&page, input),
        "Near",
        "scan walks previous siblings outward and stops at the first text"
    );
}

#[test]
fn fragments_concatenate_in_pass_order() {
    let page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "div", "text": "Around", "children": [
                { "tag": "p", "text": "Before" },
                { "tag": "input", "name": "q" },
                { "tag": "p", "text": "After" }
            ]}
        ]
    }));
    let input = page.ids().find(|&id| page.node(id).tag == "input").unwrap();

    assert_eq!(
        surrounding_text(&page, input),
        "Before After Around",
        "previous sibling, then next sibling, then ancestor"
    );
}

#[test]
fn next_siblings_consulted_when_no_previous_text() {
    let page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "div", "children": [
                { "tag": "input", "name": "q" },
                { "tag": "span" },
                { "tag": "p", "text": "Hint below" }
            ]}
        ]
    }));
    let input = page.ids().find(|&id| page.node(id).tag == "input").unwrap();

    assert_eq!(surrounding_text(&page, input), "Hint below");
}

#[test]
fn ancestor_walk_stops_at_the_body() {
    let page = doc(json!({
        "tag": "body",
        "text": "Whole page text",
        "children": [
            { "tag": "div", "children": [
                { "tag": "input", "name": "q" }
            ]}
        ]
    }));
    let input = page.ids().find(|&id| page.node(id).tag == "input").unwrap();

    assert_eq!(
        surrounding_text(&page, input),
        "",
        "the body's own text is never used as surrounding text"
    );
}

#[test]
fn absence_everywhere_yields_empty_string() {
    let page = doc(json!({
        "tag": "body",
        "children": [ { "tag": "input", "name": "lonely" } ]
    }));
    let input = page.ids().find(|&id| page.node(id).tag == "input").unwrap();

    assert_eq!(surrounding_text(&page, input), "");
    assert_eq!(associated_label(&page, input), "");
}

// =========================================================================
// Descriptor assembly
// =========================================================================

#[test]
fn name_falls_back_from_name_to_id_to_empty() {
    let page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "input", "name": "has-name", "id": "ignored" },
            { "tag": "input", "id": "only-id" },
            { "tag": "input" }
        ]
    }));
    let inputs: Vec<_> = page.ids().filter(|&id| page.node(id).tag == "input").collect();

    assert_eq!(describe_input(&page, inputs[0]).name, "has-name");
    assert_eq!(describe_input(&page, inputs[1]).name, "only-id");
    assert_eq!(describe_input(&page, inputs[2]).name, "");
}

#[test]
fn type_falls_back_to_the_tag_name() {
    let page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "input", "name": "a", "type": "email" },
            { "tag": "textarea", "name": "b" },
            { "tag": "select", "name": "c" }
        ]
    }));
    let controls: Vec<_> = page
        .ids()
        .filter(|&id| page.node(id).is_control())
        .collect();

    assert_eq!(describe_input(&page, controls[0]).input_type, "email");
    assert_eq!(describe_input(&page, controls[1]).input_type, "textarea");
    assert_eq!(describe_input(&page, controls[2]).input_type, "select");
}
