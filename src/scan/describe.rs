use crate::dom::document::{Document, NodeId};
use crate::scan::snapshot::InputDescriptor;

/// Describe one input/textarea/select control as a detached descriptor.
pub fn describe_input(doc: &Document, input: NodeId) -> InputDescriptor {
    let node = doc.node(input);

    InputDescriptor {
        name: node.resolved_name(),
        input_type: node.resolved_type(),
        value: node.value.clone().unwrap_or_default(),
        label: associated_label(doc, input),
        surrounding_text: surrounding_text(doc, input),
    }
}

/// Resolve the control's caption, first success wins:
///   1. a `label` whose `for` attribute equals the control's id
///   2. a `label` ancestor wrapping the control, with the control's current
///      value removed from the label text if present
///   3. empty string
pub fn associated_label(doc: &Document, input: NodeId) -> String {
    let node = doc.node(input);

    if let Some(id) = node.id.as_deref() {
        if let Some(label) = doc.label_for(id) {
            return doc.text(label).to_string();
        }
    }

    let mut cursor = doc.parent(input);
    while let Some(ancestor) = cursor {
        if doc.node(ancestor).tag == "label" {
            let mut text = doc.text(ancestor).to_string();
            // A wrapping label's rendered text can include the control's
            // own value; strip the first occurrence.
            if let Some(value) = node.value.as_deref() {
                if !value.is_empty() {
                    text = text.replacen(value, "", 1);
                }
            }
            return text.trim().to_string();
        }
        cursor = doc.parent(ancestor);
    }

    String::new()
}

/// Collect nearby free text as a fallback matching signal.
///
/// Three passes, each contributing at most one fragment: previous siblings
/// outward, then next siblings outward, then ancestors up to (excluding)
/// the body. Absence is never an error; the result may be empty.
pub fn surrounding_text(doc: &Document, input: NodeId) -> String {
    let mut fragments: Vec<&str> = Vec::new();

    for sibling in doc.prev_siblings(input) {
        if let Some(text) = doc.rendered_text(sibling) {
            fragments.push(text);
            break;
        }
    }

    for sibling in doc.next_siblings(input) {
        if let Some(text) = doc.rendered_text(sibling) {
            fragments.push(text);
            break;
        }
    }

    let mut cursor = doc.parent(input);
    while let Some(ancestor) = cursor {
        if ancestor == doc.root() {
            break;
        }
        if let Some(text) = doc.rendered_text(ancestor) {
            fragments.push(text);
            break;
        }
        cursor = doc.parent(ancestor);
    }

    fragments.join(" ")
}
