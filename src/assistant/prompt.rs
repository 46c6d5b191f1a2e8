use crate::scan::snapshot::PageSnapshot;

/// Render user chat text plus the captured form context into one prompt.
/// The assistant is told the field names alongside their labels and nearby
/// text so its answers can come back keyed by name.
pub fn combine_content_with_forms(content: &str, snapshot: &PageSnapshot) -> String {
    let mut combined = content.to_string();

    if snapshot.is_empty() {
        combined.push_str("\n\nNo form context available.");
        return combined;
    }

    combined.push_str("\n\nForm Context:\n");
    for (index, form) in snapshot.forms.iter().enumerate() {
        combined.push_str(&format!("Form {}:\n", index + 1));
        combined.push_str(&format!("Action: {}\n", or_na(&form.action)));
        combined.push_str(&format!("Method: {}\n", or_na(&form.method)));

        if form.inputs.is_empty() {
            combined.push_str("No inputs found.\n");
            continue;
        }

        combined.push_str("Inputs:\n");
        for input in &form.inputs {
            combined.push_str(&format!("  - Name: {}\n", or_na(&input.name)));
            combined.push_str(&format!("    Type: {}\n", or_na(&input.input_type)));
            combined.push_str(&format!("    Value: {}\n", or_na(&input.value)));
            combined.push_str(&format!("    Label: {}\n", or_na(&input.label)));
            combined.push_str(&format!(
                "    Surrounding Text: {}\n",
                or_na(&input.surrounding_text)
            ));
        }
    }

    combined
}

fn or_na(s: &str) -> &str {
    if s.is_empty() { "N/A" } else { s }
}
