use std::sync::atomic::{AtomicU64, Ordering};

use crate::assistant::client::{AssistantBackend, FormCallReply};
use crate::error::AssistError;
use crate::scan::snapshot::{InputDescriptor, PageSnapshot};

/// Derive a plausible fill value from an input's caption and type.
pub fn guess_value(caption: &str, input_type: &str) -> String {
    let c = caption.to_lowercase();

    // Caption-based heuristics (checked in order)
    if c.contains("email") {
        return "user@example.com".into();
    }
    if c.contains("password") {
        return "TestPass123!".into();
    }
    if c.contains("phone") || c.contains("tel") {
        return "555-0100".into();
    }
    if c.contains("url") || c.contains("website") {
        return "https://example.com".into();
    }
    if c.contains("zip") || c.contains("postal") {
        return "90210".into();
    }
    if c.contains("username") || c.contains("user") {
        return "testuser".into();
    }
    if c.contains("name") {
        return "Jane Doe".into();
    }
    if c.contains("date") {
        return "2025-01-15".into();
    }
    if c.contains("number") || c.contains("amount") || c.contains("quantity") {
        return "42".into();
    }

    match input_type {
        "email" => "user@example.com".into(),
        "password" => "TestPass123!".into(),
        "tel" => "555-0100".into(),
        "url" => "https://example.com".into(),
        "number" => "42".into(),
        "date" => "2025-01-15".into(),
        _ => "test".into(),
    }
}

/// Deterministic stand-in for the assistant service. Answers form calls by
/// guessing a value for every input from its caption and type; never
/// touches the network. Used by tests and the `--assistant mock` CLI path.
pub struct MockAssistant {
    thread_counter: AtomicU64,
}

impl MockAssistant {
    pub fn new() -> Self {
        Self {
            thread_counter: AtomicU64::new(0),
        }
    }

    fn answer_line(input: &InputDescriptor) -> Option<String> {
        // Key by the descriptor name so the reconciler's exact-name tier
        // hits; fall back to the label when the control is anonymous.
        let key = if !input.name.is_empty() {
            input.name.as_str()
        } else if !input.label.is_empty() {
            input.label.as_str()
        } else {
            return None;
        };

        let caption = if input.label.is_empty() {
            &input.name
        } else {
            &input.label
        };

        Some(format!("{}: {}", key, guess_value(caption, &input.input_type)))
    }
}

impl Default for MockAssistant {
    fn default() -> Self {
        Self::new()
    }
}

impl AssistantBackend for MockAssistant {
    fn create_thread(&self) -> Result<String, AssistError> {
        let n = self.thread_counter.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(format!("mock-thread-{}", n))
    }

    fn send_prompt(&self, _thread_id: &str, content: &str) -> Result<String, AssistError> {
        // The combined prompt renders each input as "- Name:", "Type:",
        // "Label:" lines; answer every control it mentions.
        fn flush(
            name: &mut Option<String>,
            input_type: &mut String,
            label: &mut String,
            lines: &mut Vec<String>,
        ) {
            if let Some(n) = name.take() {
                let caption = if label.is_empty() { n.clone() } else { label.clone() };
                lines.push(format!("{}: {}", n, guess_value(&caption, input_type)));
            }
            input_type.clear();
            label.clear();
        }

        let mut lines = Vec::new();
        let mut name: Option<String> = None;
        let mut input_type = String::new();
        let mut label = String::new();

        for raw in content.lines() {
            let line = raw.trim();
            if let Some(rest) = line.strip_prefix("- Name:") {
                flush(&mut name, &mut input_type, &mut label, &mut lines);
                let value = rest.trim();
                if !value.is_empty() && value != "N/A" {
                    name = Some(value.to_string());
                }
            } else if let Some(rest) = line.strip_prefix("Type:") {
                let value = rest.trim();
                if value != "N/A" {
                    input_type = value.to_string();
                }
            } else if let Some(rest) = line.strip_prefix("Label:") {
                let value = rest.trim();
                if value != "N/A" {
                    label = value.to_string();
                }
            }
        }
        flush(&mut name, &mut input_type, &mut label, &mut lines);

        if lines.is_empty() {
            return Ok("I could not find any form fields to fill.".to_string());
        }
        Ok(lines.join("\n"))
    }

    fn form_call(
        &self,
        snapshot: &PageSnapshot,
        _context: Option<&str>,
    ) -> Result<FormCallReply, AssistError> {
        let lines: Vec<String> = snapshot
            .forms
            .iter()
            .flat_map(|form| form.inputs.iter())
            .filter_map(Self::answer_line)
            .collect();

        if lines.is_empty() {
            return Ok(FormCallReply {
                messages: "No fillable fields found.".to_string(),
                responses: None,
            });
        }

        Ok(FormCallReply {
            messages: format!("Suggested values for {} fields.", lines.len()),
            responses: Some(lines.join("\n")),
        })
    }
}
