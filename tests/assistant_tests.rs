mod common;

use common::utils::contact_page;
use formpilot::assistant::client::AssistantBackend;
use formpilot::assistant::mock::{MockAssistant, guess_value};
use formpilot::assistant::prompt::combine_content_with_forms;
use formpilot::reply::parser::ParsedReply;
use formpilot::scan::scanner::scan_page;
use formpilot::scan::snapshot::PageSnapshot;

// =========================================================================
// Prompt building
// =========================================================================

#[test]
fn combined_prompt_renders_the_form_context() {
    let snapshot = scan_page(&contact_page());
    let prompt = combine_content_with_forms("Use my work address", &snapshot);

    assert!(prompt.starts_with("Use my work address"));
    assert!(prompt.contains("Form Context:"));
    assert!(prompt.contains("Form 1:"));
    assert!(prompt.contains("Action: https://example.com/contact"));
    assert!(prompt.contains("Method: post"));
    assert!(prompt.contains("  - Name: email"));
    assert!(prompt.contains("    Label: Email address"));
    assert!(
        prompt.contains("    Label: N/A"),
        "blank descriptor fields render as N/A"
    );
    assert!(prompt.contains("    Surrounding Text: Tell us about your request"));
}

#[test]
fn combined_prompt_without_forms_says_so() {
    let prompt = combine_content_with_forms("hello", &PageSnapshot::default());

    assert_eq!(prompt, "hello\n\nNo form context available.");
}

#[test]
fn empty_form_renders_a_no_inputs_line() {
    let snapshot = PageSnapshot {
        forms: vec![formpilot::scan::snapshot::FormDescriptor {
            action: "/a".into(),
            method: "get".into(),
            inputs: vec![],
        }],
    };
    let prompt = combine_content_with_forms("hi", &snapshot);

    assert!(prompt.contains("No inputs found."));
}

// =========================================================================
// Value guessing
// =========================================================================

#[test]
fn guess_value_prefers_the_caption_over_the_type() {
    assert_eq!(guess_value("Work email", "text"), "user@example.com");
    assert_eq!(guess_value("Phone number", "text"), "555-0100");
    assert_eq!(guess_value("Your name", "text"), "Jane Doe");
}

#[test]
fn guess_value_falls_back_to_the_input_type() {
    assert_eq!(guess_value("", "email"), "user@example.com");
    assert_eq!(guess_value("", "date"), "2025-01-15");
    assert_eq!(guess_value("mystery", "text"), "test");
}

// =========================================================================
// Mock backend
// =========================================================================

#[test]
fn mock_threads_are_distinct() {
    let mock = MockAssistant::new();

    assert_eq!(mock.create_thread().unwrap(), "mock-thread-1");
    assert_eq!(mock.create_thread().unwrap(), "mock-thread-2");
}

#[test]
fn mock_form_call_answers_every_named_control() {
    let mock = MockAssistant::new();
    let snapshot = scan_page(&contact_page());

    let reply = mock.form_call(&snapshot, None).unwrap();
    let parsed = ParsedReply::parse(&reply.responses.expect("mock always suggests"));

    assert_eq!(parsed.get("email"), Some("user@example.com"));
    assert!(parsed.get("message").is_some());
}

#[test]
fn mock_form_call_with_no_fields_suggests_nothing() {
    let mock = MockAssistant::new();

    let reply = mock.form_call(&PageSnapshot::default(), None).unwrap();

    assert!(reply.responses.is_none());
}

#[test]
fn mock_send_prompt_answers_the_controls_the_prompt_mentions() {
    let mock = MockAssistant::new();
    let snapshot = scan_page(&contact_page());
    let prompt = combine_content_with_forms("fill it in", &snapshot);

    let response = mock.send_prompt("mock-thread-1", &prompt).unwrap();
    let parsed = ParsedReply::parse(&response);

    assert_eq!(
        parsed.get("email"),
        Some("user@example.com"),
        "caption heuristics apply to the rendered label"
    );
    assert!(parsed.get("message").is_some());
}
