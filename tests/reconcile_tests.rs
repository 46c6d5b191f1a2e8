mod common;

use common::utils::{contact_page, doc};
use formpilot::reconcile::matcher::{STRATEGIES, find_match};
use formpilot::reconcile::reconciler::reconcile;
use formpilot::reply::parser::ParsedReply;
use formpilot::scan::scanner::scan_page;
use serde_json::json;

// =========================================================================
// Matching strategy order
// =========================================================================

#[test]
fn strategy_list_is_name_then_label_then_surrounding_text() {
    let names: Vec<_> = STRATEGIES.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["exact-name", "exact-label", "surrounding-text"]);
}

#[test]
fn exact_name_beats_exact_label_across_forms() {
    // Form 1 has an input *labeled* "email"; form 2 has an input *named*
    // "email". The name tier scans the whole snapshot before labels do.
    let page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "form", "children": [
                { "tag": "label", "for": "x", "text": "email" },
                { "tag": "input", "id": "x", "name": "contact_addr" }
            ]},
            { "tag": "form", "children": [
                { "tag": "input", "name": "email" }
            ]}
        ]
    }));
    let snapshot = scan_page(&page);

    let hit = find_match(&snapshot, "email").expect("field matches");
    assert_eq!(hit.strategy, "exact-name");
    assert_eq!(hit.input.name, "email");
}

#[test]
fn label_tier_matches_when_no_name_does() {
    let snapshot = scan_page(&contact_page());

    let hit = find_match(&snapshot, "Email address").expect("label matches");
    assert_eq!(hit.strategy, "exact-label");
    assert_eq!(hit.input.name, "email");
}

#[test]
fn surrounding_text_tier_is_a_substring_match() {
    let snapshot = scan_page(&contact_page());

    let hit = find_match(&snapshot, "about your request").expect("substring matches");
    assert_eq!(hit.strategy, "surrounding-text");
    assert_eq!(hit.input.name, "message");
}

#[test]
fn no_tier_matching_yields_none() {
    let snapshot = scan_page(&contact_page());

    assert!(find_match(&snapshot, "no such field").is_none());
}

// =========================================================================
// Reconciliation against a live document
// =========================================================================

#[test]
fn matched_values_are_written_and_visible_to_a_rescan() {
    let mut page = contact_page();
    let snapshot = scan_page(&page);
    let reply = ParsedReply::parse("email: x@y.com\nEmail address: ignored-duplicate-target");

    let report = reconcile(&reply, &snapshot, &mut page).unwrap();

    assert_eq!(report.applied.len(), 2);
    assert!(report.unmatched.is_empty());

    let rescanned = scan_page(&page);
    assert_eq!(
        rescanned.forms[0].inputs[0].value, "ignored-duplicate-target",
        "the label-tier write landed on the same live input, last write wins"
    );
}

#[test]
fn values_written_by_name_round_trip_through_a_rescan() {
    let mut page = contact_page();
    let snapshot = scan_page(&page);
    let reply = ParsedReply::parse("email: x@y.com\nmessage: Hello there");

    let report = reconcile(&reply, &snapshot, &mut page).unwrap();
    assert_eq!(report.applied.len(), 2);

    let rescanned = scan_page(&page);
    assert_eq!(rescanned.forms[0].inputs[0].value, "x@y.com");
    assert_eq!(rescanned.forms[0].inputs[1].value, "Hello there");
}

#[test]
fn unmatched_fields_are_reported_and_nothing_mutates() {
    let mut page = contact_page();
    let before = scan_page(&page);
    let reply = ParsedReply::parse("Shoe size: 42");

    let report = reconcile(&reply, &before, &mut page).unwrap();

    assert_eq!(report.unmatched, vec!["Shoe size".to_string()]);
    assert!(report.applied.is_empty());
    assert_eq!(report.missed_count(), 1);
    assert_eq!(scan_page(&page), before, "no DOM mutation on a miss");
}

#[test]
fn id_only_controls_go_stale_at_write_time() {
    // The descriptor name falls back to the id, but the live lookup goes by
    // name attribute, so the write cannot land.
    let mut page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "form", "children": [
                { "tag": "input", "id": "nickname" }
            ]}
        ]
    }));
    let snapshot = scan_page(&page);
    assert_eq!(snapshot.forms[0].inputs[0].name, "nickname");

    let reply = ParsedReply::parse("nickname: Ace");
    let report = reconcile(&reply, &snapshot, &mut page).unwrap();

    assert!(report.applied.is_empty());
    assert_eq!(report.stale, vec!["nickname".to_string()]);
}

#[test]
fn first_of_two_same_named_controls_receives_the_value() {
    let mut page = doc(json!({
        "tag": "body",
        "children": [
            { "tag": "form", "children": [
                { "tag": "input", "name": "q" },
                { "tag": "input", "name": "q" }
            ]}
        ]
    }));
    let snapshot = scan_page(&page);

    let reply = ParsedReply::parse("q: hello");
    reconcile(&reply, &snapshot, &mut page).unwrap();

    let rescanned = scan_page(&page);
    assert_eq!(rescanned.forms[0].inputs[0].value, "hello");
    assert_eq!(rescanned.forms[0].inputs[1].value, "", "only the first matching control is written");
}

#[test]
fn empty_reply_produces_an_empty_report() {
    let mut page = contact_page();
    let snapshot = scan_page(&page);

    let report = reconcile(&ParsedReply::parse(""), &snapshot, &mut page).unwrap();

    assert!(report.applied.is_empty());
    assert!(report.unmatched.is_empty());
    assert!(report.stale.is_empty());
}
