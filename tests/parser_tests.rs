use formpilot::reply::parser::ParsedReply;

#[test]
fn parses_field_value_lines_and_drops_the_rest() {
    let reply = ParsedReply::parse(
        "First Name: Alice\nEmail: a@b.com\nignored line\nNote: value: with colon",
    );

    assert_eq!(reply.len(), 3);
    assert_eq!(reply.get("First Name"), Some("Alice"));
    assert_eq!(reply.get("Email"), Some("a@b.com"));
    assert_eq!(
        reply.get("Note"),
        Some("value: with colon"),
        "everything after the first separator belongs to the answer"
    );
}

#[test]
fn splits_on_the_first_colon_followed_by_whitespace() {
    let reply = ParsedReply::parse("a:b: c");

    assert_eq!(
        reply.get("a:b"),
        Some("c"),
        "a colon not followed by whitespace is not a separator"
    );
}

#[test]
fn tab_counts_as_separator_whitespace() {
    let reply = ParsedReply::parse("City:\tParis");

    assert_eq!(reply.get("City"), Some("Paris"));
}

#[test]
fn both_sides_are_trimmed() {
    let reply = ParsedReply::parse("  Favourite colour :   deep blue  ");

    assert_eq!(reply.get("Favourite colour"), Some("deep blue"));
}

#[test]
fn entries_need_both_a_field_and_an_answer() {
    let reply = ParsedReply::parse("Name:   \n: orphan answer\njust text\n\n");

    assert!(reply.is_empty(), "blank fields and blank answers are dropped");
}

#[test]
fn later_duplicate_fields_overwrite_earlier_ones() {
    let reply = ParsedReply::parse("Email: first@x.com\nOther: y\nEmail: second@x.com");

    assert_eq!(reply.len(), 2);
    assert_eq!(reply.get("Email"), Some("second@x.com"), "last write wins");

    let order: Vec<_> = reply.iter().map(|(f, _)| f).collect();
    assert_eq!(order, vec!["Email", "Other"], "first-seen order is kept");
}

#[test]
fn empty_input_parses_to_an_empty_reply() {
    assert!(ParsedReply::parse("").is_empty());
    assert!(ParsedReply::parse("\n\n").is_empty());
}

#[test]
fn colon_inside_a_word_is_not_a_separator() {
    let reply = ParsedReply::parse("Ratio was 3:2 throughout");

    assert!(reply.is_empty());
}
