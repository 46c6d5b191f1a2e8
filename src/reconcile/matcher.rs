use crate::scan::snapshot::{InputDescriptor, PageSnapshot};

/// One way of deciding whether a descriptor answers to a parsed field name.
pub type Matcher = fn(&InputDescriptor, &str) -> bool;

/// The matching policy, tried in order. Each strategy scans every form's
/// inputs in snapshot order; the first hit anywhere wins. There is no
/// scoring or disambiguation beyond this ordered search.
pub const STRATEGIES: &[(&str, Matcher)] = &[
    ("exact-name", match_name),
    ("exact-label", match_label),
    ("surrounding-text", match_surrounding),
];

fn match_name(input: &InputDescriptor, field: &str) -> bool {
    input.name == field
}

fn match_label(input: &InputDescriptor, field: &str) -> bool {
    input.label == field
}

fn match_surrounding(input: &InputDescriptor, field: &str) -> bool {
    input.surrounding_text.contains(field)
}

/// The descriptor a field name resolved to, and which strategy found it.
#[derive(Debug, Clone, Copy)]
pub struct FieldMatch<'a> {
    pub input: &'a InputDescriptor,
    pub strategy: &'static str,
}

pub fn find_match<'a>(snapshot: &'a PageSnapshot, field: &str) -> Option<FieldMatch<'a>> {
    for &(strategy, matcher) in STRATEGIES {
        for form in &snapshot.forms {
            for input in &form.inputs {
                if matcher(input, field) {
                    return Some(FieldMatch { input, strategy });
                }
            }
        }
    }
    None
}
