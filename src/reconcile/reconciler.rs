use crate::dom::document::Document;
use crate::error::AssistError;
use crate::reconcile::matcher::find_match;
use crate::reply::parser::ParsedReply;
use crate::scan::snapshot::PageSnapshot;

/// Destination for reconciled values.
///
/// `write_value` locates the live element by name attribute and returns
/// Ok(false) when none carries the name — the page changed since the scan,
/// which is not an error.
pub trait FieldWriter {
    fn write_value(&mut self, name: &str, value: &str) -> Result<bool, AssistError>;
}

impl FieldWriter for Document {
    fn write_value(&mut self, name: &str, value: &str) -> Result<bool, AssistError> {
        Ok(self.set_value_by_name(name, value))
    }
}

/// One parsed field successfully written back into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedField {
    /// Field name as it appeared in the assistant's reply.
    pub field: String,
    /// Descriptor name the value was written under.
    pub name: String,
    pub strategy: &'static str,
}

/// What reconciliation did with each parsed field. Nothing is silently
/// swallowed: every field lands in exactly one of the three lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub applied: Vec<AppliedField>,
    /// Fields no descriptor in the snapshot matched.
    pub unmatched: Vec<String>,
    /// Fields whose descriptor matched but whose live element was gone.
    pub stale: Vec<String>,
}

impl ReconcileReport {
    /// Fields the reply named that never reached the page.
    pub fn missed_count(&self) -> usize {
        self.unmatched.len() + self.stale.len()
    }
}

/// Map parsed answers onto live form elements through `writer`.
///
/// For each (field, value) pair the snapshot is searched with the ordered
/// strategy list; on a match the value is assigned to the live element under
/// the descriptor's resolved name. Mutates visible form state; the report
/// says what happened to every field.
pub fn reconcile(
    reply: &ParsedReply,
    snapshot: &PageSnapshot,
    writer: &mut dyn FieldWriter,
) -> Result<ReconcileReport, AssistError> {
    let mut report = ReconcileReport::default();

    for (field, value) in reply.iter() {
        let Some(found) = find_match(snapshot, field) else {
            report.unmatched.push(field.to_string());
            continue;
        };

        if writer.write_value(&found.input.name, value)? {
            report.applied.push(AppliedField {
                field: field.to_string(),
                name: found.input.name.clone(),
                strategy: found.strategy,
            });
        } else {
            report.stale.push(field.to_string());
        }
    }

    Ok(report)
}
