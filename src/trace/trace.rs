use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// One JSONL trace record. `kind` names the event; the optional fields
/// carry whatever that kind has to say.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub kind: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub forms: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn now(kind: &'static str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
            kind,
            url: None,
            thread_id: None,
            forms: None,
            inputs: None,
            fingerprint: None,
            field: None,
            strategy: None,
            detail: None,
        }
    }

    pub fn with_url(mut self, url: impl ToString) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_thread(mut self, thread_id: impl ToString) -> Self {
        self.thread_id = Some(thread_id.to_string());
        self
    }

    pub fn with_snapshot(mut self, snapshot: &crate::scan::snapshot::PageSnapshot) -> Self {
        self.forms = Some(snapshot.form_count());
        self.inputs = Some(snapshot.input_count());
        self.fingerprint = Some(snapshot.fingerprint());
        self
    }

    pub fn with_field(mut self, field: impl ToString) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn with_strategy(mut self, strategy: &'static str) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
