use serde::{Deserialize, Serialize};

use crate::scan::snapshot::PageSnapshot;

/// Requests the coordinator dispatches, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Request {
    RequestFormDetails,
    ResetThread,
    AddMessage { content: String },
}

/// Replies to the requests above. Success replies carry `status`; failures
/// carry only `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    FormDetails {
        status: &'static str,
        data: PageSnapshot,
    },
    ThreadReset {
        status: &'static str,
        #[serde(rename = "threadId")]
        thread_id: String,
    },
    Message {
        status: &'static str,
        response: String,
    },
    Error {
        error: String,
    },
}

impl Reply {
    pub fn form_details(data: PageSnapshot) -> Self {
        Reply::FormDetails {
            status: "success",
            data,
        }
    }

    pub fn thread_reset(thread_id: String) -> Self {
        Reply::ThreadReset {
            status: "success",
            thread_id,
        }
    }

    pub fn message(response: String) -> Self {
        Reply::Message {
            status: "success",
            response,
        }
    }

    pub fn error(message: impl ToString) -> Self {
        Reply::Error {
            error: message.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error { .. })
    }
}
