use serde::{Deserialize, Serialize};

use crate::error::AssistError;
use crate::scan::snapshot::PageSnapshot;

/// A conversation-capable assistant service.
///
/// `form_call` is the one-shot autofill entry point; the thread methods
/// carry multi-turn chat. Implementations do not retry.
pub trait AssistantBackend {
    /// Create a fresh conversation thread and return its identifier.
    fn create_thread(&self) -> Result<String, AssistError>;

    /// Send user text to an existing thread; returns the assistant's reply text.
    fn send_prompt(&self, thread_id: &str, content: &str) -> Result<String, AssistError>;

    /// Ask the assistant to fill the captured forms in one shot.
    fn form_call(
        &self,
        snapshot: &PageSnapshot,
        context: Option<&str>,
    ) -> Result<FormCallReply, AssistError>;
}

/// Reply to a form call. `responses`, when present, is the `field: value`
/// line text the reconciler consumes.
#[derive(Debug, Clone, Default)]
pub struct FormCallReply {
    pub messages: String,
    pub responses: Option<String>,
}

// ============================================================================
// HTTP backend
// ============================================================================

/// The real assistant service, reached over HTTP.
///
/// Wire shapes: POST /api/helpthread -> {id}; POST /api/sendprompt
/// {id, content} -> {messages} or {error}; POST /api/formcall
/// {forms, context} -> {messages, responses} or {error}.
pub struct HttpAssistant {
    endpoint: String,
    client: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct ThreadCreatedBody {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
struct SendPromptBody<'a> {
    id: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct PromptReplyBody {
    #[serde(default)]
    messages: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
struct FormCallBody<'a> {
    forms: &'a PageSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a str>,
}

#[derive(Deserialize)]
struct FormCallReplyBody {
    #[serde(default)]
    messages: Option<String>,
    #[serde(default)]
    responses: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpAssistant {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    /// Fail on non-2xx with whatever the service said in the body.
    fn check_status(
        &self,
        context: &str,
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, AssistError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(AssistError::Service {
            context: context.to_string(),
            message: format!("{}: {}", status, body.trim()),
        })
    }
}

impl AssistantBackend for HttpAssistant {
    fn create_thread(&self) -> Result<String, AssistError> {
        let response = self
            .client
            .post(self.url("/api/helpthread"))
            .send()
            .map_err(|e| AssistError::Http {
                context: "create thread".into(),
                source: e,
            })?;

        let body: ThreadCreatedBody = self
            .check_status("create thread", response)?
            .json()
            .map_err(|e| AssistError::Http {
                context: "create thread reply".into(),
                source: e,
            })?;

        if let Some(error) = body.error {
            return Err(AssistError::Service {
                context: "create thread".into(),
                message: error,
            });
        }

        // A create reply without an identifier is a hard failure, not a
        // degraded success.
        body.id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AssistError::MalformedReply("thread create reply had no 'id'".into()))
    }

    fn send_prompt(&self, thread_id: &str, content: &str) -> Result<String, AssistError> {
        let response = self
            .client
            .post(self.url("/api/sendprompt"))
            .json(&SendPromptBody {
                id: thread_id,
                content,
            })
            .send()
            .map_err(|e| AssistError::Http {
                context: "send prompt".into(),
                source: e,
            })?;

        let body: PromptReplyBody = self
            .check_status("send prompt", response)?
            .json()
            .map_err(|e| AssistError::Http {
                context: "send prompt reply".into(),
                source: e,
            })?;

        if let Some(error) = body.error {
            return Err(AssistError::Service {
                context: "send prompt".into(),
                message: error,
            });
        }

        body.messages
            .ok_or_else(|| AssistError::MalformedReply("prompt reply had no 'messages'".into()))
    }

    fn form_call(
        &self,
        snapshot: &PageSnapshot,
        context: Option<&str>,
    ) -> Result<FormCallReply, AssistError> {
        let response = self
            .client
            .post(self.url("/api/formcall"))
            .json(&FormCallBody {
                forms: snapshot,
                context,
            })
            .send()
            .map_err(|e| AssistError::Http {
                context: "form call".into(),
                source: e,
            })?;

        let body: FormCallReplyBody = self
            .check_status("form call", response)?
            .json()
            .map_err(|e| AssistError::Http {
                context: "form call reply".into(),
                source: e,
            })?;

        if let Some(error) = body.error {
            return Err(AssistError::Service {
                context: "form call".into(),
                message: error,
            });
        }

        Ok(FormCallReply {
            messages: body.messages.unwrap_or_default(),
            responses: body.responses,
        })
    }
}
