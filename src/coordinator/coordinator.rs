use crate::assistant::client::AssistantBackend;
use crate::assistant::prompt::combine_content_with_forms;
use crate::coordinator::messages::{Reply, Request};
use crate::error::AssistError;
use crate::reconcile::reconciler::{FieldWriter, ReconcileReport, reconcile};
use crate::reply::parser::ParsedReply;
use crate::scan::snapshot::PageSnapshot;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::TraceEvent;

/// The live page as the coordinator sees it: scannable, watchable, writable.
pub trait PageHost: FieldWriter {
    /// Capture a fresh snapshot of the page's forms.
    fn snapshot(&mut self) -> Result<PageSnapshot, AssistError>;
    fn current_url(&mut self) -> Result<String, AssistError>;
}

/// Explicit conversation state: the one thread identifier the assistant
/// service knows us by. Created and replaced only through `reset`.
#[derive(Debug, Default)]
pub struct Conversation {
    thread_id: Option<String>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.thread_id.as_deref()
    }

    /// Replace the current thread with a fresh one from the service.
    /// On failure the conversation is left without a usable identifier
    /// until the next reset.
    pub fn reset(&mut self, backend: &dyn AssistantBackend) -> Result<&str, AssistError> {
        self.thread_id = None;
        let id = backend.create_thread()?;
        self.thread_id = Some(id);
        Ok(self.thread_id.as_deref().unwrap_or_default())
    }

    pub fn clear(&mut self) {
        self.thread_id = None;
    }
}

/// Outcome of one chat turn.
#[derive(Debug)]
pub struct TurnOutcome {
    /// The assistant's reply text, verbatim.
    pub response: String,
    pub report: ReconcileReport,
}

/// Outcome of a one-shot autofill round.
#[derive(Debug)]
pub struct FillOutcome {
    pub messages: String,
    pub report: ReconcileReport,
}

/// Drives the scan -> send -> parse -> reconcile cycle against one page and
/// one assistant backend. Keeps only the most recent snapshot, overwritten
/// wholesale; there is no versioning between a scan and its reconcile.
pub struct Coordinator<'a, P: PageHost> {
    backend: &'a dyn AssistantBackend,
    page: &'a mut P,
    tracer: &'a TraceLogger,
    conversation: Conversation,
    last_snapshot: Option<PageSnapshot>,
    last_url: Option<String>,
}

impl<'a, P: PageHost> Coordinator<'a, P> {
    pub fn new(
        backend: &'a dyn AssistantBackend,
        page: &'a mut P,
        tracer: &'a TraceLogger,
    ) -> Self {
        Self {
            backend,
            page,
            tracer,
            conversation: Conversation::new(),
            last_snapshot: None,
            last_url: None,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn last_snapshot(&self) -> Option<&PageSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Capture a fresh snapshot, replacing the previous one.
    pub fn capture(&mut self) -> Result<&PageSnapshot, AssistError> {
        let snapshot = self.page.snapshot()?;
        self.tracer
            .log(&TraceEvent::now("snapshot").with_snapshot(&snapshot));
        Ok(self.last_snapshot.insert(snapshot))
    }

    /// Start a fresh conversation thread, replacing any current one.
    pub fn reset_thread(&mut self) -> Result<String, AssistError> {
        match self.conversation.reset(self.backend) {
            Ok(id) => {
                let id = id.to_string();
                self.tracer
                    .log(&TraceEvent::now("thread_reset").with_thread(&id));
                Ok(id)
            }
            Err(e) => {
                self.tracer
                    .log(&TraceEvent::now("service_error").with_detail(&e));
                Err(e)
            }
        }
    }

    /// One chat turn: scan, combine, send, parse, reconcile.
    ///
    /// Fails immediately when no thread exists. The reply text is returned
    /// verbatim; any `field: value` lines in it are written onto the page
    /// and accounted for in the report.
    pub fn add_message(&mut self, content: &str) -> Result<TurnOutcome, AssistError> {
        let thread_id = self
            .conversation
            .thread_id()
            .ok_or(AssistError::NoThread)?
            .to_string();

        let snapshot = self.page.snapshot()?;
        self.tracer
            .log(&TraceEvent::now("snapshot").with_snapshot(&snapshot));

        let prompt = combine_content_with_forms(content, &snapshot);
        self.tracer
            .log(&TraceEvent::now("prompt_sent").with_thread(&thread_id));

        let response = match self.backend.send_prompt(&thread_id, &prompt) {
            Ok(text) => text,
            Err(e) => {
                self.tracer
                    .log(&TraceEvent::now("service_error").with_detail(&e));
                return Err(e);
            }
        };

        let parsed = ParsedReply::parse(&response);
        self.tracer.log(
            &TraceEvent::now("reply_parsed")
                .with_detail(format!("{} fields", parsed.len()))
                .with_thread(&thread_id),
        );

        let report = reconcile(&parsed, &snapshot, &mut *self.page)?;
        self.log_report(&report);
        self.last_snapshot = Some(snapshot);

        Ok(TurnOutcome { response, report })
    }

    /// Page-load style autofill: one `form_call` round against a fresh
    /// snapshot. Skipped entirely when the page has no forms.
    pub fn autofill(&mut self, context: Option<&str>) -> Result<FillOutcome, AssistError> {
        let snapshot = self.page.snapshot()?;
        self.tracer
            .log(&TraceEvent::now("snapshot").with_snapshot(&snapshot));

        if snapshot.is_empty() {
            self.last_snapshot = Some(snapshot);
            return Ok(FillOutcome {
                messages: String::new(),
                report: ReconcileReport::default(),
            });
        }

        let reply = match self.backend.form_call(&snapshot, context) {
            Ok(reply) => reply,
            Err(e) => {
                self.tracer
                    .log(&TraceEvent::now("service_error").with_detail(&e));
                return Err(e);
            }
        };

        let report = match reply.responses.as_deref() {
            Some(text) => {
                let parsed = ParsedReply::parse(text);
                self.tracer.log(
                    &TraceEvent::now("reply_parsed").with_detail(format!("{} fields", parsed.len())),
                );
                reconcile(&parsed, &snapshot, &mut *self.page)?
            }
            None => ReconcileReport::default(),
        };

        self.log_report(&report);
        self.last_snapshot = Some(snapshot);

        Ok(FillOutcome {
            messages: reply.messages,
            report,
        })
    }

    /// Reset the thread when the page host has navigated since we last
    /// looked. Returns whether a navigation was detected.
    pub fn check_navigation(&mut self) -> Result<bool, AssistError> {
        let url = self.page.current_url()?;
        let changed = self
            .last_url
            .as_deref()
            .is_some_and(|previous| previous != url);

        if changed {
            self.tracer.log(&TraceEvent::now("navigation").with_url(&url));
            self.last_url = Some(url);
            self.reset_thread()?;
        } else {
            self.last_url = Some(url);
        }

        Ok(changed)
    }

    /// Dispatch one wire-shaped request.
    pub fn handle(&mut self, request: Request) -> Reply {
        match request {
            Request::RequestFormDetails => match self.capture() {
                Ok(snapshot) => Reply::form_details(snapshot.clone()),
                Err(e) => Reply::error(e),
            },
            Request::ResetThread => match self.reset_thread() {
                Ok(id) => Reply::thread_reset(id),
                Err(e) => Reply::error(format!("Failed to reset thread: {}", e)),
            },
            Request::AddMessage { content } => match self.add_message(&content) {
                Ok(outcome) => Reply::message(outcome.response),
                Err(e) => Reply::error(e),
            },
        }
    }

    fn log_report(&self, report: &ReconcileReport) {
        for applied in &report.applied {
            self.tracer.log(
                &TraceEvent::now("field_applied")
                    .with_field(&applied.field)
                    .with_strategy(applied.strategy),
            );
        }
        for field in &report.unmatched {
            self.tracer
                .log(&TraceEvent::now("field_unmatched").with_field(field));
        }
        for field in &report.stale {
            self.tracer
                .log(&TraceEvent::now("field_stale").with_field(field));
        }
    }
}
