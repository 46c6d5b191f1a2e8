use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coordinator::coordinator::PageHost;
use crate::dom::document::Document;
use crate::error::AssistError;
use crate::reconcile::reconciler::FieldWriter;
use crate::scan::scanner::scan_page;
use crate::scan::snapshot::PageSnapshot;

/// Request sent to the page host over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum HostRequest {
    Navigate {
        cmd: &'static str,
        url: String,
    },
    Extract {
        cmd: &'static str,
    },
    Fill {
        cmd: &'static str,
        name: String,
        value: String,
    },
    CurrentUrl {
        cmd: &'static str,
    },
    Quit {
        cmd: &'static str,
    },
}

impl HostRequest {
    pub fn navigate(url: &str) -> Self {
        HostRequest::Navigate {
            cmd: "navigate",
            url: url.to_string(),
        }
    }

    pub fn extract() -> Self {
        HostRequest::Extract { cmd: "extract" }
    }

    pub fn fill(name: &str, value: &str) -> Self {
        HostRequest::Fill {
            cmd: "fill",
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn current_url() -> Self {
        HostRequest::CurrentUrl { cmd: "current_url" }
    }

    pub fn quit() -> Self {
        HostRequest::Quit { cmd: "quit" }
    }
}

/// Response received from the page host over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct HostResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub found: Option<bool>,
}

/// A persistent page session backed by the page-host script.
///
/// Launches a long-lived Node.js process that keeps a real browser page
/// open. Commands are sent as NDJSON over stdin, responses read from
/// stdout, one line each way per command.
pub struct BrowserSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
    script: String,
}

impl BrowserSession {
    /// Launch a page session by spawning the host script.
    pub fn launch(script: &str) -> Result<Self, AssistError> {
        let mut child = Command::new("node")
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AssistError::SubprocessSpawn {
                script: script.to_string(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            AssistError::SessionIO("Failed to capture stdin of the page host".into())
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            AssistError::SessionIO("Failed to capture stdout of the page host".into())
        })?;

        let mut reader = BufReader::new(stdout);

        // Wait for the ready signal
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| AssistError::SessionIO(format!("Failed to read ready signal: {}", e)))?;

        let response: HostResponse =
            serde_json::from_str(line.trim()).map_err(|e| AssistError::JsonParse {
                context: "page host ready signal".into(),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(AssistError::SessionProtocol {
                command: "launch".into(),
                error: "Did not receive ready signal from the page host".into(),
            });
        }

        Ok(BrowserSession {
            child,
            stdin,
            reader,
            script: script.to_string(),
        })
    }

    /// Send a request and read the response.
    fn send(&mut self, request: &HostRequest) -> Result<HostResponse, AssistError> {
        let json = serde_json::to_string(request).map_err(|e| AssistError::JsonSerialize {
            context: "HostRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json).map_err(|e| {
            AssistError::SessionIO(format!("Failed to write to page host stdin: {}", e))
        })?;

        self.stdin.flush().map_err(|e| {
            AssistError::SessionIO(format!("Failed to flush page host stdin: {}", e))
        })?;

        let mut line = String::new();
        self.reader.read_line(&mut line).map_err(|e| {
            AssistError::SessionIO(format!("Failed to read from page host stdout: {}", e))
        })?;

        if line.trim().is_empty() {
            return Err(AssistError::SessionIO(
                "Empty response from the page host (process may have died)".into(),
            ));
        }

        serde_json::from_str(line.trim()).map_err(|e| AssistError::JsonParse {
            context: "page host response".into(),
            source: e,
        })
    }

    /// Send a request and verify it succeeded.
    fn send_ok(
        &mut self,
        request: &HostRequest,
        command_name: &str,
    ) -> Result<HostResponse, AssistError> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(AssistError::SessionProtocol {
                command: command_name.into(),
                error: response.error.unwrap_or_else(|| "Unknown error".into()),
            });
        }
        Ok(response)
    }

    /// Navigate the page to a URL.
    pub fn navigate(&mut self, url: &str) -> Result<(), AssistError> {
        self.send_ok(&HostRequest::navigate(url), "navigate")?;
        Ok(())
    }

    /// Extract the current page body as a document tree.
    pub fn extract(&mut self) -> Result<Document, AssistError> {
        let response = self.send_ok(&HostRequest::extract(), "extract")?;
        let data = response.data.ok_or_else(|| AssistError::SessionProtocol {
            command: "extract".into(),
            error: "No data in extract response".into(),
        })?;
        Document::from_value(data).map_err(|e| AssistError::JsonParse {
            context: "extracted page tree".into(),
            source: e,
        })
    }

    /// Extract and scan the current page in one go.
    pub fn scan(&mut self) -> Result<PageSnapshot, AssistError> {
        let doc = self.extract()?;
        Ok(scan_page(&doc))
    }

    /// Assign a value to the live control carrying `name`. Returns false
    /// when no such control exists on the page anymore.
    pub fn fill(&mut self, name: &str, value: &str) -> Result<bool, AssistError> {
        let response = self.send_ok(&HostRequest::fill(name, value), "fill")?;
        Ok(response.found.unwrap_or(false))
    }

    /// Ask the page host for the page's current URL.
    pub fn url(&mut self) -> Result<String, AssistError> {
        let response = self.send_ok(&HostRequest::current_url(), "current_url")?;
        response.url.ok_or_else(|| AssistError::SessionProtocol {
            command: "current_url".into(),
            error: "No URL in current_url response".into(),
        })
    }

    /// Shut the page host down and reap the process.
    pub fn quit(mut self) -> Result<(), AssistError> {
        // Best effort: the host may already be gone.
        let _ = self.send(&HostRequest::quit());

        let status = self.child.wait().map_err(|e| {
            AssistError::SessionIO(format!("Failed to wait for the page host: {}", e))
        })?;

        if !status.success() {
            return Err(AssistError::SubprocessFailed {
                script: self.script.clone(),
                status,
                stderr: String::new(),
            });
        }
        Ok(())
    }
}

impl FieldWriter for BrowserSession {
    fn write_value(&mut self, name: &str, value: &str) -> Result<bool, AssistError> {
        self.fill(name, value)
    }
}

impl PageHost for BrowserSession {
    fn snapshot(&mut self) -> Result<PageSnapshot, AssistError> {
        self.scan()
    }

    fn current_url(&mut self) -> Result<String, AssistError> {
        self.url()
    }
}
