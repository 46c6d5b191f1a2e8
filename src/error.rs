use std::fmt;
use std::process::ExitStatus;

#[derive(Debug)]
pub enum AssistError {
    /// Page host subprocess failed to spawn
    SubprocessSpawn { script: String, source: std::io::Error },

    /// Page host subprocess exited with non-zero status
    SubprocessFailed { script: String, status: ExitStatus, stderr: String },

    /// Stdin/stdout pipe to the page host broke
    SessionIO(String),

    /// Page host answered a command with ok=false
    SessionProtocol { command: String, error: String },

    /// JSON parsing failed (page host output, service reply, or serde)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (command to the page host)
    JsonSerialize { context: String, source: serde_json::Error },

    /// HTTP transport failure talking to the assistant service
    Http { context: String, source: reqwest::Error },

    /// Assistant service reported an error (non-2xx status or error body)
    Service { context: String, message: String },

    /// Service reply was missing a required field (e.g. thread id)
    MalformedReply(String),

    /// A message was sent before any thread existed
    NoThread,
}

impl fmt::Display for AssistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssistError::SubprocessSpawn { script, source } => {
                write!(f, "Failed to spawn {} (is Node.js installed?): {}", script, source)
            }
            AssistError::SubprocessFailed { script, status, stderr } => {
                write!(f, "{} exited with {}: {}", script, status, stderr)
            }
            AssistError::SessionIO(msg) => {
                write!(f, "Page host session I/O failed: {}", msg)
            }
            AssistError::SessionProtocol { command, error } => {
                write!(f, "Page host rejected '{}': {}", command, error)
            }
            AssistError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            AssistError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            AssistError::Http { context, source } => {
                write!(f, "HTTP request failed ({}): {}", context, source)
            }
            AssistError::Service { context, message } => {
                write!(f, "Assistant service error ({}): {}", context, message)
            }
            AssistError::MalformedReply(msg) => {
                write!(f, "Malformed service reply: {}", msg)
            }
            AssistError::NoThread => {
                write!(f, "No thread ID available. Please reset the thread first.")
            }
        }
    }
}

impl std::error::Error for AssistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssistError::SubprocessSpawn { source, .. } => Some(source),
            AssistError::JsonParse { source, .. } => Some(source),
            AssistError::JsonSerialize { source, .. } => Some(source),
            AssistError::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}
