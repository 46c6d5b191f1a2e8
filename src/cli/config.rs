use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "formpilot",
    version,
    about = "Assistant-backed form filling for live web pages"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Assistant service endpoint, e.g. http://127.0.0.1:5000
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Assistant backend: http or mock
    #[arg(long, global = true)]
    pub assistant: Option<String>,

    /// Path to the page-host Node.js script
    #[arg(long, global = true)]
    pub host_script: Option<String>,

    /// Path to config file (default: formpilot.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Capture the page's forms and print them
    Scan {
        /// URL to open
        #[arg(long)]
        url: String,

        /// Print the snapshot as JSON instead of a summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Ask the assistant to fill every form on the page
    Fill {
        /// URL to open
        #[arg(long)]
        url: String,

        /// Extra context forwarded to the assistant
        #[arg(long)]
        context: Option<String>,
    },

    /// Interactive chat that fills forms as you go
    Chat {
        /// URL to open
        #[arg(long)]
        url: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `formpilot.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// "http" or "mock"
    #[serde(default = "default_backend")]
    pub backend: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            backend: default_backend(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_host_script")]
    pub host_script: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            host_script: default_host_script(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TraceConfig {
    /// JSONL trace file; tracing is off when unset.
    pub path: Option<String>,
}

// Serde default helpers
fn default_endpoint() -> String {
    "http://127.0.0.1:5000".to_string()
}
fn default_backend() -> String {
    "http".to_string()
}
fn default_host_script() -> String {
    "host/page_host.js".to_string()
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("formpilot.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Resolution (merge CLI args with config file)
// ============================================================================

/// Effective settings for one invocation: CLI > config file > defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: String,
    pub backend: String,
    pub host_script: String,
    pub trace_path: Option<String>,
    pub verbose: u8,
}

pub fn resolve_settings(cli: &Cli, config: &AppConfig) -> Settings {
    Settings {
        endpoint: cli
            .endpoint
            .clone()
            .unwrap_or_else(|| config.assistant.endpoint.clone()),
        backend: cli
            .assistant
            .clone()
            .unwrap_or_else(|| config.assistant.backend.clone()),
        host_script: cli
            .host_script
            .clone()
            .unwrap_or_else(|| config.browser.host_script.clone()),
        trace_path: config.trace.path.clone(),
        verbose: cli.verbose,
    }
}
