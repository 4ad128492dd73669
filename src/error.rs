use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a browser session
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The page did not load or never went network-idle
    #[error("failed to load {url}: {reason}")]
    Navigation { url: String, reason: String },

    /// A bounded wait for a selector ran out
    #[error("timed out after {timeout_ms} ms waiting for `{selector}`")]
    Timeout { selector: String, timeout_ms: u64 },

    #[error("webdriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    #[error("could not start a webdriver session at {url}: {reason}")]
    Session { url: String, reason: String },
}

/// Problems with a crawl configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid root URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("invalid selector for {field}: `{selector}`")]
    InvalidSelector { field: &'static str, selector: String },

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level error for a crawl run
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    /// Root or category page failed to load after every attempt
    #[error("navigation to {url} failed after {attempts} attempt(s): {source}")]
    Navigation {
        url: String,
        attempts: u32,
        source: BrowserError,
    },

    /// No listing card appeared after clicking the reveal affordance
    #[error("no listing cards for category `{category}` within {timeout_ms} ms after reveal")]
    RevealTimeout { category: String, timeout_ms: u64 },

    #[error("failed to write report to {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CrawlError {
    /// Whether this error ends only the current category under a lenient policy
    pub fn is_reveal_timeout(&self) -> bool {
        matches!(self, CrawlError::RevealTimeout { .. })
    }
}
