// Re-export modules
pub mod browser;
pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod output;
pub mod parsers;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{CrawlConfig, RevealTimeoutPolicy};
pub use error::{BrowserError, ConfigError, CrawlError};
pub use results::{Category, CategoryResult, CrawlReport, JobRecord};

use std::path::{Path, PathBuf};

/// Main builder for a crawl run
pub struct Harvest {
    config: CrawlConfig,
}

impl Harvest {
    /// Create a new builder for the given root listing page
    pub fn new(root_url: &str) -> Self {
        Self {
            config: CrawlConfig::new(root_url),
        }
    }

    /// Start from an existing configuration
    pub fn with_config(config: CrawlConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a JSON file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::with_config(CrawlConfig::from_file(path)?))
    }

    /// Set the number of categories to crawl
    pub fn with_max_categories(mut self, max_categories: usize) -> Self {
        self.config.max_categories = max_categories;
        self
    }

    /// Set where the report is written
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Set the bound on waiting for cards after a reveal click
    pub fn with_wait_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.wait_timeout_ms = timeout_ms;
        self
    }

    /// Set the pause after each reveal
    pub fn with_stabilization_delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.stabilization_delay_ms = delay_ms;
        self
    }

    /// Set the WebDriver server URL
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Run the browser without a visible window
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    /// Choose what happens when cards never appear after a reveal
    pub fn with_reveal_timeout_policy(mut self, policy: RevealTimeoutPolicy) -> Self {
        self.config.on_reveal_timeout = policy;
        self
    }

    /// Configuration the run will use
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawl, write the report and return it
    pub async fn run(self) -> Result<CrawlReport, CrawlError> {
        crawlers::run(&self.config).await
    }
}
