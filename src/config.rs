use crate::error::ConfigError;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// What to do when the listing cards never show up after a reveal click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealTimeoutPolicy {
    /// Finish the category with the records gathered so far and move on
    #[default]
    KeepPartial,
    /// Fail the whole run
    Abort,
}

/// CSS selectors describing the listing site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Category links on the root page
    pub category_link: String,
    /// One rendered listing card
    pub card: String,
    /// Title anchor inside a card (also carries the listing link)
    pub title: String,
    pub description: String,
    pub hourly_rate: String,
    pub hours_needed: String,
    pub duration: String,
    pub expert_level: String,
    pub skill: String,
    /// The "load more" element
    pub reveal_more: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            category_link: r#"a[data-qa="link"]"#.to_string(),
            card: r#"section[data-qa="job-tile"]"#.to_string(),
            title: r#"a[data-qa="job-title"]"#.to_string(),
            description: r#"p[data-qa="job-description"]"#.to_string(),
            hourly_rate: "small".to_string(),
            hours_needed: r#"p[data-qa="hours-needed"] strong"#.to_string(),
            duration: r#"p[data-qa="duration"] strong"#.to_string(),
            expert_level: r#"p[data-qa="expert-level"] strong"#.to_string(),
            skill: r#"span[data-qa="legacy-skill"]"#.to_string(),
            reveal_more: r#"a[data-qa="load-more"]"#.to_string(),
        }
    }
}

impl SelectorConfig {
    fn entries(&self) -> [(&'static str, &str); 10] {
        [
            ("category_link", &self.category_link),
            ("card", &self.card),
            ("title", &self.title),
            ("description", &self.description),
            ("hourly_rate", &self.hourly_rate),
            ("hours_needed", &self.hours_needed),
            ("duration", &self.duration),
            ("expert_level", &self.expert_level),
            ("skill", &self.skill),
            ("reveal_more", &self.reveal_more),
        ]
    }

    /// Check that every selector parses
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, selector) in self.entries() {
            Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
                field,
                selector: selector.to_string(),
            })?;
        }
        Ok(())
    }
}

/// Configuration for a crawl run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Root listing page holding the category links
    pub root_url: String,

    /// Number of discovered categories to crawl
    #[serde(default = "default_max_categories")]
    pub max_categories: usize,

    /// Where the JSON report is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Bound on waiting for listing cards after a reveal click
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,

    /// Pause after a reveal so injected cards can settle
    #[serde(default = "default_stabilization_delay_ms")]
    pub stabilization_delay_ms: u64,

    /// Quiet period that counts as network-idle after navigation
    #[serde(default = "default_network_idle_ms")]
    pub network_idle_ms: u64,

    /// Upper bound on a single navigation including the idle wait
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Total attempts per navigation before giving up
    #[serde(default = "default_navigation_attempts")]
    pub navigation_attempts: u32,

    #[serde(default)]
    pub on_reveal_timeout: RevealTimeoutPolicy,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Regex patterns a category URL must match (any of)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns that drop a category URL
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    #[serde(default)]
    pub selectors: SelectorConfig,
}

/// Network-idle settings handed to the browser for every navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationWait {
    pub idle: Duration,
    pub timeout: Duration,
}

fn default_max_categories() -> usize {
    5
}

fn default_output_path() -> PathBuf {
    PathBuf::from("categories_jobs.json")
}

fn default_wait_timeout_ms() -> u64 {
    10_000
}

fn default_stabilization_delay_ms() -> u64 {
    2_000
}

fn default_network_idle_ms() -> u64 {
    500
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_navigation_attempts() -> u32 {
    2
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_headless() -> bool {
    true
}

impl CrawlConfig {
    /// Create a new configuration with default values
    pub fn new(root_url: &str) -> Self {
        Self {
            root_url: root_url.to_string(),
            max_categories: default_max_categories(),
            output_path: default_output_path(),
            wait_timeout_ms: default_wait_timeout_ms(),
            stabilization_delay_ms: default_stabilization_delay_ms(),
            network_idle_ms: default_network_idle_ms(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            navigation_attempts: default_navigation_attempts(),
            on_reveal_timeout: RevealTimeoutPolicy::default(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            selectors: SelectorConfig::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Override the WebDriver URL with the `WEBDRIVER_URL` environment variable if set
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
    }

    /// Reject settings the crawl cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.root()?;
        if self.navigation_attempts == 0 {
            return Err(ConfigError::Invalid(
                "navigation_attempts must be at least 1".to_string(),
            ));
        }
        if self.wait_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "wait_timeout_ms must be greater than 0".to_string(),
            ));
        }
        self.selectors.validate()
    }

    /// Parsed root URL
    pub fn root(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.root_url).map_err(|source| ConfigError::InvalidUrl {
            url: self.root_url.clone(),
            source,
        })
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn stabilization_delay(&self) -> Duration {
        Duration::from_millis(self.stabilization_delay_ms)
    }

    pub fn navigation_wait(&self) -> NavigationWait {
        NavigationWait {
            idle: Duration::from_millis(self.network_idle_ms),
            timeout: Duration::from_millis(self.navigation_timeout_ms),
        }
    }
}
