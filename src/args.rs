use clap::Parser;
use job_harvest::{CrawlConfig, RevealTimeoutPolicy};
use std::path::PathBuf;

pub const DEFAULT_ROOT_URL: &str = "https://www.upwork.com/freelance-jobs/";

#[derive(Parser, Debug)]
#[command(name = "job-harvest")]
#[command(about = "Collects job listings from the first categories of a listings site")]
#[command(version)]
pub struct Args {
    /// Root listing page holding the category links
    #[arg(long)]
    pub root_url: Option<String>,

    /// Path to a JSON crawl configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of categories to crawl
    #[arg(short, long)]
    pub max_categories: Option<usize>,

    /// Output file for the JSON report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Milliseconds to wait for listing cards after clicking "load more"
    #[arg(long)]
    pub wait_timeout_ms: Option<u64>,

    /// Milliseconds to pause after each "load more" so new cards settle
    #[arg(long)]
    pub stabilization_delay_ms: Option<u64>,

    /// WebDriver server URL
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub headed: bool,

    /// Fail the run when a category times out instead of keeping its partial results
    #[arg(long)]
    pub abort_on_timeout: bool,
}

impl Args {
    /// Build the crawl configuration: file first, then environment, then flags
    pub fn into_config(self) -> Result<CrawlConfig, job_harvest::ConfigError> {
        let mut config = match &self.config {
            Some(path) => CrawlConfig::from_file(path)?,
            None => CrawlConfig::new(DEFAULT_ROOT_URL),
        };
        config.apply_env();

        if let Some(root_url) = self.root_url {
            config.root_url = root_url;
        }
        if let Some(max_categories) = self.max_categories {
            config.max_categories = max_categories;
        }
        if let Some(output) = self.output {
            config.output_path = output;
        }
        if let Some(timeout) = self.wait_timeout_ms {
            config.wait_timeout_ms = timeout;
        }
        if let Some(delay) = self.stabilization_delay_ms {
            config.stabilization_delay_ms = delay;
        }
        if let Some(url) = self.webdriver_url {
            config.webdriver_url = url;
        }
        if self.headed {
            config.headless = false;
        }
        if self.abort_on_timeout {
            config.on_reveal_timeout = RevealTimeoutPolicy::Abort;
        }

        Ok(config)
    }
}
