pub mod orchestrator;
pub mod pagination;

pub use orchestrator::{crawl, run, run_with};
pub use pagination::{PaginationController, PaginationSettings, PaginationState, RecordAccumulator};

use crate::browser::Browser;
use crate::config::NavigationWait;
use crate::error::CrawlError;

/// Navigate to `url`, trying up to `attempts` times before giving up
pub async fn navigate_with_retry<B: Browser + ?Sized>(
    page: &mut B,
    url: &str,
    wait: &NavigationWait,
    attempts: u32,
) -> Result<(), CrawlError> {
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match page.navigate(url, wait).await {
            Ok(()) => return Ok(()),
            Err(e) if attempt < attempts => {
                ::log::warn!(
                    "Navigation to {} failed (attempt {} of {}): {}",
                    url,
                    attempt,
                    attempts,
                    e
                );
                attempt += 1;
            }
            Err(source) => {
                return Err(CrawlError::Navigation {
                    url: url.to_string(),
                    attempts,
                    source,
                });
            }
        }
    }
}
