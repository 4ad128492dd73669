//! Browser automation capabilities the crawler depends on
//!
//! The crawl logic only talks to [`Browser`]; [`webdriver::WebDriverSession`] drives a real
//! browser through a WebDriver server.

pub mod webdriver;

#[cfg(test)]
pub(crate) mod fake;

use crate::config::NavigationWait;
use crate::error::BrowserError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

pub use webdriver::WebDriverSession;

/// One browser tab the crawl runs in
#[async_trait]
pub trait Browser: Send {
    /// Handle to an element found on the current page
    type Element: Send;

    /// Load `url` and wait until the page is network-idle
    async fn navigate(&mut self, url: &str, wait: &NavigationWait) -> Result<(), BrowserError>;

    /// HTML snapshot of what is currently rendered
    async fn source(&mut self) -> Result<String, BrowserError>;

    /// URL of the loaded page, used to resolve relative links
    async fn current_url(&mut self) -> Result<Url, BrowserError>;

    /// First element matching `selector`, if any
    async fn find(&mut self, selector: &str) -> Result<Option<Self::Element>, BrowserError>;

    async fn click(&mut self, element: Self::Element) -> Result<(), BrowserError>;

    /// Wait until at least one element matches `selector`
    ///
    /// Fails with [`BrowserError::Timeout`] once `timeout` has passed.
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), BrowserError>;

    async fn sleep(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// End the session
    async fn close(&mut self) -> Result<(), BrowserError>;
}
