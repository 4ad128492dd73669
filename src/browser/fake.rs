//! Scripted in-memory browser for tests
//!
//! Each URL maps to a list of DOM snapshots. Navigating shows the first snapshot and every
//! click moves to the next one, which is how a "load more" button behaves on a real page.

use crate::browser::Browser;
use crate::config::NavigationWait;
use crate::error::BrowserError;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

#[derive(Debug, Default)]
pub(crate) struct FakeBrowser {
    pages: HashMap<String, Vec<String>>,
    failing_loads: HashMap<String, u32>,
    current: Option<(String, usize)>,
    pub navigations: Vec<String>,
    pub clicks: usize,
    pub sleeps: Vec<Duration>,
    pub closed: bool,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `stages` at `url`, one snapshot per reveal cycle
    pub fn with_page(mut self, url: &str, stages: Vec<String>) -> Self {
        self.pages.insert(url.to_string(), stages);
        self
    }

    /// Make the next `times` loads of `url` fail
    pub fn failing(mut self, url: &str, times: u32) -> Self {
        self.failing_loads.insert(url.to_string(), times);
        self
    }

    fn current_html(&self) -> Result<&str, BrowserError> {
        let (url, stage) = self.current.as_ref().ok_or_else(|| BrowserError::Navigation {
            url: String::new(),
            reason: "no page loaded".to_string(),
        })?;
        Ok(self.pages[url][*stage].as_str())
    }

    fn matches(&self, selector: &str) -> Result<bool, BrowserError> {
        let selector = Selector::parse(selector).expect("test selector");
        let doc = Html::parse_document(self.current_html()?);
        Ok(doc.select(&selector).next().is_some())
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    type Element = ();

    async fn navigate(&mut self, url: &str, _wait: &NavigationWait) -> Result<(), BrowserError> {
        self.navigations.push(url.to_string());

        if let Some(remaining) = self.failing_loads.get_mut(url) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(BrowserError::Navigation {
                    url: url.to_string(),
                    reason: "connection reset".to_string(),
                });
            }
        }

        if !self.pages.contains_key(url) {
            return Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: "404".to_string(),
            });
        }
        self.current = Some((url.to_string(), 0));
        Ok(())
    }

    async fn source(&mut self) -> Result<String, BrowserError> {
        Ok(self.current_html()?.to_string())
    }

    async fn current_url(&mut self) -> Result<Url, BrowserError> {
        let (url, _) = self.current.as_ref().ok_or_else(|| BrowserError::Navigation {
            url: String::new(),
            reason: "no page loaded".to_string(),
        })?;
        Url::parse(url).map_err(|e| BrowserError::Navigation {
            url: url.clone(),
            reason: e.to_string(),
        })
    }

    async fn find(&mut self, selector: &str) -> Result<Option<()>, BrowserError> {
        Ok(self.matches(selector)?.then_some(()))
    }

    async fn click(&mut self, _element: ()) -> Result<(), BrowserError> {
        self.clicks += 1;
        if let Some((url, stage)) = self.current.as_mut() {
            let last = self.pages[url.as_str()].len() - 1;
            *stage = (*stage + 1).min(last);
        }
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        if self.matches(selector)? {
            Ok(())
        } else {
            Err(BrowserError::Timeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }

    async fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.closed = true;
        Ok(())
    }
}

/// A job tile with the title anchor pointing at `link`
pub(crate) fn card(title: &str, link: &str) -> String {
    format!(
        r#"<section data-qa="job-tile">
            <a data-qa="job-title" href="{link}">{title}</a>
            <p data-qa="job-description">About {title}</p>
            <small>$30.00-$60.00</small>
            <p data-qa="hours-needed">Hours: <strong>30+ hrs/week</strong></p>
            <p data-qa="duration">Duration: <strong>1-3 months</strong></p>
            <p data-qa="expert-level">Level: <strong>Intermediate</strong></p>
            <span data-qa="legacy-skill">Rust</span>
            <span data-qa="legacy-skill">Scraping</span>
        </section>"#
    )
}

/// A category listing rendering `cards`, optionally followed by the load-more link
pub(crate) fn listing(cards: &[String], has_more: bool) -> String {
    let more = if has_more {
        r##"<a data-qa="load-more" href="#">Load more jobs</a>"##
    } else {
        ""
    };
    format!(
        "<html><body><main>{}</main>{}</body></html>",
        cards.join("\n"),
        more
    )
}

/// The root page linking to each `(title, href)` category
pub(crate) fn root_page(categories: &[(&str, &str)]) -> String {
    let links = categories
        .iter()
        .map(|(title, href)| format!(r#"<li><a data-qa="link" href="{href}"> {title} </a></li>"#))
        .collect::<Vec<_>>()
        .join("\n");
    format!("<html><body><ul>{}</ul></body></html>", links)
}
