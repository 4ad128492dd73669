use crate::browser::Browser;
use crate::config::NavigationWait;
use crate::error::BrowserError;
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{Value, json};
use std::time::{Duration, Instant};
use url::Url;

const WINDOW_WIDTH: u32 = 1400;
const WINDOW_HEIGHT: u32 = 900;
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Lifts the default 250-entry resource timing cap so the count keeps moving on busy pages
const RESOURCE_BUFFER_SCRIPT: &str = "performance.setResourceTimingBufferSize(100000);";

/// Reports document readiness and how many resources have finished loading so far
const NETWORK_ACTIVITY_SCRIPT: &str =
    "return [document.readyState, performance.getEntriesByType('resource').length];";

/// A browser tab driven over the WebDriver protocol
pub struct WebDriverSession {
    client: Client,
    webdriver_url: String,
    closed: bool,
}

impl WebDriverSession {
    /// Connect to the WebDriver server, falling back to well-known local ports
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self, BrowserError> {
        let client = match connect_client(webdriver_url, headless).await {
            Ok(client) => client,
            Err(e) => {
                ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
                connect_fallback(webdriver_url, headless).await.ok_or(e)?
            }
        };

        if let Err(e) = client.set_window_size(WINDOW_WIDTH, WINDOW_HEIGHT).await {
            ::log::warn!("Could not resize browser window: {}", e);
        }

        Ok(Self {
            client,
            webdriver_url: webdriver_url.to_string(),
            closed: false,
        })
    }

    /// URL of the WebDriver server this session was requested from
    pub fn webdriver_url(&self) -> &str {
        &self.webdriver_url
    }

    /// Poll until the document is complete and no resource finished loading for `idle`
    ///
    /// Resource timing entries only appear once a request completes, so a single request
    /// still in flight after `idle` is not seen. The stabilization delay after each reveal
    /// covers that gap for listing content.
    async fn wait_for_network_idle(&self, idle: Duration) -> Result<(), CmdError> {
        self.client.execute(RESOURCE_BUFFER_SCRIPT, vec![]).await?;

        let mut last_count: Option<u64> = None;
        let mut quiet_since = Instant::now();

        loop {
            let activity = self.client.execute(NETWORK_ACTIVITY_SCRIPT, vec![]).await?;
            let (ready, count) = parse_activity(&activity);

            if last_count != Some(count) {
                last_count = Some(count);
                quiet_since = Instant::now();
            } else if ready && quiet_since.elapsed() >= idle {
                return Ok(());
            }

            tokio::time::sleep(IDLE_POLL_INTERVAL).await;
        }
    }
}

fn capabilities(headless: bool) -> serde_json::Map<String, Value> {
    let window = format!("--window-size={},{}", WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut chrome_args = vec![window];
    let mut firefox_args = Vec::new();
    if headless {
        chrome_args.push("--headless=new".to_string());
        firefox_args.push("-headless".to_string());
    }

    let caps = json!({
        "goog:chromeOptions": { "args": chrome_args },
        "moz:firefoxOptions": { "args": firefox_args },
    });
    match caps {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

async fn connect_client(webdriver_url: &str, headless: bool) -> Result<Client, BrowserError> {
    let mut builder = ClientBuilder::native();
    builder.capabilities(capabilities(headless));
    builder
        .connect(webdriver_url)
        .await
        .map_err(|e| BrowserError::Session {
            url: webdriver_url.to_string(),
            reason: e.to_string(),
        })
}

async fn connect_fallback(webdriver_url: &str, headless: bool) -> Option<Client> {
    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://localhost:4444", // geckodriver / Selenium default
        "http://127.0.0.1:4444",
    ];

    for url in fallback_urls.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = connect_client(url, headless).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Some(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    None
}

fn parse_activity(value: &Value) -> (bool, u64) {
    let ready = value
        .get(0)
        .and_then(Value::as_str)
        .is_some_and(|state| state == "complete");
    let count = value.get(1).and_then(Value::as_u64).unwrap_or(0);
    (ready, count)
}

#[async_trait]
impl Browser for WebDriverSession {
    type Element = Element;

    async fn navigate(&mut self, url: &str, wait: &NavigationWait) -> Result<(), BrowserError> {
        ::log::debug!("Navigating to {}", url);
        let load = async {
            self.client.goto(url).await?;
            self.wait_for_network_idle(wait.idle).await
        };

        match tokio::time::timeout(wait.timeout, load).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(BrowserError::Navigation {
                url: url.to_string(),
                reason: format!(
                    "page not network-idle within {} ms",
                    wait.timeout.as_millis()
                ),
            }),
        }
    }

    async fn source(&mut self) -> Result<String, BrowserError> {
        Ok(self.client.source().await?)
    }

    async fn current_url(&mut self) -> Result<Url, BrowserError> {
        Ok(self.client.current_url().await?)
    }

    async fn find(&mut self, selector: &str) -> Result<Option<Element>, BrowserError> {
        let mut found = self.client.find_all(Locator::Css(selector)).await?;
        if found.is_empty() {
            Ok(None)
        } else {
            Ok(Some(found.swap_remove(0)))
        }
    }

    async fn click(&mut self, element: Element) -> Result<(), BrowserError> {
        element.click().await?;
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(BrowserError::Timeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.client.clone().close().await?;
        ::log::debug!("Closed WebDriver session at {}", self.webdriver_url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_activity() {
        assert_eq!(parse_activity(&json!(["complete", 12])), (true, 12));
        assert_eq!(parse_activity(&json!(["loading", 3])), (false, 3));
        assert_eq!(parse_activity(&json!(null)), (false, 0));
    }

    #[test]
    fn test_resource_buffer_is_raised_past_default() {
        assert!(RESOURCE_BUFFER_SCRIPT.contains("setResourceTimingBufferSize"));
        assert!(NETWORK_ACTIVITY_SCRIPT.contains("getEntriesByType('resource')"));
    }

    #[test]
    fn test_capabilities_headless_flags() {
        let caps = capabilities(true);
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.iter().any(|a| a == "--headless=new"));
        assert!(args.iter().any(|a| a == "--window-size=1400,900"));

        let caps = capabilities(false);
        assert!(caps["moz:firefoxOptions"]["args"].as_array().unwrap().is_empty());
    }
}
