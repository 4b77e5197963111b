//! HTTP browsing session
//!
//! Turns a URL into raw page content once a "content ready" marker is
//! present, within a bounded wait. The session carries the evasion knobs:
//! per-request user-agent rotation, browser-shaped headers, and an
//! optional authenticated gateway proxy. None of these may change what
//! gets extracted; they only affect whether the site serves us at all.

use crate::config::{GatewayCredentials, SessionConfig};
use crate::{Result, ScrapeError};
use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::{Duration, Instant};
use url::Url;

/// Raw content of one successfully fetched page
#[derive(Debug, Clone)]
pub struct RawPage {
    /// Final URL of the page
    pub url: Url,

    /// Full HTML body
    pub html: String,

    /// When the content-ready predicate was satisfied
    pub fetched_at: DateTime<Utc>,
}

/// The "content ready" predicate: a marker element that must be present
/// before a page counts as loaded
#[derive(Debug, Clone)]
pub struct ReadyCondition {
    marker: String,
}

impl ReadyCondition {
    pub fn css(marker: &str) -> Self {
        Self {
            marker: marker.to_string(),
        }
    }

    /// True once the marker element is present in the document.
    ///
    /// Markers are static strings from the strategy table; an unparsable
    /// one would make every fetch time out, so it degrades to
    /// always-ready instead.
    pub fn is_satisfied(&self, html: &str) -> bool {
        match Selector::parse(&self.marker) {
            Ok(selector) => Html::parse_document(html).select(&selector).next().is_some(),
            Err(_) => true,
        }
    }
}

/// Capability interface for turning a URL into raw page content
///
/// The pipeline core is indifferent to the concrete mechanism as long as
/// `fetch` honors the ready-wait contract and `close` releases whatever
/// the session holds on every exit path.
pub trait PageFetcher {
    fn fetch(
        &mut self,
        url: &Url,
        ready: &ReadyCondition,
    ) -> impl std::future::Future<Output = Result<RawPage>> + Send;

    fn close(&mut self) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// HTTP client implementation of `PageFetcher`
pub struct HttpSession {
    client: Client,
    user_agents: Vec<String>,
    ready_timeout: Duration,
    poll_interval: Duration,
    closed: bool,
}

impl HttpSession {
    /// Establishes the browsing session.
    ///
    /// Failure here is fatal for the run; failures of individual requests
    /// later are per-task recoverable.
    pub fn new(config: &SessionConfig, gateway: Option<&GatewayCredentials>) -> Result<Self> {
        let mut builder = Client::builder()
            .default_headers(browser_headers())
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true);

        if let Some(credentials) = gateway {
            let proxy = reqwest::Proxy::all(credentials.endpoint()).map_err(|e| {
                ScrapeError::Session {
                    url: String::new(),
                    message: format!("invalid gateway endpoint: {}", e),
                }
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| ScrapeError::Session {
            url: String::new(),
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            user_agents: config.user_agents.clone(),
            ready_timeout: Duration::from_millis(config.ready_timeout_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            closed: false,
        })
    }

    /// Picks the next identity for a request
    fn rotate_user_agent(&self) -> &str {
        let index = rand::rng().random_range(0..self.user_agents.len());
        &self.user_agents[index]
    }

    async fn get_once(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, self.rotate_user_agent())
            .send()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        let status = response.status();
        if status.as_u16() == 403 || status.as_u16() == 429 {
            return Err(ScrapeError::Session {
                url: url.to_string(),
                message: format!("blocked by anti-bot measures (HTTP {})", status.as_u16()),
            });
        }
        if !status.is_success() {
            return Err(ScrapeError::Session {
                url: url.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        response.text().await.map_err(|e| ScrapeError::Session {
            url: url.to_string(),
            message: format!("failed to read body: {}", e),
        })
    }
}

impl PageFetcher for HttpSession {
    /// Fetches the page, re-polling until the ready marker appears or the
    /// bounded wait elapses.
    async fn fetch(&mut self, url: &Url, ready: &ReadyCondition) -> Result<RawPage> {
        let started = Instant::now();

        loop {
            let html = self.get_once(url).await?;

            if ready.is_satisfied(&html) {
                return Ok(RawPage {
                    url: url.clone(),
                    html,
                    fetched_at: Utc::now(),
                });
            }

            let waited = started.elapsed();
            if waited + self.poll_interval > self.ready_timeout {
                return Err(ScrapeError::FetchTimeout {
                    url: url.to_string(),
                    waited_ms: waited.as_millis() as u64,
                });
            }

            tracing::debug!(url = %url, "content not ready yet, polling again");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.closed = true;
            tracing::debug!("browsing session closed");
        }
        Ok(())
    }
}

/// Headers that make the session look like an interactive browser
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));
    headers.insert("DNT", HeaderValue::from_static("1"));
    headers
}

/// Maps a reqwest error to the error taxonomy: timeouts stay timeouts,
/// everything else is a session-level fault
fn classify_request_error(url: &Url, error: reqwest::Error) -> ScrapeError {
    if error.is_timeout() {
        ScrapeError::FetchTimeout {
            url: url.to_string(),
            waited_ms: 0,
        }
    } else {
        ScrapeError::Session {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
