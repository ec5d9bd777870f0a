//! Europe PMC REST client
//!
//! Blocking HTTP access to the search and full-text endpoints, with retry and
//! exponential backoff for transient failures.

use crate::config::EuropePmcConfig;
use crate::error::SearchError;
use crate::response::parse_search_page;
use citeprobe_domain::{FulltextSource, SearchPage, SearchProvider, SearchResult};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Client for the Europe PMC search and full-text endpoints
pub struct EuropePmcClient {
    config: EuropePmcConfig,
    client: Client,
}

impl EuropePmcClient {
    /// Create a new client
    pub fn new(config: EuropePmcConfig) -> Result<Self, SearchError> {
        config.validate().map_err(SearchError::Config)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("citeprobe/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    /// Create a client with the default configuration
    pub fn with_defaults() -> Result<Self, SearchError> {
        Self::new(EuropePmcConfig::default())
    }

    /// The configuration in use
    pub fn config(&self) -> &EuropePmcConfig {
        &self.config
    }

    /// Run a search, following cursors up to the configured page cap
    pub fn search(&self, query: &str) -> Result<SearchResult, SearchError> {
        let result = self.search_all(query, self.config.max_pages)?;
        info!(
            "Search returned {} of {} reported hits in {} pages{}",
            result.retrieved_count(),
            result.hit_count,
            result.pages_fetched,
            if result.truncated { " (page cap reached)" } else { "" }
        );
        Ok(result)
    }

    /// Send a request, retrying transport failures, 429 and 5xx responses
    ///
    /// Any other response is returned to the caller, successful or not.
    fn send_with_retry(
        &self,
        build: impl Fn() -> RequestBuilder,
    ) -> Result<Response, SearchError> {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.config.max_retries {
            match build().send() {
                Ok(response) if is_transient(response.status()) => {
                    let status = response.status();
                    last_error = Some(if status == StatusCode::TOO_MANY_REQUESTS {
                        SearchError::RateLimitExceeded
                    } else {
                        SearchError::Communication(format!("HTTP {}", status))
                    });
                }
                Ok(response) => return Ok(response),
                Err(e) => {
                    last_error = Some(SearchError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.config.max_retries {
                let delay = backoff_delay(self.config.retry_base_delay_ms, attempts);
                warn!("Request failed (attempt {}), retrying in {}ms", attempts, delay);
                thread::sleep(Duration::from_millis(delay));
            }
        }

        Err(last_error
            .unwrap_or_else(|| SearchError::Communication("Max retries exceeded".to_string())))
    }
}

/// Exponential backoff: base, 2x base, 4x base, ... saturating at `u64::MAX`
fn backoff_delay(base_ms: u64, attempt: u32) -> u64 {
    let factor = 2u64.checked_pow(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
    base_ms.saturating_mul(factor)
}

fn is_transient(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

impl SearchProvider for EuropePmcClient {
    type Error = SearchError;

    fn search_page(&self, query: &str, cursor: Option<&str>) -> Result<SearchPage, Self::Error> {
        if cursor.is_some() {
            // Rate limit follow-up pages
            thread::sleep(Duration::from_millis(self.config.page_delay_ms));
        }

        let url = self.config.search_url();
        let params = [
            ("query", query.to_string()),
            ("format", "json".to_string()),
            ("pageSize", self.config.page_size.to_string()),
            ("cursorMark", cursor.unwrap_or("*").to_string()),
        ];

        debug!("GET {} cursor={}", url, cursor.unwrap_or("*"));

        let response = self.send_with_retry(|| self.client.get(&url).query(&params))?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(SearchError::Communication(format!("HTTP {}: {}", status, body)));
        }

        parse_search_page(&body, cursor)
    }
}

impl FulltextSource for EuropePmcClient {
    type Error = SearchError;

    fn fetch_fulltext(&self, document_id: &str) -> Result<Option<String>, Self::Error> {
        let url = self.config.fulltext_url(document_id);
        debug!("GET {}", url);

        let response = self.send_with_retry(|| self.client.get(&url))?;

        if !response.status().is_success() {
            debug!("Full text for {} unavailable: HTTP {}", document_id, response.status());
            return Ok(None);
        }

        Ok(Some(response.text()?))
    }
}
