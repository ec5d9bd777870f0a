//! Europe PMC client configuration

use serde::{Deserialize, Serialize};

/// Upper bound on `max_retries`
pub const MAX_RETRIES: u32 = 10;

/// Configuration for the Europe PMC client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuropePmcConfig {
    /// Base URL of the EBI web services
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Results per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Maximum pages fetched per search
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Pause before each follow-up page (milliseconds)
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First backoff delay; doubles on every retry (milliseconds)
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

fn default_base_url() -> String {
    "https://www.ebi.ac.uk".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_max_pages() -> usize {
    20
}

fn default_page_delay_ms() -> u64 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    1000
}

impl Default for EuropePmcConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            page_delay_ms: default_page_delay_ms(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

impl EuropePmcConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if self.page_size == 0 || self.page_size > 1000 {
            return Err("page_size must be between 1 and 1000".to_string());
        }
        if self.max_pages == 0 {
            return Err("max_pages must be greater than 0".to_string());
        }
        if self.max_retries == 0 || self.max_retries > MAX_RETRIES {
            return Err(format!("max_retries must be between 1 and {}", MAX_RETRIES));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Search endpoint URL
    pub fn search_url(&self) -> String {
        format!(
            "{}/europepmc/webservices/rest/search",
            self.base_url.trim_end_matches('/')
        )
    }

    /// Full-text XML endpoint URL for one document
    pub fn fulltext_url(&self, document_id: &str) -> String {
        format!(
            "{}/europepmc/webservices/rest/{}/fullTextXML",
            self.base_url.trim_end_matches('/'),
            document_id
        )
    }
}
