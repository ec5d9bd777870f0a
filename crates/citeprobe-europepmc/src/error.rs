//! Error types for the Europe PMC client

use thiserror::Error;

/// Errors that can occur while talking to Europe PMC
#[derive(Error, Debug)]
pub enum SearchError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response body could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded after all retries
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Local full-text cache failure
    #[error("Cache error: {0}")]
    Cache(String),

    /// Error from a wrapped collaborator
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SearchError::InvalidResponse(e.to_string())
        } else {
            SearchError::Communication(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(e: serde_json::Error) -> Self {
        SearchError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}

impl From<std::io::Error> for SearchError {
    fn from(e: std::io::Error) -> Self {
        SearchError::Cache(e.to_string())
    }
}
