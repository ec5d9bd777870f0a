//! Configuration for benchmark runs

use serde::{Deserialize, Serialize};

/// Configuration for the benchmark runner
///
/// # Examples
///
/// ```
/// use citeprobe_bench::BenchConfig;
///
/// let config = BenchConfig::default();
/// assert_eq!(config.max_pages, 20);
/// assert!(config.split_overlong_queries);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Result pages fetched per search
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Run one search per query when the composite query is too long
    #[serde(default = "default_split_overlong_queries")]
    pub split_overlong_queries: bool,
}

fn default_max_pages() -> usize {
    20
}

fn default_split_overlong_queries() -> bool {
    true
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            split_overlong_queries: default_split_overlong_queries(),
        }
    }
}

impl BenchConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_pages == 0 {
            return Err("max_pages must be greater than 0".to_string());
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
}
