//! Configuration for the Synthesizer

use serde::{Deserialize, Serialize};

/// Configuration for query synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizerConfig {
    /// Wrap each query in parentheses when building the composite query
    #[serde(default = "default_group_queries")]
    pub group_queries: bool,

    /// Longest composite query the search endpoint accepts (characters)
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
}

fn default_group_queries() -> bool {
    true
}

fn default_max_query_length() -> usize {
    1500
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            group_queries: default_group_queries(),
            max_query_length: default_max_query_length(),
        }
    }
}

impl SynthesizerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_query_length == 0 {
            return Err("max_query_length must be greater than 0".to_string());
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SynthesizerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.group_queries);
        assert_eq!(config.max_query_length, 1500);
    }

    #[test]
    fn test_zero_length_is_invalid() {
        let config = SynthesizerConfig {
            max_query_length: 0,
            ..SynthesizerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SynthesizerConfig::from_toml("group_queries = false").unwrap();
        assert!(!config.group_queries);
        assert_eq!(config.max_query_length, 1500);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SynthesizerConfig::default();
        let parsed = SynthesizerConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
