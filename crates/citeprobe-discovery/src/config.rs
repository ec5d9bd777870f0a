//! Configuration for pattern discovery

use serde::{Deserialize, Serialize};

/// Configuration for candidate pattern construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Maximum number of arbitrary characters between the two fields of a
    /// primary pattern
    #[serde(default = "default_max_gap")]
    pub max_gap: usize,

    /// Context captured on each side of a secondary (single-field) match
    #[serde(default = "default_secondary_window")]
    pub secondary_window: usize,

    /// Escape regex metacharacters in field values
    ///
    /// When disabled, values are interpolated raw and a value such as `AB(1`
    /// produces a pattern that fails to compile. Such patterns are reported
    /// and skipped.
    #[serde(default = "default_escape_field_values")]
    pub escape_field_values: bool,
}

fn default_max_gap() -> usize {
    16
}

fn default_secondary_window() -> usize {
    24
}

fn default_escape_field_values() -> bool {
    true
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_gap: default_max_gap(),
            secondary_window: default_secondary_window(),
            escape_field_values: default_escape_field_values(),
        }
    }
}

impl DiscoveryConfig {
    /// Tight gaps: fewer, more precise matches
    pub fn strict() -> Self {
        Self {
            max_gap: 8,
            secondary_window: 12,
            ..Self::default()
        }
    }

    /// Wide gaps: more matches, more noise
    pub fn lenient() -> Self {
        Self {
            max_gap: 32,
            secondary_window: 48,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_gap == 0 {
            return Err("max_gap must be greater than 0".to_string());
        }
        if self.max_gap > 1000 || self.secondary_window > 1000 {
            return Err("max_gap and secondary_window must not exceed 1000".to_string());
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
    fn test_default_config() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.max_gap, 16);
        assert_eq!(config.secondary_window, 24);
        assert!(config.escape_field_values);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(DiscoveryConfig::strict().validate().is_ok());
        assert!(DiscoveryConfig::lenient().validate().is_ok());
        assert!(DiscoveryConfig::strict().max_gap < DiscoveryConfig::lenient().max_gap);
    }

    #[test]
    fn test_zero_gap_is_invalid() {
        let config = DiscoveryConfig {
            max_gap: 0,
            ..DiscoveryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = DiscoveryConfig::lenient();
        let parsed = DiscoveryConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
