//! Scoring configuration

use serde::{Deserialize, Serialize};

/// Configuration for title matching and ground-truth classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Titles are equivalent when their edit distance is strictly below this
    #[serde(default = "default_max_title_distance")]
    pub max_title_distance: usize,

    /// Host that marks a ground-truth URL as a PMC record
    #[serde(default = "default_pmc_domain")]
    pub pmc_domain: String,

    /// URL fragments that mark a preprint server
    #[serde(default = "default_preprint_markers")]
    pub preprint_markers: Vec<String>,
}

fn default_max_title_distance() -> usize {
    35
}

fn default_pmc_domain() -> String {
    "europepmc.org".to_string()
}

fn default_preprint_markers() -> Vec<String> {
    [
        "biorxiv.org",
        "medrxiv.org",
        "arxiv.org",
        "researchsquare.com",
        "preprints.org",
        "ssrn.com",
        "/PPR",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_title_distance: default_max_title_distance(),
            pmc_domain: default_pmc_domain(),
            preprint_markers: default_preprint_markers(),
        }
    }
}

impl ScoringConfig {
    /// Near-exact title matching
    pub fn strict() -> Self {
        Self {
            max_title_distance: 10,
            ..Self::default()
        }
    }

    /// Tolerant title matching for noisy ground truth
    pub fn lenient() -> Self {
        Self {
            max_title_distance: 50,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_title_distance == 0 {
            return Err("max_title_distance must be greater than 0".to_string());
        }
        if self.pmc_domain.trim().is_empty() {
            return Err("pmc_domain must not be empty".to_string());
        }
        if self.preprint_markers.iter().any(|m| m.is_empty()) {
            return Err("preprint_markers must not contain empty entries".to_string());
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
