//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use citeprobe_bench::BenchConfig;
use citeprobe_discovery::DiscoveryConfig;
use citeprobe_europepmc::EuropePmcConfig;
use citeprobe_scorer::ScoringConfig;
use citeprobe_synthesizer::SynthesizerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// Every section is optional in the file; missing sections and fields take
/// their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Input and output locations
    #[serde(default)]
    pub paths: Paths,

    /// Query synthesis
    #[serde(default)]
    pub synthesizer: SynthesizerConfig,

    /// Pattern discovery
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Match scoring
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Europe PMC client
    #[serde(default)]
    pub europepmc: EuropePmcConfig,

    /// Benchmark runs
    #[serde(default)]
    pub bench: BenchConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// File locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    /// Directory of ground-truth tables (`<index>.csv`)
    #[serde(default = "default_ground_truth_dir")]
    pub ground_truth_dir: PathBuf,

    /// Lines to skip above the header of each ground-truth table
    #[serde(default)]
    pub ground_truth_skip_rows: usize,

    /// Directory reports are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Full-text cache directory; no caching when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Template library file; the built-in library when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<PathBuf>,

    /// Entity catalog file; the built-in catalog when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".citeprobe").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is used if
    /// present and the defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };

        let contents = fs::read_to_string(&path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("synthesizer", self.synthesizer.validate()),
            ("discovery", self.discovery.validate()),
            ("scoring", self.scoring.validate()),
            ("europepmc", self.europepmc.validate()),
            ("bench", self.bench.validate()),
        ];

        for (section, check) in checks {
            check.map_err(|e| CliError::Config(format!("[{}] {}", section, e)))?;
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            ground_truth_dir: default_ground_truth_dir(),
            ground_truth_skip_rows: 0,
            output_dir: default_output_dir(),
            cache_dir: None,
            templates: None,
            catalog: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_ground_truth_dir() -> PathBuf {
    PathBuf::from("ground-truth")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
