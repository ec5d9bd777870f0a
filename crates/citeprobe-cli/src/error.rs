//! Error types for the CLI application.

use citeprobe_bench::BenchError;
use citeprobe_domain::IdentifierParseError;
use citeprobe_europepmc::SearchError;
use citeprobe_synthesizer::SynthesisError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Benchmark or mining error
    #[error(transparent)]
    Bench(#[from] BenchError),

    /// Europe PMC client error
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Query synthesis error
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// Entity identifier could not be parsed
    #[error(transparent)]
    Identifier(#[from] IdentifierParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
