//! Error types for the batch runners

use citeprobe_discovery::DiscoveryError;
use citeprobe_scorer::ScorerError;
use citeprobe_synthesizer::SynthesisError;
use thiserror::Error;

/// Errors that can occur while benchmarking or mining
#[derive(Error, Debug)]
pub enum BenchError {
    /// Query synthesis failed for the entity
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Pattern discovery could not be set up
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Scorer could not be set up
    #[error("Scorer error: {0}")]
    Scorer(#[from] ScorerError),

    /// The search collaborator failed
    #[error("Search failed: {0}")]
    Search(String),

    /// A ground-truth table could not be loaded
    #[error("Ground truth error: {0}")]
    GroundTruth(String),

    /// A catalog file could not be parsed
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// CSV read or write failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The template set produced no query for the entity
    #[error("No queries could be synthesized for {0}")]
    NoQueries(String),
}
