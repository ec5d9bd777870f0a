//! Error types for the Scorer

use thiserror::Error;

/// Errors that can occur while setting up scoring
///
/// Degenerate metrics (an empty denominator) are not errors; they are defined
/// as zero.
#[derive(Error, Debug)]
pub enum ScorerError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
