//! Error types for pattern discovery

use thiserror::Error;

/// Errors that can occur while setting up discovery
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A candidate pattern that failed to compile
///
/// Reported as data; the remaining patterns still run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Pattern '{pattern}' failed to compile: {reason}")]
pub struct PatternCompilationError {
    /// The pattern source
    pub pattern: String,

    /// Compiler message
    pub reason: String,
}
