//! Error types for the Synthesizer

use thiserror::Error;

/// Errors that can occur during query synthesis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    /// A produced query still contains a `$NAME` token
    ///
    /// The template references a placeholder the synthesizer does not support.
    /// Fatal for the current entity only.
    #[error("Unresolved placeholder {token} in query '{query}' (template '{template}')")]
    UnresolvedPlaceholder {
        /// Template text the query came from
        template: String,
        /// The offending query
        query: String,
        /// The first unresolved token
        token: String,
    },

    /// Template set could not be loaded
    #[error("Template error: {0}")]
    Template(String),
}
