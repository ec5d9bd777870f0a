//! Citeprobe Scorer
//!
//! Matches retrieved documents against a curated ground-truth table by
//! approximate title equality and computes recall and false-positive metrics.
//!
//! # Overview
//!
//! ```text
//! SearchResult + ground truth → classify URLs → first-match pass → MetricsRecord
//!                                                      ↓
//!                                       decorated table + unmatched documents
//! ```
//!
//! Titles are equivalent when their Levenshtein distance is below an absolute
//! edit budget (35 by default). Every rate with an empty denominator is zero.
//!
//! # Example Usage
//!
//! ```
//! use citeprobe_domain::{GroundTruthRecord, RetrievedDocument, SearchResult};
//! use citeprobe_scorer::Scorer;
//!
//! let mut ground_truth = vec![GroundTruthRecord::new("Anti-CD4 antibody study", None)];
//! let result = SearchResult {
//!     hit_count: 1,
//!     documents: vec![RetrievedDocument::new("Anti-CD4 antibody study", "123")],
//!     pages_fetched: 1,
//!     truncated: false,
//! };
//!
//! let outcome = Scorer::default().score(&result, &mut ground_truth);
//! assert_eq!(outcome.metrics.fulfillment_rate, 1.0);
//! assert_eq!(ground_truth[0].match_count, 1);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod matcher;
mod metrics;
mod scorer;

pub use config::ScoringConfig;
pub use error::ScorerError;
pub use matcher::{classify_url, extract_pmc_ids, TitleMatcher, UrlClass};
pub use metrics::{percentage, rate, MetricsRecord};
pub use scorer::{ScoreOutcome, Scorer};
