//! Citeprobe Discovery
//!
//! Mines known-positive documents for the textual patterns that mark an
//! entity mention, then rewrites them into templates usable for other
//! entities.
//!
//! # Architecture
//!
//! ```text
//! EntityDescriptor → VariantSet → candidate patterns → compile
//!                                          ↓
//!          document text → primary pass → (no match) → secondary pass
//!                                          ↓
//!                      matches → generalize → GeneralizedPattern → QueryTemplate
//! ```
//!
//! Primary patterns require two fields (for instance target and clone) within a
//! short gap, in either order. Secondary patterns accept a lone SKU or clone with
//! surrounding context and only run when no primary pattern matched.
//!
//! # Example Usage
//!
//! ```
//! use citeprobe_discovery::{DiscoveryConfig, PatternDiscovery};
//! use citeprobe_domain::EntityDescriptor;
//!
//! let entity = EntityDescriptor::new("550280", Some("RM4-5"), "BD Biosciences", Some("CD4"));
//! let discovery = PatternDiscovery::new(&entity, &DiscoveryConfig::default()).unwrap();
//!
//! let outcome = discovery.discover("BD Biosciences clone RM4-5");
//! assert_eq!(outcome.discovered[0].generalized.text(), "$MANUFACTURER clone $CLONE");
//! ```

#![warn(missing_docs)]

mod config;
mod discovery;
mod error;
mod generalize;
mod matcher;
mod pattern;

pub use config::DiscoveryConfig;
pub use discovery::{Discovered, DiscoveryOutcome, PatternDiscovery, PatternTally};
pub use error::{DiscoveryError, PatternCompilationError};
pub use generalize::{generalize, GeneralizedPattern};
pub use matcher::{CompiledPatterns, PatternMatch};
pub use pattern::{propose_patterns, propose_primary, propose_secondary, CandidatePattern, PatternKind};
