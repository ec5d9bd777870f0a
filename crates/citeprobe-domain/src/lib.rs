//! Citeprobe Domain Layer
//!
//! This crate contains the core domain model for citeprobe. It has no external
//! dependencies and defines the value types and trait interfaces that every
//! other crate in the workspace builds on.
//!
//! ## Key Concepts
//!
//! - **Entity**: A physical reagent identified by SKU, optional clone, manufacturer and target
//! - **Placeholder**: One of the four named slots (`$TARGET`, `$CLONE`, `$MANUFACTURER`, `$SKU`)
//! - **Retrieved document**: A search hit returned by the search collaborator
//! - **Ground truth record**: One curated citation known to reference an entity
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and small pure helpers only
//! - Network, file and spreadsheet access live behind the traits in [`traits`]
//!
//! ## Example
//!
//! ```
//! use citeprobe_domain::{GroundTruthRecord, GroundTruthSource};
//!
//! struct Fixed;
//!
//! impl GroundTruthSource for Fixed {
//!     type Error = String;
//!
//!     fn load_ground_truth(&self, identifier: &str) -> Result<Vec<GroundTruthRecord>, String> {
//!         Ok(vec![GroundTruthRecord::new(format!("Paper for {}", identifier), None)])
//!     }
//! }
//!
//! let records = Fixed.load_ground_truth("3").unwrap();
//! assert_eq!(records[0].title, "Paper for 3");
//! assert!(!records[0].is_fulfilled());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod entity;
pub mod placeholder;
pub mod traits;

// Re-exports for convenience
pub use document::{GroundTruthRecord, RetrievedDocument, SearchPage, SearchResult};
pub use entity::{EntityDescriptor, EntityId, IdentifierParseError, Manufacturer};
pub use placeholder::Placeholder;
pub use traits::{FulltextSource, GroundTruthSource, SearchProvider};
