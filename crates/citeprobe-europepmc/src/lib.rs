//! Citeprobe Europe PMC
//!
//! Search and full-text collaborators backed by the Europe PMC REST API.
//!
//! # Providers
//!
//! - `EuropePmcClient`: blocking client for the search and full-text endpoints
//! - `FulltextCache`: on-disk cache around any full-text source
//! - `MockSearchProvider` / `MockFulltextSource`: deterministic mocks for testing
//!
//! # Example Usage
//!
//! ```no_run
//! use citeprobe_europepmc::{EuropePmcClient, FulltextCache};
//! use citeprobe_domain::FulltextSource;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = EuropePmcClient::with_defaults()?;
//!
//! let result = client.search("\"BioLegend clone GK1.5\"")?;
//! println!("{} reported hits, {} retrieved", result.hit_count, result.retrieved_count());
//!
//! let cache = FulltextCache::new(client, "articles")?;
//! let _xml = cache.fetch_fulltext("PMC7654321")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cache;
mod client;
mod config;
mod error;
mod mock;
mod response;

pub use cache::FulltextCache;
pub use client::EuropePmcClient;
pub use config::{EuropePmcConfig, MAX_RETRIES};
pub use error::SearchError;
pub use mock::{MockFulltextSource, MockSearchProvider};
