//! Citeprobe Bench
//!
//! Batch runners that tie synthesis, search, scoring and discovery together
//! over a catalog of entities.
//!
//! # Overview
//!
//! - [`EntityCatalog`]: the benchmark corpus, addressed by 1-based index
//! - [`CsvGroundTruth`]: curated citation tables, one CSV per entity
//! - [`Benchmark`]: synthesize → search → score, per entity or per catalog
//! - [`PatternMiner`]: fetch known-positive documents and discover the patterns
//!   they use to cite the entity
//! - [`ReportWriter`]: results, article lists and decorated ground-truth tables
//!
//! A catalog run never stops at the first failing entity; every entity is
//! reported as evaluated or failed with a reason.
//!
//! # Example Usage
//!
//! ```no_run
//! use citeprobe_bench::{BenchConfig, Benchmark, CsvGroundTruth, EntityCatalog, ReportWriter};
//! use citeprobe_europepmc::EuropePmcClient;
//! use citeprobe_scorer::Scorer;
//! use citeprobe_synthesizer::QuerySynthesizer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let benchmark = Benchmark::new(
//!     EuropePmcClient::with_defaults()?,
//!     QuerySynthesizer::with_builtin_templates(),
//!     Scorer::default(),
//!     BenchConfig::default(),
//! )?;
//!
//! let reports = benchmark.evaluate_catalog(
//!     &EntityCatalog::builtin(),
//!     &CsvGroundTruth::new("ground-truth").with_skip_rows(4),
//! );
//! ReportWriter::new("out")?.write_catalog(&reports)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod benchmark;
mod catalog;
mod config;
mod error;
mod ground_truth;
mod miner;
mod report;

pub use benchmark::{Benchmark, EntityReport, EntitySearch, EntityStatus, Evaluation};
pub use catalog::EntityCatalog;
pub use config::BenchConfig;
pub use error::BenchError;
pub use ground_truth::CsvGroundTruth;
pub use miner::{collect_pmc_ids, DocumentMining, DocumentStatus, MiningReport, PatternMiner};
pub use report::ReportWriter;
