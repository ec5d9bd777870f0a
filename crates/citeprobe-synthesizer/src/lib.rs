//! Citeprobe Synthesizer
//!
//! Turns an entity descriptor into search-engine queries likely to match the
//! documents that cite it, despite inconsistent notation across publishers.
//!
//! # Overview
//!
//! ```text
//! EntityDescriptor → VariantSet → TemplateSet × VariantSet → queries → CompositeQuery
//! ```
//!
//! - **Variant expansion**: alternate renderings of names and clone identifiers
//!   ("Bio-Rad" / "Bio Rad" / "BioRad", "RM4-5" / "RM4.5" / "RM 4-5")
//! - **Templates**: a versioned, immutable library of query patterns with
//!   `$TARGET`, `$CLONE`, `$MANUFACTURER` and `$SKU` placeholders
//! - **Combinatorial fan-out**: every template is expanded against every
//!   combination of placeholder values
//! - **Integrity**: a query that still contains a `$NAME` token is an error for
//!   that entity, never a malformed query
//!
//! # Example Usage
//!
//! ```
//! use citeprobe_domain::EntityDescriptor;
//! use citeprobe_synthesizer::{QueryTemplate, QuerySynthesizer, SynthesizerConfig, TemplateSet};
//! use std::sync::Arc;
//!
//! let templates = TemplateSet::new(1, vec![QueryTemplate::new("$SKU $MANUFACTURER")]);
//! let synthesizer = QuerySynthesizer::new(Arc::new(templates), SynthesizerConfig::default());
//!
//! let entity = EntityDescriptor::new("100401", Some("GK1.5"), "BioLegend", Some("CD4"));
//! let queries = synthesizer.synthesize(&entity).unwrap();
//! assert_eq!(queries, vec!["100401 BioLegend".to_string()]);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod synthesizer;
mod template;
mod variants;

pub use config::SynthesizerConfig;
pub use error::SynthesisError;
pub use synthesizer::{combine, combine_grouped, expand_template, CompositeQuery, QuerySynthesizer};
pub use template::{QueryTemplate, TemplateSet};
pub use variants::{
    expand_clone, expand_manufacturer, expand_optional, expand_term, VariantSet, Variants,
};
