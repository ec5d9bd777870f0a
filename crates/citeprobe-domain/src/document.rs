//! Document module - search hits and curated ground-truth citations

use std::collections::BTreeMap;

/// A document returned by the search collaborator
///
/// Read-only to the core. `identifier` is the best available external ID
/// (PMID, then PMCID, then DOI, then the search engine's own ID).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedDocument {
    /// Publication title
    pub title: String,

    /// Best available external identifier
    pub identifier: String,

    /// Opaque metadata reported by the search engine
    pub metadata: BTreeMap<String, String>,
}

impl RetrievedDocument {
    /// Create a document with no metadata
    pub fn new(title: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            identifier: identifier.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// One row of a ground-truth benchmark table
///
/// `match_count`, `is_pmc` and `is_preprint` are decorations written by a
/// single scoring pass; they are reset at the start of each pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundTruthRecord {
    /// Publication title
    pub title: String,

    /// Source URL, when the table has one
    pub url: Option<String>,

    /// Number of retrieved documents that matched this record
    pub match_count: usize,

    /// URL points at the PMC domain
    pub is_pmc: bool,

    /// URL points at a preprint server
    pub is_preprint: bool,
}

impl GroundTruthRecord {
    /// Create an undecorated record
    pub fn new(title: impl Into<String>, url: Option<String>) -> Self {
        Self {
            title: title.into(),
            url,
            match_count: 0,
            is_pmc: false,
            is_preprint: false,
        }
    }

    /// Whether at least one retrieved document matched this record
    pub fn is_fulfilled(&self) -> bool {
        self.match_count >= 1
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Total hits reported by the search engine for the query
    pub hit_count: u64,

    /// Documents on this page
    pub documents: Vec<RetrievedDocument>,

    /// Cursor for the next page, if any
    pub next_cursor: Option<String>,
}

/// Aggregated search results across pages
///
/// `hit_count` is what the search engine reported; `documents.len()` is what
/// was actually retrieved. The two differ when the page cap was reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Total hits reported by the search engine
    pub hit_count: u64,

    /// All retrieved documents
    pub documents: Vec<RetrievedDocument>,

    /// Number of pages fetched
    pub pages_fetched: usize,

    /// More pages were available when the page cap was reached
    pub truncated: bool,
}

impl SearchResult {
    /// Number of documents actually retrieved
    pub fn retrieved_count(&self) -> usize {
        self.documents.len()
    }
}
