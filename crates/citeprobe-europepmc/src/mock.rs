//! Deterministic collaborators for tests

use crate::error::SearchError;
use citeprobe_domain::{FulltextSource, RetrievedDocument, SearchPage, SearchProvider};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Mock search provider returning pre-configured pages
///
/// Each query maps to a list of pages; cursors are the page indices. Queries
/// without configured pages return an empty result.
///
/// # Examples
///
/// ```
/// use citeprobe_domain::{RetrievedDocument, SearchProvider};
/// use citeprobe_europepmc::MockSearchProvider;
///
/// let provider = MockSearchProvider::new();
/// provider.add_result("q", 1, vec![RetrievedDocument::new("A title", "1")]);
///
/// let result = provider.search_all("q", 5).unwrap();
/// assert_eq!(result.retrieved_count(), 1);
/// assert_eq!(provider.queries(), vec!["q".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSearchProvider {
    pages: Arc<Mutex<HashMap<String, Vec<SearchPage>>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockSearchProvider {
    /// Create an empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure a single-page result for a query
    pub fn add_result(&self, query: impl Into<String>, hit_count: u64, documents: Vec<RetrievedDocument>) {
        self.add_pages(query, hit_count, vec![documents]);
    }

    /// Configure a paginated result for a query
    pub fn add_pages(
        &self,
        query: impl Into<String>,
        hit_count: u64,
        pages: Vec<Vec<RetrievedDocument>>,
    ) {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, documents)| SearchPage {
                hit_count,
                documents,
                next_cursor: (i + 1 < count).then(|| (i + 1).to_string()),
            })
            .collect();
        lock(&self.pages).insert(query.into(), pages);
    }

    /// Make every search for a query fail
    pub fn add_error(&self, query: impl Into<String>) {
        lock(&self.failing).insert(query.into());
    }

    /// Queries received, one entry per page request
    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }

    /// Number of page requests received
    pub fn call_count(&self) -> usize {
        lock(&self.queries).len()
    }
}

impl SearchProvider for MockSearchProvider {
    type Error = SearchError;

    fn search_page(&self, query: &str, cursor: Option<&str>) -> Result<SearchPage, Self::Error> {
        lock(&self.queries).push(query.to_string());

        if lock(&self.failing).contains(query) {
            return Err(SearchError::Communication("Mock error".to_string()));
        }

        let index = match cursor {
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| SearchError::InvalidResponse(format!("Unknown cursor {}", cursor)))?,
            None => 0,
        };

        Ok(lock(&self.pages)
            .get(query)
            .and_then(|pages| pages.get(index))
            .cloned()
            .unwrap_or_default())
    }
}

/// Mock full-text source serving documents from memory
///
/// Unknown ids are unavailable (`Ok(None)`).
#[derive(Debug, Clone, Default)]
pub struct MockFulltextSource {
    documents: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockFulltextSource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `text` for a document id
    pub fn add_document(&self, document_id: impl Into<String>, text: impl Into<String>) {
        lock(&self.documents).insert(document_id.into(), text.into());
    }

    /// Make fetches of a document id fail
    pub fn add_error(&self, document_id: impl Into<String>) {
        lock(&self.failing).insert(document_id.into());
    }

    /// Number of fetches received
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }
}

impl FulltextSource for MockFulltextSource {
    type Error = SearchError;

    fn fetch_fulltext(&self, document_id: &str) -> Result<Option<String>, Self::Error> {
        *lock(&self.call_count) += 1;

        if lock(&self.failing).contains(document_id) {
            return Err(SearchError::Communication("Mock error".to_string()));
        }

        Ok(lock(&self.documents).get(document_id).cloned())
    }
}
