//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the matching core and the
//! infrastructure that fetches search results, documents and benchmark tables.
//! Implementations live in other crates.

use crate::{GroundTruthRecord, SearchPage, SearchResult};

/// Trait for executing paginated searches
///
/// Implemented by the infrastructure layer (citeprobe-europepmc)
pub trait SearchProvider {
    /// Error type for search operations
    type Error;

    /// Fetch one page of results; `cursor` is `None` for the first page
    fn search_page(&self, query: &str, cursor: Option<&str>) -> Result<SearchPage, Self::Error>;

    /// Fetch up to `max_pages` pages and aggregate them
    ///
    /// Stops early when the engine reports no next cursor or returns the same
    /// cursor again. `truncated` is set when more pages were still available.
    fn search_all(&self, query: &str, max_pages: usize) -> Result<SearchResult, Self::Error> {
        let max_pages = max_pages.max(1);

        let first = self.search_page(query, None)?;
        let mut result = SearchResult {
            hit_count: first.hit_count,
            documents: first.documents,
            pages_fetched: 1,
            truncated: false,
        };

        let mut current_cursor: Option<String> = None;
        let mut next_cursor = first.next_cursor;

        while let Some(cursor) = next_cursor.take() {
            if current_cursor.as_deref() == Some(cursor.as_str()) {
                break;
            }
            if result.pages_fetched >= max_pages {
                result.truncated = true;
                break;
            }

            let page = self.search_page(query, Some(&cursor))?;
            result.documents.extend(page.documents);
            result.pages_fetched += 1;

            current_cursor = Some(cursor);
            next_cursor = page.next_cursor;
        }

        Ok(result)
    }
}

/// Trait for fetching document full text
///
/// `Ok(None)` means the document is not available; that is "no evidence",
/// not a failure.
pub trait FulltextSource {
    /// Error type for fetch operations
    type Error;

    /// Fetch the full text of one document
    fn fetch_fulltext(&self, document_id: &str) -> Result<Option<String>, Self::Error>;
}

/// Trait for loading ground-truth tables
///
/// Implemented by the batch layer (citeprobe-bench)
pub trait GroundTruthSource {
    /// Error type for load operations
    type Error;

    /// Load the ordered ground-truth table named by `identifier`
    fn load_ground_truth(&self, identifier: &str) -> Result<Vec<GroundTruthRecord>, Self::Error>;
}
