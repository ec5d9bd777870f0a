//! On-disk full-text cache

use crate::error::SearchError;
use citeprobe_domain::FulltextSource;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wraps a [`FulltextSource`], storing each fetched document as `<dir>/<id>.xml`
///
/// Repeated fetches are served from disk. Unavailable documents are not
/// cached, so they are retried on the next run.
pub struct FulltextCache<S> {
    source: S,
    dir: PathBuf,
}

impl<S> FulltextCache<S> {
    /// Create a cache in `dir`, creating the directory when missing
    pub fn new(source: S, dir: impl Into<PathBuf>) -> Result<Self, SearchError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { source, dir })
    }

    /// The cache directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The wrapped source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Path of the cache entry for a document
    pub fn entry_path(&self, document_id: &str) -> PathBuf {
        let file_name: String = document_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.xml", file_name))
    }

    /// Whether a document is already cached
    pub fn contains(&self, document_id: &str) -> bool {
        self.entry_path(document_id).is_file()
    }
}

impl<S> FulltextSource for FulltextCache<S>
where
    S: FulltextSource,
    S::Error: Display,
{
    type Error = SearchError;

    fn fetch_fulltext(&self, document_id: &str) -> Result<Option<String>, Self::Error> {
        let path = self.entry_path(document_id);

        if path.is_file() {
            debug!("Cache hit for {}", document_id);
            return Ok(Some(fs::read_to_string(&path)?));
        }

        let content = self
            .source
            .fetch_fulltext(document_id)
            .map_err(|e| SearchError::Upstream(e.to_string()))?;

        if let Some(text) = &content {
            fs::write(&path, text)?;
            debug!("Cached {} at {}", document_id, path.display());
        }

        Ok(content)
    }
}
