//! Integration tests for the on-disk full-text cache

use citeprobe_domain::FulltextSource;
use citeprobe_europepmc::{FulltextCache, MockFulltextSource, SearchError};
use tempfile::TempDir;

#[test]
fn test_cache_serves_repeats_from_disk() {
    let dir = TempDir::new().unwrap();
    let source = MockFulltextSource::new();
    source.add_document("PMC100", "<article>CD4 (RM4-5)</article>");

    let cache = FulltextCache::new(source.clone(), dir.path().join("articles")).unwrap();

    let first = cache.fetch_fulltext("PMC100").unwrap();
    let second = cache.fetch_fulltext("PMC100").unwrap();

    assert_eq!(first.as_deref(), Some("<article>CD4 (RM4-5)</article>"));
    assert_eq!(first, second);
    assert_eq!(source.call_count(), 1);
    assert!(cache.contains("PMC100"));
    assert!(dir.path().join("articles").join("PMC100.xml").is_file());
}

#[test]
fn test_unavailable_documents_are_not_cached() {
    let dir = TempDir::new().unwrap();
    let source = MockFulltextSource::new();
    let cache = FulltextCache::new(source.clone(), dir.path()).unwrap();

    assert_eq!(cache.fetch_fulltext("PMC404").unwrap(), None);
    assert_eq!(cache.fetch_fulltext("PMC404").unwrap(), None);

    assert!(!cache.contains("PMC404"));
    assert_eq!(source.call_count(), 2);
}

#[test]
fn test_upstream_errors_are_wrapped() {
    let dir = TempDir::new().unwrap();
    let source = MockFulltextSource::new();
    source.add_error("PMC500");
    let cache = FulltextCache::new(source, dir.path()).unwrap();

    assert!(matches!(
        cache.fetch_fulltext("PMC500"),
        Err(SearchError::Upstream(_))
    ));
}

#[test]
fn test_entry_path_is_file_safe() {
    let dir = TempDir::new().unwrap();
    let cache = FulltextCache::new(MockFulltextSource::new(), dir.path()).unwrap();

    let path = cache.entry_path("10.1101/2020.01.01");
    assert_eq!(path.file_name().unwrap(), "10.1101_2020.01.01.xml");
    assert_eq!(path.parent().unwrap(), dir.path());
}
