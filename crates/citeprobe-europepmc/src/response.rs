//! Europe PMC search response format

use crate::error::SearchError;
use citeprobe_domain::{RetrievedDocument, SearchPage};
use serde::Deserialize;

/// Response from the search endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    hit_count: u64,
    next_cursor_mark: Option<String>,
    #[serde(default)]
    result_list: ResultList,
}

#[derive(Debug, Default, Deserialize)]
struct ResultList {
    #[serde(default)]
    result: Vec<ArticleRecord>,
}

/// One article of a search response
#[derive(Debug, Deserialize)]
pub(crate) struct ArticleRecord {
    #[serde(default)]
    title: String,
    id: String,
    source: String,
    pmid: Option<String>,
    pmcid: Option<String>,
    doi: Option<String>,
}

impl ArticleRecord {
    /// Best available external identifier: PMID, then PMCID, then DOI, then
    /// the source-specific id
    pub(crate) fn best_identifier(&self) -> &str {
        self.pmid
            .as_deref()
            .or(self.pmcid.as_deref())
            .or(self.doi.as_deref())
            .unwrap_or(&self.id)
    }

    fn into_document(self) -> RetrievedDocument {
        let identifier = self.best_identifier().to_string();
        let mut document = RetrievedDocument::new(self.title, identifier)
            .with_metadata("id", self.id)
            .with_metadata("source", self.source);

        for (key, value) in [("pmid", self.pmid), ("pmcid", self.pmcid), ("doi", self.doi)] {
            if let Some(value) = value {
                document = document.with_metadata(key, value);
            }
        }
        document
    }
}

impl SearchResponse {
    /// Convert into a page; a cursor equal to the one just used means there
    /// are no further pages
    pub(crate) fn into_page(self, current_cursor: Option<&str>) -> SearchPage {
        let next_cursor = self
            .next_cursor_mark
            .filter(|next| Some(next.as_str()) != current_cursor);

        SearchPage {
            hit_count: self.hit_count,
            documents: self
                .result_list
                .result
                .into_iter()
                .map(ArticleRecord::into_document)
                .collect(),
            next_cursor,
        }
    }
}

/// Parse a search response body
pub(crate) fn parse_search_page(
    body: &str,
    current_cursor: Option<&str>,
) -> Result<SearchPage, SearchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.into_page(current_cursor))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "version": "6.9",
        "hitCount": 2,
        "nextCursorMark": "AoIIQ",
        "request": {"queryString": "100401 BioLegend"},
        "resultList": {
            "result": [
                {"id": "3456", "source": "MED", "pmid": "3456", "pmcid": "PMC99", "title": "First"},
                {"id": "PPR12", "source": "PPR", "doi": "10.1101/x", "title": "Second"},
                {"id": "AGR-1", "source": "AGR", "title": "Third"}
            ]
        }
    }"#;

    #[test]
    fn test_parse_search_page() {
        let page = parse_search_page(BODY, None).unwrap();

        assert_eq!(page.hit_count, 2);
        assert_eq!(page.next_cursor.as_deref(), Some("AoIIQ"));
        assert_eq!(page.documents.len(), 3);
        assert_eq!(page.documents[0].identifier, "3456");
        assert_eq!(page.documents[1].identifier, "10.1101/x");
        assert_eq!(page.documents[2].identifier, "AGR-1");
        assert_eq!(page.documents[0].metadata.get("pmcid").map(String::as_str), Some("PMC99"));
        assert_eq!(page.documents[1].metadata.get("source").map(String::as_str), Some("PPR"));
    }

    #[test]
    fn test_repeated_cursor_ends_paging() {
        let page = parse_search_page(BODY, Some("AoIIQ")).unwrap();
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_empty_result() {
        let page = parse_search_page(r#"{"hitCount": 0}"#, None).unwrap();
        assert_eq!(page.hit_count, 0);
        assert!(page.documents.is_empty());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn test_malformed_body() {
        let result = parse_search_page("<html>busy</html>", None);
        assert!(matches!(result, Err(SearchError::InvalidResponse(_))));
    }
}
