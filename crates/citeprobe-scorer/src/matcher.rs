//! Title equivalence and URL classification

use crate::config::ScoringConfig;
use regex::Regex;
use std::sync::LazyLock;

static PMC_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PMC[0-9]+").expect("PMC id pattern is valid"));

/// Approximate title equality with an absolute edit budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleMatcher {
    max_distance: usize,
}

impl TitleMatcher {
    /// Titles closer than `max_distance` edits are equivalent
    pub fn new(max_distance: usize) -> Self {
        Self { max_distance }
    }

    /// The edit budget
    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Levenshtein distance in characters
    pub fn distance(&self, a: &str, b: &str) -> usize {
        strsim::levenshtein(a, b)
    }

    /// Whether two titles name the same publication
    pub fn equivalent(&self, a: &str, b: &str) -> bool {
        // The distance is at least the difference in length
        let (la, lb) = (a.chars().count(), b.chars().count());
        if la.abs_diff(lb) >= self.max_distance {
            return false;
        }
        self.distance(a, b) < self.max_distance
    }
}

impl Default for TitleMatcher {
    fn default() -> Self {
        Self::new(ScoringConfig::default().max_title_distance)
    }
}

/// Static classification of a ground-truth URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlClass {
    /// URL is under the PMC domain
    pub is_pmc: bool,

    /// URL points at a preprint server
    pub is_preprint: bool,
}

/// Classify a URL against the configured PMC domain and preprint markers
pub fn classify_url(url: &str, config: &ScoringConfig) -> UrlClass {
    let lower = url.to_ascii_lowercase();
    UrlClass {
        is_pmc: lower.contains(&config.pmc_domain.to_ascii_lowercase()),
        is_preprint: config
            .preprint_markers
            .iter()
            .any(|marker| lower.contains(&marker.to_ascii_lowercase())),
    }
}

/// PMC identifiers (`PMC` followed by digits) found in a URL
pub fn extract_pmc_ids(url: &str) -> Vec<String> {
    PMC_ID_RE
        .find_iter(url)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_titles_are_equivalent() {
        let matcher = TitleMatcher::default();
        assert!(matcher.equivalent("Anti-CD4 antibody study", "Anti-CD4 antibody study"));
        assert_eq!(matcher.distance("Anti-CD4 antibody study", "Anti-CD4 antibody study"), 0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let matcher = TitleMatcher::new(3);
        assert!(matcher.equivalent("abcdef", "abcxyf"));
        assert!(!matcher.equivalent("abcdef", "axyzqf"));
        assert!(!matcher.equivalent("abc", "xyz"));
    }

    #[test]
    fn test_length_difference_short_circuit() {
        let matcher = TitleMatcher::new(5);
        assert!(!matcher.equivalent("short", "a considerably longer title"));
        assert!(matcher.equivalent("title", "title."));
    }

    #[test]
    fn test_distinct_titles_rejected_at_default_budget() {
        let matcher = TitleMatcher::default();
        assert!(!matcher.equivalent(
            "Anti-CD4 antibody study",
            "Single-cell transcriptomics of the developing mouse cortex"
        ));
        assert!(matcher.equivalent(
            "CD4+ T cells in the mouse intestine.",
            "Cd4+ T Cells In The Mouse Intestine"
        ));
    }

    #[test]
    fn test_classify_url() {
        let config = ScoringConfig::default();

        let pmc = classify_url("https://europepmc.org/article/PMC/PMC1234567", &config);
        assert!(pmc.is_pmc);
        assert!(!pmc.is_preprint);

        let preprint = classify_url("https://www.biorxiv.org/content/10.1101/2020.01.01", &config);
        assert!(preprint.is_preprint);
        assert!(!preprint.is_pmc);

        let ppr = classify_url("https://europepmc.org/article/PPR/PPR123", &config);
        assert!(ppr.is_pmc);
        assert!(ppr.is_preprint);

        assert_eq!(classify_url("", &config), UrlClass::default());
    }

    #[test]
    fn test_extract_pmc_ids() {
        assert_eq!(
            extract_pmc_ids("https://europepmc.org/article/PMC/PMC7654321"),
            vec!["PMC7654321".to_string()]
        );
        assert!(extract_pmc_ids("https://doi.org/10.1000/xyz").is_empty());
    }
}
