//! Core Scorer implementation

use crate::config::ScoringConfig;
use crate::error::ScorerError;
use crate::matcher::{classify_url, TitleMatcher};
use crate::metrics::MetricsRecord;
use citeprobe_domain::{GroundTruthRecord, RetrievedDocument, SearchResult};
use tracing::{debug, info};

/// Result of one scoring pass
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    /// Aggregate metrics
    pub metrics: MetricsRecord,

    /// Retrieved documents with no equivalent ground-truth record
    pub unmatched: Vec<RetrievedDocument>,
}

/// The Scorer compares retrieved documents against a ground-truth table
pub struct Scorer {
    config: ScoringConfig,
    matcher: TitleMatcher,
}

impl Scorer {
    /// Create a new Scorer
    pub fn new(config: ScoringConfig) -> Result<Self, ScorerError> {
        config.validate().map_err(ScorerError::Config)?;
        let matcher = TitleMatcher::new(config.max_title_distance);
        Ok(Self { config, matcher })
    }

    /// The configuration in use
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// The title matcher in use
    pub fn matcher(&self) -> &TitleMatcher {
        &self.matcher
    }

    /// Reset decorations and classify every record by URL
    pub fn classify(&self, ground_truth: &mut [GroundTruthRecord]) {
        for record in ground_truth.iter_mut() {
            let class = record
                .url
                .as_deref()
                .map(|url| classify_url(url, &self.config))
                .unwrap_or_default();
            record.match_count = 0;
            record.is_pmc = class.is_pmc;
            record.is_preprint = class.is_preprint;
        }
    }

    /// Index of the first record whose title is equivalent to `title`
    pub fn find_match(&self, title: &str, ground_truth: &[GroundTruthRecord]) -> Option<usize> {
        ground_truth
            .iter()
            .position(|record| self.matcher.equivalent(title, &record.title))
    }

    /// Score a search result against a ground-truth table
    ///
    /// The table is decorated in place: `match_count` is reset and then
    /// incremented once for every retrieved document whose first equivalent
    /// record it is. A retrieved document counts against at most one record.
    pub fn score(
        &self,
        result: &SearchResult,
        ground_truth: &mut [GroundTruthRecord],
    ) -> ScoreOutcome {
        self.classify(ground_truth);

        let mut agreement_count = 0;
        let mut unmatched = Vec::new();

        for document in &result.documents {
            match self.find_match(&document.title, ground_truth) {
                Some(index) => {
                    ground_truth[index].match_count += 1;
                    agreement_count += 1;
                }
                None => {
                    debug!("No ground-truth match for '{}'", document.title);
                    unmatched.push(document.clone());
                }
            }
        }

        let metrics = MetricsRecord::compute(
            result.hit_count,
            result.retrieved_count(),
            agreement_count,
            ground_truth,
        );

        info!(
            "Scored {} documents against {} records: {} agreed, {} unmatched",
            metrics.retrieved_count,
            metrics.ground_truth_count,
            agreement_count,
            unmatched.len()
        );

        ScoreOutcome { metrics, unmatched }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        let config = ScoringConfig::default();
        let matcher = TitleMatcher::new(config.max_title_distance);
        Self { config, matcher }
    }
}
