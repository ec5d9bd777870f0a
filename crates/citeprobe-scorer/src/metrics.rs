//! Aggregate scoring metrics

use citeprobe_domain::GroundTruthRecord;
use serde::{Deserialize, Serialize};

/// Metrics for one scoring pass
///
/// Every rate is defined as zero when its denominator is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsRecord {
    /// Hit count reported by the search engine
    pub reported_hits: u64,

    /// Documents actually retrieved (may be capped below `reported_hits`)
    pub retrieved_count: usize,

    /// Retrieved documents equivalent to some ground-truth record
    pub agreement_count: usize,

    /// Ground-truth records
    pub ground_truth_count: usize,

    /// Ground-truth records matched at least once
    pub fulfilled_count: usize,

    /// Ground-truth records matched more than once
    pub multiply_matched: usize,

    /// PMC ground-truth records
    pub pmc_count: usize,

    /// PMC ground-truth records matched at least once
    pub pmc_fulfilled_count: usize,

    /// Non-preprint ground-truth records
    pub non_preprint_count: usize,

    /// Non-preprint ground-truth records matched at least once
    pub non_preprint_fulfilled_count: usize,

    /// `agreement_count / retrieved_count`
    pub agreement_rate: f64,

    /// `1 - agreement_rate`, or zero when nothing was retrieved
    pub false_positive_rate: f64,

    /// `fulfilled_count / ground_truth_count`
    pub fulfillment_rate: f64,

    /// Fulfillment over the PMC subset
    pub pmc_fulfillment_rate: f64,

    /// Fulfillment over the non-preprint subset
    pub non_preprint_fulfillment_rate: f64,
}

/// Ratio with a zero denominator defined as zero
pub fn rate(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Render a rate as a percentage rounded to two decimals, e.g. `"50%"`
pub fn percentage(rate: f64) -> String {
    format!("{}%", (rate * 10000.0).round() / 100.0)
}

/// `(records, fulfilled records)`
fn count_fulfilled<'a>(records: impl Iterator<Item = &'a GroundTruthRecord>) -> (usize, usize) {
    records.fold((0, 0), |(total, hit), r| {
        (total + 1, hit + usize::from(r.is_fulfilled()))
    })
}

impl MetricsRecord {
    /// Compute metrics from a decorated ground-truth table
    pub fn compute(
        reported_hits: u64,
        retrieved_count: usize,
        agreement_count: usize,
        ground_truth: &[GroundTruthRecord],
    ) -> Self {
        let (ground_truth_count, fulfilled_count) = count_fulfilled(ground_truth.iter());
        let (pmc_count, pmc_fulfilled_count) =
            count_fulfilled(ground_truth.iter().filter(|r| r.is_pmc));
        let (non_preprint_count, non_preprint_fulfilled_count) =
            count_fulfilled(ground_truth.iter().filter(|r| !r.is_preprint));

        let agreement_rate = rate(agreement_count, retrieved_count);
        let false_positive_rate = if retrieved_count == 0 {
            0.0
        } else {
            1.0 - agreement_rate
        };

        Self {
            reported_hits,
            retrieved_count,
            agreement_count,
            ground_truth_count,
            fulfilled_count,
            multiply_matched: ground_truth.iter().filter(|r| r.match_count > 1).count(),
            pmc_count,
            pmc_fulfilled_count,
            non_preprint_count,
            non_preprint_fulfilled_count,
            agreement_rate,
            false_positive_rate,
            fulfillment_rate: rate(fulfilled_count, ground_truth_count),
            pmc_fulfillment_rate: rate(pmc_fulfilled_count, pmc_count),
            non_preprint_fulfillment_rate: rate(non_preprint_fulfilled_count, non_preprint_count),
        }
    }

    /// Retrieved documents with no equivalent ground-truth record
    pub fn false_positive_count(&self) -> usize {
        self.retrieved_count.saturating_sub(self.agreement_count)
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let lines = [
            format!("Fulfillment Rate: {}", percentage(self.fulfillment_rate)),
            format!("False Positive Rate: {}", percentage(self.false_positive_rate)),
            format!("PMC Fulfillment Rate: {}", percentage(self.pmc_fulfillment_rate)),
            format!(
                "Non-Preprint Fulfillment Rate: {}",
                percentage(self.non_preprint_fulfillment_rate)
            ),
            format!("Search N: {}", self.reported_hits),
            format!("Retrieved N: {}", self.retrieved_count),
            format!("Agreement N: {}", self.agreement_count),
            format!("Benchmark N: {}", self.ground_truth_count),
            format!("Multiply Matched N: {}", self.multiply_matched),
        ];
        lines.join("\n")
    }
}
