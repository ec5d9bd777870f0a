//! CSV reports for benchmark runs

use crate::benchmark::{EntityReport, EntityStatus, Evaluation};
use crate::error::BenchError;
use citeprobe_domain::{EntityId, GroundTruthRecord, RetrievedDocument};
use citeprobe_scorer::{percentage, MetricsRecord};
use csv::Writer;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Serialize)]
struct ResultRow<'a> {
    #[serde(rename = "Index")]
    index: usize,
    #[serde(rename = "Entity")]
    entity: String,
    #[serde(rename = "Fulfillment Rate")]
    fulfillment_rate: Option<String>,
    #[serde(rename = "False Positive Rate")]
    false_positive_rate: Option<String>,
    #[serde(rename = "PMC Fulfillment Rate")]
    pmc_fulfillment_rate: Option<String>,
    #[serde(rename = "Non-Preprint Fulfillment Rate")]
    non_preprint_fulfillment_rate: Option<String>,
    #[serde(rename = "Search N")]
    reported_hits: Option<u64>,
    #[serde(rename = "Retrieved N")]
    retrieved_count: Option<usize>,
    #[serde(rename = "Agreement N")]
    agreement_count: Option<usize>,
    #[serde(rename = "Benchmark N")]
    ground_truth_count: Option<usize>,
    #[serde(rename = "Multiply Matched N")]
    multiply_matched: Option<usize>,
    #[serde(rename = "Error")]
    error: Option<&'a str>,
}

impl<'a> ResultRow<'a> {
    fn evaluated(index: usize, entity: &EntityId, metrics: &MetricsRecord) -> Self {
        Self {
            index,
            entity: entity.to_string(),
            fulfillment_rate: Some(percentage(metrics.fulfillment_rate)),
            false_positive_rate: Some(percentage(metrics.false_positive_rate)),
            pmc_fulfillment_rate: Some(percentage(metrics.pmc_fulfillment_rate)),
            non_preprint_fulfillment_rate: Some(percentage(metrics.non_preprint_fulfillment_rate)),
            reported_hits: Some(metrics.reported_hits),
            retrieved_count: Some(metrics.retrieved_count),
            agreement_count: Some(metrics.agreement_count),
            ground_truth_count: Some(metrics.ground_truth_count),
            multiply_matched: Some(metrics.multiply_matched),
            error: None,
        }
    }

    fn failed(index: usize, entity: &EntityId, reason: &'a str) -> Self {
        Self {
            index,
            entity: entity.to_string(),
            fulfillment_rate: None,
            false_positive_rate: None,
            pmc_fulfillment_rate: None,
            non_preprint_fulfillment_rate: None,
            reported_hits: None,
            retrieved_count: None,
            agreement_count: None,
            ground_truth_count: None,
            multiply_matched: None,
            error: Some(reason),
        }
    }
}

#[derive(Serialize)]
struct ArticleRow<'a> {
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "ID")]
    id: &'a str,
}

#[derive(Serialize)]
struct GroundTruthRow<'a> {
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "URL")]
    url: &'a str,
    #[serde(rename = "MatchCount")]
    match_count: usize,
    #[serde(rename = "IsPmc")]
    is_pmc: bool,
    #[serde(rename = "IsPreprint")]
    is_preprint: bool,
}

/// Writes benchmark results under an output directory
///
/// Layout:
///
/// ```text
/// <dir>/results.csv
/// <dir>/article-list/<entity>-<list>.csv
/// <dir>/ground-truth/<entity>.csv
/// ```
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Create a writer, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, BenchError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn subdir(&self, name: &str) -> Result<PathBuf, BenchError> {
        let path = self.dir.join(name);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Write one metrics row per entity to `results.csv`
    ///
    /// Failed entities keep their row, with empty metrics and the failure reason.
    pub fn write_results(&self, reports: &[EntityReport]) -> Result<PathBuf, BenchError> {
        let path = self.dir.join("results.csv");
        let mut writer = Writer::from_path(&path)?;

        for report in reports {
            let row = match &report.status {
                EntityStatus::Evaluated { evaluation, .. } => ResultRow::evaluated(
                    report.index,
                    &report.entity_id,
                    &evaluation.outcome.metrics,
                ),
                EntityStatus::Failed(reason) => {
                    ResultRow::failed(report.index, &report.entity_id, reason)
                }
            };
            writer.serialize(row)?;
        }

        writer.flush()?;
        info!("Wrote {} result rows to {}", reports.len(), path.display());
        Ok(path)
    }

    /// Write a list of documents to `article-list/<entity>-<list>.csv`
    pub fn write_article_list(
        &self,
        entity: &EntityId,
        list: &str,
        documents: &[RetrievedDocument],
    ) -> Result<PathBuf, BenchError> {
        let path = self
            .subdir("article-list")?
            .join(format!("{}-{}.csv", entity, list));
        let mut writer = Writer::from_path(&path)?;

        for document in documents {
            writer.serialize(ArticleRow {
                title: &document.title,
                id: &document.identifier,
            })?;
        }

        writer.flush()?;
        Ok(path)
    }

    /// Write a decorated ground-truth table to `ground-truth/<entity>.csv`
    pub fn write_ground_truth(
        &self,
        entity: &EntityId,
        ground_truth: &[GroundTruthRecord],
    ) -> Result<PathBuf, BenchError> {
        let path = self.subdir("ground-truth")?.join(format!("{}.csv", entity));
        let mut writer = Writer::from_path(&path)?;

        for record in ground_truth {
            writer.serialize(GroundTruthRow {
                title: &record.title,
                url: record.url.as_deref().unwrap_or(""),
                match_count: record.match_count,
                is_pmc: record.is_pmc,
                is_preprint: record.is_preprint,
            })?;
        }

        writer.flush()?;
        Ok(path)
    }

    /// Write the retrieved and unmatched article lists and the ground-truth table
    pub fn write_evaluation(
        &self,
        evaluation: &Evaluation,
        ground_truth: &[GroundTruthRecord],
    ) -> Result<Vec<PathBuf>, BenchError> {
        Ok(vec![
            self.write_article_list(
                &evaluation.entity_id,
                "retrieved",
                &evaluation.search.result.documents,
            )?,
            self.write_article_list(
                &evaluation.entity_id,
                "unmatched",
                &evaluation.outcome.unmatched,
            )?,
            self.write_ground_truth(&evaluation.entity_id, ground_truth)?,
        ])
    }

    /// Write `results.csv` and the per-entity files of every evaluated entity
    pub fn write_catalog(&self, reports: &[EntityReport]) -> Result<PathBuf, BenchError> {
        for report in reports {
            if let EntityStatus::Evaluated {
                evaluation,
                ground_truth,
            } = &report.status
            {
                self.write_evaluation(evaluation, ground_truth)?;
            }
        }
        self.write_results(reports)
    }
}
