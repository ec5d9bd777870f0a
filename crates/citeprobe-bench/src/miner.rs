//! Pattern mining over known-positive documents

use crate::error::BenchError;
use citeprobe_discovery::{
    Discovered, DiscoveryConfig, PatternCompilationError, PatternDiscovery, PatternKind,
    PatternTally,
};
use citeprobe_domain::{EntityDescriptor, EntityId, FulltextSource, GroundTruthRecord};
use citeprobe_scorer::extract_pmc_ids;
use std::collections::HashSet;
use std::fmt::Display;
use tracing::{debug, info, warn};

/// What happened to one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// The full text was fetched and searched
    Ok {
        /// Pass that matched, `None` when the document had no evidence
        pass: Option<PatternKind>,
        /// Matches with their generalized forms
        matches: Vec<Discovered>,
    },

    /// The full text is not available
    Unreachable,

    /// Fetching failed
    Failed(String),
}

/// One mined document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMining {
    /// 0-based position in the list of document ids
    pub position: usize,

    /// PMC identifier
    pub document_id: String,

    /// Outcome
    pub status: DocumentStatus,
}

/// Result of mining one entity's ground-truth documents
#[derive(Debug, Clone)]
pub struct MiningReport {
    /// The entity mined
    pub entity_id: EntityId,

    /// Documents in position order
    pub documents: Vec<DocumentMining>,

    /// Generalized pattern frequencies across documents
    pub tally: PatternTally,

    /// Candidate patterns that failed to compile
    pub compilation_failures: Vec<PatternCompilationError>,
}

impl MiningReport {
    /// Documents whose full text was fetched
    pub fn reachable_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| matches!(d.status, DocumentStatus::Ok { .. }))
            .count()
    }

    /// Documents with at least one match
    pub fn matched_count(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| matches!(&d.status, DocumentStatus::Ok { matches, .. } if !matches.is_empty()))
            .count()
    }
}

/// PMC ids referenced by a ground-truth table, first occurrence order
pub fn collect_pmc_ids(ground_truth: &[GroundTruthRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    ground_truth
        .iter()
        .filter_map(|record| record.url.as_deref())
        .flat_map(extract_pmc_ids)
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Fetches known-positive documents and discovers citation patterns in them
pub struct PatternMiner<F> {
    source: F,
    config: DiscoveryConfig,
}

impl<F: FulltextSource> PatternMiner<F>
where
    F::Error: Display,
{
    /// Create a miner
    pub fn new(source: F, config: DiscoveryConfig) -> Result<Self, BenchError> {
        config
            .validate()
            .map_err(|e| BenchError::Config(format!("Invalid discovery configuration: {}", e)))?;
        Ok(Self { source, config })
    }

    /// The full-text source
    pub fn source(&self) -> &F {
        &self.source
    }

    /// Mine the PMC documents of a ground-truth table, skipping the first `jump_to`
    ///
    /// Unreachable or failing documents are recorded and mining continues.
    pub fn mine(
        &self,
        entity: &EntityDescriptor,
        ground_truth: &[GroundTruthRecord],
        jump_to: usize,
    ) -> Result<MiningReport, BenchError> {
        let discovery = PatternDiscovery::new(entity, &self.config)?;
        let ids = collect_pmc_ids(ground_truth);

        info!(
            "Mining {} of {} PMC documents for {}",
            ids.len().saturating_sub(jump_to),
            ids.len(),
            entity.id()
        );

        let mut tally = PatternTally::new();
        let mut documents = Vec::new();

        for (position, document_id) in ids.into_iter().enumerate().skip(jump_to) {
            let status = match self.source.fetch_fulltext(&document_id) {
                Ok(Some(text)) => {
                    let outcome = discovery.discover(&text);
                    tally.record_outcome(&outcome);
                    debug!(
                        "{} {}: {} matches",
                        position,
                        document_id,
                        outcome.discovered.len()
                    );
                    DocumentStatus::Ok {
                        pass: outcome.pass,
                        matches: outcome.discovered,
                    }
                }
                Ok(None) => {
                    debug!("{} {}: unreachable", position, document_id);
                    DocumentStatus::Unreachable
                }
                Err(e) => {
                    warn!("Failed to fetch {}: {}", document_id, e);
                    DocumentStatus::Failed(e.to_string())
                }
            };

            documents.push(DocumentMining {
                position,
                document_id,
                status,
            });
        }

        Ok(MiningReport {
            entity_id: entity.id(),
            documents,
            tally,
            compilation_failures: discovery.compilation_failures().cloned().collect(),
        })
    }
}
