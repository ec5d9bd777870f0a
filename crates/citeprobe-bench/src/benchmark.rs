//! Search-and-score benchmark runs

use crate::catalog::EntityCatalog;
use crate::config::BenchConfig;
use crate::error::BenchError;
use citeprobe_domain::{
    EntityDescriptor, EntityId, GroundTruthRecord, GroundTruthSource, SearchProvider, SearchResult,
};
use citeprobe_scorer::{ScoreOutcome, Scorer};
use citeprobe_synthesizer::{CompositeQuery, QuerySynthesizer};
use std::collections::HashSet;
use std::fmt::Display;
use tracing::{info, warn};

/// Queries and search results for one entity
#[derive(Debug, Clone)]
pub struct EntitySearch {
    /// Synthesized queries
    pub queries: Vec<String>,

    /// The composite query
    pub composite: CompositeQuery,

    /// Whether the composite was too long and queries were searched one by one
    pub split: bool,

    /// Search results, merged by document identifier when split
    pub result: SearchResult,
}

/// Search and scoring results for one entity
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// The entity evaluated
    pub entity_id: EntityId,

    /// Queries and search results
    pub search: EntitySearch,

    /// Metrics and unmatched documents
    pub outcome: ScoreOutcome,
}

/// Result of one entity in a catalog run
#[derive(Debug, Clone)]
pub enum EntityStatus {
    /// The entity was searched and scored
    Evaluated {
        /// Search and scoring results
        evaluation: Evaluation,
        /// The ground-truth table, decorated by scoring
        ground_truth: Vec<GroundTruthRecord>,
    },

    /// The entity could not be evaluated
    Failed(String),
}

/// One row of a catalog run
#[derive(Debug, Clone)]
pub struct EntityReport {
    /// 1-based catalog index
    pub index: usize,

    /// The entity
    pub entity_id: EntityId,

    /// Outcome
    pub status: EntityStatus,
}

impl EntityReport {
    /// The evaluation, if the entity did not fail
    pub fn evaluation(&self) -> Option<&Evaluation> {
        match &self.status {
            EntityStatus::Evaluated { evaluation, .. } => Some(evaluation),
            EntityStatus::Failed(_) => None,
        }
    }
}

/// Runs synthesized searches against a provider and scores them
///
/// # Examples
///
/// ```
/// use citeprobe_bench::{BenchConfig, Benchmark};
/// use citeprobe_domain::{EntityDescriptor, GroundTruthRecord, RetrievedDocument};
/// use citeprobe_europepmc::MockSearchProvider;
/// use citeprobe_scorer::Scorer;
/// use citeprobe_synthesizer::{QuerySynthesizer, QueryTemplate, SynthesizerConfig, TemplateSet};
/// use std::sync::Arc;
///
/// let provider = MockSearchProvider::new();
/// provider.add_result(
///     "(100401 BioLegend)",
///     1,
///     vec![RetrievedDocument::new("CD4 T cells in mice", "1")],
/// );
///
/// let templates = TemplateSet::new(1, vec![QueryTemplate::new("$SKU $MANUFACTURER")]);
/// let synthesizer = QuerySynthesizer::new(Arc::new(templates), SynthesizerConfig::default());
/// let benchmark =
///     Benchmark::new(provider, synthesizer, Scorer::default(), BenchConfig::default()).unwrap();
///
/// let entity = EntityDescriptor::new("100401", Some("GK1.5"), "BioLegend", Some("CD4"));
/// let mut ground_truth = vec![GroundTruthRecord::new("CD4 T cells in mice", None)];
/// let evaluation = benchmark.evaluate(&entity, &mut ground_truth).unwrap();
///
/// assert_eq!(evaluation.outcome.metrics.fulfillment_rate, 1.0);
/// ```
pub struct Benchmark<P> {
    provider: P,
    synthesizer: QuerySynthesizer,
    scorer: Scorer,
    config: BenchConfig,
}

impl<P: SearchProvider> Benchmark<P>
where
    P::Error: Display,
{
    /// Create a benchmark runner
    pub fn new(
        provider: P,
        synthesizer: QuerySynthesizer,
        scorer: Scorer,
        config: BenchConfig,
    ) -> Result<Self, BenchError> {
        config.validate().map_err(BenchError::Config)?;
        Ok(Self {
            provider,
            synthesizer,
            scorer,
            config,
        })
    }

    /// The search provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The query synthesizer
    pub fn synthesizer(&self) -> &QuerySynthesizer {
        &self.synthesizer
    }

    /// The configuration in use
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Synthesize queries for an entity and run the search
    pub fn search_entity(&self, entity: &EntityDescriptor) -> Result<EntitySearch, BenchError> {
        let queries = self.synthesizer.synthesize(entity)?;
        if queries.is_empty() {
            return Err(BenchError::NoQueries(entity.id().to_string()));
        }

        let composite = self.synthesizer.compose(&queries);
        let overlong = !self.synthesizer.fits(&composite);

        let (split, result) = if overlong && self.config.split_overlong_queries {
            info!(
                "Composite query for {} is {} chars; searching {} queries separately",
                entity.id(),
                composite.len(),
                queries.len()
            );
            (true, self.search_each(&queries)?)
        } else {
            if overlong {
                warn!(
                    "Composite query for {} is {} chars, above the {} char limit",
                    entity.id(),
                    composite.len(),
                    self.synthesizer.config().max_query_length
                );
            }
            (false, self.search(&composite.text)?)
        };

        Ok(EntitySearch {
            queries,
            composite,
            split,
            result,
        })
    }

    fn search(&self, query: &str) -> Result<SearchResult, BenchError> {
        self.provider
            .search_all(query, self.config.max_pages)
            .map_err(|e| BenchError::Search(e.to_string()))
    }

    /// Search each query and merge the results by document identifier
    ///
    /// Reported hits are summed, so they overcount documents found by more
    /// than one query.
    fn search_each(&self, queries: &[String]) -> Result<SearchResult, BenchError> {
        let mut merged = SearchResult::default();
        let mut seen = HashSet::new();

        for query in queries {
            let result = self.search(query)?;
            merged.hit_count += result.hit_count;
            merged.pages_fetched += result.pages_fetched;
            merged.truncated |= result.truncated;
            merged.documents.extend(
                result
                    .documents
                    .into_iter()
                    .filter(|doc| seen.insert(doc.identifier.clone())),
            );
        }

        Ok(merged)
    }

    /// Search for an entity and score the results against a ground-truth table
    pub fn evaluate(
        &self,
        entity: &EntityDescriptor,
        ground_truth: &mut [GroundTruthRecord],
    ) -> Result<Evaluation, BenchError> {
        let search = self.search_entity(entity)?;
        let outcome = self.scorer.score(&search.result, ground_truth);

        Ok(Evaluation {
            entity_id: entity.id(),
            search,
            outcome,
        })
    }

    /// Evaluate every entity of a catalog
    ///
    /// The ground-truth table of each entity is named by its 1-based index. A
    /// failing entity is reported and the run continues.
    pub fn evaluate_catalog<G: GroundTruthSource>(
        &self,
        catalog: &EntityCatalog,
        source: &G,
    ) -> Vec<EntityReport>
    where
        G::Error: Display,
    {
        let mut reports = Vec::with_capacity(catalog.len());

        for (index, entity) in catalog.iter() {
            let entity_id = entity.id();
            let status = match self.evaluate_indexed(index, entity, source) {
                Ok((evaluation, ground_truth)) => {
                    info!(
                        "[{}] {}: fulfillment {}",
                        index,
                        entity_id,
                        citeprobe_scorer::percentage(evaluation.outcome.metrics.fulfillment_rate)
                    );
                    EntityStatus::Evaluated {
                        evaluation,
                        ground_truth,
                    }
                }
                Err(e) => {
                    warn!("[{}] {} failed: {}", index, entity_id, e);
                    EntityStatus::Failed(e.to_string())
                }
            };

            reports.push(EntityReport {
                index,
                entity_id,
                status,
            });
        }

        reports
    }

    fn evaluate_indexed<G: GroundTruthSource>(
        &self,
        index: usize,
        entity: &EntityDescriptor,
        source: &G,
    ) -> Result<(Evaluation, Vec<GroundTruthRecord>), BenchError>
    where
        G::Error: Display,
    {
        let mut ground_truth = source
            .load_ground_truth(&index.to_string())
            .map_err(|e| BenchError::GroundTruth(e.to_string()))?;
        let evaluation = self.evaluate(entity, &mut ground_truth)?;
        Ok((evaluation, ground_truth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citeprobe_domain::RetrievedDocument;
    use citeprobe_europepmc::MockSearchProvider;
    use citeprobe_synthesizer::{QueryTemplate, SynthesizerConfig, TemplateSet};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn biolegend() -> EntityDescriptor {
        EntityDescriptor::new("100401", Some("GK1.5"), "BioLegend", Some("CD4"))
    }

    fn synthesizer(templates: &[&str], max_query_length: usize) -> QuerySynthesizer {
        let templates = templates.iter().map(|t| QueryTemplate::new(*t)).collect();
        QuerySynthesizer::new(
            Arc::new(TemplateSet::new(1, templates)),
            SynthesizerConfig {
                group_queries: true,
                max_query_length,
            },
        )
    }

    fn benchmark(
        provider: &MockSearchProvider,
        synthesizer: QuerySynthesizer,
        config: BenchConfig,
    ) -> Benchmark<MockSearchProvider> {
        Benchmark::new(provider.clone(), synthesizer, Scorer::default(), config).unwrap()
    }

    struct MemoryGroundTruth(HashMap<String, Vec<GroundTruthRecord>>);

    impl GroundTruthSource for MemoryGroundTruth {
        type Error = String;

        fn load_ground_truth(&self, identifier: &str) -> Result<Vec<GroundTruthRecord>, String> {
            self.0
                .get(identifier)
                .cloned()
                .ok_or_else(|| format!("no table {}", identifier))
        }
    }

    #[test]
    fn test_composite_search() {
        let provider = MockSearchProvider::new();
        provider.add_result(
            "(100401 BioLegend) OR (100401 CD4)",
            42,
            vec![RetrievedDocument::new("A", "1")],
        );
        let bench = benchmark(
            &provider,
            synthesizer(&["$SKU $MANUFACTURER", "$SKU $TARGET"], 1500),
            BenchConfig::default(),
        );

        let search = bench.search_entity(&biolegend()).unwrap();
        assert!(!search.split);
        assert_eq!(search.queries.len(), 2);
        assert_eq!(search.result.hit_count, 42);
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_overlong_composite_is_split_and_merged() {
        let provider = MockSearchProvider::new();
        provider.add_result(
            "100401 BioLegend",
            2,
            vec![RetrievedDocument::new("A", "1"), RetrievedDocument::new("B", "2")],
        );
        provider.add_result(
            "100401 CD4",
            3,
            vec![RetrievedDocument::new("B", "2"), RetrievedDocument::new("C", "3")],
        );
        let bench = benchmark(
            &provider,
            synthesizer(&["$SKU $MANUFACTURER", "$SKU $TARGET"], 20),
            BenchConfig::default(),
        );

        let search = bench.search_entity(&biolegend()).unwrap();
        assert!(search.split);
        assert_eq!(search.result.retrieved_count(), 3);
        assert_eq!(search.result.hit_count, 5);
        assert_eq!(search.result.pages_fetched, 2);
        assert_eq!(provider.queries(), vec!["100401 BioLegend", "100401 CD4"]);
    }

    #[test]
    fn test_overlong_composite_without_splitting() {
        let provider = MockSearchProvider::new();
        let bench = benchmark(
            &provider,
            synthesizer(&["$SKU $MANUFACTURER", "$SKU $TARGET"], 20),
            BenchConfig {
                split_overlong_queries: false,
                ..BenchConfig::default()
            },
        );

        let search = bench.search_entity(&biolegend()).unwrap();
        assert!(!search.split);
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_no_queries() {
        let provider = MockSearchProvider::new();
        let bench = benchmark(&provider, synthesizer(&["$CLONE"], 1500), BenchConfig::default());
        let entity = EntityDescriptor::new("AF1828", None, "R&D Systems", Some("TREM2"));

        assert!(matches!(
            bench.search_entity(&entity),
            Err(BenchError::NoQueries(_))
        ));
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_search_failure() {
        let provider = MockSearchProvider::new();
        provider.add_error("(100401 BioLegend)");
        let bench = benchmark(
            &provider,
            synthesizer(&["$SKU $MANUFACTURER"], 1500),
            BenchConfig::default(),
        );

        assert!(matches!(
            bench.search_entity(&biolegend()),
            Err(BenchError::Search(_))
        ));
    }

    #[test]
    fn test_evaluate_scores_ground_truth() {
        let provider = MockSearchProvider::new();
        provider.add_result(
            "(100401 BioLegend)",
            7,
            vec![
                RetrievedDocument::new("CD4 T cells in mice", "1"),
                RetrievedDocument::new(
                    "Plant photosynthesis under prolonged drought stress in arid coastal regions",
                    "2",
                ),
            ],
        );
        let bench = benchmark(
            &provider,
            synthesizer(&["$SKU $MANUFACTURER"], 1500),
            BenchConfig::default(),
        );
        let mut ground_truth = vec![
            GroundTruthRecord::new("CD4 T cells in mice", None),
            GroundTruthRecord::new("Regulatory T cell subsets", None),
        ];

        let evaluation = bench.evaluate(&biolegend(), &mut ground_truth).unwrap();
        let metrics = &evaluation.outcome.metrics;

        assert_eq!(evaluation.entity_id.to_string(), "BioLegend_100401");
        assert_eq!(metrics.reported_hits, 7);
        assert_eq!(metrics.agreement_count, 1);
        assert_eq!(metrics.fulfillment_rate, 0.5);
        assert_eq!(ground_truth[0].match_count, 1);
        assert_eq!(evaluation.outcome.unmatched.len(), 1);
    }

    #[test]
    fn test_evaluate_catalog_continues_past_failures() {
        let provider = MockSearchProvider::new();
        let catalog = EntityCatalog::new(vec![
            biolegend(),
            EntityDescriptor::new("ab183685", Some("EPR19514"), "Abcam", Some("CD4")),
        ]);
        let mut tables = HashMap::new();
        tables.insert("2".to_string(), vec![GroundTruthRecord::new("A title", None)]);
        let bench = benchmark(
            &provider,
            synthesizer(&["$SKU $MANUFACTURER"], 1500),
            BenchConfig::default(),
        );

        let reports = bench.evaluate_catalog(&catalog, &MemoryGroundTruth(tables));

        assert_eq!(reports.len(), 2);
        assert!(matches!(&reports[0].status, EntityStatus::Failed(reason) if reason.contains("no table 1")));
        assert_eq!(reports[1].index, 2);
        match &reports[1].status {
            EntityStatus::Evaluated { ground_truth, .. } => assert_eq!(ground_truth.len(), 1),
            EntityStatus::Failed(reason) => panic!("unexpected failure: {}", reason),
        }
        assert!(reports[1].evaluation().is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = BenchConfig {
            max_pages: 0,
            ..BenchConfig::default()
        };
        let result = Benchmark::new(
            MockSearchProvider::new(),
            synthesizer(&["$SKU"], 1500),
            Scorer::default(),
            config,
        );
        assert!(matches!(result, Err(BenchError::Config(_))));
    }
}
