//! End-to-end catalog runs against files on disk

use citeprobe_bench::{
    BenchConfig, Benchmark, CsvGroundTruth, EntityCatalog, EntityStatus, PatternMiner,
    ReportWriter,
};
use citeprobe_discovery::DiscoveryConfig;
use citeprobe_domain::{EntityDescriptor, GroundTruthSource, RetrievedDocument};
use citeprobe_europepmc::{MockFulltextSource, MockSearchProvider};
use citeprobe_scorer::Scorer;
use citeprobe_synthesizer::{QuerySynthesizer, QueryTemplate, SynthesizerConfig, TemplateSet};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn synthesizer() -> QuerySynthesizer {
    let templates = TemplateSet::new(1, vec![QueryTemplate::new("$SKU $MANUFACTURER")]);
    QuerySynthesizer::new(Arc::new(templates), SynthesizerConfig::default())
}

fn catalog() -> EntityCatalog {
    EntityCatalog::new(vec![
        EntityDescriptor::new("100401", Some("GK1.5"), "BioLegend", Some("CD4")),
        EntityDescriptor::new("AF1828", None, "R&D Systems", Some("TREM2")),
    ])
}

#[test]
fn test_catalog_run_writes_reports() {
    let temp = TempDir::new().unwrap();
    let gt_dir = temp.path().join("ground-truth-in");
    fs::create_dir_all(&gt_dir).unwrap();
    fs::write(
        gt_dir.join("1.csv"),
        "Exported list\n\
         Title,URL\n\
         CD4 T cells in mice,https://europepmc.org/article/PMC/PMC111\n\
         Helper T cell memory,https://www.biorxiv.org/content/1\n",
    )
    .unwrap();

    let provider = MockSearchProvider::new();
    provider.add_result(
        "(100401 BioLegend)",
        3,
        vec![
            RetrievedDocument::new("CD4 T cells in mice", "1"),
            RetrievedDocument::new(
                "An unrelated survey of marine invertebrate populations across decades",
                "2",
            ),
        ],
    );

    let benchmark = Benchmark::new(
        provider,
        synthesizer(),
        Scorer::default(),
        BenchConfig::default(),
    )
    .unwrap();
    let source = CsvGroundTruth::new(&gt_dir).with_skip_rows(1);
    let reports = benchmark.evaluate_catalog(&catalog(), &source);

    assert_eq!(reports.len(), 2);
    match &reports[0].status {
        EntityStatus::Evaluated {
            evaluation,
            ground_truth,
        } => {
            let metrics = &evaluation.outcome.metrics;
            assert_eq!(metrics.fulfillment_rate, 0.5);
            assert_eq!(metrics.pmc_fulfillment_rate, 1.0);
            assert_eq!(metrics.non_preprint_fulfillment_rate, 1.0);
            assert_eq!(metrics.false_positive_rate, 0.5);
            assert!(ground_truth[0].is_pmc);
            assert!(ground_truth[1].is_preprint);
        }
        EntityStatus::Failed(reason) => panic!("unexpected failure: {}", reason),
    }
    assert!(matches!(reports[1].status, EntityStatus::Failed(_)));

    let out = temp.path().join("out");
    let writer = ReportWriter::new(&out).unwrap();
    let results = writer.write_catalog(&reports).unwrap();

    let contents = fs::read_to_string(results).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.contains("BioLegend_100401,50%,50%,100%,100%,3,2,1,2,0,"));
    assert!(out.join("article-list/BioLegend_100401-unmatched.csv").exists());
    assert!(out.join("article-list/BioLegend_100401-retrieved.csv").exists());
    assert!(out.join("ground-truth/BioLegend_100401.csv").exists());
    assert!(!out.join("ground-truth/R&D-Systems_AF1828.csv").exists());
}

#[test]
fn test_mining_from_csv_ground_truth() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("1.csv"),
        "Title,URL\n\
         First,https://europepmc.org/article/PMC/PMC10\n\
         Second,https://europepmc.org/article/PMC/PMC20\n\
         Third,https://doi.org/10.1000/1\n",
    )
    .unwrap();

    let ground_truth = CsvGroundTruth::new(temp.path())
        .load_ground_truth("1")
        .unwrap();

    let source = MockFulltextSource::new();
    source.add_document("PMC10", "anti-CD4 (clone GK1.5; BioLegend) was used");
    source.add_document("PMC20", "anti-CD4 (clone GK1.5, BioLegend) diluted 1:200");

    let miner = PatternMiner::new(source, DiscoveryConfig::default()).unwrap();
    let entity = EntityDescriptor::new("100401", Some("GK1.5"), "BioLegend", Some("CD4"));
    let report = miner.mine(&entity, &ground_truth, 0).unwrap();

    assert_eq!(report.documents.len(), 2);
    assert_eq!(report.matched_count(), 2);
    assert!(report
        .tally
        .ranked()
        .iter()
        .any(|(pattern, _)| pattern.contains("$CLONE")));
}
