//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use citeprobe_bench::{
    DocumentStatus, EntityCatalog, EntityReport, EntitySearch, EntityStatus, Evaluation,
    MiningReport,
};
use citeprobe_domain::EntityDescriptor;
use citeprobe_scorer::percentage;
use citeprobe_synthesizer::CompositeQuery;
use colored::*;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

fn table<R, I>(header: &[&str], rows: R) -> String
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = String>,
{
    let mut builder = Builder::default();
    builder.push_record(header.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn document_status(status: &DocumentStatus) -> (&'static str, usize) {
    match status {
        DocumentStatus::Ok { matches, .. } => ("Ok", matches.len()),
        DocumentStatus::Unreachable => ("Unreachable", 0),
        DocumentStatus::Failed(_) => ("Failed", 0),
    }
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format synthesized queries and their composite.
    pub fn format_queries(&self, queries: &[String], composite: &CompositeQuery) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "queries": queries,
                "composite": composite.text,
                "composite_length": composite.len(),
            }))?),
            OutputFormat::Quiet => Ok(queries.join("\n")),
            OutputFormat::Table => {
                if queries.is_empty() {
                    return Ok(self.warning("No queries synthesized."));
                }
                let rows = queries
                    .iter()
                    .enumerate()
                    .map(|(i, q)| vec![(i + 1).to_string(), q.clone()]);
                Ok(format!(
                    "{}\n{}",
                    table(&["#", "Query"], rows),
                    self.info(&format!("Composite query: {} chars", composite.len()))
                ))
            }
        }
    }

    /// Format the documents retrieved for an entity.
    pub fn format_search(&self, search: &EntitySearch) -> Result<String> {
        let result = &search.result;
        match self.format {
            OutputFormat::Json => {
                let documents: Vec<serde_json::Value> = result
                    .documents
                    .iter()
                    .map(|d| json!({ "title": d.title, "id": d.identifier }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "hit_count": result.hit_count,
                    "pages_fetched": result.pages_fetched,
                    "truncated": result.truncated,
                    "split": search.split,
                    "documents": documents,
                }))?)
            }
            OutputFormat::Quiet => Ok(result
                .documents
                .iter()
                .map(|d| d.identifier.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let summary = self.info(&format!(
                    "{} reported hits, {} retrieved in {} pages{}",
                    result.hit_count,
                    result.retrieved_count(),
                    result.pages_fetched,
                    if result.truncated { " (page cap reached)" } else { "" }
                ));
                if result.documents.is_empty() {
                    return Ok(format!("{}\n{}", summary, self.warning("No documents found.")));
                }
                let rows = result
                    .documents
                    .iter()
                    .map(|d| vec![d.identifier.clone(), d.title.clone()]);
                Ok(format!("{}\n{}", table(&["ID", "Title"], rows), summary))
            }
        }
    }

    /// Format the metrics of one evaluation.
    pub fn format_evaluation(&self, evaluation: &Evaluation) -> Result<String> {
        let metrics = &evaluation.outcome.metrics;
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "entity": evaluation.entity_id.to_string(),
                "metrics": metrics,
                "unmatched": evaluation.outcome.unmatched.len(),
            }))?),
            OutputFormat::Quiet => Ok(percentage(metrics.fulfillment_rate)),
            OutputFormat::Table => {
                let rows = metrics.summary().lines().map(|line| match line.split_once(": ") {
                    Some((name, value)) => vec![name.to_string(), value.to_string()],
                    None => vec![line.to_string(), String::new()],
                }).collect::<Vec<_>>();
                Ok(format!(
                    "{}\n{}",
                    self.info(&format!("Entity {}", evaluation.entity_id)),
                    table(&["Metric", "Value"], rows)
                ))
            }
        }
    }

    /// Format the rows of a catalog run.
    pub fn format_reports(&self, reports: &[EntityReport]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = reports
                    .iter()
                    .map(|r| match &r.status {
                        EntityStatus::Evaluated { evaluation, .. } => json!({
                            "index": r.index,
                            "entity": r.entity_id.to_string(),
                            "metrics": evaluation.outcome.metrics,
                        }),
                        EntityStatus::Failed(reason) => json!({
                            "index": r.index,
                            "entity": r.entity_id.to_string(),
                            "error": reason,
                        }),
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Quiet => Ok(reports
                .iter()
                .map(|r| match r.evaluation() {
                    Some(e) => format!(
                        "{}\t{}\t{}",
                        r.index,
                        r.entity_id,
                        percentage(e.outcome.metrics.fulfillment_rate)
                    ),
                    None => format!("{}\t{}\tfailed", r.index, r.entity_id),
                })
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let rows = reports.iter().map(|r| match &r.status {
                    EntityStatus::Evaluated { evaluation, .. } => {
                        let m = &evaluation.outcome.metrics;
                        vec![
                            r.index.to_string(),
                            r.entity_id.to_string(),
                            percentage(m.fulfillment_rate),
                            percentage(m.false_positive_rate),
                            m.reported_hits.to_string(),
                            m.agreement_count.to_string(),
                            m.ground_truth_count.to_string(),
                            self.colorize("ok", "green"),
                        ]
                    }
                    EntityStatus::Failed(reason) => vec![
                        r.index.to_string(),
                        r.entity_id.to_string(),
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                        self.colorize(reason, "red"),
                    ],
                });
                Ok(table(
                    &[
                        "#",
                        "Entity",
                        "Fulfillment",
                        "False Positive",
                        "Search N",
                        "Agreement N",
                        "Benchmark N",
                        "Status",
                    ],
                    rows.collect::<Vec<_>>(),
                ))
            }
        }
    }

    /// Format a pattern mining report.
    pub fn format_mining(&self, report: &MiningReport) -> Result<String> {
        let ranked = report.tally.ranked();
        match self.format {
            OutputFormat::Json => {
                let documents: Vec<serde_json::Value> = report
                    .documents
                    .iter()
                    .map(|d| {
                        let (status, matches) = document_status(&d.status);
                        json!({
                            "position": d.position,
                            "id": d.document_id,
                            "status": status,
                            "matches": matches,
                        })
                    })
                    .collect();
                let patterns: Vec<serde_json::Value> = ranked
                    .iter()
                    .map(|(pattern, count)| json!({ "pattern": pattern, "count": count }))
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "entity": report.entity_id.to_string(),
                    "documents": documents,
                    "patterns": patterns,
                    "compilation_failures": report.compilation_failures.len(),
                }))?)
            }
            OutputFormat::Quiet => Ok(report
                .documents
                .iter()
                .map(|d| format!("{}\t{}\t{}", d.position, d.document_id, document_status(&d.status).0))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let documents = report.documents.iter().map(|d| {
                    let (status, matches) = document_status(&d.status);
                    let status = match status {
                        "Ok" => self.colorize(status, "green"),
                        "Unreachable" => self.colorize(status, "yellow"),
                        _ => self.colorize(status, "red"),
                    };
                    vec![d.position.to_string(), d.document_id.clone(), status, matches.to_string()]
                });
                let mut out = table(&["#", "Document", "Status", "Matches"], documents.collect::<Vec<_>>());

                if ranked.is_empty() {
                    out.push('\n');
                    out.push_str(&self.warning("No patterns discovered."));
                } else {
                    let patterns = ranked
                        .iter()
                        .map(|(pattern, count)| vec![count.to_string(), pattern.clone()]);
                    out.push('\n');
                    out.push_str(&table(&["Count", "Pattern"], patterns));
                }

                if !report.compilation_failures.is_empty() {
                    out.push('\n');
                    out.push_str(&self.warning(&format!(
                        "{} candidate patterns failed to compile",
                        report.compilation_failures.len()
                    )));
                }
                Ok(out)
            }
        }
    }

    /// Format the entity catalog.
    pub fn format_catalog(&self, catalog: &EntityCatalog) -> Result<String> {
        let fields = |entity: &EntityDescriptor| {
            (
                entity.manufacturer().names().join(" / "),
                entity.clone_id().unwrap_or("").to_string(),
                entity.target().unwrap_or("").to_string(),
            )
        };

        match self.format {
            OutputFormat::Json => {
                let entities: Vec<serde_json::Value> = catalog
                    .iter()
                    .map(|(index, entity)| {
                        json!({
                            "index": index,
                            "sku": entity.sku(),
                            "clone": entity.clone_id(),
                            "manufacturer": entity.manufacturer().names(),
                            "target": entity.target(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&entities)?)
            }
            OutputFormat::Quiet => Ok(catalog
                .iter()
                .map(|(index, entity)| format!("{}\t{}", index, entity.id()))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if catalog.is_empty() {
                    return Ok(self.warning("Catalog is empty."));
                }
                let rows = catalog.iter().map(|(index, entity)| {
                    let (manufacturer, clone_id, target) = fields(entity);
                    vec![index.to_string(), manufacturer, entity.sku().to_string(), clone_id, target]
                });
                Ok(table(
                    &["#", "Manufacturer", "SKU", "Clone", "Target"],
                    rows.collect::<Vec<_>>(),
                ))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether human-readable status lines should be printed.
    pub fn shows_status(&self) -> bool {
        self.format == OutputFormat::Table
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citeprobe_synthesizer::combine_grouped;

    fn queries() -> Vec<String> {
        vec!["100401 BioLegend".to_string(), "CD4 GK1.5".to_string()]
    }

    #[test]
    fn test_queries_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let queries = queries();
        let output = formatter
            .format_queries(&queries, &combine_grouped(&queries))
            .unwrap();
        assert!(output.contains("100401 BioLegend"));
        assert!(output.contains("Composite query: 33 chars"));
    }

    #[test]
    fn test_queries_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let queries = queries();
        let output = formatter
            .format_queries(&queries, &combine_grouped(&queries))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["queries"].as_array().unwrap().len(), 2);
        assert_eq!(value["composite"], "(100401 BioLegend) OR (CD4 GK1.5)");
    }

    #[test]
    fn test_queries_quiet() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let queries = queries();
        let output = formatter
            .format_queries(&queries, &combine_grouped(&queries))
            .unwrap();
        assert_eq!(output, "100401 BioLegend\nCD4 GK1.5");
    }

    #[test]
    fn test_catalog_formats() {
        let catalog = EntityCatalog::builtin();

        let table = Formatter::new(OutputFormat::Table, false)
            .format_catalog(&catalog)
            .unwrap();
        assert!(table.contains("BD Biosciences / BD Pharmingen"));
        assert!(table.contains("EPR6855"));

        let quiet = Formatter::new(OutputFormat::Quiet, false)
            .format_catalog(&catalog)
            .unwrap();
        assert_eq!(quiet.lines().next(), Some("1\tBD-Biosciences_550280"));
        assert_eq!(quiet.lines().count(), 7);
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("bad"), "✗ bad");
    }

    #[test]
    fn test_shows_status() {
        assert!(Formatter::new(OutputFormat::Table, false).shows_status());
        assert!(!Formatter::new(OutputFormat::Json, false).shows_status());
    }
}
