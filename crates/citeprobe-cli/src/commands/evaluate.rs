//! Evaluate command implementations.

use crate::cli::EvaluateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use citeprobe_bench::{EntityReport, EntityStatus, ReportWriter};
use citeprobe_domain::GroundTruthSource;

/// Execute the evaluate command for one catalog entity.
pub fn execute_evaluate(args: EvaluateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    let entity = super::entity_at(&catalog, args.index)?;

    let mut ground_truth = super::ground_truth(config).load_ground_truth(&args.index.to_string())?;
    let benchmark = super::benchmark(config)?;
    let evaluation = benchmark.evaluate(entity, &mut ground_truth)?;

    let writer = ReportWriter::new(&config.paths.output_dir)?;
    let written = writer.write_evaluation(&evaluation, &ground_truth)?;

    println!("{}", formatter.format_evaluation(&evaluation)?);
    if formatter.shows_status() {
        for path in written {
            println!("{}", formatter.success(&format!("Wrote {}", path.display())));
        }
    }

    Ok(())
}

/// Execute the evaluate-all command.
///
/// Failing entities are reported and the run continues.
pub fn execute_evaluate_all(config: &Config, formatter: &Formatter) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    let benchmark = super::benchmark(config)?;

    let reports = benchmark.evaluate_catalog(&catalog, &super::ground_truth(config));

    let writer = ReportWriter::new(&config.paths.output_dir)?;
    let results = writer.write_catalog(&reports)?;

    println!("{}", formatter.format_reports(&reports)?);
    if formatter.shows_status() {
        let failures = failure_lines(&reports, formatter);
        for line in &failures {
            println!("{}", line);
        }
        let failed = failures.len();
        if failed > 0 {
            println!(
                "{}",
                formatter.warning(&format!("{} of {} entities failed", failed, reports.len()))
            );
        }
        println!("{}", formatter.success(&format!("Wrote {}", results.display())));
    }

    Ok(())
}

/// One error line per entity that could not be evaluated
fn failure_lines(reports: &[EntityReport], formatter: &Formatter) -> Vec<String> {
    reports
        .iter()
        .filter_map(|report| match &report.status {
            EntityStatus::Failed(reason) => Some(formatter.error(&format!(
                "{} {}: {}",
                report.index, report.entity_id, reason
            ))),
            EntityStatus::Evaluated { .. } => None,
        })
        .collect()
}
