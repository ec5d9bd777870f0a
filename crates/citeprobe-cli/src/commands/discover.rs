//! Discover command implementation.

use crate::cli::DiscoverArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use citeprobe_bench::PatternMiner;
use citeprobe_domain::{EntityDescriptor, FulltextSource, GroundTruthRecord, GroundTruthSource};
use citeprobe_europepmc::{EuropePmcClient, FulltextCache};
use std::fmt::Display;

fn mine<F: FulltextSource>(
    source: F,
    entity: &EntityDescriptor,
    ground_truth: &[GroundTruthRecord],
    jump_to: usize,
    config: &Config,
    formatter: &Formatter,
) -> Result<()>
where
    F::Error: Display,
{
    let miner = PatternMiner::new(source, config.discovery.clone())?;
    let report = miner.mine(entity, ground_truth, jump_to)?;

    println!("{}", formatter.format_mining(&report)?);
    if formatter.shows_status() {
        println!(
            "{}",
            formatter.info(&format!(
                "{} documents fetched, {} with matches",
                report.reachable_count(),
                report.matched_count()
            ))
        );
    }
    Ok(())
}

/// Execute the discover command.
pub fn execute_discover(args: DiscoverArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    let entity = super::entity_at(&catalog, args.index)?;
    let ground_truth = super::ground_truth(config).load_ground_truth(&args.index.to_string())?;

    let client = EuropePmcClient::new(config.europepmc.clone())?;
    match &config.paths.cache_dir {
        Some(dir) => mine(
            FulltextCache::new(client, dir)?,
            entity,
            &ground_truth,
            args.jump_to,
            config,
            formatter,
        ),
        None => mine(client, entity, &ground_truth, args.jump_to, config, formatter),
    }
}
