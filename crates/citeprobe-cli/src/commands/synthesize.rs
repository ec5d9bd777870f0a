//! Synthesize command implementation.

use crate::cli::SynthesizeArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use citeprobe_domain::EntityDescriptor;

/// Resolve the entity named by an identifier or a catalog index.
fn resolve_entity(args: &SynthesizeArgs, config: &Config) -> Result<EntityDescriptor> {
    match (&args.identifier, args.index) {
        (Some(identifier), None) => Ok(identifier.parse()?),
        (None, Some(index)) => {
            let catalog = super::load_catalog(config)?;
            Ok(super::entity_at(&catalog, index)?.clone())
        }
        _ => Err(CliError::InvalidInput(
            "Give either an identifier or --index".to_string(),
        )),
    }
}

/// Execute the synthesize command.
///
/// Needs no network access.
pub fn execute_synthesize(args: SynthesizeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let entity = resolve_entity(&args, config)?;
    let synthesizer = super::synthesizer(config)?;

    let queries = synthesizer.synthesize(&entity)?;
    let composite = synthesizer.compose(&queries);

    println!("{}", formatter.format_queries(&queries, &composite)?);

    if formatter.shows_status() && !synthesizer.fits(&composite) {
        println!(
            "{}",
            formatter.warning(&format!(
                "Composite query exceeds {} chars; evaluation will search queries one by one",
                synthesizer.config().max_query_length
            ))
        );
    }

    Ok(())
}
