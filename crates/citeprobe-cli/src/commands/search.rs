//! Search command implementation.

use crate::cli::SearchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use citeprobe_domain::EntityDescriptor;

/// Execute the search command.
pub fn execute_search(args: SearchArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let entity: EntityDescriptor = args.identifier.parse()?;
    let benchmark = super::benchmark(config)?;

    let search = benchmark.search_entity(&entity)?;
    println!("{}", formatter.format_search(&search)?);

    Ok(())
}
