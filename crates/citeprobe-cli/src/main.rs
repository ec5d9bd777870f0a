//! Citeprobe CLI - citation query synthesis and benchmarking.

use citeprobe_cli::commands;
use citeprobe_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `-v` overrides `RUST_LOG`
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> citeprobe_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Evaluate(args) => commands::execute_evaluate(args, &config, &formatter),
        Command::EvaluateAll => commands::execute_evaluate_all(&config, &formatter),
        Command::Search(args) => commands::execute_search(args, &config, &formatter),
        Command::Synthesize(args) => commands::execute_synthesize(args, &config, &formatter),
        Command::Discover(args) => commands::execute_discover(args, &config, &formatter),
        Command::Catalog => commands::execute_catalog(&config, &formatter),
    }
}
