//! CLI entry point for grid structure analysis

use clap::Parser;
use tilemorph::io::cli::{Cli, FileProcessor};

fn main() -> tilemorph::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "error" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut processor = FileProcessor::new(cli);
    let reports = processor.process()?;
    log::info!("wrote {} reports", reports.len());
    Ok(())
}
