//! codeindex: Scan repositories into indexable file records

use clap::Parser;
use codeindex_cli::commands::{self, Commands};
use codeindex_cli::logging::setup_logging;

#[derive(Parser)]
#[command(name = "codeindex")]
#[command(author, version, about = "Repository scanner for code indexing", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Scan(args) => commands::scan::run(&args)?,
        Commands::Check { paths, filters } => commands::check::run(&paths, &filters)?,
        Commands::Languages { overrides } => commands::languages::run(&overrides)?,
    }

    Ok(())
}
