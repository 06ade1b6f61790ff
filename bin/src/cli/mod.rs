use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simplelog::LevelFilter;

mod buildmap;
mod common;
mod events;
mod extracttables;
mod run;
mod show;

/// Builds a curriculum progression map CSV from the tables of curriculum PDFs.
#[derive(Debug, Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Logging level.
    #[arg(long, default_value = "Warn")]
    log_level: LevelFilter,
}

#[derive(Debug, Subcommand)]
enum Command {
    ExtractTables(extracttables::Command),
    BuildMap(buildmap::Command),
    Show(show::Command),
    Run(run::Command),
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    simplelog::SimpleLogger::init(args.log_level, simplelog::Config::default())
        .with_context(|| "configuring logging")?;

    use Command::*;
    match &args.command {
        ExtractTables(cmd) => extracttables::run(cmd),
        BuildMap(cmd) => buildmap::run(cmd),
        Show(cmd) => show::run(cmd),
        Run(cmd) => run::run(cmd),
    }
}
