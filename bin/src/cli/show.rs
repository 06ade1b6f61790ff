use anyhow::Result;
use clap::Args;
use pipeline::currimap::render_table;

use super::common::{ConfigArgs, OutputArgs};

/// Prints the curriculum map as an aligned table.
#[derive(Args, Debug)]
pub struct Command {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Runs the subcommand.
pub fn run(cmd: &Command) -> Result<()> {
    let cfg = cmd.config.load()?;
    let records = cmd.output.file(&cfg).load()?;
    print!("{}", render_table(&records));
    Ok(())
}
