use anyhow::Result;
use clap::Args;
use pipeline::runner::Runner;

use super::{
    common::{ConfigArgs, OutputArgs, StoreArgs},
    events::EventDisplayer,
};

/// Builds the curriculum map from the intermediate tables named by the table layouts.
#[derive(Args, Debug)]
pub struct Command {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Append to the existing curriculum map instead of starting it afresh.
    #[arg(long)]
    pub no_init: bool,

    /// Hide the progress bar.
    #[arg(long, default_value = "false")]
    pub no_progress: bool,
}

/// Runs the subcommand.
pub fn run(cmd: &Command) -> Result<()> {
    let cfg = cmd.config.load()?;
    let output = cmd.output.file(&cfg);
    let store = cmd.store.open()?;

    let mut events = EventDisplayer::with_ctrlc(!cmd.no_progress)?;
    Runner::new(&cfg, store.as_ref()).build_map(&output, !cmd.no_init, &mut events);

    store.close()?;
    events.finish()
}
