use anyhow::Result;
use clap::Args;
use pipeline::{runner::Runner, tabula_wrapper::singlethreaded::SingleThreadedTabulaExtractor};

use super::{
    common::{ConfigArgs, StoreArgs, TabulaArgs},
    events::EventDisplayer,
};

/// Extracts every table of the source PDFs into the table store as CSV files.
#[derive(Args, Debug)]
pub struct Command {
    #[command(flatten)]
    pub tabula: TabulaArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Hide the progress bar.
    #[arg(long, default_value = "false")]
    pub no_progress: bool,
}

/// Runs the subcommand.
pub fn run(cmd: &Command) -> Result<()> {
    let cfg = cmd.config.load()?;
    let vm = cmd.tabula.start_vm()?;
    let tabula = SingleThreadedTabulaExtractor::attach(&vm)?;
    let store = cmd.store.open()?;

    let mut events = EventDisplayer::with_ctrlc(!cmd.no_progress)?;
    Runner::new(&cfg, store.as_ref()).extract_tables(&tabula, &mut events);

    store.close()?;
    events.finish()
}
