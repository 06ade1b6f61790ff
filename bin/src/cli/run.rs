use anyhow::Result;
use clap::Args;
use pipeline::{
    currimap::render_table,
    runner::{Runner, StepOutcome},
    tabula_wrapper::singlethreaded::SingleThreadedTabulaExtractor,
};

use super::{
    common::{ConfigArgs, OutputArgs, StoreArgs, TabulaArgs},
    events::EventDisplayer,
};

/// Extracts the tables, builds the curriculum map from them, and prints it.
#[derive(Args, Debug)]
pub struct Command {
    #[command(flatten)]
    pub tabula: TabulaArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Hide the progress bar.
    #[arg(long, default_value = "false")]
    pub no_progress: bool,
}

/// Runs the subcommand.
pub fn run(cmd: &Command) -> Result<()> {
    let cfg = cmd.config.load()?;
    let output = cmd.output.file(&cfg);
    let vm = cmd.tabula.start_vm()?;
    let tabula = SingleThreadedTabulaExtractor::attach(&vm)?;
    let store = cmd.store.open()?;

    let mut events = EventDisplayer::with_ctrlc(!cmd.no_progress)?;
    let runner = Runner::new(&cfg, store.as_ref());
    let finished = runner.extract_tables(&tabula, &mut events) == StepOutcome::Finished
        && runner.build_map(&output, true, &mut events) == StepOutcome::Finished;

    store.close()?;

    if finished {
        print!("{}", render_table(&output.load()?));
    }
    events.finish()
}
