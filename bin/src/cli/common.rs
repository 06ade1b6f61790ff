//! Arguments shared between subcommands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pipeline::{
    currimap::CurriculumMapFile,
    layout::RunConfig,
    tablestore::{StoreType, TableStore},
};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to a YAML run configuration declaring the source PDFs, table layouts and output.
    ///
    /// Uses the built-in configuration when not given.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<RunConfig> {
        RunConfig::load_or_builtin(self.config.as_deref())
    }
}

#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Path to the directory or ZIP file holding the intermediate CSV tables.
    ///
    /// Whether this is a directory or ZIP file is controlled by --store-type.
    #[arg(long, default_value = ".")]
    pub store: PathBuf,

    /// Controls how intermediate tables are stored.
    ///
    /// By default, it guesses, based on any existing file or directory at the
    /// path or the path suffix ending in ".zip".
    #[arg(long)]
    pub store_type: Option<StoreType>,
}

impl StoreArgs {
    pub fn open(&self) -> Result<Box<dyn TableStore>> {
        let store_type = StoreType::resolve_auto(self.store_type, &self.store);
        store_type
            .open(&self.store)
            .with_context(|| format!("opening table store {:?} as {}", self.store, store_type))
    }
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Path to the curriculum map CSV file. Overrides the path in the run configuration.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    pub fn file(&self, cfg: &RunConfig) -> CurriculumMapFile {
        CurriculumMapFile::new(self.output.as_ref().unwrap_or(&cfg.output))
    }
}

#[derive(Args, Debug)]
pub struct TabulaArgs {
    /// Path to the Tabula JAR file.
    #[arg(long)]
    pub tabula_libpath: String,
}

impl TabulaArgs {
    pub fn start_vm(&self) -> Result<tabula::TabulaVM> {
        tabula::TabulaVM::new(&self.tabula_libpath, false)
            .with_context(|| format!("starting Tabula from {:?}", self.tabula_libpath))
    }
}
