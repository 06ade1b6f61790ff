//! Drives the extraction steps over everything in a [RunConfig], reporting progress and errors
//! as events.


use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::{
    course::CourseRecord,
    courseextract::extract_courses,
    currimap::CurriculumMapFile,
    layout::{RunConfig, TableLayout},
    pdfextract::extract_source_tables,
    tablestore::{StoreError, TableStore},
    tabula_wrapper::TabulaExtractor,
};

/// Step of a run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display)]
pub enum Step {
    /// Extracting tables from the source PDFs into the table store.
    #[strum(to_string = "extracting tables")]
    ExtractTables,
    /// Building the curriculum map from the table layouts.
    #[strum(to_string = "building curriculum map")]
    BuildMap,
}

/// Event emitted to track progress of a run.
#[derive(Debug)]
pub enum RunEvent {
    /// Indicates that processing of a single source or layout has finished, successfully or not.
    Progress {
        step: Step,
        item: PathBuf,
        completed: usize,
        total: usize,
    },
    /// Indicates error with some portion of the run.
    /// If `true`, `terminal` indicates that the error prevents any progress being made in the
    /// step.
    Error { err: anyhow::Error, terminal: bool },
    /// Indicates that a step has completed.
    Completed(Step),
    /// Indicates that the run has been cancelled, and that no more events will follow.
    Cancelled,
}

/// Trait to implement to receive notifications about run events, or to cancel the run early.
pub trait RunEvents {
    fn on_event(&mut self, event: RunEvent);
    fn do_continue(&self) -> bool;
}

/// Whether a step ran to the end.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepOutcome {
    /// The step ran over all of its items, possibly with non-terminal errors.
    Finished,
    /// The step stopped early, on cancellation or a terminal error.
    Stopped,
}

/// Runs the steps for a [RunConfig] against a [TableStore].
pub struct Runner<'a> {
    cfg: &'a RunConfig,
    store: &'a dyn TableStore,
}

impl<'a> Runner<'a> {
    pub fn new(cfg: &'a RunConfig, store: &'a dyn TableStore) -> Self {
        Self { cfg, store }
    }

    /// Extracts the tables of every source PDF into the table store.
    pub fn extract_tables(
        &self,
        tabula: &dyn TabulaExtractor,
        events: &mut dyn RunEvents,
    ) -> StepOutcome {
        let total = self.cfg.sources.len();
        for (i, source) in self.cfg.sources.iter().enumerate() {
            if let Err(err) = extract_source_tables(tabula, self.store, source) {
                events.on_event(RunEvent::Error {
                    err,
                    terminal: false,
                });
            }

            events.on_event(RunEvent::Progress {
                step: Step::ExtractTables,
                item: source.pdf.clone(),
                completed: i + 1,
                total,
            });
            if !events.do_continue() {
                events.on_event(RunEvent::Cancelled);
                return StepOutcome::Stopped;
            }
        }

        events.on_event(RunEvent::Completed(Step::ExtractTables));
        StepOutcome::Finished
    }

    /// Appends the course records of every layout to `output`, first truncating it to only the
    /// header when `init` is set.
    pub fn build_map(
        &self,
        output: &CurriculumMapFile,
        init: bool,
        events: &mut dyn RunEvents,
    ) -> StepOutcome {
        if init {
            if let Err(err) = output.init() {
                events.on_event(RunEvent::Error {
                    err,
                    terminal: true,
                });
                return StepOutcome::Stopped;
            }
        }

        let total = self.cfg.layouts.len();
        for (i, layout) in self.cfg.layouts.iter().enumerate() {
            let result = self
                .layout_courses(layout)
                .and_then(|records| output.append(&records))
                .with_context(|| format!("processing table {:?}", layout.table));
            if let Err(err) = result {
                events.on_event(RunEvent::Error {
                    err,
                    terminal: false,
                });
            }

            events.on_event(RunEvent::Progress {
                step: Step::BuildMap,
                item: layout.table.clone(),
                completed: i + 1,
                total,
            });
            if !events.do_continue() {
                events.on_event(RunEvent::Cancelled);
                return StepOutcome::Stopped;
            }
        }

        events.on_event(RunEvent::Completed(Step::BuildMap));
        StepOutcome::Finished
    }

    fn layout_courses(&self, layout: &TableLayout) -> Result<Vec<CourseRecord>> {
        if !self.store.exists(&layout.table) {
            return Err(anyhow::Error::new(StoreError::NotFound)
                .context("intermediate table is missing, extract the tables first"));
        }
        let table = self
            .store
            .read_table(&layout.table)
            .context("reading intermediate table")?;
        let records = extract_courses(layout, &table)?;
        log::info!(
            "Found {} course record(s) for {} in {:?}.",
            records.len(),
            layout.year,
            layout.table,
        );
        Ok(records)
    }
}
