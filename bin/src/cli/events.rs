use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use anyhow::{Result, bail};
use pipeline::runner::{RunEvent, RunEvents};
use simple_bar::ProgressBar;

/// Displays run events on the terminal and turns Ctrl-C into cancellation.
pub struct EventDisplayer {
    show_progress: bool,
    progress_bar: Option<ProgressBar>,
    continue_intent: Arc<AtomicBool>,
    error_count: usize,
    cancelled: bool,
}

impl EventDisplayer {
    /// Creates an [EventDisplayer], installing a Ctrl-C handler that requests cancellation.
    pub fn with_ctrlc(show_progress: bool) -> Result<Self> {
        let continue_intent = Arc::new(AtomicBool::new(true));
        let handler_intent = continue_intent.clone();
        ctrlc::set_handler(move || handler_intent.store(false, Ordering::SeqCst))?;

        Ok(EventDisplayer {
            show_progress,
            progress_bar: None,
            continue_intent,
            error_count: 0,
            cancelled: false,
        })
    }

    /// Returns an error if any errors were reported, or the run was cancelled.
    pub fn finish(self) -> Result<()> {
        if self.cancelled {
            bail!("cancelled with {} error(s) reported", self.error_count);
        }
        if self.error_count > 0 {
            bail!("{} error(s) reported", self.error_count);
        }
        Ok(())
    }
}

impl RunEvents for EventDisplayer {
    fn on_event(&mut self, event: RunEvent) {
        match event {
            RunEvent::Progress {
                step: _,
                item,
                completed: _,
                total,
            } => {
                log::info!("Processed {:?}.", item);
                if !self.show_progress {
                    return;
                }

                self.progress_bar
                    .get_or_insert_with(|| ProgressBar::cargo_style(total as u32, 80, true))
                    .update();
            }
            RunEvent::Error {
                err,
                terminal: false,
            } => {
                self.error_count += 1;
                eprintln!("Error (continuing): {:?}.", err);
            }
            RunEvent::Error {
                err,
                terminal: true,
            } => {
                self.error_count += 1;
                eprintln!("Failed: {:?}.", err);
            }
            RunEvent::Completed(step) => {
                self.progress_bar = None;
                eprintln!("Finished {step}.");
            }
            RunEvent::Cancelled => {
                self.progress_bar = None;
                self.cancelled = true;
                eprintln!("Cancelled.");
            }
        }
    }

    fn do_continue(&self) -> bool {
        self.continue_intent.load(Ordering::Relaxed)
    }
}
