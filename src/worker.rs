use std::path::Path;
use std::sync::Arc;

use crossbeam_channel::Sender;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::gate::Gate;
use crate::path_map;
use crate::progress::LocaliseReporter;
use crate::scheduler::SequenceJob;
use crate::state::ScheduleState;
use crate::sync::{self, SyncOutcome};

/// Drives one sequence's file list through the syncer.
///
/// One worker runs per sequence on its own thread. It blocks on the gate
/// before touching any file, checks the cancel flags at every file boundary,
/// and treats per-file failures as recoverable: a bad file is logged and
/// recorded, never aborts the rest of the sequence.
pub(crate) struct CopyWorker {
    job: SequenceJob,
    cache_root: String,
    state: Arc<ScheduleState>,
    reporter: Arc<dyn LocaliseReporter>,
    done_tx: Sender<()>,
}

impl CopyWorker {
    pub(crate) fn new(
        job: SequenceJob,
        cache_root: String,
        state: Arc<ScheduleState>,
        reporter: Arc<dyn LocaliseReporter>,
        done_tx: Sender<()>,
    ) -> Self {
        CopyWorker {
            job,
            cache_root,
            state,
            reporter,
            done_tx,
        }
    }

    pub(crate) fn run(self, gate: Gate) {
        // Held for the whole copy loop; the Drop impl returns it on every
        // exit path, panics included.
        let _permit = gate.acquire();

        let name = self.job.name.as_str();
        debug!(sequence = name, files = self.job.files.len(), "sequence started");
        self.reporter.on_sequence_start(name, self.job.files.len());

        let mut cancelled = false;
        for source_path in &self.job.files {
            if self.state.is_cancelled() || self.state.sequence_cancelled(name) {
                debug!(sequence = name, "cancellation observed, stopping");
                cancelled = true;
                break;
            }

            match self.localise_one(source_path) {
                Ok(outcome) => {
                    self.reporter.on_file_localised(name, source_path, outcome);
                }
                Err(err) => {
                    warn!(
                        sequence = name,
                        file = %source_path,
                        error = %err,
                        "failed to localise file"
                    );
                    self.state.record_file_failed(name, source_path);
                    self.reporter.on_file_failed(name, source_path, &err);
                }
            }

            self.state.record_file_done(name);
            if let Some(percent) = self.state.sequence_percent(name) {
                self.reporter.on_sequence_progress(name, percent);
            }
            self.reporter
                .on_overall_progress(self.state.overall_percent());
        }

        self.finish(cancelled);
    }

    fn localise_one(&self, source_path: &str) -> Result<SyncOutcome, Error> {
        let dest_dir = path_map::map_to_local_directory(source_path, &self.cache_root)?;
        sync::sync_file(Path::new(source_path), Path::new(&dest_dir))
    }

    fn finish(&self, cancelled: bool) {
        debug!(sequence = %self.job.name, cancelled, "sequence finished");
        self.reporter.on_sequence_finished(&self.job.name, cancelled);
        if self.state.record_sequence_done() {
            info!(
                completed_files = self.state.completed_files(),
                total_files = self.state.total_files(),
                "localisation finished"
            );
            self.reporter.on_finished();
            let _ = self.done_tx.send(());
        }
    }
}
