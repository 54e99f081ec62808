use std::collections::HashSet;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver};
use tracing::{debug, info};

use crate::config::{self, LocaliseConfig};
use crate::error::Error;
use crate::gate::Gate;
use crate::progress::LocaliseReporter;
use crate::state::ScheduleState;
use crate::worker::CopyWorker;

/// One named, ordered group of source files localised together.
///
/// The name is the unique progress label for the run; the files are absolute
/// source paths, already expanded from any frame-range or padding syntax.
#[derive(Debug, Clone)]
pub struct SequenceJob {
    pub name: String,
    pub files: Vec<String>,
}

impl SequenceJob {
    pub fn new(name: impl Into<String>, files: Vec<String>) -> Self {
        SequenceJob {
            name: name.into(),
            files,
        }
    }
}

/// Final accounting for one localisation run, returned by [`Handle::wait`].
#[derive(Debug)]
pub struct RunReport {
    pub duration: Duration,
    pub total_files: usize,
    pub completed_files: usize,
    pub total_sequences: usize,
    pub cancelled: bool,
    /// Source paths that failed to localise, grouped by sequence.
    pub failed: Vec<(String, Vec<String>)>,
}

/// Schedules one worker thread per sequence, bounded by the concurrency gate.
pub struct LocalisationScheduler {
    cache_root: String,
    concurrency_limit: usize,
}

impl LocalisationScheduler {
    pub fn new(config: LocaliseConfig) -> Self {
        let concurrency_limit = config
            .concurrency_limit
            .unwrap_or_else(config::default_concurrency_limit)
            .max(1);
        LocalisationScheduler {
            cache_root: config.cache_root,
            concurrency_limit,
        }
    }

    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit.max(1);
        self
    }

    /// Start localising. All workers are spawned immediately and block on
    /// the gate, so at most `concurrency_limit` copy at once while the rest
    /// wait. Sequence names must be unique within one submission.
    pub fn start(
        &self,
        jobs: Vec<SequenceJob>,
        reporter: Arc<dyn LocaliseReporter>,
    ) -> Result<Handle, Error> {
        let mut seen = HashSet::new();
        for job in &jobs {
            if !seen.insert(job.name.as_str()) {
                return Err(Error::DuplicateSequence {
                    name: job.name.clone(),
                });
            }
        }

        let state = Arc::new(ScheduleState::new(&jobs));
        let gate = Gate::new(self.concurrency_limit);
        let (done_tx, done_rx) = bounded(1);
        let started = Instant::now();

        info!(
            total_files = state.total_files(),
            total_sequences = state.total_sequences(),
            concurrency_limit = self.concurrency_limit,
            "starting localisation"
        );
        reporter.on_start(state.total_files(), state.total_sequences());

        if jobs.is_empty() {
            // Nothing to do; the completion signal still fires exactly once.
            reporter.on_finished();
            let _ = done_tx.send(());
            return Ok(Handle {
                state,
                workers: Vec::new(),
                done_rx,
                started,
            });
        }

        let mut workers = Vec::with_capacity(jobs.len());
        for job in jobs {
            let thread_name = format!("localise-{}", job.name);
            debug!(sequence = %job.name, "spawning worker");
            let worker = CopyWorker::new(
                job,
                self.cache_root.clone(),
                Arc::clone(&state),
                Arc::clone(&reporter),
                done_tx.clone(),
            );
            let gate = gate.clone();
            let handle = thread::Builder::new()
                .name(thread_name)
                .spawn(move || worker.run(gate))?;
            workers.push(handle);
        }

        Ok(Handle {
            state,
            workers,
            done_rx,
            started,
        })
    }
}

/// Handle to a running localisation: progress polling, cancellation, and the
/// completion signal.
pub struct Handle {
    state: Arc<ScheduleState>,
    workers: Vec<JoinHandle<()>>,
    done_rx: Receiver<()>,
    started: Instant,
}

impl Handle {
    /// Stop starting new files in every sequence. In-flight copies finish;
    /// already-localised files stay put.
    pub fn cancel_all(&self) {
        self.state.cancel_all();
    }

    /// Stop starting new files in one sequence. Returns false for an
    /// unknown name.
    pub fn cancel_sequence(&self, name: &str) -> bool {
        self.state.cancel_sequence(name)
    }

    pub fn overall_percent(&self) -> u8 {
        self.state.overall_percent()
    }

    pub fn sequence_percent(&self, name: &str) -> Option<u8> {
        self.state.sequence_percent(name)
    }

    /// Human-readable summary, e.g. `"2/5 concurrent tasks"`.
    pub fn summary(&self) -> String {
        self.state.summary()
    }

    /// Receives exactly one message, when all sequences have finished or
    /// been cancelled.
    pub fn completion(&self) -> &Receiver<()> {
        &self.done_rx
    }

    /// Join every worker and return the final accounting.
    pub fn wait(self) -> RunReport {
        for worker in self.workers {
            let _ = worker.join();
        }
        RunReport {
            duration: self.started.elapsed(),
            total_files: self.state.total_files(),
            completed_files: self.state.completed_files(),
            total_sequences: self.state.total_sequences(),
            cancelled: self.state.is_cancelled(),
            failed: self.state.failed_files(),
        }
    }
}
