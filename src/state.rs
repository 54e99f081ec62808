use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::scheduler::SequenceJob;

/// Progress of one sequence. Counters are atomics so workers only ever take
/// shared references into the map.
#[derive(Debug, Default)]
pub struct SequenceState {
    total: usize,
    processed: AtomicUsize,
    cancelled: AtomicBool,
    failed: Mutex<Vec<String>>,
}

/// Shared progress state for one localisation run.
///
/// Workers increment the counters with `SeqCst` atomics; readers polling a
/// percentage may observe a briefly stale value, but updates are never lost.
#[derive(Debug)]
pub struct ScheduleState {
    total_files: usize,
    total_sequences: usize,
    completed_files: AtomicUsize,
    completed_sequences: AtomicUsize,
    cancelled: AtomicBool,
    sequences: DashMap<String, SequenceState>,
}

impl ScheduleState {
    pub fn new(jobs: &[SequenceJob]) -> Self {
        let sequences = DashMap::new();
        for job in jobs {
            sequences.insert(
                job.name.clone(),
                SequenceState {
                    total: job.files.len(),
                    ..SequenceState::default()
                },
            );
        }
        ScheduleState {
            total_files: jobs.iter().map(|j| j.files.len()).sum(),
            total_sequences: jobs.len(),
            completed_files: AtomicUsize::new(0),
            completed_sequences: AtomicUsize::new(0),
            cancelled: AtomicBool::new(false),
            sequences,
        }
    }

    pub fn total_files(&self) -> usize {
        self.total_files
    }

    pub fn total_sequences(&self) -> usize {
        self.total_sequences
    }

    pub fn completed_files(&self) -> usize {
        self.completed_files.load(Ordering::SeqCst)
    }

    pub fn completed_sequences(&self) -> usize {
        self.completed_sequences.load(Ordering::SeqCst)
    }

    /// Overall completion, 0–100. An empty run is complete by definition.
    pub fn overall_percent(&self) -> u8 {
        if self.total_files == 0 {
            return 100;
        }
        (self.completed_files() * 100 / self.total_files) as u8
    }

    pub fn sequence_percent(&self, name: &str) -> Option<u8> {
        self.sequences.get(name).map(|seq| {
            if seq.total == 0 {
                100
            } else {
                (seq.processed.load(Ordering::SeqCst) * 100 / seq.total) as u8
            }
        })
    }

    /// Human-readable run summary, e.g. `"2/5 concurrent tasks"`.
    pub fn summary(&self) -> String {
        format!(
            "{}/{} concurrent tasks",
            self.completed_sequences(),
            self.total_sequences
        )
    }

    pub fn cancel_all(&self) {
        debug!("global cancellation requested");
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Cancel a single sequence. Returns false for an unknown name.
    pub fn cancel_sequence(&self, name: &str) -> bool {
        match self.sequences.get(name) {
            Some(seq) => {
                debug!(sequence = name, "sequence cancellation requested");
                seq.cancelled.store(true, Ordering::SeqCst);
                true
            }
            None => false,
        }
    }

    pub fn sequence_cancelled(&self, name: &str) -> bool {
        self.sequences
            .get(name)
            .map(|seq| seq.cancelled.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    /// Count one processed file (copied, up to date, or failed) against both
    /// the sequence and the run.
    pub fn record_file_done(&self, name: &str) {
        if let Some(seq) = self.sequences.get(name) {
            seq.processed.fetch_add(1, Ordering::SeqCst);
        }
        self.completed_files.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_file_failed(&self, name: &str, source_path: &str) {
        if let Some(seq) = self.sequences.get(name) {
            seq.failed.lock().push(source_path.to_string());
        }
    }

    /// Count one finished sequence; true when it was the last one.
    pub fn record_sequence_done(&self) -> bool {
        let finished = self.completed_sequences.fetch_add(1, Ordering::SeqCst) + 1;
        finished == self.total_sequences
    }

    /// Source paths that failed to localise, grouped by sequence name.
    /// Sequences with no failures are omitted.
    pub fn failed_files(&self) -> Vec<(String, Vec<String>)> {
        self.sequences
            .iter()
            .filter_map(|entry| {
                let failed = entry.value().failed.lock();
                if failed.is_empty() {
                    None
                } else {
                    Some((entry.key().clone(), failed.clone()))
                }
            })
            .collect()
    }
}
