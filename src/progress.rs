use crate::error::Error;
use crate::sync::SyncOutcome;

/// Trait for reporting localisation progress to the host.
///
/// Host UIs implement this with whatever progress widget they have; the
/// engine pushes updates as workers process files. All methods have default
/// no-op implementations, and all may be called from worker threads
/// concurrently.
pub trait LocaliseReporter: Send + Sync {
    fn on_start(&self, _total_files: usize, _total_sequences: usize) {}
    fn on_sequence_start(&self, _name: &str, _file_count: usize) {}
    fn on_file_localised(&self, _name: &str, _source_path: &str, _outcome: SyncOutcome) {}
    fn on_file_failed(&self, _name: &str, _source_path: &str, _error: &Error) {}
    fn on_sequence_progress(&self, _name: &str, _percent: u8) {}
    fn on_overall_progress(&self, _percent: u8) {}
    fn on_sequence_finished(&self, _name: &str, _cancelled: bool) {}
    /// Fired exactly once, after the last sequence finishes or is cancelled.
    fn on_finished(&self) {}
}

/// No-op reporter for callers that only poll the handle.
pub struct SilentReporter;

impl LocaliseReporter for SilentReporter {}
