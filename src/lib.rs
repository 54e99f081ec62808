//! Background file localisation for image sequences.
//!
//! Given named sequences of absolute source paths, the engine copies each
//! file into a per-source-root directory under one local cache root,
//! skipping files that are already byte-identical locally. One worker thread
//! runs per sequence, bounded by a concurrency gate; progress is pushed to a
//! [`LocaliseReporter`] and can be polled from the run [`Handle`], which
//! also carries cancellation and the one-shot completion signal.

pub mod config;
pub mod error;
pub mod gate;
pub mod padding;
pub mod path_map;
pub mod progress;
pub mod scheduler;
pub mod state;
pub mod sync;
mod worker;

pub use config::LocaliseConfig;
pub use error::Error;
pub use path_map::map_to_local_directory;
pub use progress::{LocaliseReporter, SilentReporter};
pub use scheduler::{Handle, LocalisationScheduler, RunReport, SequenceJob};
pub use state::ScheduleState;
pub use sync::{sync_file, SyncOutcome};
