//! Process table recorders.
//!
//! # Design
//!
//! After every dispatch the scheduler hands a [`Snapshot`] of all processes
//! to a [`TableRecorder`]. Recorders are pure sinks: nothing they do feeds
//! back into scheduling, and a failed write is reported to the caller, who
//! logs it and moves on.
//!
//! # Policies
//!
//! | Recorder | Destination after each call |
//! |----------|-----------------------------|
//! | [`TableFileRecorder`] | Whole file replaced by a timestamped table |
//! | [`AppendLogRecorder`] | Pass marker plus one line per process appended |
//! | [`MemoryRecorder`] | Snapshot kept in memory (tests) |
//! | [`NullRecorder`] | Nothing |
//!
//! Both file recorders complete their write before `record` returns. The
//! table recorder stages the new table in a sibling temp file and renames it
//! over the destination, so readers never observe a half-written table.

mod file;

use std::path::Path;

pub use file::{render_rows, AppendLogRecorder, TableFileRecorder};

use crate::config::{RecordMode, RecorderConfig};
use crate::error::RecordError;
use crate::process::ProcessRow;

/// Read-only copy of every process's fields at one point in the run.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Snapshot {
    /// Scheduler pass that produced the snapshot.
    pub pass: u64,
    /// Simulated work cycles executed so far.
    pub clock: u64,
    /// One row per process, sorted by pid.
    pub rows: Vec<ProcessRow>,
}

/// Sink for process table snapshots.
pub trait TableRecorder {
    /// Persist `snapshot`. Must finish writing before returning.
    fn record(&mut self, snapshot: &Snapshot) -> Result<(), RecordError>;

    /// Clear the destination before a run starts.
    fn reset(&mut self) -> Result<(), RecordError> {
        Ok(())
    }
}

impl<R: TableRecorder + ?Sized> TableRecorder for &mut R {
    fn record(&mut self, snapshot: &Snapshot) -> Result<(), RecordError> {
        (**self).record(snapshot)
    }

    fn reset(&mut self) -> Result<(), RecordError> {
        (**self).reset()
    }
}

impl<R: TableRecorder + ?Sized> TableRecorder for Box<R> {
    fn record(&mut self, snapshot: &Snapshot) -> Result<(), RecordError> {
        (**self).record(snapshot)
    }

    fn reset(&mut self) -> Result<(), RecordError> {
        (**self).reset()
    }
}

/// Build the recorder selected by `cfg`.
pub fn open_recorder(cfg: &RecorderConfig) -> Box<dyn TableRecorder> {
    open_recorder_at(cfg.mode, &cfg.path)
}

pub fn open_recorder_at(mode: RecordMode, path: &Path) -> Box<dyn TableRecorder> {
    match mode {
        RecordMode::Table => Box::new(TableFileRecorder::new(path)),
        RecordMode::Append => Box::new(AppendLogRecorder::new(path)),
        RecordMode::None => Box::new(NullRecorder),
    }
}

/// Discards every snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRecorder;

impl TableRecorder for NullRecorder {
    fn record(&mut self, _snapshot: &Snapshot) -> Result<(), RecordError> {
        Ok(())
    }
}

/// Keeps every snapshot in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryRecorder {
    snapshots: Vec<Snapshot>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}

impl TableRecorder for MemoryRecorder {
    fn record(&mut self, snapshot: &Snapshot) -> Result<(), RecordError> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }

    fn reset(&mut self) -> Result<(), RecordError> {
        self.snapshots.clear();
        Ok(())
    }
}
