//! Simulated process records.
//!
//! A [`Process`] holds identity plus the scheduling counters the simulation
//! reports on. The only public mutation is [`Process::advance_cycle`]; state
//! and counters change through `pub(crate)` hooks called by the scheduler's
//! transition code.
//!
//! Invariants:
//! - `0 <= progress <= total_work`, and `progress` never decreases.
//! - `cursor == progress + 1` after every progress change.
//! - `state == Terminated` exactly when `progress == total_work`, once the
//!   scheduler has applied the finishing transition.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProcessError;

/// Stable process identifier, equal to the workload's index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(u32);

impl Pid {
    #[inline(always)]
    pub fn from_u32(id: u32) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scheduling state of a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessState {
    Ready,
    Running,
    Blocked,
    Terminated,
}

impl ProcessState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Blocked => "BLOCKED",
            Self::Terminated => "TERMINATED",
        }
    }

    /// Whether `self -> next` is an edge of the scheduler's state machine.
    pub fn can_transition_to(self, next: ProcessState) -> bool {
        matches!(
            (self, next),
            (Self::Ready, Self::Running)
                | (Self::Running, Self::Terminated)
                | (Self::Running, Self::Blocked)
                | (Self::Running, Self::Ready)
                | (Self::Blocked, Self::Ready)
        )
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One simulated process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    id: Pid,
    total_work: u64,
    progress: u64,
    cursor: u64,
    state: ProcessState,
    io_events: u32,
    dispatches: u32,
}

impl Process {
    /// Create a ready process with no progress.
    pub fn new(id: Pid, total_work: u64) -> Self {
        Self {
            id,
            total_work,
            progress: 0,
            cursor: 1,
            state: ProcessState::Ready,
            io_events: 0,
            dispatches: 0,
        }
    }

    #[inline(always)]
    pub fn id(&self) -> Pid {
        self.id
    }

    #[inline(always)]
    pub fn total_work(&self) -> u64 {
        self.total_work
    }

    #[inline(always)]
    pub fn progress(&self) -> u64 {
        self.progress
    }

    #[inline(always)]
    pub fn remaining(&self) -> u64 {
        self.total_work - self.progress
    }

    #[inline(always)]
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    #[inline(always)]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    #[inline(always)]
    pub fn io_events(&self) -> u32 {
        self.io_events
    }

    #[inline(always)]
    pub fn dispatches(&self) -> u32 {
        self.dispatches
    }

    /// Whether all required work has been executed.
    #[inline(always)]
    pub fn is_complete(&self) -> bool {
        self.progress >= self.total_work
    }

    /// Execute one work cycle.
    ///
    /// Fails without side effects once `progress == total_work`.
    #[inline]
    pub fn advance_cycle(&mut self) -> Result<(), ProcessError> {
        if self.is_complete() {
            return Err(ProcessError::WorkComplete { pid: self.id });
        }
        self.progress += 1;
        self.refresh_cursor();
        Ok(())
    }

    /// Copy of the reportable fields.
    pub fn row(&self) -> ProcessRow {
        ProcessRow {
            pid: self.id,
            progress: self.progress,
            total_work: self.total_work,
            cursor: self.cursor,
            state: self.state,
            io_events: self.io_events,
            dispatches: self.dispatches,
        }
    }

    #[inline(always)]
    pub(crate) fn refresh_cursor(&mut self) {
        self.cursor = self.progress + 1;
    }

    pub(crate) fn set_state(&mut self, next: ProcessState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {} for pid {}",
            self.state,
            next,
            self.id
        );
        self.state = next;
    }

    pub(crate) fn note_dispatch(&mut self) {
        self.dispatches = self.dispatches.saturating_add(1);
    }

    pub(crate) fn note_io_event(&mut self) {
        self.io_events = self.io_events.saturating_add(1);
    }
}

/// Snapshot of one process's fields, as recorded and reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRow {
    pub pid: Pid,
    pub progress: u64,
    pub total_work: u64,
    pub cursor: u64,
    pub state: ProcessState,
    pub io_events: u32,
    pub dispatches: u32,
}

impl fmt::Display for ProcessRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PID={} TP={}/{} CP={} EP={} NES={} N_CPU={}",
            self.pid,
            self.progress,
            self.total_work,
            self.cursor,
            self.state,
            self.io_events,
            self.dispatches
        )
    }
}
