//! End-of-run report.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::process::{ProcessRow, ProcessState};

/// Why the run loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Every process reached TERMINATED.
    AllTerminated,
    /// `max_passes` was reached first.
    PassLimit,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllTerminated => f.write_str("all_terminated"),
            Self::PassLimit => f.write_str("pass_limit"),
        }
    }
}

/// Counters the scheduler keeps while running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub passes: u64,
    pub idle_passes: u64,
    pub dispatches: u64,
    pub unblocks: u64,
    pub record_failures: u64,
}

/// Outcome of a complete run plus the final process table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimReport {
    pub termination: Termination,
    pub passes: u64,
    pub idle_passes: u64,
    pub dispatches: u64,
    pub unblocks: u64,
    /// Work cycles executed across all processes.
    pub cycles: u64,
    pub io_events: u64,
    pub record_failures: u64,
    pub processes: Vec<ProcessRow>,
}

impl SimReport {
    pub fn terminated_count(&self) -> usize {
        self.processes
            .iter()
            .filter(|row| row.state == ProcessState::Terminated)
            .count()
    }

    /// One-line `key=value` summary for stderr.
    pub fn summary_line(&self) -> String {
        format!(
            concat!(
                "termination={} processes={} terminated={} passes={} idle_passes={} ",
                "dispatches={} unblocks={} cycles={} io_events={} record_failures={}",
            ),
            self.termination,
            self.processes.len(),
            self.terminated_count(),
            self.passes,
            self.idle_passes,
            self.dispatches,
            self.unblocks,
            self.cycles,
            self.io_events,
            self.record_failures
        )
    }
}
