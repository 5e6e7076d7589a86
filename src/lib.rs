//! Quantum-sliced CPU scheduler simulation over synthetic processes.
//!
//! ## Scope
//! A fixed population of simulated processes is scheduled round-robin. Each
//! dispatch runs one process for at most one quantum of work cycles; a
//! per-cycle random draw may turn the dispatch into an I/O request that
//! blocks the process until a later per-pass unblock draw succeeds. There is
//! no real CPU, thread or device: work and events are counters and draws.
//!
//! ## Key invariants
//! - `progress` never decreases and never exceeds `total_work`.
//! - TERMINATED is absorbing and holds exactly when all work is done.
//! - A process is in at most one of {ready queue, blocked set}.
//! - The ready queue is strict FIFO; quantum expiry is the only preemption.
//!
//! ## Flow (one pass)
//! `unblock sweep -> pop ready head -> run_quantum -> transition -> record`
//!
//! ## Notable entry points
//! - [`Scheduler`]: owns processes and queues; `step()` / `run()`.
//! - [`run_quantum`]: the quantum-bounded execution step.
//! - [`EventSource`]: injected randomness ([`RandomEvents`], [`FixedEvents`],
//!   [`ScriptedEvents`]).
//! - [`TableRecorder`]: snapshot sinks ([`TableFileRecorder`],
//!   [`AppendLogRecorder`], [`MemoryRecorder`]).
//! - [`run_simulation`]: config-driven one-call driver.

pub mod cli;
pub mod config;
pub mod error;
pub mod process;
pub mod recorder;
pub mod runtime;
pub mod scheduler;
pub mod sim;
#[cfg(test)]
pub mod test_utils;

pub use config::{RecordMode, RecorderConfig, SchedulerConfig, SimConfig};
pub use error::{ConfigError, ProcessError, RecordError};
pub use process::{Pid, Process, ProcessRow, ProcessState};
pub use recorder::{
    AppendLogRecorder, MemoryRecorder, NullRecorder, Snapshot, TableFileRecorder, TableRecorder,
};
pub use runtime::{run_simulation, run_simulation_with, SimRun};
pub use scheduler::{
    run_quantum, PassOutcome, QuantumRun, RunOutcome, RunStats, Scheduler, SimReport, Termination,
};
pub use sim::{EventSource, FixedEvents, RandomEvents, ScriptedEvents, SimClock, SimRng};
pub use sim::{TraceEvent, TraceRing};
