//! Scheduler core: the pass loop, the quantum-bounded execution step, and
//! the end-of-run report.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`runner`] | `Scheduler`, pass structure, state transitions |
//! | [`exec`] | `run_quantum` and its outcome |
//! | [`report`] | `SimReport`, run counters |

pub mod exec;
pub mod report;
pub mod runner;

pub use exec::{run_quantum, QuantumRun, RunOutcome};
pub use report::{RunStats, SimReport, Termination};
pub use runner::{PassOutcome, Scheduler};
