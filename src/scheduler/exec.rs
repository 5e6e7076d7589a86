//! Quantum-bounded execution of one dispatched process.
//!
//! Each iteration runs one work cycle. The finished check always comes
//! before the I/O draw and before the expiry check, so a process that
//! completes on the final cycle of its quantum reports `Finished`.

use crate::process::Process;
use crate::sim::events::EventSource;

/// Why a dispatch ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RunOutcome {
    /// All required work is done.
    Finished,
    /// The process requested I/O mid-quantum.
    IoRequest,
    /// The quantum ran out with work remaining.
    QuantumExpired,
}

/// Result of one [`run_quantum`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantumRun {
    pub outcome: RunOutcome,
    /// Work cycles executed; never more than the quantum.
    pub cycles: u64,
}

/// Run `process` for up to `quantum` cycles.
///
/// Only `progress` and `cursor` change; state and counters are left to the
/// scheduler. The blocking draw happens once per cycle that leaves work
/// remaining.
pub fn run_quantum<E: EventSource + ?Sized>(
    process: &mut Process,
    quantum: u64,
    events: &mut E,
) -> QuantumRun {
    let mut cycles = 0;
    while cycles < quantum {
        if process.advance_cycle().is_err() {
            return QuantumRun {
                outcome: RunOutcome::Finished,
                cycles,
            };
        }
        cycles += 1;

        if process.is_complete() {
            return QuantumRun {
                outcome: RunOutcome::Finished,
                cycles,
            };
        }
        if events.draw_blocking_event() {
            return QuantumRun {
                outcome: RunOutcome::IoRequest,
                cycles,
            };
        }
    }

    let outcome = if process.is_complete() {
        RunOutcome::Finished
    } else {
        RunOutcome::QuantumExpired
    };
    QuantumRun { outcome, cycles }
}
