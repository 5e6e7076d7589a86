//! Deterministic simulation primitives.
//!
//! Purpose:
//! - Provide the event sources that decide I/O blocking and unblocking.
//! - Provide a stable RNG, a work-cycle clock, and a bounded trace buffer.
//!
//! Invariants:
//! - `SimClock` is monotonic and advances only through explicit calls.
//! - `TraceRing` never exceeds its capacity and evicts oldest events first.
//! - `SimRng` is deterministic and remaps a zero seed to a non-zero state.

pub mod clock;
pub mod events;
pub mod rng;
pub mod trace;

pub use clock::SimClock;
pub use events::{EventSource, FixedEvents, RandomEvents, ScriptedEvents};
pub use rng::SimRng;
pub use trace::{TraceEvent, TraceRing};
