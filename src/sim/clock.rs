//! Simulated time measured in executed work cycles.
//!
//! The clock only moves when the scheduler credits the cycles a dispatch ran,
//! so time stays deterministic for a given seed.

/// Global work-cycle counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimClock {
    now: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self { now: 0 }
    }

    /// Cycles executed so far.
    #[inline(always)]
    pub fn now_cycles(&self) -> u64 {
        self.now
    }

    /// Credit `cycles` of executed work, saturating on overflow.
    #[inline(always)]
    pub fn advance_by(&mut self, cycles: u64) {
        self.now = self.now.saturating_add(cycles);
    }
}
