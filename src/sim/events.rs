//! Sources of the two random events that drive process transitions.
//!
//! The scheduler never touches an RNG directly; it asks an [`EventSource`]
//! whether a running process requests I/O after a cycle, and whether a
//! blocked process wakes up during a pass. Tests swap in [`FixedEvents`] or
//! [`ScriptedEvents`] to pin every decision.

use std::collections::VecDeque;

use crate::sim::rng::SimRng;

/// Per-cycle blocking and per-pass unblocking draws.
pub trait EventSource {
    /// Drawn once per executed work cycle that did not finish the process.
    fn draw_blocking_event(&mut self) -> bool;

    /// Drawn once per blocked process per scheduler pass.
    fn draw_unblock_event(&mut self) -> bool;
}

impl<E: EventSource + ?Sized> EventSource for &mut E {
    #[inline]
    fn draw_blocking_event(&mut self) -> bool {
        (**self).draw_blocking_event()
    }

    #[inline]
    fn draw_unblock_event(&mut self) -> bool {
        (**self).draw_unblock_event()
    }
}

/// Bernoulli draws from a seeded [`SimRng`].
#[derive(Clone, Debug)]
pub struct RandomEvents {
    rng: SimRng,
    p_io: f64,
    p_unblock: f64,
}

impl RandomEvents {
    pub fn new(rng: SimRng, p_io: f64, p_unblock: f64) -> Self {
        Self {
            rng,
            p_io,
            p_unblock,
        }
    }

    pub fn seeded(seed: u64, p_io: f64, p_unblock: f64) -> Self {
        Self::new(SimRng::new(seed), p_io, p_unblock)
    }
}

impl EventSource for RandomEvents {
    #[inline]
    fn draw_blocking_event(&mut self) -> bool {
        self.rng.chance(self.p_io)
    }

    #[inline]
    fn draw_unblock_event(&mut self) -> bool {
        self.rng.chance(self.p_unblock)
    }
}

/// Constant answers, for fully deterministic runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedEvents {
    pub block: bool,
    pub unblock: bool,
}

impl FixedEvents {
    /// Nothing ever requests I/O.
    pub fn never_blocks() -> Self {
        Self {
            block: false,
            unblock: true,
        }
    }

    /// Blocked processes always wake on the next sweep.
    pub fn always_unblocks(block: bool) -> Self {
        Self {
            block,
            unblock: true,
        }
    }
}

impl EventSource for FixedEvents {
    #[inline]
    fn draw_blocking_event(&mut self) -> bool {
        self.block
    }

    #[inline]
    fn draw_unblock_event(&mut self) -> bool {
        self.unblock
    }
}

/// Replays queued answers, then falls back to fixed defaults.
///
/// Blocking answers are consumed per cycle, so scripting an I/O request on
/// the Nth cycle of a dispatch takes `N - 1` leading `false`s.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEvents {
    blocking: VecDeque<bool>,
    unblock: VecDeque<bool>,
    fallback: FixedEvents,
    blocking_draws: u64,
    unblock_draws: u64,
}

impl ScriptedEvents {
    pub fn new(fallback: FixedEvents) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    /// Queue `n` non-blocking cycles followed by one I/O request.
    pub fn block_after(mut self, n: usize) -> Self {
        self.blocking.extend(std::iter::repeat(false).take(n));
        self.blocking.push_back(true);
        self
    }

    pub fn push_blocking(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.blocking.extend(answers);
        self
    }

    pub fn push_unblock(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.unblock.extend(answers);
        self
    }

    pub fn blocking_draws(&self) -> u64 {
        self.blocking_draws
    }

    pub fn unblock_draws(&self) -> u64 {
        self.unblock_draws
    }
}

impl EventSource for ScriptedEvents {
    fn draw_blocking_event(&mut self) -> bool {
        self.blocking_draws += 1;
        self.blocking
            .pop_front()
            .unwrap_or(self.fallback.block)
    }

    fn draw_unblock_event(&mut self) -> bool {
        self.unblock_draws += 1;
        self.unblock
            .pop_front()
            .unwrap_or(self.fallback.unblock)
    }
}
