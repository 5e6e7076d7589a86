//! Deterministic RNG behind the random event source.
//!
//! xorshift64* keeps the stream stable across platforms, so a seed fully
//! determines a run. Not cryptographically secure.

use std::time::{SystemTime, UNIX_EPOCH};

const ZERO_SEED_REMAP: u64 = 0x9E3779B97F4A7C15;

/// Seeded xorshift64* generator.
///
/// Not `Copy`: copying would duplicate the stream and repeat every draw.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    /// Create a generator. Seed 0 is remapped to avoid the all-zero state.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { ZERO_SEED_REMAP } else { seed };
        Self { state }
    }

    #[inline(always)]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform value in `[0, 1)` built from the top 53 bits.
    #[inline(always)]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// `true` with probability `p`. `p <= 0` never fires, `p >= 1` always does.
    #[inline(always)]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// Seed derived from the current time; falls back to a constant if the clock
/// is before the epoch.
pub fn entropy_seed() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() ^ (d.subsec_nanos() as u64).rotate_left(32),
        Err(_) => ZERO_SEED_REMAP,
    }
}
