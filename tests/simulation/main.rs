//! Deterministic and seeded scheduler simulations.
//!
//! Run with: `cargo test --test simulation`
//!
//! Seed ranges for the randomized runs can be widened with
//! `SIM_SCHEDULER_SEED_START` and `SIM_SCHEDULER_SEED_COUNT`.

mod random_seeds;
mod scenarios;

pub fn seed_value_from_env(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
