//! One-call driver: config in, finished simulation out.
//!
//! Validates a [`SimConfig`], wires it to a seeded [`RandomEvents`] source and
//! the configured recorder, clears the recorder destination, and runs the
//! scheduler to completion (or to its pass limit).

use tracing::warn;

use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::recorder::{open_recorder, TableRecorder};
use crate::scheduler::{Scheduler, SimReport};
use crate::sim::events::RandomEvents;
use crate::sim::rng::{entropy_seed, SimRng};
use crate::sim::trace::TraceEvent;

/// Everything a finished run produced.
#[derive(Clone, Debug)]
pub struct SimRun {
    /// Seed actually used, so a wall-clock-seeded run can be replayed.
    pub seed: u64,
    pub report: SimReport,
    pub trace: Vec<TraceEvent>,
}

/// Run `cfg` with the recorder it names.
pub fn run_simulation(cfg: &SimConfig) -> Result<SimRun, ConfigError> {
    run_simulation_with(cfg, open_recorder(&cfg.recorder))
}

/// Run `cfg` against a caller-supplied recorder.
///
/// Fails with the [`SimConfig::validate`] error before the recorder is
/// reset, so an invalid config leaves the destination untouched.
pub fn run_simulation_with<R: TableRecorder>(
    cfg: &SimConfig,
    mut recorder: R,
) -> Result<SimRun, ConfigError> {
    cfg.validate()?;
    let seed = cfg.seed.unwrap_or_else(entropy_seed);
    let events = RandomEvents::new(
        SimRng::new(seed),
        cfg.scheduler.p_io,
        cfg.scheduler.p_unblock,
    );

    if let Err(err) = recorder.reset() {
        warn!(error = %err, "could not clear process table; continuing");
    }

    let mut scheduler = Scheduler::new(cfg.scheduler.clone(), &cfg.workloads, events, recorder);
    let report = scheduler.run();
    Ok(SimRun {
        seed,
        report,
        trace: scheduler.trace().dump(),
    })
}
