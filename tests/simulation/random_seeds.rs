//! Bounded seeded runs with the calibration defaults.

use procsim::{
    run_simulation_with, MemoryRecorder, ProcessState, SimConfig, Termination, TraceEvent,
};

use crate::seed_value_from_env;

const DEFAULT_SEED_COUNT: u64 = 20;

#[test]
fn default_calibration_always_terminates() {
    let seed_start = seed_value_from_env("SIM_SCHEDULER_SEED_START", 0);
    let seed_count = seed_value_from_env("SIM_SCHEDULER_SEED_COUNT", DEFAULT_SEED_COUNT);

    for seed in seed_start..seed_start.saturating_add(seed_count) {
        let cfg = SimConfig {
            seed: Some(seed),
            ..SimConfig::default()
        };
        let total: u64 = cfg.workloads.iter().sum();
        let mut recorder = MemoryRecorder::new();
        let run = run_simulation_with(&cfg, &mut recorder).unwrap();
        let report = &run.report;

        assert_eq!(report.termination, Termination::AllTerminated, "seed {seed}");
        assert_eq!(report.cycles, total, "seed {seed}");
        assert_eq!(report.terminated_count(), cfg.workloads.len(), "seed {seed}");
        assert_eq!(
            report.dispatches,
            report.processes.iter().map(|r| r.dispatches as u64).sum::<u64>(),
            "seed {seed}"
        );
        assert_eq!(recorder.snapshots().len() as u64, report.dispatches, "seed {seed}");

        let last = recorder.last().expect("at least one snapshot");
        assert!(last.rows.iter().all(|r| r.state == ProcessState::Terminated));
    }
}

#[test]
fn io_heavy_runs_block_and_recover() {
    for seed in 0..10 {
        let mut cfg = SimConfig {
            seed: Some(seed),
            workloads: vec![400, 250, 600],
            ..SimConfig::default()
        };
        cfg.scheduler.quantum = 100;
        cfg.scheduler.p_io = 0.05;
        cfg.scheduler.p_unblock = 0.5;
        cfg.scheduler.trace_capacity = 1 << 16;

        let run = run_simulation_with(&cfg, MemoryRecorder::new()).unwrap();
        assert_eq!(run.report.termination, Termination::AllTerminated, "seed {seed}");
        assert!(run.report.io_events > 0, "seed {seed}");

        let blocks = run
            .trace
            .iter()
            .filter(|ev| matches!(ev, TraceEvent::Transition { to: ProcessState::Blocked, .. }))
            .count() as u64;
        let unblocks = run
            .trace
            .iter()
            .filter(|ev| matches!(ev, TraceEvent::Unblock { .. }))
            .count() as u64;
        assert_eq!(blocks, run.report.io_events, "seed {seed}");
        assert_eq!(unblocks, blocks, "every block is matched by a wakeup (seed {seed})");
    }
}
