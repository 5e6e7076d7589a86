//! Pass-by-pass invariants under random workloads and seeds.
//!
//! After every pass, no process is RUNNING, every pid sits in exactly the
//! structure its state says, progress only grows, and one dispatch moves a
//! single process by at most one quantum.

use std::collections::HashSet;

use proptest::prelude::*;

use procsim::{
    FixedEvents, NullRecorder, PassOutcome, ProcessState, RandomEvents, Scheduler,
    SchedulerConfig, Termination,
};

const MAX_PASSES: u64 = 2_000_000;

fn workloads() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..3_000, 1..8)
}

fn config(quantum: u64) -> SchedulerConfig {
    SchedulerConfig {
        quantum,
        trace_capacity: 0,
        max_passes: Some(MAX_PASSES),
        ..SchedulerConfig::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(crate::proptest_cases(48)))]

    #[test]
    fn pass_invariants_hold(
        work in workloads(),
        quantum in 1u64..600,
        seed in any::<u64>(),
        p_io in 0.0f64..0.1,
        p_unblock in 0.05f64..=1.0,
    ) {
        let events = RandomEvents::seeded(seed, p_io, p_unblock);
        let mut sched = Scheduler::new(config(quantum), &work, events, NullRecorder);
        let mut prev: Vec<u64> = vec![0; work.len()];
        let mut prev_state: Vec<ProcessState> = vec![ProcessState::Ready; work.len()];

        loop {
            let outcome = sched.step();
            if outcome == PassOutcome::Finished {
                break;
            }
            prop_assert!(sched.stats().passes <= MAX_PASSES);

            let ready: HashSet<u32> = sched.ready_queue().iter().map(|p| p.as_u32()).collect();
            let blocked: HashSet<u32> = sched.blocked().iter().map(|p| p.as_u32()).collect();
            prop_assert_eq!(ready.len(), sched.ready_queue().len());
            prop_assert_eq!(blocked.len(), sched.blocked().len());
            prop_assert!(ready.is_disjoint(&blocked));

            let mut moved = 0;
            for p in sched.processes() {
                let id = p.id().as_u32();
                let idx = p.id().index();
                prop_assert!(p.progress() >= prev[idx]);
                prop_assert!(p.progress() <= p.total_work());
                prop_assert_eq!(p.cursor(), p.progress() + 1);
                prop_assert_eq!(p.state() == ProcessState::Terminated, p.is_complete());

                match p.state() {
                    ProcessState::Ready => prop_assert!(ready.contains(&id)),
                    ProcessState::Blocked => prop_assert!(blocked.contains(&id)),
                    ProcessState::Terminated => {
                        prop_assert!(!ready.contains(&id) && !blocked.contains(&id));
                    }
                    ProcessState::Running => prop_assert!(false, "pid {} left RUNNING", id),
                }
                if prev_state[idx] == ProcessState::Terminated {
                    prop_assert_eq!(p.state(), ProcessState::Terminated);
                }

                if p.progress() != prev[idx] {
                    moved += 1;
                    prop_assert!(p.progress() - prev[idx] <= quantum);
                }
                prev[idx] = p.progress();
                prev_state[idx] = p.state();
            }
            prop_assert!(moved <= 1);

            if let PassOutcome::Dispatched { run, .. } = outcome {
                prop_assert!(run.cycles <= quantum);
            }
        }

        let report = sched.report(Termination::AllTerminated);
        prop_assert_eq!(report.cycles, work.iter().sum::<u64>());
    }

    #[test]
    fn without_io_every_process_finishes_in_ceil_dispatches(
        work in workloads(),
        quantum in 1u64..4_000,
    ) {
        let mut sched = Scheduler::new(
            config(quantum),
            &work,
            FixedEvents::never_blocks(),
            NullRecorder,
        );
        let report = sched.run();
        prop_assert_eq!(report.termination, Termination::AllTerminated);
        prop_assert_eq!(report.idle_passes, 0);
        for (row, total) in report.processes.iter().zip(&work) {
            prop_assert_eq!(row.dispatches as u64, total.div_ceil(quantum));
        }
    }

    #[test]
    fn same_seed_same_report(
        work in workloads(),
        quantum in 1u64..600,
        seed in any::<u64>(),
    ) {
        let run = |seed| {
            let events = RandomEvents::seeded(seed, 0.02, 0.3);
            Scheduler::new(config(quantum), &work, events, NullRecorder).run()
        };
        prop_assert_eq!(run(seed), run(seed));
    }
}
