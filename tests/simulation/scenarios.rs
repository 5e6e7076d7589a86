//! Fixed scenarios with fully scripted event sources.

use procsim::{
    EventSource, FixedEvents, MemoryRecorder, NullRecorder, PassOutcome, Pid, ProcessState,
    RunOutcome, Scheduler, SchedulerConfig, SimRng, Termination, TraceEvent,
};

fn config(quantum: u64) -> SchedulerConfig {
    SchedulerConfig {
        quantum,
        trace_capacity: 4096,
        ..SchedulerConfig::default()
    }
}

/// Random per-cycle blocking, but every blocked process wakes on the next
/// sweep.
struct AlwaysWake {
    rng: SimRng,
    p_io: f64,
}

impl EventSource for AlwaysWake {
    fn draw_blocking_event(&mut self) -> bool {
        self.rng.chance(self.p_io)
    }

    fn draw_unblock_event(&mut self) -> bool {
        true
    }
}

#[test]
fn three_processes_follow_round_robin_order() {
    let mut sched = Scheduler::new(
        config(1000),
        &[1500, 1000, 2500],
        FixedEvents::never_blocks(),
        MemoryRecorder::new(),
    );
    let report = sched.run();

    let runs: Vec<(u32, RunOutcome, u64)> = sched
        .trace()
        .iter()
        .filter_map(|ev| match *ev {
            TraceEvent::Transition { pid, to, cycles, .. } => {
                let outcome = match to {
                    ProcessState::Terminated => RunOutcome::Finished,
                    ProcessState::Ready => RunOutcome::QuantumExpired,
                    _ => RunOutcome::IoRequest,
                };
                Some((pid.as_u32(), outcome, cycles))
            }
            _ => None,
        })
        .collect();

    assert_eq!(
        runs,
        vec![
            (0, RunOutcome::QuantumExpired, 1000),
            (1, RunOutcome::Finished, 1000),
            (2, RunOutcome::QuantumExpired, 1000),
            (0, RunOutcome::Finished, 500),
            (2, RunOutcome::QuantumExpired, 1000),
            (2, RunOutcome::Finished, 500),
        ]
    );

    assert_eq!(report.termination, Termination::AllTerminated);
    let dispatches: Vec<u32> = report.processes.iter().map(|r| r.dispatches).collect();
    assert_eq!(dispatches, vec![2, 1, 3]);
    assert!(report
        .processes
        .iter()
        .all(|r| r.state == ProcessState::Terminated && r.progress == r.total_work));
    assert_eq!(report.idle_passes, 0);
    assert_eq!(report.io_events, 0);
}

#[test]
fn no_blocking_needs_ceil_total_over_quantum_dispatches() {
    let workloads = [10000, 5000, 7000, 3000, 3000, 8000, 2000, 5000, 4000, 10000];
    for quantum in [1, 7, 999, 1000, 1001, 20_000] {
        let mut cfg = config(quantum);
        cfg.trace_capacity = 0;
        let mut sched = Scheduler::new(cfg, &workloads, FixedEvents::never_blocks(), NullRecorder);
        let report = sched.run();
        assert_eq!(report.termination, Termination::AllTerminated);

        for (row, total) in report.processes.iter().zip(workloads) {
            assert_eq!(row.dispatches as u64, total.div_ceil(quantum), "quantum {quantum}");
        }
    }
}

#[test]
fn always_wake_leaves_nothing_blocked_past_one_pass() {
    let events = AlwaysWake {
        rng: SimRng::new(31337),
        p_io: 0.05,
    };
    let mut sched = Scheduler::new(config(200), &[3000, 1500, 2200, 900], events, NullRecorder);

    loop {
        let outcome = sched.step();
        match outcome {
            PassOutcome::Finished => break,
            PassOutcome::Idle => panic!("always-wake sweep cannot leave the ready queue empty"),
            PassOutcome::Dispatched { pid, next, .. } => {
                // Only the process that just ran may be blocked.
                if next == ProcessState::Blocked {
                    assert_eq!(sched.blocked(), &[pid]);
                } else {
                    assert!(sched.blocked().is_empty());
                }
            }
        }
    }
    assert!(sched.processes().iter().all(|p| p.is_complete()));
}

#[test]
fn all_blocked_passes_idle_until_a_wakeup() {
    // Block every dispatch on its first cycle; unblock only every 4th draw.
    struct EveryFourth {
        draws: u64,
    }
    impl EventSource for EveryFourth {
        fn draw_blocking_event(&mut self) -> bool {
            true
        }
        fn draw_unblock_event(&mut self) -> bool {
            self.draws += 1;
            self.draws % 4 == 0
        }
    }

    let mut sched = Scheduler::new(config(50), &[3, 3], EveryFourth { draws: 0 }, NullRecorder);
    let report = sched.run();
    assert_eq!(report.termination, Termination::AllTerminated);
    assert!(report.idle_passes > 0);
    assert_eq!(report.cycles, 6);
    // Each process blocks after cycles 1 and 2; cycle 3 finishes.
    for row in &report.processes {
        assert_eq!(row.io_events, 2);
        assert_eq!(row.dispatches, 3);
    }
}

#[test]
fn terminated_processes_are_never_dispatched_again() {
    let mut sched = Scheduler::new(
        config(100),
        &[50, 400],
        FixedEvents::never_blocks(),
        NullRecorder,
    );
    sched.run();

    let p0 = Pid::from_u32(0);
    let dispatches_of_p0 = sched
        .trace()
        .iter()
        .filter(|ev| matches!(ev, TraceEvent::Dispatch { pid, .. } if *pid == p0))
        .count();
    assert_eq!(dispatches_of_p0, 1);
    assert_eq!(sched.step(), PassOutcome::Finished);
}
