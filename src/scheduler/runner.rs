//! Round-robin scheduler over simulated processes.
//!
//! # Pass structure
//!
//! Each call to [`Scheduler::step`] is one scheduler pass:
//! 1. Unblock sweep: every blocked process draws once; winners are appended
//!    to the ready queue in blocked-set order.
//! 2. If nothing is ready but something is blocked, the pass is idle.
//! 3. Otherwise the head of the ready queue is dispatched for one quantum.
//! 4. The run outcome picks the next state and queue (FIFO append).
//! 5. A snapshot of every process goes to the table recorder.
//!
//! # Invariants
//! - At most one process is RUNNING, and only inside `dispatch`.
//! - A pid is in at most one of {ready, blocked}; RUNNING and TERMINATED
//!   pids are in neither.
//! - TERMINATED is never left.
//!
//! The loop ends when both queues are empty. With a non-zero unblock
//! probability every blocked process is eventually retried into the ready
//! queue, so the run terminates; `p_unblock == 0` with `p_io > 0` may not,
//! which is what `max_passes` is for.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::process::{Pid, Process, ProcessState};
use crate::recorder::{Snapshot, TableRecorder};
use crate::sim::clock::SimClock;
use crate::sim::events::EventSource;
use crate::sim::trace::{TraceEvent, TraceRing};

use super::exec::{run_quantum, QuantumRun, RunOutcome};
use super::report::{RunStats, SimReport, Termination};

/// What one scheduler pass did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// A process ran and moved to `next`.
    Dispatched {
        pid: Pid,
        run: QuantumRun,
        next: ProcessState,
    },
    /// Every live process was blocked; nothing ran.
    Idle,
    /// No process is ready or blocked; the simulation is over.
    Finished,
}

/// Owns the process table, the ready queue and the blocked set.
pub struct Scheduler<E, R> {
    cfg: SchedulerConfig,
    processes: Vec<Process>,
    ready: VecDeque<Pid>,
    blocked: Vec<Pid>,
    events: E,
    recorder: R,
    clock: SimClock,
    trace: TraceRing,
    stats: RunStats,
}

impl<E: EventSource, R: TableRecorder> Scheduler<E, R> {
    /// Create one READY process per workload, queued in pid order.
    ///
    /// `cfg` is expected to be validated.
    pub fn new(cfg: SchedulerConfig, workloads: &[u64], events: E, recorder: R) -> Self {
        debug_assert!(cfg.quantum > 0);
        let processes: Vec<Process> = workloads
            .iter()
            .enumerate()
            .map(|(idx, &work)| Process::new(Pid::from_u32(idx as u32), work))
            .collect();
        let ready = processes.iter().map(Process::id).collect();
        let trace = TraceRing::new(cfg.trace_capacity);

        Self {
            cfg,
            processes,
            ready,
            blocked: Vec::new(),
            events,
            recorder,
            clock: SimClock::new(),
            trace,
            stats: RunStats::default(),
        }
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.get(pid.index())
    }

    /// Ready pids, head first.
    pub fn ready_queue(&self) -> &VecDeque<Pid> {
        &self.ready
    }

    pub fn blocked(&self) -> &[Pid] {
        &self.blocked
    }

    pub fn is_finished(&self) -> bool {
        self.ready.is_empty() && self.blocked.is_empty()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn clock(&self) -> SimClock {
        self.clock
    }

    pub fn trace(&self) -> &TraceRing {
        &self.trace
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    /// Run passes until every process terminates or the pass limit hits.
    pub fn run(&mut self) -> SimReport {
        info!(
            processes = self.processes.len(),
            quantum = self.cfg.quantum,
            p_io = self.cfg.p_io,
            p_unblock = self.cfg.p_unblock,
            "simulation started"
        );

        let termination = loop {
            if let Some(limit) = self.cfg.max_passes {
                if self.stats.passes >= limit && !self.is_finished() {
                    warn!(
                        passes = self.stats.passes,
                        "pass limit reached before all processes terminated"
                    );
                    break Termination::PassLimit;
                }
            }
            if self.step() == PassOutcome::Finished {
                break Termination::AllTerminated;
            }
        };

        let report = self.report(termination);
        info!(
            passes = report.passes,
            dispatches = report.dispatches,
            cycles = report.cycles,
            "simulation finished: {}",
            termination
        );
        report
    }

    /// Execute one scheduler pass.
    pub fn step(&mut self) -> PassOutcome {
        if self.is_finished() {
            return PassOutcome::Finished;
        }
        let pass = self.stats.passes;
        self.stats.passes += 1;

        self.unblock_sweep(pass);

        let Some(pid) = self.ready.pop_front() else {
            self.stats.idle_passes += 1;
            self.trace.push(TraceEvent::Idle { pass });
            debug!(pass, blocked = self.blocked.len(), "nothing ready; idle pass");
            return PassOutcome::Idle;
        };

        let (run, next) = self.dispatch(pass, pid);
        self.record(pass);
        PassOutcome::Dispatched { pid, run, next }
    }

    /// Build the report from the current state.
    pub fn report(&self, termination: Termination) -> SimReport {
        SimReport {
            termination,
            passes: self.stats.passes,
            idle_passes: self.stats.idle_passes,
            dispatches: self.stats.dispatches,
            unblocks: self.stats.unblocks,
            cycles: self.clock.now_cycles(),
            io_events: self.processes.iter().map(|p| p.io_events() as u64).sum(),
            record_failures: self.stats.record_failures,
            processes: self.processes.iter().map(Process::row).collect(),
        }
    }

    fn unblock_sweep(&mut self, pass: u64) {
        if self.blocked.is_empty() {
            return;
        }
        let Self {
            blocked,
            ready,
            processes,
            events,
            trace,
            stats,
            ..
        } = self;

        blocked.retain(|&pid| {
            if !events.draw_unblock_event() {
                return true;
            }
            let process = &mut processes[pid.index()];
            process.set_state(ProcessState::Ready);
            process.refresh_cursor();
            ready.push_back(pid);
            stats.unblocks += 1;
            trace.push(TraceEvent::Unblock { pass, pid });
            info!(pid = pid.as_u32(), "BLOCKED -> READY (unblocked): {}", process.row());
            false
        });
        debug!(pass, still_blocked = blocked.len(), "unblock sweep done");
    }

    fn dispatch(&mut self, pass: u64, pid: Pid) -> (QuantumRun, ProcessState) {
        let quantum = self.cfg.quantum;
        let process = &mut self.processes[pid.index()];
        process.set_state(ProcessState::Running);
        process.note_dispatch();
        process.refresh_cursor();
        self.stats.dispatches += 1;
        self.trace.push(TraceEvent::Dispatch { pass, pid });
        debug!(pid = pid.as_u32(), "READY -> RUNNING: {}", process.row());

        let run = run_quantum(process, quantum, &mut self.events);
        self.clock.advance_by(run.cycles);

        let next = match run.outcome {
            RunOutcome::Finished => ProcessState::Terminated,
            RunOutcome::IoRequest => {
                process.note_io_event();
                ProcessState::Blocked
            }
            RunOutcome::QuantumExpired => ProcessState::Ready,
        };
        process.set_state(next);

        match next {
            ProcessState::Ready => {
                self.ready.push_back(pid);
                info!(pid = pid.as_u32(), "RUNNING -> READY (quantum expired): {}", process.row());
            }
            ProcessState::Blocked => {
                self.blocked.push(pid);
                info!(pid = pid.as_u32(), "RUNNING -> BLOCKED (I/O request): {}", process.row());
            }
            ProcessState::Terminated => {
                info!(pid = pid.as_u32(), "RUNNING -> TERMINATED; final: {}", process.row());
            }
            ProcessState::Running => unreachable!("dispatch never leaves a process running"),
        }

        self.trace.push(TraceEvent::Transition {
            pass,
            pid,
            from: ProcessState::Running,
            to: next,
            cycles: run.cycles,
            clock: self.clock.now_cycles(),
        });
        (run, next)
    }

    /// Rows of every process, sorted by pid, stamped with the 0-based `pass`.
    fn snapshot_at(&self, pass: u64) -> Snapshot {
        Snapshot {
            pass,
            clock: self.clock.now_cycles(),
            rows: self.processes.iter().map(Process::row).collect(),
        }
    }

    fn record(&mut self, pass: u64) {
        let snapshot = self.snapshot_at(pass);
        if let Err(err) = self.recorder.record(&snapshot) {
            self.stats.record_failures += 1;
            warn!(pass, error = %err, "process table not recorded; continuing");
        }
    }
}
