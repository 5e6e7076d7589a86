//! Bounded trace of scheduler events for replay checks and debugging.
//!
//! Events are kept in a fixed-capacity ring; once full, the oldest event is
//! evicted first. A zero-capacity ring records nothing.

use std::collections::VecDeque;

use crate::process::{Pid, ProcessState};

/// Scheduler events, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TraceEvent {
    /// A blocked process won its unblock draw.
    Unblock { pass: u64, pid: Pid },
    /// A ready process was selected to run.
    Dispatch { pass: u64, pid: Pid },
    /// A running process left RUNNING after `cycles` of work.
    Transition {
        pass: u64,
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
        cycles: u64,
        clock: u64,
    },
    /// Nothing was ready; every live process was blocked.
    Idle { pass: u64 },
}

/// Fixed-capacity ring buffer of trace events.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TraceRing {
    cap: usize,
    buf: VecDeque<TraceEvent>,
    evicted: u64,
}

impl TraceRing {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            buf: VecDeque::with_capacity(cap.min(4096)),
            evicted: 0,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Events dropped because the ring was full.
    #[inline(always)]
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    /// Push an event, evicting the oldest if at capacity.
    #[inline]
    pub fn push(&mut self, ev: TraceEvent) {
        if self.cap == 0 {
            return;
        }
        if self.buf.len() == self.cap {
            self.buf.pop_front();
            self.evicted += 1;
        }
        self.buf.push_back(ev);
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceEvent> {
        self.buf.iter()
    }

    /// Snapshot of the retained events in chronological order.
    pub fn dump(&self) -> Vec<TraceEvent> {
        self.buf.iter().cloned().collect()
    }
}
