use parking_lot::Mutex;

use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{self, AtomicBool, AtomicUsize};
use std::task::Waker;
use std::time::Instant;

/// State shared between a [`Sleep`](super::Sleep) and the timer driver.
pub(crate) struct TimerShared {
    /// Whether the driver fired the timer, and who to wake when it does.
    state: Mutex<TimerState>,

    /// Set when the sleep is dropped or completes on its own; the driver
    /// then discards the entry without waking anyone.
    cancelled: AtomicBool,

    /// Number of cancelled entries still sitting in the driver's heap,
    /// shared with the driver.
    pending_cancels: Arc<AtomicUsize>,
}

struct TimerState {
    fired: bool,
    waker: Option<Waker>,
}

impl TimerShared {
    pub(crate) fn new(waker: Waker, pending_cancels: Arc<AtomicUsize>) -> Self {
        Self {
            state: Mutex::new(TimerState {
                fired: false,
                waker: Some(waker),
            }),
            cancelled: AtomicBool::new(false),
            pending_cancels,
        }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(atomic::Ordering::Acquire)
    }

    /// Marks the timer as fired and wakes the registered waker.
    ///
    /// Returns `false` if the timer was cancelled.
    pub(crate) fn fire(&self) -> bool {
        if self.cancelled.load(atomic::Ordering::Acquire) {
            return false;
        }

        let waker = {
            let mut state = self.state.lock();
            state.fired = true;
            state.waker.take()
        };

        if let Some(waker) = waker {
            waker.wake();
        }

        true
    }

    /// Returns `true` if the timer has fired; otherwise stores `waker` so
    /// the next firing wakes the task that polled last.
    pub(crate) fn poll_fired(&self, waker: &Waker) -> bool {
        let mut state = self.state.lock();

        if state.fired {
            return true;
        }

        match &state.waker {
            Some(current) if current.will_wake(waker) => {}
            _ => state.waker = Some(waker.clone()),
        }

        false
    }

    /// Cancels the timer and drops the stored waker.
    ///
    /// A timer that has not fired yet is still in the driver's heap and is
    /// counted so the driver can purge it before its deadline.
    pub(crate) fn cancel(&self) {
        if self.cancelled.swap(true, atomic::Ordering::AcqRel) {
            return;
        }

        let mut state = self.state.lock();
        state.waker = None;

        if !state.fired {
            self.pending_cancels.fetch_add(1, atomic::Ordering::Relaxed);
        }
    }
}

/// An entry in the driver's timer heap.
///
/// Entries are ordered by deadline, then by registration order, so timers
/// with equal deadlines fire in the order they were set.
pub(crate) struct TimerEntry {
    /// The time at which the timer should fire.
    pub(crate) deadline: Instant,

    /// Registration sequence number.
    pub(crate) seq: u64,

    pub(crate) shared: Arc<TimerShared>,
}

impl Eq for TimerEntry {}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Ord for TimerEntry {
    /// Reversed so that a `BinaryHeap<TimerEntry>` pops the earliest
    /// deadline first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
