use super::entry::{TimerEntry, TimerShared};
use crate::runtime::builder::BuildError;

use std::collections::BinaryHeap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::task::Waker;
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Messages sent to the timer driver thread.
pub(crate) enum Command {
    /// Fire `shared` once `deadline` has passed.
    Register {
        deadline: Instant,
        shared: Arc<TimerShared>,
    },
    Shutdown,
}

/// Cancelled timers are purged from the heap once there are at least this
/// many of them and they make up half of it.
const PURGE_THRESHOLD: usize = 64;

/// A handle used to register timers with the driver thread.
#[derive(Clone)]
pub(crate) struct TimerHandle {
    sender: Sender<Command>,

    /// Cancellation counter of the driver this handle feeds.
    pending_cancels: Arc<AtomicUsize>,
}

impl TimerHandle {
    /// Creates a timer entry tracked by this handle's driver.
    pub(crate) fn entry(&self, waker: Waker) -> Arc<TimerShared> {
        Arc::new(TimerShared::new(waker, self.pending_cancels.clone()))
    }

    /// Registers a timer. Returns `false` if the driver has stopped.
    pub(crate) fn register(&self, deadline: Instant, shared: Arc<TimerShared>) -> bool {
        self.sender
            .send(Command::Register { deadline, shared })
            .is_ok()
    }
}

/// The timer driver.
///
/// Runs on a dedicated thread, keeps pending timers in a min-heap and
/// sleeps on its command channel until the earliest deadline. Expired
/// timers are popped and fired exactly once, in deadline order.
struct Driver {
    /// Channel receiving commands from sleep futures and the runtime.
    receiver: Receiver<Command>,

    /// Min-heap of pending timers.
    timers: BinaryHeap<TimerEntry>,

    /// Sequence number given to the next registered timer.
    next_seq: u64,

    /// Cancelled timers not yet removed from `timers`.
    pending_cancels: Arc<AtomicUsize>,
}

impl Driver {
    fn new(receiver: Receiver<Command>, pending_cancels: Arc<AtomicUsize>) -> Self {
        Self {
            receiver,
            timers: BinaryHeap::new(),
            next_seq: 0,
            pending_cancels,
        }
    }

    /// Main driver loop.
    ///
    /// 1. Fire every timer whose deadline has passed
    /// 2. Wait for a command, at most until the next deadline
    /// 3. Apply the command
    fn run(mut self) {
        loop {
            self.fire_expired(Instant::now());

            let command = match self.timers.peek() {
                Some(next) => {
                    let wait = next.deadline.saturating_duration_since(Instant::now());

                    match self.receiver.recv_timeout(wait) {
                        Ok(command) => command,
                        Err(RecvTimeoutError::Timeout) => continue,
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                None => match self.receiver.recv() {
                    Ok(command) => command,
                    Err(_) => break,
                },
            };

            match command {
                Command::Register { deadline, shared } => self.insert(deadline, shared),
                Command::Shutdown => break,
            }
        }

        log::trace!(
            "timer driver stopped with {} pending timer(s)",
            self.timers.len()
        );
    }

    fn insert(&mut self, deadline: Instant, shared: Arc<TimerShared>) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.timers.push(TimerEntry {
            deadline,
            seq,
            shared,
        });
    }

    /// Drops cancelled timers from the heap once they dominate it, so that
    /// long timeouts that keep being cancelled do not accumulate.
    fn purge_cancelled(&mut self) {
        let cancelled = self.pending_cancels.load(Ordering::Relaxed);
        if cancelled < PURGE_THRESHOLD || cancelled * 2 < self.timers.len() {
            return;
        }

        self.pending_cancels.store(0, Ordering::Relaxed);

        let before = self.timers.len();
        self.timers.retain(|entry| !entry.shared.is_cancelled());

        log::trace!(
            "purged {} cancelled timer(s)",
            before - self.timers.len()
        );
    }

    /// Pops and fires every timer with a deadline at or before `now`.
    ///
    /// Returns the number of timers that actually woke a task.
    fn fire_expired(&mut self, now: Instant) -> usize {
        self.purge_cancelled();

        let mut fired = 0;

        while self.timers.peek().is_some_and(|entry| entry.deadline <= now) {
            let Some(entry) = self.timers.pop() else {
                break;
            };

            if entry.shared.fire() {
                log::trace!("timer {} fired", entry.seq);
                fired += 1;
            } else {
                let _ = self.pending_cancels.fetch_update(
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                    |n| n.checked_sub(1),
                );
            }
        }

        fired
    }
}

/// Owner of the timer driver thread.
///
/// Dropping it (or calling [`shutdown`](Self::shutdown)) stops and joins
/// the thread; pending timers are discarded.
pub(crate) struct TimerDriver {
    handle: TimerHandle,
    thread: Option<JoinHandle<()>>,
}

impl TimerDriver {
    /// Starts the driver thread under the given name.
    pub(crate) fn start(name: &str) -> Result<Self, BuildError> {
        let (sender, receiver) = channel();
        let pending_cancels = Arc::new(AtomicUsize::new(0));

        let driver = Driver::new(receiver, pending_cancels.clone());
        let thread = thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || driver.run())
            .map_err(|source| BuildError::Spawn {
                name: name.to_owned(),
                source,
            })?;

        Ok(Self {
            handle: TimerHandle {
                sender,
                pending_cancels,
            },
            thread: Some(thread),
        })
    }

    pub(crate) fn handle(&self) -> TimerHandle {
        self.handle.clone()
    }

    /// Stops the driver thread and waits for it. Idempotent.
    pub(crate) fn shutdown(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = self.handle.sender.send(Command::Shutdown);
            let _ = thread.join();
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.shutdown();
    }
}
