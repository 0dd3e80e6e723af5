use crate::runtime::task::Runnable;

use parking_lot::{Condvar, Mutex};

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Global task queue of the scheduler.
///
/// The injector receives every task that becomes ready outside of a
/// worker's own spawn path (wake-ups, spawns from foreign threads). It also
/// coordinates worker parking through a condition variable.
pub(crate) struct Injector {
    /// Queue holding ready tasks, oldest first.
    queue: Mutex<VecDeque<Arc<dyn Runnable>>>,

    /// Condition variable used to wake parked workers.
    condvar: Condvar,

    /// Set once the executor is shutting down; pushes are dropped.
    shutdown: AtomicBool,
}

impl Injector {
    pub(crate) fn new() -> Self {
        Injector {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Signals shutdown and wakes all parked workers.
    pub(crate) fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);

        // Taking the lock orders this with a worker about to park.
        let _queue = self.queue.lock();
        self.condvar.notify_all();
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Pushes a ready task and wakes one parked worker.
    ///
    /// Tasks pushed after shutdown are dropped.
    pub(crate) fn push(&self, task: Arc<dyn Runnable>) {
        if self.is_shutdown() {
            return;
        }

        self.queue.lock().push_back(task);
        self.condvar.notify_one();
    }

    /// Wakes one parked worker without queueing anything, so it can look at
    /// the local queues.
    pub(crate) fn notify(&self) {
        self.condvar.notify_one();
    }

    /// Parks the current worker until a task is pushed, shutdown starts, or
    /// `timeout` elapses.
    ///
    /// The timeout bounds how long a worker can miss a task pushed to
    /// another worker's local queue.
    pub(crate) fn park(&self, timeout: Duration) {
        let mut queue = self.queue.lock();

        if self.is_shutdown() || !queue.is_empty() {
            return;
        }

        self.condvar.wait_for(&mut queue, timeout);
    }

    /// Takes the oldest task from the queue.
    pub(crate) fn steal(&self) -> Option<Arc<dyn Runnable>> {
        self.queue.lock().pop_front()
    }

    /// Removes every queued task.
    pub(crate) fn drain(&self) -> Vec<Arc<dyn Runnable>> {
        self.queue.lock().drain(..).collect()
    }
}
