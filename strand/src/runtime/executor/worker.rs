use crate::runtime::executor::Shared;
use crate::runtime::task::Runnable;

use std::sync::Arc;
use std::time::Duration;

/// How often the global queue is checked before the local one, so woken
/// tasks cannot be starved by a worker that keeps spawning locally.
const GLOBAL_POLL_INTERVAL: u32 = 31;

/// Upper bound on how long an idle worker sleeps before looking again.
const PARK_TIMEOUT: Duration = Duration::from_millis(10);

/// A worker thread in the executor.
///
/// The lookup order for the next task is:
/// 1. Pop from the local queue
/// 2. Take from the global injector
/// 3. Steal from other workers
/// 4. Park if no work is available
pub(crate) struct Worker {
    /// Index of the worker and of its local queue.
    id: usize,

    /// Scheduler state of the runtime.
    shared: Arc<Shared>,

    /// Number of tasks taken so far.
    tick: u32,
}

impl Worker {
    pub(crate) fn new(id: usize, shared: Arc<Shared>) -> Self {
        Self { id, shared, tick: 0 }
    }

    /// Runs the worker loop until shutdown.
    ///
    /// The caller installs the runtime context for the whole thread.
    pub(crate) fn run(mut self) {
        log::debug!("worker {} started", self.id);

        while !self.shared.is_shutdown() {
            match self.next_task() {
                Some(task) => task.run(),
                None => self.shared.injector.park(PARK_TIMEOUT),
            }
        }

        log::debug!("worker {} stopped", self.id);
    }

    fn next_task(&mut self) -> Option<Arc<dyn Runnable>> {
        self.tick = self.tick.wrapping_add(1);

        let local = &self.shared.locals[self.id];
        let injector = &self.shared.injector;

        let next = if self.tick % GLOBAL_POLL_INTERVAL == 0 {
            injector.steal().or_else(|| local.pop())
        } else {
            local.pop().or_else(|| injector.steal())
        };

        next.or_else(|| self.try_steal())
    }

    /// Attempts to steal a task from another worker's local queue.
    ///
    /// Victims are visited round-robin starting after this worker.
    fn try_steal(&self) -> Option<Arc<dyn Runnable>> {
        let len = self.shared.locals.len();

        (1..len)
            .map(|offset| (self.id + offset) % len)
            .find_map(|victim| self.shared.locals[victim].steal())
    }
}
