use crate::runtime::task::Runnable;

use parking_lot::Mutex;

use std::collections::VecDeque;
use std::sync::Arc;

/// A per-worker local task queue.
///
/// The owning worker pops from the front, so tasks spawned on one worker run
/// in spawn order. Other workers steal from the back, taking the most
/// recently spawned work.
pub(crate) struct LocalQueue {
    inner: Mutex<VecDeque<Arc<dyn Runnable>>>,
}

impl LocalQueue {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
        }
    }

    /// Pushes a runnable task onto the back of the queue.
    pub(crate) fn push(&self, task: Arc<dyn Runnable>) {
        self.inner.lock().push_back(task);
    }

    /// Pops the oldest task. Only called by the owning worker.
    pub(crate) fn pop(&self) -> Option<Arc<dyn Runnable>> {
        self.inner.lock().pop_front()
    }

    /// Steals the newest task. Called by other workers.
    pub(crate) fn steal(&self) -> Option<Arc<dyn Runnable>> {
        self.inner.lock().pop_back()
    }

    /// Removes every queued task.
    pub(crate) fn drain(&self) -> Vec<Arc<dyn Runnable>> {
        self.inner.lock().drain(..).collect()
    }
}
