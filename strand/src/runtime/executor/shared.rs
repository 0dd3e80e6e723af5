use crate::runtime::context;
use crate::runtime::task::{JoinHandle, Runnable, Task};
use crate::runtime::work_stealing::injector::Injector;
use crate::runtime::work_stealing::queue::LocalQueue;
use crate::utils::Slab;

use parking_lot::Mutex;

use std::future::Future;
use std::sync::Arc;

/// Scheduler state shared by all workers and all tasks of one runtime.
///
/// Owns the run queues and the owned-task table. Every live task has an
/// entry in the table until it completes, which is what lets the runtime
/// drop pending futures on shutdown.
pub(crate) struct Shared {
    /// Global queue for woken tasks and foreign spawns.
    pub(crate) injector: Injector,

    /// One local queue per worker, indexed by worker id.
    pub(crate) locals: Vec<LocalQueue>,

    /// Tasks spawned on this runtime that have not completed yet.
    owned: Mutex<Slab<Arc<dyn Runnable>>>,
}

impl Shared {
    pub(crate) fn new(workers: usize) -> Self {
        Self {
            injector: Injector::new(),
            locals: (0..workers).map(|_| LocalQueue::new()).collect(),
            owned: Mutex::new(Slab::with_capacity(64)),
        }
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.injector.is_shutdown()
    }

    /// Creates a task for `future` and queues it.
    ///
    /// Spawning from one of this runtime's workers uses that worker's local
    /// queue; anything else goes through the injector. A task spawned after
    /// shutdown is abandoned immediately.
    pub(crate) fn spawn<F, T>(self: &Arc<Self>, future: F) -> JoinHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let task = Arc::new(Task::new(future, self.clone()));

        if self.is_shutdown() {
            task.abandon();
            return JoinHandle::new(task);
        }

        let key = self.owned.lock().insert(task.clone());
        task.set_key(key);

        log::trace!("spawned task {key}");

        match context::worker_id_for(self) {
            Some(id) => {
                self.locals[id].push(task.clone());
                self.injector.notify();
            }
            None => self.injector.push(task.clone()),
        }

        JoinHandle::new(task)
    }

    /// Re-queues a woken task.
    pub(crate) fn schedule(&self, task: Arc<dyn Runnable>) {
        self.injector.push(task);
    }

    /// Forgets a completed task.
    pub(crate) fn release(&self, key: usize) {
        let task = self.owned.lock().remove(key);

        // Dropped outside the lock.
        drop(task);
    }

    /// Number of spawned tasks that have not completed.
    pub(crate) fn live_tasks(&self) -> usize {
        self.owned.lock().len()
    }

    /// Clears the run queues and drops the future of every task that has not
    /// completed.
    ///
    /// Must only be called after the workers have been joined.
    pub(crate) fn abandon_all(&self) {
        drop(self.injector.drain());
        for local in &self.locals {
            drop(local.drain());
        }

        let tasks = self.owned.lock().drain();
        if !tasks.is_empty() {
            log::debug!("abandoning {} unfinished tasks", tasks.len());
        }

        for task in tasks {
            task.abandon();
        }
    }
}
