use super::context::{self, Handle};
use super::executor::{Executor, Shared};
use super::park;
use super::task::{JoinError, JoinHandle};
use crate::runtime::builder::BuildError;
use crate::time::driver::TimerDriver;

use std::future::Future;
use std::panic;
use std::sync::Arc;

/// The runtime: a timer driver plus a pool of workers polling tasks.
///
/// `Runtime` is the explicit owner of all scheduling state; nothing is
/// global. Futures find the runtime they run on through a thread-local
/// context installed on its worker threads.
///
/// Dropping the runtime stops the workers and the timer driver. Tasks that
/// have not completed by then are abandoned: their futures are dropped and
/// their join handles resolve to [`JoinError::Abandoned`].
pub struct Runtime {
    /// Worker threads.
    executor: Executor,

    /// Timer thread.
    timer: TimerDriver,

    /// Scheduler and timer handles, shared with the workers.
    handle: Handle,
}

impl Runtime {
    pub(crate) fn new(worker_threads: usize, thread_name: &str) -> Result<Self, BuildError> {
        let timer = TimerDriver::start(&format!("{thread_name}-timer"))?;

        let handle = Handle {
            shared: Arc::new(Shared::new(worker_threads)),
            timer: timer.handle(),
        };

        // On error the timer driver is stopped by its own drop.
        let executor = Executor::start(
            handle.clone(),
            worker_threads,
            &format!("{thread_name}-worker"),
        )?;

        log::debug!("runtime started with {worker_threads} worker thread(s)");

        Ok(Self {
            executor,
            timer,
            handle,
        })
    }

    /// Spawns a future onto the runtime.
    ///
    /// The task is queued and this method returns immediately, without
    /// polling the future.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let handle = runtime.spawn(async { 1 + 1 });
    /// assert_eq!(runtime.block_on(handle).unwrap(), 2);
    /// ```
    pub fn spawn<F, T>(&self, future: F) -> JoinHandle<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        self.handle.shared.spawn(future)
    }

    /// Runs a future to completion, blocking the current thread.
    ///
    /// The future is spawned as the root task and the calling thread parks
    /// until it completes. Other tasks spawned meanwhile keep running on the
    /// workers after this returns, but only until the runtime is dropped.
    ///
    /// # Panics
    ///
    /// - Re-raises the panic if the root future panics.
    /// - Panics if called from a runtime worker thread, which would
    ///   deadlock.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let result = runtime.block_on(async { 42 });
    /// assert_eq!(result, 42);
    /// ```
    pub fn block_on<F>(&self, future: F) -> F::Output
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        if context::is_worker() {
            panic!("`block_on` cannot be called from a runtime worker thread");
        }

        match park::wait(self.spawn(future)) {
            Ok(output) => output,
            Err(JoinError::Panicked(payload)) => panic::resume_unwind(payload),
            Err(JoinError::Abandoned) => panic!("runtime shut down before the root task completed"),
        }
    }

    /// Number of spawned tasks that have not completed yet.
    pub fn live_tasks(&self) -> usize {
        self.handle.shared.live_tasks()
    }
}

impl Drop for Runtime {
    /// Shuts down the runtime.
    ///
    /// 1. Stops and joins the workers, then abandons unfinished tasks
    /// 2. Stops and joins the timer driver
    fn drop(&mut self) {
        log::debug!("runtime shutting down");

        self.executor.shutdown();
        self.timer.shutdown();
    }
}
