use crate::runtime::builder::BuildError;
use crate::runtime::context::{self, Handle};
use crate::runtime::executor::worker::Worker;

use std::thread::{self, JoinHandle};

/// Owner of the worker threads.
///
/// Workers share the scheduler state through the runtime [`Handle`]; the
/// executor only starts them, signals shutdown and joins them.
pub(crate) struct Executor {
    /// Runtime handle installed on every worker.
    handle: Handle,

    /// Join handles for worker threads.
    threads: Vec<JoinHandle<()>>,
}

impl Executor {
    /// Starts `workers` threads named `{thread_name}-{id}`.
    ///
    /// If a thread fails to start, the ones already running are stopped and
    /// joined before the error is returned.
    pub(crate) fn start(handle: Handle, workers: usize, thread_name: &str) -> Result<Self, BuildError> {
        let mut executor = Self {
            handle,
            threads: Vec::with_capacity(workers),
        };

        for id in 0..workers {
            let name = format!("{thread_name}-{id}");
            let handle = executor.handle.clone();
            let worker = Worker::new(id, handle.shared.clone());

            let spawned = thread::Builder::new()
                .name(name.clone())
                .spawn(move || context::enter_worker(handle, id, || worker.run()));

            match spawned {
                Ok(thread) => executor.threads.push(thread),
                Err(source) => {
                    executor.shutdown();
                    return Err(BuildError::Spawn { name, source });
                }
            }
        }

        Ok(executor)
    }

    /// Signals all workers to stop, waits for them, then abandons whatever
    /// was still pending.
    ///
    /// Idempotent.
    pub(crate) fn shutdown(&mut self) {
        self.handle.shared.injector.shutdown();

        for thread in self.threads.drain(..) {
            let _ = thread.join();
        }

        self.handle.shared.abandon_all();
    }
}
