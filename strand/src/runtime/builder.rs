use super::core::Runtime;

use thiserror::Error;

/// Error returned by [`RuntimeBuilder::build`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// A worker or timer thread could not be started.
    #[error("failed to spawn runtime thread `{name}`")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Builder for configuring and creating a [`Runtime`].
///
/// By default the runtime runs every task on a single worker thread, which
/// is the cooperative model most code is written against. More workers only
/// add throughput; they never change the ordering guarantees of
/// [`join`](crate::future::join).
///
/// # Examples
///
/// ```rust,ignore
/// let runtime = RuntimeBuilder::new()
///     .worker_threads(4)
///     .thread_name("app")
///     .build()?;
/// ```
pub struct RuntimeBuilder {
    /// Number of worker threads in the executor.
    worker_threads: usize,

    /// Prefix of the worker thread names.
    thread_name: String,
}

impl RuntimeBuilder {
    /// Creates a builder with one worker thread named `strand-worker-0`.
    pub fn new() -> Self {
        Self {
            worker_threads: 1,
            thread_name: String::from("strand"),
        }
    }

    /// Sets the number of worker threads used by the runtime.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn worker_threads(mut self, n: usize) -> Self {
        assert!(n > 0, "worker_threads must be > 0");

        self.worker_threads = n;
        self
    }

    /// Sets the prefix used to name runtime threads.
    ///
    /// Workers are named `{name}-worker-{id}` and the timer thread
    /// `{name}-timer`.
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Builds the runtime, starting the timer driver and the workers.
    pub fn build(self) -> Result<Runtime, BuildError> {
        Runtime::new(self.worker_threads, &self.thread_name)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
