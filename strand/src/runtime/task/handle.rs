use super::{JoinError, Task};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::task::{Context, Poll};

use super::state::COMPLETED;

/// A handle to a spawned task.
///
/// A `JoinHandle` only retrieves the task's result: awaiting it yields
/// `Ok(output)` once the task completes, or a [`JoinError`] if the task
/// panicked or was abandoned at shutdown.
///
/// Dropping the `JoinHandle` does **not** stop the task; it only discards
/// the ability to observe its result.
pub struct JoinHandle<T> {
    /// Shared reference to the underlying task.
    task: Arc<Task<T>>,
}

impl<T> JoinHandle<T> {
    pub(crate) fn new(task: Arc<Task<T>>) -> Self {
        Self { task }
    }

    /// Returns `true` once the task has finished.
    pub fn is_finished(&self) -> bool {
        self.task.state.load(Ordering::Acquire) == COMPLETED
    }
}

impl<T: Send + 'static> Future for JoinHandle<T> {
    type Output = Result<T, JoinError>;

    /// The waker is registered **before** re-checking the task state to
    /// avoid missing a completion that races with this poll.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(output) = self.task.take_output() {
            return Poll::Ready(output);
        }

        *self.task.join_waker.lock() = Some(cx.waker().clone());

        match self.task.take_output() {
            Some(output) => Poll::Ready(output),
            None => Poll::Pending,
        }
    }
}
