use super::state::{COMPLETED, IDLE, NOTIFIED, QUEUED, RUNNING};
use super::waker::make_waker;
use super::{JoinError, JoinHandle};
use crate::runtime::context;
use crate::runtime::executor::Shared;

use parking_lot::Mutex;

use std::cell::UnsafeCell;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll, Waker};

/// Key of a task that is not tracked in the owned-task table.
const UNTRACKED: usize = usize::MAX;

/// A runnable unit of work that can be executed by the scheduler.
///
/// The `Runnable` trait erases the output type of a task so that run queues
/// and the owned-task table can hold `Arc<dyn Runnable>`.
pub(crate) trait Runnable: Send + Sync {
    /// Polls the task once. Called by a worker that popped it from a queue.
    fn run(self: Arc<Self>);

    /// Drops the task's future without polling it again.
    ///
    /// Used on runtime shutdown. The join handle observes
    /// [`JoinError::Abandoned`].
    fn abandon(&self);
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A spawned asynchronous task managed by the runtime.
pub(crate) struct Task<T> {
    /// The underlying future, `None` once the task has completed.
    ///
    /// Only accessed by the thread that moved the state to `RUNNING`.
    future: UnsafeCell<Option<BoxFuture<T>>>,

    /// Output of the task, written once before the state becomes
    /// `COMPLETED` and taken by the join handle.
    output: UnsafeCell<Option<Result<T, JoinError>>>,

    /// Lifecycle state, one of the constants in [`super::state`].
    pub(crate) state: AtomicUsize,

    /// Index of this task in the owned-task table.
    key: AtomicUsize,

    /// Scheduler the task is re-queued on when woken.
    shared: Arc<Shared>,

    /// Waker of the join handle awaiting this task, if any.
    pub(crate) join_waker: Mutex<Option<Waker>>,
}

// Safety: the future and output cells are only touched by the thread that
// owns the `RUNNING` state, or by the join handle after `COMPLETED` has been
// published with release ordering.
unsafe impl<T: Send> Send for Task<T> {}
unsafe impl<T: Send> Sync for Task<T> {}

impl<T: Send + 'static> Task<T> {
    /// Creates a new task in the `QUEUED` state.
    pub(crate) fn new<F>(future: F, shared: Arc<Shared>) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            future: UnsafeCell::new(Some(Box::pin(future))),
            output: UnsafeCell::new(None),
            state: AtomicUsize::new(QUEUED),
            key: AtomicUsize::new(UNTRACKED),
            shared,
            join_waker: Mutex::new(None),
        }
    }

    pub(crate) fn set_key(&self, key: usize) {
        self.key.store(key, Ordering::Release);
    }

    /// Polls the task once.
    ///
    /// - `Poll::Pending`: the task goes back to `IDLE`, or straight back to
    ///   the queue if it was woken during the poll.
    /// - `Poll::Ready`: the output is stored and the join handle woken.
    /// - panic: the panic is caught and stored as [`JoinError::Panicked`].
    pub(crate) fn run(self: Arc<Self>) {
        // Transition to RUNNING. This grants exclusive access to the cells.
        if self
            .state
            .compare_exchange(QUEUED, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let waker = make_waker(self.clone());
        let mut cx = Context::from_waker(&waker);

        // Safety: RUNNING guarantees that no other thread touches the future.
        let slot = unsafe { &mut *self.future.get() };
        let Some(future) = slot.as_mut() else {
            self.state.store(COMPLETED, Ordering::Release);
            return;
        };

        let poll = panic::catch_unwind(AssertUnwindSafe(|| future.as_mut().poll(&mut cx)));

        match poll {
            Ok(Poll::Pending) => {
                if self
                    .state
                    .compare_exchange(RUNNING, IDLE, Ordering::AcqRel, Ordering::Acquire)
                    .is_err()
                {
                    // Woken while running: NOTIFIED -> QUEUED.
                    self.state.store(QUEUED, Ordering::Release);
                    self.shared.schedule(self.clone());
                }
            }
            Ok(Poll::Ready(value)) => self.complete(Ok(value)),
            Err(payload) => {
                let error = JoinError::Panicked(payload);
                match error.panic_message() {
                    Some(message) => log::error!("task {} panicked: {message}", self.key()),
                    None => log::error!("task {} panicked", self.key()),
                }
                self.complete(Err(error));
            }
        }
    }

    /// Finishes the task with `output`.
    ///
    /// The caller must own the `RUNNING` state. The future is dropped here,
    /// so every resource the computation owned (a channel sender, a timer)
    /// is released at the moment the task ends.
    fn complete(&self, output: Result<T, JoinError>) {
        // Safety: the caller owns the RUNNING state.
        let future = unsafe { (*self.future.get()).take() };
        drop(future);

        // No longer counted as live once the join handle can observe it.
        self.shared.release(self.key());

        // Safety: as above; the join handle only reads after COMPLETED.
        unsafe {
            *self.output.get() = Some(output);
        }
        self.state.store(COMPLETED, Ordering::Release);

        let waker = self.join_waker.lock().take();
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    /// Takes the output if the task has completed.
    ///
    /// Returns `None` while the task is still pending.
    ///
    /// # Panics
    ///
    /// Panics if the output was already taken.
    pub(crate) fn take_output(&self) -> Option<Result<T, JoinError>> {
        if self.state.load(Ordering::Acquire) != COMPLETED {
            return None;
        }

        // Safety: COMPLETED was published with release ordering after the
        // write, and only the unique join handle reads the cell.
        let output = unsafe { (*self.output.get()).take() };
        Some(output.expect("JoinHandle polled after completion"))
    }

    /// Signals the task to be rescheduled.
    ///
    /// If the task is `IDLE`, it moves to `QUEUED` and is pushed to the
    /// scheduler. If the task is `RUNNING`, it moves to `NOTIFIED` so the
    /// worker re-queues it after the current poll.
    pub(crate) fn wake(self: Arc<Self>) {
        loop {
            match self.state.load(Ordering::Acquire) {
                IDLE => {
                    if self
                        .state
                        .compare_exchange(IDLE, QUEUED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        self.shared.schedule(self.clone());
                        return;
                    }
                }
                RUNNING => {
                    if self
                        .state
                        .compare_exchange(RUNNING, NOTIFIED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        return;
                    }
                }
                // Already queued, notified, or finished.
                _ => return,
            }
        }
    }

    fn key(&self) -> usize {
        self.key.load(Ordering::Acquire)
    }
}

impl<T: Send + 'static> Runnable for Task<T> {
    fn run(self: Arc<Self>) {
        Task::run(self)
    }

    fn abandon(&self) {
        loop {
            let state = self.state.load(Ordering::Acquire);

            // A RUNNING task belongs to a worker; workers are joined before
            // anything is abandoned, so that only happens on misuse.
            if state == COMPLETED || state == RUNNING || state == NOTIFIED {
                return;
            }

            if self
                .state
                .compare_exchange(state, RUNNING, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                break;
            }
        }

        self.complete(Err(JoinError::Abandoned));
    }
}

/// Spawns a future as a task onto the current runtime.
///
/// The task is queued and this function returns immediately; the future is
/// not polled until a worker picks it up. When called from a worker, the
/// task goes to that worker's local queue.
///
/// Dropping the returned [`JoinHandle`] does not stop the task.
///
/// # Panics
///
/// Panics if called outside of a runtime worker thread. Use
/// [`Runtime::spawn`](crate::Runtime::spawn) from other threads.
///
/// # Examples
///
/// ```rust,ignore
/// let handle = strand::task::spawn(async { 6 * 7 });
/// assert_eq!(handle.await.unwrap(), 42);
/// ```
pub fn spawn<F, T>(future: F) -> JoinHandle<T>
where
    T: Send + 'static,
    F: Future<Output = T> + Send + 'static,
{
    let shared = context::with_current(|handle| handle.shared.clone()).unwrap_or_else(|| {
        panic!("`spawn` must be called from within a strand runtime");
    });

    shared.spawn(future)
}
