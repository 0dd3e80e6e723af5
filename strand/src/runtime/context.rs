use crate::runtime::executor::Shared;
use crate::time::driver::TimerHandle;

use std::cell::{Cell, RefCell};
use std::sync::Arc;

/// Everything a future needs to reach the runtime it is polled on.
///
/// A `Handle` is installed in thread-local storage for the lifetime of each
/// worker thread. It is never installed on threads the runtime does not own,
/// so there is no process-wide "current runtime".
#[derive(Clone)]
pub(crate) struct Handle {
    /// Scheduler state shared by all workers of the runtime.
    pub(crate) shared: Arc<Shared>,

    /// Sender side of the timer driver's command channel.
    pub(crate) timer: TimerHandle,
}

thread_local! {
    /// Handle of the runtime owning the current thread, if any.
    static CURRENT: RefCell<Option<Handle>> = const { RefCell::new(None) };

    /// Index of the current worker inside its runtime.
    static CURRENT_WORKER_ID: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Runs `f` with `handle` installed as the current runtime and `id` as the
/// current worker index. The previous context is restored afterwards.
pub(crate) fn enter_worker<R>(handle: Handle, id: usize, f: impl FnOnce() -> R) -> R {
    let prev_handle = CURRENT.with(|cell| cell.replace(Some(handle)));
    let prev_id = CURRENT_WORKER_ID.with(|cell| cell.replace(Some(id)));

    let out = f();

    CURRENT_WORKER_ID.with(|cell| cell.set(prev_id));
    CURRENT.with(|cell| cell.replace(prev_handle));

    out
}

/// Calls `f` with the current runtime handle.
///
/// Returns `None` when the calling thread is not a runtime worker.
pub(crate) fn with_current<R>(f: impl FnOnce(&Handle) -> R) -> Option<R> {
    CURRENT.with(|cell| cell.borrow().as_ref().map(f))
}

/// Returns the worker index of the calling thread if it belongs to the
/// runtime owning `shared`.
pub(crate) fn worker_id_for(shared: &Arc<Shared>) -> Option<usize> {
    let same_runtime = CURRENT.with(|cell| {
        cell.borrow()
            .as_ref()
            .is_some_and(|handle| Arc::ptr_eq(&handle.shared, shared))
    });

    if same_runtime {
        CURRENT_WORKER_ID.with(Cell::get)
    } else {
        None
    }
}

/// Returns `true` if the calling thread is a worker of any runtime.
pub(crate) fn is_worker() -> bool {
    CURRENT_WORKER_ID.with(Cell::get).is_some()
}
