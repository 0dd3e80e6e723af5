use crate::runtime::task::Task;

use std::mem;
use std::sync::Arc;
use std::task::{RawWaker, RawWakerVTable, Waker};

/// Returns the `RawWakerVTable` for a task of type `T`.
///
/// # Safety
///
/// All functions in the vtable must uphold the invariants required by
/// [`RawWaker`]: the data pointer always comes from `Arc::into_raw` on an
/// `Arc<Task<T>>`, and every function keeps the strong count balanced.
fn vtable<T: Send + 'static>() -> &'static RawWakerVTable {
    &RawWakerVTable::new(
        clone_raw::<T>,
        wake_raw::<T>,
        wake_by_ref_raw::<T>,
        drop_raw::<T>,
    )
}

/// Creates a [`Waker`] that re-queues `task` when woken.
///
/// The waker owns one strong reference to the task.
pub(crate) fn make_waker<T: Send + 'static>(task: Arc<Task<T>>) -> Waker {
    let raw = RawWaker::new(Arc::into_raw(task) as *const (), vtable::<T>());

    // Safety: the vtable functions treat the pointer as the `Arc<Task<T>>`
    // it was created from.
    unsafe { Waker::from_raw(raw) }
}

/// Clones the raw waker by bumping the task's strong count.
fn clone_raw<T: Send + 'static>(ptr: *const ()) -> RawWaker {
    let arc = unsafe { Arc::<Task<T>>::from_raw(ptr as *const Task<T>) };
    let cloned = arc.clone();
    mem::forget(arc);

    RawWaker::new(Arc::into_raw(cloned) as *const (), vtable::<T>())
}

/// Wakes the task, consuming the waker's reference.
fn wake_raw<T: Send + 'static>(ptr: *const ()) {
    let arc = unsafe { Arc::<Task<T>>::from_raw(ptr as *const Task<T>) };
    arc.wake();
}

/// Wakes the task without consuming the waker's reference.
fn wake_by_ref_raw<T: Send + 'static>(ptr: *const ()) {
    let arc = unsafe { Arc::<Task<T>>::from_raw(ptr as *const Task<T>) };
    arc.clone().wake();
    mem::forget(arc);
}

/// Releases the waker's reference.
fn drop_raw<T: Send + 'static>(ptr: *const ()) {
    drop(unsafe { Arc::<Task<T>>::from_raw(ptr as *const Task<T>) });
}
