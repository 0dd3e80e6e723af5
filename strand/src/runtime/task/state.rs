/// Task is suspended and not scheduled.
///
/// The task is waiting on some resource; only its waker can move it back
/// to `QUEUED`.
pub(crate) const IDLE: usize = 0;

/// Task is queued for execution.
///
/// The task sits in a run queue and will be polled by a worker.
pub(crate) const QUEUED: usize = 1;

/// Task is currently being polled by a worker.
///
/// At most one worker may observe this state at a time.
pub(crate) const RUNNING: usize = 2;

/// Task has finished, either with a value, a panic, or by being abandoned.
///
/// Its future has been dropped and will never be polled again.
pub(crate) const COMPLETED: usize = 3;

/// Task has been woken while running.
///
/// The worker re-queues it as soon as the current poll returns.
pub(crate) const NOTIFIED: usize = 4;
