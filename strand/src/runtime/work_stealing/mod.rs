//! Run queues of the scheduler.
//!
//! - [`injector`]: the global queue that receives woken tasks and tasks
//!   spawned from outside the worker pool, and parks idle workers,
//! - [`queue`]: per-worker local queues for tasks spawned on a worker,
//!   which idle workers may steal from.

pub(crate) mod injector;
pub(crate) mod queue;
