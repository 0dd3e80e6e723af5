//! Asynchronous task primitives.
//!
//! A task is a spawned future plus the bookkeeping the executor needs to
//! poll it: a lifecycle state, a waker that re-queues it, and a slot for its
//! output. Tasks are created with [`spawn`] (or
//! [`Runtime::spawn`](crate::Runtime::spawn)) and observed through a
//! [`JoinHandle`].

mod core;
mod error;
mod handle;
mod state;
mod waker;

pub(crate) use self::core::{Runnable, Task};

pub use self::core::spawn;
pub use error::JoinError;
pub use handle::JoinHandle;
