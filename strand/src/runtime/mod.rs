//! Core runtime components.
//!
//! This module contains the building blocks of the runtime: task
//! representation, the worker pool that polls tasks, the run queues that
//! feed it, and the thread-local context that lets nested futures find the
//! runtime they run on.
//!
//! Most users interact with [`RuntimeBuilder`](builder::RuntimeBuilder),
//! [`Runtime`](core::Runtime) and [`task::spawn`] rather than with the
//! pieces in here directly.

mod executor;
mod park;
mod work_stealing;

pub(crate) mod builder;
pub(crate) mod context;
pub(crate) mod core;
pub(crate) mod yield_now;

pub mod task;
