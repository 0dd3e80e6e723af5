//! Task executor implementation.
//!
//! - [`core`]: worker thread lifecycle (start, shutdown, join),
//! - [`shared`]: scheduler state shared by the workers and every task,
//! - [`worker`]: the loop each worker thread runs.

pub(crate) mod core;
pub(crate) mod shared;
pub(crate) mod worker;

pub(crate) use self::core::Executor;
pub(crate) use shared::Shared;
