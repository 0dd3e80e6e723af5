//! Small data structures used internally by the runtime.
//!
//! [`Slab`] gives tasks a stable, reusable key inside the executor's
//! owned-task table.

mod slab;

pub(crate) use slab::Slab;
