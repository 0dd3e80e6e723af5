//! Timers.
//!
//! - [`sleep`] suspends a task until a deadline has passed,
//! - [`timeout`] bounds how long a future may take.
//!
//! Deadlines are tracked by a timer driver thread owned by the runtime,
//! which wakes sleeping tasks in deadline order.

mod entry;
mod sleep;
mod timeout;

pub(crate) mod driver;

#[doc(inline)]
pub use sleep::{Sleep, sleep};

#[doc(inline)]
pub use timeout::{Elapsed, Timeout, timeout};
