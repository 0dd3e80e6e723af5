//! # strand
//!
//! **strand** is a small cooperative async runtime. Tasks are futures
//! scheduled by library code instead of the operating system: each one runs
//! until it reaches an await point that cannot make progress, then hands
//! control back to the executor until whatever it waits on wakes it.
//!
//! The runtime provides:
//!
//! - an **executor** driving tasks on one worker thread by default (more
//!   are available through [`RuntimeBuilder::worker_threads`]),
//! - **join combinators** ([`future::join`], [`future::join_all`], [`join!`])
//!   that interleave futures deterministically within a single task,
//! - **channels** ([`sync::channel`]) for passing messages between tasks,
//! - **timers** ([`time::sleep`], [`time::timeout`]) driven by a dedicated
//!   timer thread,
//! - **streams** ([`stream::StreamExt`]) with time-aware adapters,
//! - **attribute macros** `#[strand::main]` and `#[strand::test]`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use strand::future::join;
//! use strand::time::sleep;
//!
//! #[strand::main]
//! async fn main() {
//!     let first = async {
//!         for i in 1..=5 {
//!             println!("hi number {i} from the first task!");
//!             sleep(Duration::from_millis(500)).await;
//!         }
//!     };
//!
//!     let second = async {
//!         for i in 1..=5 {
//!             println!("hi number {i} from the second task!");
//!             sleep(Duration::from_millis(500)).await;
//!         }
//!     };
//!
//!     join(first, second).await;
//! }
//! ```
//!
//! ## Modules
//!
//! - [`task`]: spawning tasks and awaiting their results
//! - [`future`]: join and race combinators
//! - [`stream`]: streams and stream adapters
//! - [`sync`]: channels
//! - [`time`]: sleep and timeout

extern crate self as strand;

mod runtime;
mod utils;

pub mod future;
pub mod stream;
pub mod sync;
pub mod time;

pub use runtime::builder::{BuildError, RuntimeBuilder};
pub use runtime::core::Runtime;
pub use runtime::task;
pub use runtime::yield_now::yield_now;

pub use strand_macros::{join, main, test};

#[doc(hidden)]
pub mod __private {
    pub use crate::future::maybe_done::MaybeDone;
}
