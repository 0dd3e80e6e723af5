//! Combinators over futures.
//!
//! - [`join`], [`join3`] and [`join_all`] wait for every input and return
//!   the outputs in input order,
//! - [`race`] returns whichever of two futures finishes first.
//!
//! All of them run their inputs concurrently inside a single task: on each
//! poll, every unfinished input is polled once, in the order it was given.
//! The resulting interleaving is deterministic, unlike tasks spawned onto
//! separate workers.

mod join;
mod join_all;
mod race;

pub(crate) mod maybe_done;

pub use join::{Join, Join3, join, join3};
pub use join_all::{JoinAll, join_all};
pub use race::{Either, Race, race};
