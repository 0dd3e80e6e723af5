//! Message passing between tasks.
//!
//! Channels are the way tasks share data in strand: a producer moves values
//! into a [`Sender`], a consumer takes them out of the [`Receiver`] in the
//! order they were sent. Nothing blocks the underlying thread; a receive on
//! an empty channel suspends only the receiving task.

mod mpsc;

pub use mpsc::{Receiver, Recv, SendError, Sender, TryRecvError, channel};
