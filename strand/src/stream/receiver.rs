use super::Stream;
use crate::sync::Receiver;

use std::pin::Pin;
use std::task::{Context, Poll};

/// A [`Receiver`] viewed as a stream.
///
/// Yields messages in send order and ends when the channel closes, exactly
/// like a loop over [`Receiver::recv`].
#[derive(Debug)]
pub struct ReceiverStream<T> {
    receiver: Receiver<T>,
}

impl<T> ReceiverStream<T> {
    pub fn new(receiver: Receiver<T>) -> Self {
        Self { receiver }
    }

    /// Closes the channel from the receiving side. Buffered messages are
    /// still yielded.
    pub fn close(&mut self) {
        self.receiver.close();
    }

    /// Returns the wrapped receiver.
    pub fn into_inner(self) -> Receiver<T> {
        self.receiver
    }
}

impl<T> Stream for ReceiverStream<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

impl<T> From<Receiver<T>> for ReceiverStream<T> {
    fn from(receiver: Receiver<T>) -> Self {
        Self::new(receiver)
    }
}
