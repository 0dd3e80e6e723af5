use super::Stream;
use crate::time::{Elapsed, Sleep, sleep};

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

/// Stream returned by [`StreamExt::timeout`](super::StreamExt::timeout).
#[must_use = "streams do nothing unless polled"]
pub struct Timeout<S> {
    stream: Pin<Box<S>>,
    duration: Duration,

    /// Deadline for the item currently awaited, started on the first poll
    /// that finds no item.
    deadline: Option<Sleep>,
}

impl<S> Timeout<S> {
    pub(crate) fn new(stream: S, duration: Duration) -> Self {
        Self {
            stream: Box::pin(stream),
            duration,
            deadline: None,
        }
    }
}

impl<S: Stream> Stream for Timeout<S> {
    type Item = Result<S::Item, Elapsed>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Poll::Ready(item) = this.stream.as_mut().poll_next(cx) {
            this.deadline = None;
            return Poll::Ready(item.map(Ok));
        }

        let deadline = this.deadline.get_or_insert_with(|| sleep(this.duration));

        match Pin::new(deadline).poll(cx) {
            Poll::Ready(()) => {
                this.deadline = None;
                Poll::Ready(Some(Err(Elapsed::new(this.duration))))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
