use super::Stream;

use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by [`StreamExt::take`](super::StreamExt::take).
#[must_use = "streams do nothing unless polled"]
pub struct Take<S> {
    stream: Pin<Box<S>>,
    remaining: usize,
}

impl<S> Take<S> {
    pub(crate) fn new(stream: S, n: usize) -> Self {
        Self {
            stream: Box::pin(stream),
            remaining: n,
        }
    }
}

impl<S: Stream> Stream for Take<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.get_mut();

        if this.remaining == 0 {
            return Poll::Ready(None);
        }

        let item = match this.stream.as_mut().poll_next(cx) {
            Poll::Ready(item) => item,
            Poll::Pending => return Poll::Pending,
        };

        match item {
            Some(_) => this.remaining -= 1,
            None => this.remaining = 0,
        }

        Poll::Ready(item)
    }
}
