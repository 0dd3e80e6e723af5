use super::Stream;

use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by [`StreamExt::map`](super::StreamExt::map).
#[must_use = "streams do nothing unless polled"]
pub struct Map<S, F> {
    stream: Pin<Box<S>>,
    f: F,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(stream: S, f: F) -> Self {
        Self {
            stream: Box::pin(stream),
            f,
        }
    }
}

// The closure is never pinned.
impl<S, F> Unpin for Map<S, F> {}

impl<S, F, T> Stream for Map<S, F>
where
    S: Stream,
    F: FnMut(S::Item) -> T,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.get_mut();

        match this.stream.as_mut().poll_next(cx) {
            Poll::Ready(item) => Poll::Ready(item.map(&mut this.f)),
            Poll::Pending => Poll::Pending,
        }
    }
}
