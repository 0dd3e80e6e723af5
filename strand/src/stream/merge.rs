use super::Stream;

use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream returned by [`StreamExt::merge`](super::StreamExt::merge).
#[must_use = "streams do nothing unless polled"]
pub struct Merge<A, B> {
    /// `None` once the stream ended.
    left: Option<Pin<Box<A>>>,
    right: Option<Pin<Box<B>>>,

    /// Which side is polled first on the next poll.
    left_first: bool,
}

impl<A, B> Merge<A, B> {
    pub(crate) fn new(left: A, right: B) -> Self {
        Self {
            left: Some(Box::pin(left)),
            right: Some(Box::pin(right)),
            left_first: true,
        }
    }
}

/// Polls one side, forgetting it once it ends.
fn poll_side<S: Stream>(
    side: &mut Option<Pin<Box<S>>>,
    cx: &mut Context<'_>,
) -> Poll<Option<S::Item>> {
    let Some(stream) = side else {
        return Poll::Ready(None);
    };

    let poll = stream.as_mut().poll_next(cx);
    if let Poll::Ready(None) = poll {
        *side = None;
    }

    poll
}

impl<A, B> Stream for Merge<A, B>
where
    A: Stream,
    B: Stream<Item = A::Item>,
{
    type Item = A::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<A::Item>> {
        let this = self.get_mut();

        let left_first = this.left_first;
        this.left_first = !left_first;

        let (first, second) = if left_first {
            let first = poll_side(&mut this.left, cx);
            if let Poll::Ready(Some(item)) = first {
                return Poll::Ready(Some(item));
            }
            (first, poll_side(&mut this.right, cx))
        } else {
            let first = poll_side(&mut this.right, cx);
            if let Poll::Ready(Some(item)) = first {
                return Poll::Ready(Some(item));
            }
            (first, poll_side(&mut this.left, cx))
        };

        match (first, second) {
            (_, Poll::Ready(Some(item))) => Poll::Ready(Some(item)),
            (Poll::Ready(None), Poll::Ready(None)) => Poll::Ready(None),
            _ => Poll::Pending,
        }
    }
}
