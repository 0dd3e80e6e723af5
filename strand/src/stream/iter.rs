use super::Stream;

use std::pin::Pin;
use std::task::{Context, Poll};

/// Turns an iterator into a stream whose items are always ready.
pub fn iter<I: IntoIterator>(items: I) -> Iter<I::IntoIter> {
    Iter {
        items: items.into_iter(),
    }
}

/// Stream returned by [`iter`].
#[must_use = "streams do nothing unless polled"]
pub struct Iter<I> {
    items: I,
}

impl<I: Iterator + Unpin> Stream for Iter<I> {
    type Item = I::Item;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().items.next())
    }
}
