use super::{Map, Merge, Stream, Take, Throttle, Timeout};

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

/// Adapters available on every [`Stream`].
///
/// Adapters take ownership of the stream they wrap and box it, so every
/// adapter is `Unpin` and can be polled with [`next`](Self::next) without
/// pinning.
pub trait StreamExt: Stream {
    /// Waits for the next item. Resolves to `None` once the stream ended.
    fn next(&mut self) -> Next<'_, Self>
    where
        Self: Unpin,
    {
        Next { stream: self }
    }

    /// Transforms every item with `f`.
    fn map<T, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> T,
    {
        Map::new(self, f)
    }

    /// Yields at most `n` items, then ends without polling the inner
    /// stream again.
    fn take(self, n: usize) -> Take<Self>
    where
        Self: Sized,
    {
        Take::new(self, n)
    }

    /// Bounds the wait for each item by `duration`.
    ///
    /// Items come out as `Ok(item)`. When no item arrives in time, the
    /// stream yields `Err(Elapsed)` once and starts a new wait; it does not
    /// end.
    fn timeout(self, duration: Duration) -> Timeout<Self>
    where
        Self: Sized,
    {
        Timeout::new(self, duration)
    }

    /// Spaces items at least `period` apart.
    ///
    /// After yielding an item, the inner stream is not polled again until
    /// `period` has elapsed. Items are delayed, never dropped.
    fn throttle(self, period: Duration) -> Throttle<Self>
    where
        Self: Sized,
    {
        Throttle::new(self, period)
    }

    /// Interleaves the items of `self` and `other` as they become ready.
    ///
    /// The two streams take turns being polled first. The merged stream
    /// ends once both have ended.
    fn merge<S>(self, other: S) -> Merge<Self, S>
    where
        Self: Sized,
        S: Stream<Item = Self::Item>,
    {
        Merge::new(self, other)
    }
}

impl<S: Stream + ?Sized> StreamExt for S {}

/// Future returned by [`StreamExt::next`].
#[must_use = "futures do nothing unless awaited"]
pub struct Next<'a, S: ?Sized> {
    stream: &'a mut S,
}

impl<S: Stream + Unpin + ?Sized> Future for Next<'_, S> {
    type Output = Option<S::Item>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut *self.get_mut().stream).poll_next(cx)
    }
}
