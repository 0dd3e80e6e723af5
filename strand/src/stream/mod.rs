//! Asynchronous sequences of values.
//!
//! A [`Stream`] is to an iterator what a future is to a plain value: it
//! produces items over time, and asking for the next one may suspend the
//! task. [`StreamExt`] adds `next` and the adapters built on it:
//!
//! - [`map`](StreamExt::map) and [`take`](StreamExt::take),
//! - [`timeout`](StreamExt::timeout) and [`throttle`](StreamExt::throttle),
//!   driven by the runtime's timers,
//! - [`merge`](StreamExt::merge), interleaving two streams.
//!
//! Channels become streams through [`ReceiverStream`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use strand::stream::{ReceiverStream, StreamExt};
//!
//! let mut messages = ReceiverStream::new(rx).map(|m| m.to_uppercase()).take(3);
//! while let Some(message) = messages.next().await {
//!     println!("{message}");
//! }
//! ```

mod ext;
mod iter;
mod map;
mod merge;
mod receiver;
mod take;
mod throttle;
mod timeout;

use std::ops::DerefMut;
use std::pin::Pin;
use std::task::{Context, Poll};

pub use ext::{Next, StreamExt};
pub use iter::{Iter, iter};
pub use map::Map;
pub use merge::Merge;
pub use receiver::ReceiverStream;
pub use take::Take;
pub use throttle::Throttle;
pub use timeout::Timeout;

/// A source of values produced asynchronously.
pub trait Stream {
    /// Values yielded by the stream.
    type Item;

    /// Attempts to pull the next value.
    ///
    /// - `Poll::Pending`: no value yet; the waker in `cx` is woken when one
    ///   may be available,
    /// - `Poll::Ready(Some(item))`: the next value,
    /// - `Poll::Ready(None)`: the stream has ended and must not be polled
    ///   again.
    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>>;
}

impl<S: Stream + Unpin + ?Sized> Stream for &mut S {
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut **self).poll_next(cx)
    }
}

impl<P> Stream for Pin<P>
where
    P: DerefMut,
    P::Target: Stream,
{
    type Item = <P::Target as Stream>::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        <P::Target as Stream>::poll_next(self.as_deref_mut(), cx)
    }
}
