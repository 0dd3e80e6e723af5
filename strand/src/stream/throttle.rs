use super::Stream;
use crate::time::{Sleep, sleep};

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

/// Stream returned by [`StreamExt::throttle`](super::StreamExt::throttle).
#[must_use = "streams do nothing unless polled"]
pub struct Throttle<S> {
    stream: Pin<Box<S>>,
    period: Duration,

    /// Pause started when the last item was yielded.
    pause: Option<Sleep>,
}

impl<S> Throttle<S> {
    pub(crate) fn new(stream: S, period: Duration) -> Self {
        Self {
            stream: Box::pin(stream),
            period,
            pause: None,
        }
    }
}

impl<S: Stream> Stream for Throttle<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S::Item>> {
        let this = self.get_mut();

        if let Some(pause) = &mut this.pause {
            if Pin::new(pause).poll(cx).is_pending() {
                return Poll::Pending;
            }
            this.pause = None;
        }

        let item = match this.stream.as_mut().poll_next(cx) {
            Poll::Ready(item) => item,
            Poll::Pending => return Poll::Pending,
        };

        if item.is_some() && !this.period.is_zero() {
            this.pause = Some(sleep(this.period));
        }

        Poll::Ready(item)
    }
}
