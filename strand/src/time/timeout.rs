use super::sleep::{Sleep, sleep};

use thiserror::Error;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

/// Error returned by [`Timeout`] when the deadline passes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("deadline elapsed after {duration:?}")]
pub struct Elapsed {
    duration: Duration,
}

impl Elapsed {
    pub(crate) fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// The time limit that was exceeded.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Bounds `future` by `duration`.
///
/// The returned future resolves to `Ok(output)` if `future` completes
/// first, or to `Err(Elapsed)` once the duration has passed. On every poll
/// the wrapped future is polled before the timer, so a future that becomes
/// ready at the deadline still wins.
///
/// # Examples
///
/// ```rust,ignore
/// match timeout(Duration::from_secs(2), slow()).await {
///     Ok(message) => println!("Succeeded with '{message}'"),
///     Err(elapsed) => println!("Failed after {:?}", elapsed.duration()),
/// }
/// ```
pub fn timeout<F>(duration: Duration, future: F) -> Timeout<F>
where
    F: Future,
{
    Timeout {
        future,
        sleep: sleep(duration),
        duration,
    }
}

/// Future returned by [`timeout`].
pub struct Timeout<F> {
    future: F,
    sleep: Sleep,
    duration: Duration,
}

impl<F> Timeout<F> {
    /// Consumes the timeout, returning the wrapped future.
    pub fn into_inner(self) -> F {
        self.future
    }
}

impl<F> Future for Timeout<F>
where
    F: Future,
{
    type Output = Result<F::Output, Elapsed>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Safety: `future` is never moved out of a pinned `Timeout`; the
        // other fields are `Unpin`.
        let this = unsafe { self.get_unchecked_mut() };

        let future = unsafe { Pin::new_unchecked(&mut this.future) };
        if let Poll::Ready(output) = future.poll(cx) {
            return Poll::Ready(Ok(output));
        }

        match Pin::new(&mut this.sleep).poll(cx) {
            Poll::Ready(()) => Poll::Ready(Err(Elapsed::new(this.duration))),
            Poll::Pending => Poll::Pending,
        }
    }
}
