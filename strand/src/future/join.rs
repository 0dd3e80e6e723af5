use super::maybe_done::MaybeDone;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Waits for two futures and returns both outputs.
///
/// Each poll of the returned future polls `a` and then `b` (skipping
/// whichever already finished) before yielding, so the two make progress
/// in a fixed alternation.
///
/// # Examples
///
/// ```rust,ignore
/// let (a, b) = join(async { 1 }, async { "two" }).await;
/// assert_eq!((a, b), (1, "two"));
/// ```
pub fn join<A, B>(a: A, b: B) -> Join<A, B>
where
    A: Future,
    B: Future,
{
    Join {
        a: MaybeDone::new(a),
        b: MaybeDone::new(b),
    }
}

/// Waits for three futures and returns all outputs, in argument order.
///
/// See [`join`] for the polling order.
pub fn join3<A, B, C>(a: A, b: B, c: C) -> Join3<A, B, C>
where
    A: Future,
    B: Future,
    C: Future,
{
    Join3 {
        a: MaybeDone::new(a),
        b: MaybeDone::new(b),
        c: MaybeDone::new(c),
    }
}

/// Future returned by [`join`].
#[must_use = "futures do nothing unless awaited"]
pub struct Join<A: Future, B: Future> {
    a: MaybeDone<A>,
    b: MaybeDone<B>,
}

/// Future returned by [`join3`].
#[must_use = "futures do nothing unless awaited"]
pub struct Join3<A: Future, B: Future, C: Future> {
    a: MaybeDone<A>,
    b: MaybeDone<B>,
    c: MaybeDone<C>,
}

impl<A: Future, B: Future> Future for Join<A, B> {
    type Output = (A::Output, B::Output);

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        let a = this.a.poll_step(cx);
        let b = this.b.poll_step(cx);

        if !(a && b) {
            return Poll::Pending;
        }

        match (this.a.take_output(), this.b.take_output()) {
            (Some(a), Some(b)) => Poll::Ready((a, b)),
            _ => panic!("`Join` polled after completion"),
        }
    }
}

impl<A: Future, B: Future, C: Future> Future for Join3<A, B, C> {
    type Output = (A::Output, B::Output, C::Output);

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        let a = this.a.poll_step(cx);
        let b = this.b.poll_step(cx);
        let c = this.c.poll_step(cx);

        if !(a && b && c) {
            return Poll::Pending;
        }

        match (
            this.a.take_output(),
            this.b.take_output(),
            this.c.take_output(),
        ) {
            (Some(a), Some(b), Some(c)) => Poll::Ready((a, b, c)),
            _ => panic!("`Join3` polled after completion"),
        }
    }
}

impl<A: Future, B: Future> fmt::Debug for Join<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Join").finish_non_exhaustive()
    }
}

impl<A: Future, B: Future, C: Future> fmt::Debug for Join3<A, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Join3").finish_non_exhaustive()
    }
}
