use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Output of [`race`]: which side finished first, with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// Returns the left value, if any.
    pub fn left(self) -> Option<L> {
        match self {
            Either::Left(value) => Some(value),
            Either::Right(_) => None,
        }
    }

    /// Returns the right value, if any.
    pub fn right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(value) => Some(value),
        }
    }
}

/// Runs two futures concurrently and returns the output of whichever
/// finishes first. The other future is dropped with the `Race`.
///
/// Not fair: `left` is polled before `right` on every poll, so if both are
/// ready at the same time `left` wins.
///
/// # Examples
///
/// ```rust,ignore
/// match race(fetch(), sleep(Duration::from_secs(1))).await {
///     Either::Left(page) => println!("{page}"),
///     Either::Right(()) => println!("too slow"),
/// }
/// ```
pub fn race<A, B>(left: A, right: B) -> Race<A, B>
where
    A: Future,
    B: Future,
{
    Race {
        left: Box::pin(left),
        right: Box::pin(right),
    }
}

/// Future returned by [`race`].
#[must_use = "futures do nothing unless awaited"]
pub struct Race<A, B> {
    left: Pin<Box<A>>,
    right: Pin<Box<B>>,
}

impl<A: Future, B: Future> Future for Race<A, B> {
    type Output = Either<A::Output, B::Output>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let Poll::Ready(output) = this.left.as_mut().poll(cx) {
            return Poll::Ready(Either::Left(output));
        }

        if let Poll::Ready(output) = this.right.as_mut().poll(cx) {
            return Poll::Ready(Either::Right(output));
        }

        Poll::Pending
    }
}
