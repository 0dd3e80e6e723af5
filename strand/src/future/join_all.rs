use super::maybe_done::MaybeDone;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Waits for every future in `futures` and returns their outputs in the
/// order the futures were yielded by the iterator, regardless of the order
/// in which they finish.
///
/// An empty input completes immediately with an empty `Vec`.
///
/// # Examples
///
/// ```rust,ignore
/// let futures = (1..=3).map(|n| async move { n * 10 });
/// assert_eq!(join_all(futures).await, vec![10, 20, 30]);
/// ```
pub fn join_all<I>(futures: I) -> JoinAll<I::Item>
where
    I: IntoIterator,
    I::Item: Future,
{
    JoinAll {
        children: futures.into_iter().map(MaybeDone::new).collect(),
        finished: false,
    }
}

/// Future returned by [`join_all`].
#[must_use = "futures do nothing unless awaited"]
pub struct JoinAll<F: Future> {
    children: Vec<MaybeDone<F>>,
    finished: bool,
}

impl<F: Future> JoinAll<F> {
    /// Number of futures being joined.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<F: Future> Future for JoinAll<F> {
    type Output = Vec<F::Output>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        assert!(!this.finished, "`JoinAll` polled after completion");

        let mut all_done = true;
        for child in &mut this.children {
            all_done &= child.poll_step(cx);
        }

        if !all_done {
            return Poll::Pending;
        }

        this.finished = true;

        let outputs = this
            .children
            .iter_mut()
            .filter_map(MaybeDone::take_output)
            .collect();

        Poll::Ready(outputs)
    }
}
