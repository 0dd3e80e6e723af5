use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A future that yields execution back to the executor exactly once.
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    /// On the first poll the task wakes itself and returns `Poll::Pending`,
    /// which puts it at the back of the ready queue. The second poll
    /// completes.
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if !self.0 {
            self.0 = true;
            cx.waker().wake_by_ref();
            return Poll::Pending;
        }

        Poll::Ready(())
    }
}

/// Yields execution back to the executor.
///
/// Other ready tasks get a chance to run before the current task
/// continues. Inside a [`join`](crate::future::join), every sibling is
/// polled once before the yielding child resumes.
///
/// # Examples
///
/// ```rust,ignore
/// async fn crunch(items: Vec<u64>) -> u64 {
///     let mut sum = 0;
///     for item in items {
///         sum += item;
///         strand::yield_now().await;
///     }
///     sum
/// }
/// ```
pub async fn yield_now() {
    YieldOnce(false).await
}
