use super::entry::TimerShared;
use crate::runtime::context;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

/// Roughly 30 years; used when `now + duration` overflows.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Creates a future that completes once `duration` has elapsed.
///
/// Timing is best effort: the task resumes no earlier than the deadline but
/// may resume later under load. A zero duration completes on first poll
/// without suspending.
///
/// # Panics
///
/// The returned future panics if it has to suspend while polled outside of
/// a runtime.
///
/// # Examples
///
/// ```rust,ignore
/// use std::time::Duration;
///
/// strand::time::sleep(Duration::from_millis(10)).await;
/// ```
pub fn sleep(duration: Duration) -> Sleep {
    let now = Instant::now();
    let deadline = now
        .checked_add(duration)
        .unwrap_or_else(|| now + FAR_FUTURE);

    Sleep::until(deadline)
}

/// A future that completes once a deadline is reached.
///
/// The timer is registered with the runtime's timer driver on the first
/// poll that finds the deadline still ahead. Dropping a `Sleep` cancels the
/// timer.
pub struct Sleep {
    /// Absolute point in time when the sleep completes.
    deadline: Instant,

    /// Timer shared with the driver, once registered.
    entry: Option<Arc<TimerShared>>,
}

impl Sleep {
    pub(crate) fn until(deadline: Instant) -> Self {
        Self {
            deadline,
            entry: None,
        }
    }

    /// Returns the instant at which this sleep completes.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns `true` if the deadline has passed.
    pub fn is_elapsed(&self) -> bool {
        Instant::now() >= self.deadline
    }

    fn finish(&mut self) -> Poll<()> {
        if let Some(entry) = self.entry.take() {
            entry.cancel();
        }

        Poll::Ready(())
    }
}

impl Future for Sleep {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let Some(entry) = &this.entry {
            if entry.poll_fired(cx.waker()) || this.is_elapsed() {
                return this.finish();
            }

            return Poll::Pending;
        }

        if this.is_elapsed() {
            return Poll::Ready(());
        }

        let deadline = this.deadline;
        let (entry, registered) = context::with_current(|handle| {
            let entry = handle.timer.entry(cx.waker().clone());
            let registered = handle.timer.register(deadline, entry.clone());
            (entry, registered)
        })
        .unwrap_or_else(|| panic!("`Sleep` polled outside of a strand runtime"));

        if !registered {
            log::debug!("timer driver stopped; sleep will not be woken");
        }

        this.entry = Some(entry);
        Poll::Pending
    }
}

impl Drop for Sleep {
    fn drop(&mut self) {
        if let Some(entry) = self.entry.take() {
            entry.cancel();
        }
    }
}
