use std::future::Future;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A child slot of a join combinator.
///
/// Holds the child future until it completes, then its output until the
/// combinator takes it. The future is boxed so the slot, and every
/// combinator built from slots, is `Unpin`.
#[doc(hidden)]
pub enum MaybeDone<F: Future> {
    Future(Pin<Box<F>>),
    Done(F::Output),
    Taken,
}

// The output is never pinned, only moved out by value.
impl<F: Future> Unpin for MaybeDone<F> {}

impl<F: Future> MaybeDone<F> {
    pub fn new(future: F) -> Self {
        MaybeDone::Future(Box::pin(future))
    }

    /// Polls the child once if it has not completed yet.
    ///
    /// Returns `true` once the output is available.
    pub fn poll_step(&mut self, cx: &mut Context<'_>) -> bool {
        let MaybeDone::Future(future) = self else {
            return true;
        };

        match future.as_mut().poll(cx) {
            Poll::Ready(output) => {
                *self = MaybeDone::Done(output);
                true
            }
            Poll::Pending => false,
        }
    }

    /// Takes the output, leaving the slot empty.
    ///
    /// Returns `None` if the child has not completed or the output was
    /// already taken.
    pub fn take_output(&mut self) -> Option<F::Output> {
        match mem::replace(self, MaybeDone::Taken) {
            MaybeDone::Done(output) => Some(output),
            other => {
                *self = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MaybeDone;

    use std::future::{pending, ready};
    use std::task::{Context, Waker};

    #[test]
    fn ready_child_completes_on_first_step() {
        let mut cx = Context::from_waker(Waker::noop());
        let mut slot = MaybeDone::new(ready(5));

        assert!(slot.poll_step(&mut cx));
        assert!(slot.poll_step(&mut cx));
        assert_eq!(slot.take_output(), Some(5));
        assert_eq!(slot.take_output(), None);
    }

    #[test]
    fn pending_child_has_no_output() {
        let mut cx = Context::from_waker(Waker::noop());
        let mut slot = MaybeDone::new(pending::<u8>());

        assert!(!slot.poll_step(&mut cx));
        assert_eq!(slot.take_output(), None);
        assert!(!slot.poll_step(&mut cx));
    }
}
