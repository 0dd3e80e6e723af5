use parking_lot::Mutex;
use thiserror::Error;

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

/// Error returned by [`Sender::send`] when the receiver is closed or gone.
///
/// Carries the value that could not be sent.
#[derive(PartialEq, Eq, Clone, Copy, Error)]
#[error("sending on a closed channel")]
pub struct SendError<T>(pub T);

impl<T> SendError<T> {
    /// Returns the value that could not be sent.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendError").finish_non_exhaustive()
    }
}

/// Error returned by [`Receiver::try_recv`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum TryRecvError {
    /// No message is buffered right now, but more may arrive.
    #[error("channel is empty")]
    Empty,

    /// No message is buffered and none can arrive anymore.
    #[error("channel is closed")]
    Disconnected,
}

/// Creates an unbounded channel.
///
/// The [`Sender`] can be cloned; the channel is closed once every sender
/// has been dropped. Move each sender into the task that produces values
/// (`async move`), so it is dropped when that task ends.
///
/// # Examples
///
/// ```rust,ignore
/// let (tx, mut rx) = channel();
///
/// let producer = async move {
///     for message in ["a", "b", "c"] {
///         tx.send(message).unwrap();
///         sleep(Duration::from_millis(500)).await;
///     }
/// };
///
/// let consumer = async {
///     while let Some(message) = rx.recv().await {
///         println!("received '{message}'");
///     }
/// };
///
/// join(producer, consumer).await;
/// ```
pub fn channel<T>() -> (Sender<T>, Receiver<T>) {
    let chan = Arc::new(Chan {
        state: Mutex::new(State {
            queue: VecDeque::new(),
            senders: 1,
            rx_closed: false,
            rx_waker: None,
        }),
    });

    (
        Sender {
            chan: Arc::clone(&chan),
        },
        Receiver { chan },
    )
}

/// Channel state shared by all handles.
struct Chan<T> {
    state: Mutex<State<T>>,
}

struct State<T> {
    /// Buffered messages, oldest first.
    queue: VecDeque<T>,

    /// Number of live `Sender` handles.
    senders: usize,

    /// Set by `Receiver::close` or by dropping the receiver.
    rx_closed: bool,

    /// Waker of the task suspended in `recv`.
    rx_waker: Option<Waker>,
}

impl<T> State<T> {
    /// No message can be added anymore.
    fn is_closed(&self) -> bool {
        self.senders == 0 || self.rx_closed
    }
}

/// The sending half of a channel.
///
/// Cloning a sender adds a producer; the channel closes when the last one
/// is dropped.
pub struct Sender<T> {
    chan: Arc<Chan<T>>,
}

impl<T> Sender<T> {
    /// Appends `value` to the channel without blocking.
    ///
    /// Fails, handing the value back, only when the receiver has been
    /// closed or dropped.
    pub fn send(&self, value: T) -> Result<(), SendError<T>> {
        let waker = {
            let mut state = self.chan.state.lock();

            if state.rx_closed {
                return Err(SendError(value));
            }

            state.queue.push_back(value);
            state.rx_waker.take()
        };

        if let Some(waker) = waker {
            waker.wake();
        }

        Ok(())
    }

    /// Returns `true` if the receiver has been closed or dropped.
    pub fn is_closed(&self) -> bool {
        self.chan.state.lock().rx_closed
    }

    /// Returns `true` if both senders feed the same channel.
    pub fn same_channel(&self, other: &Sender<T>) -> bool {
        Arc::ptr_eq(&self.chan, &other.chan)
    }
}

impl<T> Clone for Sender<T> {
    fn clone(&self) -> Self {
        self.chan.state.lock().senders += 1;

        Sender {
            chan: Arc::clone(&self.chan),
        }
    }
}

impl<T> Drop for Sender<T> {
    /// Releases one producer. Dropping the last one closes the channel and
    /// wakes a receiver waiting on it.
    fn drop(&mut self) {
        let waker = {
            let mut state = self.chan.state.lock();
            state.senders -= 1;

            if state.senders > 0 {
                return;
            }

            state.rx_waker.take()
        };

        log::trace!("channel closed: last sender dropped");

        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl<T> fmt::Debug for Sender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender").finish_non_exhaustive()
    }
}

/// The receiving half of a channel.
pub struct Receiver<T> {
    chan: Arc<Chan<T>>,
}

impl<T> Receiver<T> {
    /// Receives the next message.
    ///
    /// Resolves to `Some(message)` as soon as one is buffered. Resolves to
    /// `None` once the buffer is drained and no more messages can arrive:
    /// every sender was dropped, or [`close`](Self::close) was called.
    /// `None` marks the normal end of the stream, not an error.
    ///
    /// While any sender is alive, an empty channel keeps the task suspended.
    /// A sender that is never dropped therefore keeps the consumer waiting
    /// forever; move senders into tasks that end.
    pub fn recv(&mut self) -> Recv<'_, T> {
        Recv { receiver: self }
    }

    /// Takes a buffered message without waiting.
    pub fn try_recv(&mut self) -> Result<T, TryRecvError> {
        let mut state = self.chan.state.lock();

        match state.queue.pop_front() {
            Some(value) => Ok(value),
            None if state.is_closed() => Err(TryRecvError::Disconnected),
            None => Err(TryRecvError::Empty),
        }
    }

    /// Closes the channel from the receiving side.
    ///
    /// Later sends fail; messages already buffered can still be received.
    pub fn close(&mut self) {
        self.chan.state.lock().rx_closed = true;
    }

    /// Number of buffered messages.
    pub fn len(&self) -> usize {
        self.chan.state.lock().queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let mut state = self.chan.state.lock();

        if let Some(value) = state.queue.pop_front() {
            return Poll::Ready(Some(value));
        }

        if state.is_closed() {
            return Poll::Ready(None);
        }

        match &state.rx_waker {
            Some(waker) if waker.will_wake(cx.waker()) => {}
            _ => state.rx_waker = Some(cx.waker().clone()),
        }

        Poll::Pending
    }
}

impl<T> Drop for Receiver<T> {
    /// Closes the channel and drops the buffered messages.
    fn drop(&mut self) {
        let buffered = {
            let mut state = self.chan.state.lock();
            state.rx_closed = true;
            state.rx_waker = None;

            std::mem::take(&mut state.queue)
        };

        drop(buffered);
    }
}

impl<T> fmt::Debug for Receiver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver").finish_non_exhaustive()
    }
}

/// Future returned by [`Receiver::recv`].
#[must_use = "futures do nothing unless awaited"]
pub struct Recv<'a, T> {
    receiver: &'a mut Receiver<T>,
}

impl<T> Future for Recv<'_, T> {
    type Output = Option<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.get_mut().receiver.poll_recv(cx)
    }
}
