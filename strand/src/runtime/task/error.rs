use std::any::Any;
use std::fmt;

use thiserror::Error;

/// Reason a task did not produce a value.
#[derive(Error)]
pub enum JoinError {
    /// The task's future panicked while being polled.
    #[error("task panicked")]
    Panicked(Box<dyn Any + Send + 'static>),

    /// The runtime was shut down before the task completed.
    #[error("task was abandoned because its runtime shut down")]
    Abandoned,
}

impl JoinError {
    /// Returns `true` if the task panicked.
    pub fn is_panic(&self) -> bool {
        matches!(self, JoinError::Panicked(_))
    }

    /// Returns `true` if the task was dropped by a runtime shutdown.
    pub fn is_abandoned(&self) -> bool {
        matches!(self, JoinError::Abandoned)
    }

    /// Returns the panic message when the payload is a string.
    pub fn panic_message(&self) -> Option<&str> {
        let JoinError::Panicked(payload) = self else {
            return None;
        };

        payload
            .downcast_ref::<&'static str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
    }
}

impl fmt::Debug for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinError::Panicked(_) => match self.panic_message() {
                Some(message) => f.debug_tuple("Panicked").field(&message).finish(),
                None => f.debug_tuple("Panicked").field(&"..").finish(),
            },
            JoinError::Abandoned => f.write_str("Abandoned"),
        }
    }
}
