use thiserror::Error;

use super::{DomainEvent, EventData};

/// A single-purpose consumer of one event type.
///
/// Handlers observe events; they receive a shared reference and cannot
/// mutate the event.
pub trait EventHandler<D: EventData>: Send + Sync {
    /// Reacts to an event.
    fn handle(&self, event: &DomainEvent<D>) -> Result<(), HandlerError>;
}

/// Errors a handler reports back to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The handler's side effect failed.
    #[error("{handler} failed: {reason}")]
    Failed {
        handler: &'static str,
        reason: String,
    },

    /// The handler was registered under an event name whose payload it
    /// does not understand.
    #[error("{handler} only handles {expected}")]
    UnexpectedEvent {
        handler: &'static str,
        expected: &'static str,
    },
}

impl HandlerError {
    /// Builds a `Failed` error for handler type `H`.
    pub fn failed<H: ?Sized>(reason: impl Into<String>) -> Self {
        Self::Failed {
            handler: std::any::type_name::<H>(),
            reason: reason.into(),
        }
    }
}
