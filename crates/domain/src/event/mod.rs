//! Domain events and the in-process dispatcher that fans them out to handlers.

mod dispatcher;
mod handler;

pub use dispatcher::{
    DeliveryPolicy, DispatchError, EventDispatcher, HandlerFailure, HandlerRegistration,
};
pub use handler::{EventHandler, HandlerError};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Payload of a domain event.
///
/// The associated name is the event's type tag: the dispatcher looks
/// handlers up by it.
pub trait EventData: std::fmt::Debug + Send + Sync + 'static {
    /// Type tag of events carrying this payload (e.g. `"CustomerCreatedEvent"`).
    const EVENT_NAME: &'static str;
}

/// An immutable record of something that happened in the domain.
///
/// The timestamp is taken when the event is constructed; the payload is
/// stored verbatim. Events are not persisted and only live for the
/// duration of a notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainEvent<D> {
    occurred_at: DateTime<Utc>,
    event_data: D,
}

impl<D: EventData> DomainEvent<D> {
    /// Creates an event stamped with the current time.
    pub fn new(event_data: D) -> Self {
        Self {
            occurred_at: Utc::now(),
            event_data,
        }
    }

    /// Returns the event type tag.
    pub fn name(&self) -> &'static str {
        D::EVENT_NAME
    }

    /// Returns when the event was created.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    /// Returns the event payload.
    pub fn event_data(&self) -> &D {
        &self.event_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Pinged {
        count: u32,
    }

    impl EventData for Pinged {
        const EVENT_NAME: &'static str = "PingedEvent";
    }

    #[test]
    fn event_carries_name_timestamp_and_payload() {
        let before = Utc::now();
        let event = DomainEvent::new(Pinged { count: 3 });
        let after = Utc::now();

        assert_eq!(event.name(), "PingedEvent");
        assert_eq!(event.event_data(), &Pinged { count: 3 });
        assert!(event.occurred_at() >= before && event.occurred_at() <= after);
    }

    #[test]
    fn event_serializes_timestamp_and_payload() {
        let event = DomainEvent::new(Pinged { count: 1 });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_data"]["count"], 1);
        assert!(json["occurred_at"].is_string());
    }
}
