//! In-process event dispatcher.

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::{DomainEvent, EventData, EventHandler, HandlerError};

type Invoke = dyn Fn(&dyn Any) -> Result<(), HandlerError> + Send + Sync;

/// What `notify` does after a handler fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryPolicy {
    /// Stop delivering the current event; later handlers are not invoked.
    #[default]
    StopOnFirstError,

    /// Keep delivering to the remaining handlers and report every failure.
    ContinueOnError,
}

/// A handler that failed during a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// Index of the handler in the event type's registration list.
    pub position: usize,

    /// Type name of the failing handler.
    pub handler: &'static str,

    /// The error the handler returned.
    pub error: HandlerError,
}

/// Errors returned by [`EventDispatcher::notify`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// One or more handlers failed.
    #[error("{} handler(s) failed while notifying {event_type}", .failures.len())]
    Delivery {
        event_type: String,
        failures: Vec<HandlerFailure>,
    },
}

impl DispatchError {
    /// Returns the failed handlers in invocation order.
    pub fn failures(&self) -> &[HandlerFailure] {
        match self {
            Self::Delivery { failures, .. } => failures,
        }
    }
}

/// One entry of an event type's handler list.
///
/// The entry keeps the registered `Arc` so it can be compared by identity
/// and inspected, plus a type-erased invoker that downcasts the event back
/// to the handler's payload type.
#[derive(Clone)]
pub struct HandlerRegistration {
    handler_name: &'static str,
    handler: Arc<dyn Any + Send + Sync>,
    invoke: Arc<Invoke>,
}

impl HandlerRegistration {
    fn new<D, H>(handler: Arc<H>) -> Self
    where
        D: EventData,
        H: EventHandler<D> + 'static,
    {
        let handler_name = type_name::<H>();
        let typed = Arc::clone(&handler);
        let invoke = move |event: &dyn Any| match event.downcast_ref::<DomainEvent<D>>() {
            Some(event) => typed.handle(event),
            None => Err(HandlerError::UnexpectedEvent {
                handler: handler_name,
                expected: D::EVENT_NAME,
            }),
        };

        Self {
            handler_name,
            handler,
            invoke: Arc::new(invoke),
        }
    }

    /// Returns the type name of the registered handler.
    pub fn handler_name(&self) -> &'static str {
        self.handler_name
    }

    /// Returns true if this entry was registered with exactly `handler`.
    pub fn refers_to<H: ?Sized>(&self, handler: &Arc<H>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.handler), Arc::as_ptr(handler))
    }

    /// Returns the registered handler if it is of type `H`.
    pub fn handler<H: Any>(&self) -> Option<&H> {
        self.handler.downcast_ref::<H>()
    }

    fn invoke(&self, event: &dyn Any) -> Result<(), HandlerError> {
        (self.invoke)(event)
    }
}

impl std::fmt::Debug for HandlerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistration")
            .field("handler", &self.handler_name)
            .finish()
    }
}

/// Publish/subscribe registry keyed by event type name.
///
/// Handlers are kept per event type in registration order. Registering the
/// same handler twice yields two invocations. Mutation requires exclusive
/// access; once wired, the dispatcher can be shared and notified through a
/// shared reference.
///
/// Handler panics are not caught.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    handlers: HashMap<String, Vec<HandlerRegistration>>,
    policy: DeliveryPolicy,
}

impl EventDispatcher {
    /// Creates an empty dispatcher that stops on the first handler failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty dispatcher with the given delivery policy.
    pub fn with_policy(policy: DeliveryPolicy) -> Self {
        Self {
            handlers: HashMap::new(),
            policy,
        }
    }

    /// Returns the delivery policy.
    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    /// Returns the live registry: event type name to ordered handler list.
    pub fn event_handlers(&self) -> &HashMap<String, Vec<HandlerRegistration>> {
        &self.handlers
    }

    /// Returns the handlers registered for `event_type`, if the type is known.
    pub fn handlers_for(&self, event_type: &str) -> Option<&[HandlerRegistration]> {
        self.handlers.get(event_type).map(Vec::as_slice)
    }

    /// Appends `handler` to the list of `event_type`.
    pub fn register<D, H>(&mut self, event_type: &str, handler: Arc<H>)
    where
        D: EventData,
        H: EventHandler<D> + 'static,
    {
        let registration = HandlerRegistration::new::<D, H>(handler);
        tracing::debug!(
            event_type = %event_type,
            handler = registration.handler_name(),
            "registering event handler"
        );
        self.handlers
            .entry(event_type.to_string())
            .or_default()
            .push(registration);
    }

    /// Registers `handler` under its payload's own event name.
    pub fn subscribe<D, H>(&mut self, handler: Arc<H>)
    where
        D: EventData,
        H: EventHandler<D> + 'static,
    {
        self.register::<D, H>(D::EVENT_NAME, handler);
    }

    /// Removes every registration of `handler` (compared by identity) from
    /// `event_type`. The event type stays in the registry, possibly with an
    /// empty list. Unknown types and handlers are ignored.
    pub fn unregister<H: ?Sized>(&mut self, event_type: &str, handler: &Arc<H>) {
        if let Some(registrations) = self.handlers.get_mut(event_type) {
            let before = registrations.len();
            registrations.retain(|registration| !registration.refers_to(handler));
            tracing::debug!(
                event_type,
                removed = before - registrations.len(),
                "unregistered event handler"
            );
        }
    }

    /// Removes all event types and their handlers.
    pub fn unregister_all(&mut self) {
        tracing::debug!(event_types = self.handlers.len(), "clearing event handlers");
        self.handlers.clear();
    }

    /// Delivers `event` to every handler registered for its type, in
    /// registration order, on the calling thread.
    ///
    /// Returns the number of handlers that completed successfully. An event
    /// type without handlers is not an error.
    #[tracing::instrument(skip(self, event), fields(event_type = event.name()))]
    pub fn notify<D: EventData>(&self, event: &DomainEvent<D>) -> Result<usize, DispatchError> {
        let Some(registrations) = self.handlers.get(event.name()) else {
            tracing::trace!("no handlers registered");
            return Ok(0);
        };

        metrics::counter!("domain_events_notified_total", "event_type" => D::EVENT_NAME)
            .increment(1);

        let mut delivered = 0;
        let mut failures = Vec::new();

        for (position, registration) in registrations.iter().enumerate() {
            match registration.invoke(event) {
                Ok(()) => {
                    delivered += 1;
                    metrics::counter!(
                        "domain_event_handlers_invoked_total",
                        "event_type" => D::EVENT_NAME
                    )
                    .increment(1);
                }
                Err(error) => {
                    tracing::warn!(
                        handler = registration.handler_name(),
                        position,
                        %error,
                        "event handler failed"
                    );
                    metrics::counter!(
                        "domain_event_handler_failures_total",
                        "event_type" => D::EVENT_NAME
                    )
                    .increment(1);
                    failures.push(HandlerFailure {
                        position,
                        handler: registration.handler_name(),
                        error,
                    });
                    if self.policy == DeliveryPolicy::StopOnFirstError {
                        break;
                    }
                }
            }
        }

        if failures.is_empty() {
            Ok(delivered)
        } else {
            Err(DispatchError::Delivery {
                event_type: event.name().to_string(),
                failures,
            })
        }
    }
}
