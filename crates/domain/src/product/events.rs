//! Product domain events.

use serde::Serialize;

use crate::event::{DomainEvent, EventData};
use crate::money::Money;

/// Payload of [`ProductCreatedEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCreated {
    pub name: String,
    pub description: String,
    pub price: Money,
}

impl EventData for ProductCreated {
    const EVENT_NAME: &'static str = "ProductCreatedEvent";
}

/// Raised after a product is created.
pub type ProductCreatedEvent = DomainEvent<ProductCreated>;
