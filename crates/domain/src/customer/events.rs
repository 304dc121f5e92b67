//! Customer domain events.

use common::EntityId;
use serde::Serialize;

use crate::entity::Entity;
use crate::event::{DomainEvent, EventData};

use super::{Address, Customer};

/// Payload of [`CustomerCreatedEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerCreated {
    pub id: EntityId,
    pub name: String,
}

impl EventData for CustomerCreated {
    const EVENT_NAME: &'static str = "CustomerCreatedEvent";
}

/// Raised after a customer is created.
pub type CustomerCreatedEvent = DomainEvent<CustomerCreated>;

/// Payload of [`CustomerAddressChangedEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerAddressChanged {
    pub id: EntityId,
    pub name: String,
    pub address: Address,
}

impl EventData for CustomerAddressChanged {
    const EVENT_NAME: &'static str = "CustomerAddressChangedEvent";
}

/// Raised after a customer's address is replaced.
pub type CustomerAddressChangedEvent = DomainEvent<CustomerAddressChanged>;

impl DomainEvent<CustomerCreated> {
    /// Builds the creation event for `customer`.
    pub fn from_customer(customer: &Customer) -> Self {
        Self::new(CustomerCreated {
            id: customer.id().clone(),
            name: customer.name().to_string(),
        })
    }
}

impl DomainEvent<CustomerAddressChanged> {
    /// Builds the address-changed event for `customer`, or `None` if the
    /// customer has no address.
    pub fn from_customer(customer: &Customer) -> Option<Self> {
        let address = customer.address()?.clone();
        Some(Self::new(CustomerAddressChanged {
            id: customer.id().clone(),
            name: customer.name().to_string(),
            address,
        }))
    }
}
