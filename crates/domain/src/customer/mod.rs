//! Customer entity, its address value object, events and handlers.

mod address;
mod entity;
mod events;
mod handlers;

pub use address::Address;
pub use entity::Customer;
pub use events::{
    CustomerAddressChanged, CustomerAddressChangedEvent, CustomerCreated, CustomerCreatedEvent,
};
pub use handlers::{
    LogWhenCustomerAddressChangesHandler, LogWhenCustomerIsCreatedHandler,
    NotifyWhenCustomerIsCreatedHandler,
};

use thiserror::Error;

/// Errors that can occur when building an address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Street is required")]
    StreetRequired,

    #[error("Number must be greater than 0")]
    NumberRequired,

    #[error("Zipcode is required")]
    ZipcodeRequired,

    #[error("City is required")]
    CityRequired,
}

/// Errors that can occur during customer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerError {
    /// Customer id is empty.
    #[error("Id is required")]
    IdRequired,

    /// Customer name is empty.
    #[error("Name is required")]
    NameRequired,

    /// Activation was attempted before an address was assigned.
    #[error("Address is mandatory to activate a customer")]
    AddressRequired,
}
