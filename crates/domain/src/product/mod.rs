//! Product entity, its events and handlers.

mod entity;
mod events;
mod handlers;

pub use entity::Product;
pub use events::{ProductCreated, ProductCreatedEvent};
pub use handlers::SendEmailWhenProductIsCreatedHandler;

use thiserror::Error;

use crate::money::Money;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("Id is required")]
    IdRequired,

    #[error("Name is required")]
    NameRequired,

    #[error("Price must not be negative: {price}")]
    NegativePrice { price: Money },
}
