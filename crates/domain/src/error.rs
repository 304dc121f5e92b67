//! Domain error types.

use common::EntityId;
use thiserror::Error;

use crate::checkout::OrderError;
use crate::customer::{AddressError, CustomerError};
use crate::entity::Entity;
use crate::product::ProductError;

/// Validation errors raised by value objects and entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// An address failed validation.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// A customer invariant was violated.
    #[error(transparent)]
    Customer(#[from] CustomerError),

    /// A product invariant was violated.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// An order or order item invariant was violated.
    #[error(transparent)]
    Order(#[from] OrderError),
}

/// Errors reported by repository implementations.
///
/// Storage drivers translate their native errors into this type so the
/// persistence technology never leaks into the domain API.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No entity with the given id is stored.
    #[error("{entity} not found")]
    NotFound {
        entity: &'static str,
        id: EntityId,
    },

    /// An entity with the given id is already stored.
    #[error("{entity} already exists: {id}")]
    AlreadyExists {
        entity: &'static str,
        id: EntityId,
    },

    /// A stored record could not be turned back into a valid entity.
    #[error("Invalid stored record: {0}")]
    InvalidRecord(#[from] DomainError),

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Builds a `NotFound` error for entity type `E`.
    pub fn not_found<E: Entity>(id: &EntityId) -> Self {
        Self::NotFound {
            entity: E::ENTITY_NAME,
            id: id.clone(),
        }
    }

    /// Builds an `AlreadyExists` error for entity type `E`.
    pub fn already_exists<E: Entity>(id: &EntityId) -> Self {
        Self::AlreadyExists {
            entity: E::ENTITY_NAME,
            id: id.clone(),
        }
    }

    /// Wraps a backend error.
    pub fn storage(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(error))
    }

    /// Returns true for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<OrderError> for RepositoryError {
    fn from(e: OrderError) -> Self {
        Self::InvalidRecord(e.into())
    }
}

impl From<CustomerError> for RepositoryError {
    fn from(e: CustomerError) -> Self {
        Self::InvalidRecord(e.into())
    }
}

impl From<AddressError> for RepositoryError {
    fn from(e: AddressError) -> Self {
        Self::InvalidRecord(e.into())
    }
}

impl From<ProductError> for RepositoryError {
    fn from(e: ProductError) -> Self {
        Self::InvalidRecord(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::Order;

    #[test]
    fn not_found_message_names_the_entity() {
        let error = RepositoryError::not_found::<Order>(&EntityId::from("456ABC"));
        assert_eq!(error.to_string(), "Order not found");
        assert!(error.is_not_found());
    }

    #[test]
    fn domain_errors_convert_into_invalid_record() {
        let error: RepositoryError = OrderError::NoItems.into();
        assert!(matches!(
            error,
            RepositoryError::InvalidRecord(DomainError::Order(OrderError::NoItems))
        ));
    }

    #[test]
    fn storage_error_keeps_source() {
        let error = RepositoryError::storage(std::io::Error::other("connection reset"));
        assert_eq!(error.to_string(), "Storage error: connection reset");
        assert!(std::error::Error::source(&error).is_some());
    }
}
