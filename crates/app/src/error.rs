//! Application error type.

use domain::{
    AddressError, CustomerError, DispatchError, DomainError, OrderError, ProductError,
    RepositoryError,
};
use thiserror::Error;

/// Errors surfaced by application services and the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// An entity or value object rejected the operation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The repository failed or the entity is missing.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// A handler failed while the resulting event was being delivered.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// The database could not be reached.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    /// Returns true when the requested entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(err) if err.is_not_found())
    }
}

impl From<AddressError> for AppError {
    fn from(err: AddressError) -> Self {
        AppError::Domain(err.into())
    }
}

impl From<CustomerError> for AppError {
    fn from(err: CustomerError) -> Self {
        AppError::Domain(err.into())
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        AppError::Domain(err.into())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        AppError::Domain(err.into())
    }
}
