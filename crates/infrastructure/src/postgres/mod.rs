//! PostgreSQL-backed repositories.
//!
//! Schema lives in `migrations/`. Records are rebuilt through the domain
//! constructors, so a row that violates an invariant is reported as
//! `RepositoryError::InvalidRecord` instead of producing an invalid entity.

mod customer;
mod order;
mod product;

pub use customer::PostgresCustomerRepository;
pub use order::PostgresOrderRepository;
pub use product::PostgresProductRepository;

use std::num::TryFromIntError;

use common::EntityId;
use domain::{Entity, RepositoryError};
use sqlx::PgPool;

/// Runs the embedded database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Maps an insert failure, turning a primary key violation into
/// `AlreadyExists`.
fn insert_error<E: Entity>(
    id: &EntityId,
    primary_key: &str,
    error: sqlx::Error,
) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = error
        && db_err.constraint() == Some(primary_key)
    {
        return RepositoryError::already_exists::<E>(id);
    }
    RepositoryError::storage(error)
}

fn to_i32<T>(value: T) -> Result<i32, RepositoryError>
where
    T: TryInto<i32, Error = TryFromIntError>,
{
    value.try_into().map_err(RepositoryError::storage)
}

fn to_i64<T>(value: T) -> Result<i64, RepositoryError>
where
    T: TryInto<i64, Error = TryFromIntError>,
{
    value.try_into().map_err(RepositoryError::storage)
}
