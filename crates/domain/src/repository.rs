//! Repository interface consumed by application code.

use async_trait::async_trait;
use common::EntityId;

use crate::checkout::Order;
use crate::customer::Customer;
use crate::entity::Entity;
use crate::error::RepositoryError;
use crate::product::Product;

/// Persistence port for an entity type.
///
/// Implementations translate storage-specific failures into
/// [`RepositoryError`]; a missing entity is always `RepositoryError::NotFound`.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Stores a new entity.
    async fn create(&self, entity: &E) -> Result<(), RepositoryError>;

    /// Overwrites a stored entity.
    async fn update(&self, entity: &E) -> Result<(), RepositoryError>;

    /// Loads the entity with the given id.
    async fn find(&self, id: &EntityId) -> Result<E, RepositoryError>;

    /// Loads every stored entity.
    async fn find_all(&self) -> Result<Vec<E>, RepositoryError>;
}

/// Repository of customers.
pub trait CustomerRepository: Repository<Customer> {}

impl<T: Repository<Customer> + ?Sized> CustomerRepository for T {}

/// Repository of products.
pub trait ProductRepository: Repository<Product> {}

impl<T: Repository<Product> + ?Sized> ProductRepository for T {}

/// Repository of orders.
pub trait OrderRepository: Repository<Order> {}

impl<T: Repository<Order> + ?Sized> OrderRepository for T {}
