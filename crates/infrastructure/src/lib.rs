//! Repository implementations for the domain entities.
//!
//! - [`InMemoryRepository`] keeps entities in process memory (tests, demos).
//! - [`postgres`] persists customers, products and orders in PostgreSQL.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryRepository;
pub use postgres::{
    PostgresCustomerRepository, PostgresOrderRepository, PostgresProductRepository,
    run_migrations,
};
