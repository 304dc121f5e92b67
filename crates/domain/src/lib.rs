//! Domain layer of the DDD sample.
//!
//! This crate provides:
//! - Value objects ([`Address`], [`Money`])
//! - Entities enforcing their own invariants ([`Customer`], [`Product`], [`Order`], [`OrderItem`])
//! - Domain events, their handlers and the in-process [`EventDispatcher`]
//! - The [`Repository`] interface consumed by application code

pub mod checkout;
pub mod customer;
pub mod entity;
pub mod error;
pub mod event;
pub mod money;
pub mod product;
pub mod repository;

pub use checkout::{Order, OrderError, OrderItem};
pub use customer::{
    Address, AddressError, Customer, CustomerAddressChanged, CustomerAddressChangedEvent,
    CustomerCreated, CustomerCreatedEvent, CustomerError, LogWhenCustomerAddressChangesHandler,
    LogWhenCustomerIsCreatedHandler, NotifyWhenCustomerIsCreatedHandler,
};
pub use entity::Entity;
pub use error::{DomainError, RepositoryError};
pub use event::{
    DeliveryPolicy, DispatchError, DomainEvent, EventData, EventDispatcher, EventHandler,
    HandlerError, HandlerFailure, HandlerRegistration,
};
pub use money::Money;
pub use product::{
    Product, ProductCreated, ProductCreatedEvent, ProductError,
    SendEmailWhenProductIsCreatedHandler,
};
pub use repository::{CustomerRepository, OrderRepository, ProductRepository, Repository};
