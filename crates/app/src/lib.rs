//! Application layer wiring the domain to its repositories.
//!
//! Provides the application services, the default event dispatcher with
//! every shipped handler registered, and the demo scenario run by the
//! `app` binary.

pub mod config;
pub mod error;
pub mod services;

use std::sync::Arc;

use common::EntityId;
use domain::{
    Address, CustomerAddressChanged, CustomerCreated, CustomerRepository, DeliveryPolicy, Entity,
    EventDispatcher, LogWhenCustomerAddressChangesHandler, LogWhenCustomerIsCreatedHandler, Money,
    NotifyWhenCustomerIsCreatedHandler, Order, OrderItem, OrderRepository, ProductCreated,
    ProductRepository, SendEmailWhenProductIsCreatedHandler,
};

pub use config::{Config, LogFormat};
pub use error::AppError;
pub use services::{CustomerService, OrderService, ProductService};

/// Creates a dispatcher with every shipped handler registered.
pub fn default_dispatcher(policy: DeliveryPolicy) -> EventDispatcher {
    let mut dispatcher = EventDispatcher::with_policy(policy);
    dispatcher.subscribe::<CustomerCreated, _>(Arc::new(LogWhenCustomerIsCreatedHandler));
    dispatcher.subscribe::<CustomerCreated, _>(Arc::new(NotifyWhenCustomerIsCreatedHandler));
    dispatcher
        .subscribe::<CustomerAddressChanged, _>(Arc::new(LogWhenCustomerAddressChangesHandler));
    dispatcher.subscribe::<ProductCreated, _>(Arc::new(SendEmailWhenProductIsCreatedHandler));
    dispatcher
}

/// The three application services sharing one dispatcher.
pub struct Services<C, P, O> {
    pub customers: CustomerService<C>,
    pub products: ProductService<P>,
    pub orders: OrderService<O>,
}

impl<C, P, O> Services<C, P, O>
where
    C: CustomerRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    pub fn new(customers: C, products: P, orders: O, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            customers: CustomerService::new(customers, Arc::clone(&dispatcher)),
            products: ProductService::new(products, dispatcher),
            orders: OrderService::new(orders),
        }
    }
}

/// Runs the demo: a customer moves in and is activated, two products are
/// listed, an order is placed and then extended. Returns the final order.
#[tracing::instrument(skip(services))]
pub async fn run_scenario<C, P, O>(services: &Services<C, P, O>) -> Result<Order, AppError>
where
    C: CustomerRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    let customer = services
        .customers
        .create_customer(EntityId::new(), "Customer 1")
        .await?;
    let address = Address::new("Street 1", 123, "13330-250", "São Paulo")?;
    services
        .customers
        .change_address(customer.id(), address)
        .await?;
    let customer = services.customers.activate(customer.id()).await?;

    let keyboard = services
        .products
        .create_product(
            EntityId::new(),
            "Keyboard",
            "Mechanical keyboard",
            Money::from_dollars(10),
        )
        .await?;
    let monitor = services
        .products
        .create_product(
            EntityId::new(),
            "Monitor",
            "27 inch monitor",
            Money::from_dollars(20),
        )
        .await?;

    let first_item = OrderItem::new(
        EntityId::new(),
        keyboard.name(),
        keyboard.price(),
        keyboard.id().clone(),
        2,
    )?;
    let order = services
        .orders
        .place_order(EntityId::new(), customer.id().clone(), vec![first_item])
        .await?;

    let second_item = OrderItem::new(
        EntityId::new(),
        monitor.name(),
        monitor.price(),
        monitor.id().clone(),
        1,
    )?;
    let order = services.orders.add_item(order.id(), second_item).await?;

    tracing::info!(
        order_id = %order.id(),
        items = order.item_count(),
        total = %order.total(),
        "Scenario completed"
    );
    Ok(order)
}
