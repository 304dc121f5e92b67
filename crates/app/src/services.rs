//! Application services.
//!
//! Each service loads and stores entities through a repository and, once
//! persistence succeeded, publishes the resulting domain event through the
//! shared dispatcher. A failed operation publishes nothing.

use std::sync::Arc;

use common::EntityId;
use domain::{
    Address, Customer, CustomerAddressChangedEvent, CustomerCreatedEvent, CustomerRepository,
    Entity, EventDispatcher, Money, Order, OrderItem, OrderRepository, Product, ProductCreated,
    ProductCreatedEvent, ProductRepository,
};

use crate::error::AppError;

/// Service for managing customers.
pub struct CustomerService<R> {
    repository: R,
    dispatcher: Arc<EventDispatcher>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: R, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            repository,
            dispatcher,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Creates an inactive customer and publishes `CustomerCreatedEvent`.
    #[tracing::instrument(skip(self))]
    pub async fn create_customer(&self, id: EntityId, name: &str) -> Result<Customer, AppError> {
        let customer = Customer::new(id, name)?;
        self.repository.create(&customer).await?;

        self.dispatcher
            .notify(&CustomerCreatedEvent::from_customer(&customer))?;
        Ok(customer)
    }

    /// Replaces a customer's address and publishes
    /// `CustomerAddressChangedEvent`.
    #[tracing::instrument(skip(self))]
    pub async fn change_address(
        &self,
        id: &EntityId,
        address: Address,
    ) -> Result<Customer, AppError> {
        let mut customer = self.repository.find(id).await?;
        customer.change_address(address);
        self.repository.update(&customer).await?;

        if let Some(event) = CustomerAddressChangedEvent::from_customer(&customer) {
            self.dispatcher.notify(&event)?;
        }
        Ok(customer)
    }

    /// Activates a customer. Fails when the customer has no address.
    #[tracing::instrument(skip(self))]
    pub async fn activate(&self, id: &EntityId) -> Result<Customer, AppError> {
        let mut customer = self.repository.find(id).await?;
        customer.activate()?;
        self.repository.update(&customer).await?;
        Ok(customer)
    }

    #[tracing::instrument(skip(self))]
    pub async fn deactivate(&self, id: &EntityId) -> Result<Customer, AppError> {
        let mut customer = self.repository.find(id).await?;
        customer.deactivate();
        self.repository.update(&customer).await?;
        Ok(customer)
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_reward_points(
        &self,
        id: &EntityId,
        points: u64,
    ) -> Result<Customer, AppError> {
        let mut customer = self.repository.find(id).await?;
        customer.add_reward_points(points);
        self.repository.update(&customer).await?;
        Ok(customer)
    }

    pub async fn find_customer(&self, id: &EntityId) -> Result<Customer, AppError> {
        Ok(self.repository.find(id).await?)
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.repository.find_all().await?)
    }
}

/// Service for managing the product catalog.
pub struct ProductService<R> {
    repository: R,
    dispatcher: Arc<EventDispatcher>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, dispatcher: Arc<EventDispatcher>) -> Self {
        Self {
            repository,
            dispatcher,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Adds a product to the catalog and publishes `ProductCreatedEvent`.
    ///
    /// The description only travels with the event; it is not stored.
    #[tracing::instrument(skip(self, description))]
    pub async fn create_product(
        &self,
        id: EntityId,
        name: &str,
        description: &str,
        price: Money,
    ) -> Result<Product, AppError> {
        let product = Product::new(id, name, price)?;
        self.repository.create(&product).await?;

        self.dispatcher.notify(&ProductCreatedEvent::new(ProductCreated {
            name: product.name().to_string(),
            description: description.to_string(),
            price: product.price(),
        }))?;
        Ok(product)
    }

    #[tracing::instrument(skip(self))]
    pub async fn change_price(&self, id: &EntityId, price: Money) -> Result<Product, AppError> {
        let mut product = self.repository.find(id).await?;
        product.change_price(price)?;
        self.repository.update(&product).await?;
        Ok(product)
    }

    pub async fn find_product(&self, id: &EntityId) -> Result<Product, AppError> {
        Ok(self.repository.find(id).await?)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.repository.find_all().await?)
    }
}

/// Service for placing and amending orders.
pub struct OrderService<R> {
    repository: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Places an order for a customer.
    #[tracing::instrument(skip(self, items), fields(items = items.len()))]
    pub async fn place_order(
        &self,
        id: EntityId,
        customer_id: EntityId,
        items: Vec<OrderItem>,
    ) -> Result<Order, AppError> {
        let order = Order::new(id, customer_id, items)?;
        self.repository.create(&order).await?;

        tracing::info!(order_id = %order.id(), total = %order.total(), "Order placed");
        Ok(order)
    }

    /// Appends an item to an existing order.
    #[tracing::instrument(skip(self, item), fields(item_id = %item.id()))]
    pub async fn add_item(&self, order_id: &EntityId, item: OrderItem) -> Result<Order, AppError> {
        let mut order = self.repository.find(order_id).await?;
        order.add_item(item)?;
        self.repository.update(&order).await?;
        Ok(order)
    }

    pub async fn find_order(&self, id: &EntityId) -> Result<Order, AppError> {
        Ok(self.repository.find(id).await?)
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.repository.find_all().await?)
    }
}
