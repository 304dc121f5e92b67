//! Order aggregate implementation.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::money::Money;

use super::{OrderError, OrderItem};

/// Order aggregate root.
///
/// An order always holds at least one item, and every item has a positive
/// quantity. Items keep their insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: EntityId,
    customer_id: EntityId,
    items: Vec<OrderItem>,
}

impl Order {
    /// Creates an order for a customer.
    pub fn new(
        id: impl Into<EntityId>,
        customer_id: impl Into<EntityId>,
        items: Vec<OrderItem>,
    ) -> Result<Self, OrderError> {
        let order = Self {
            id: id.into(),
            customer_id: customer_id.into(),
            items,
        };
        order.validate()?;
        Ok(order)
    }

    fn validate(&self) -> Result<(), OrderError> {
        if self.id.is_blank() {
            return Err(OrderError::IdRequired);
        }
        if self.customer_id.is_blank() {
            return Err(OrderError::CustomerIdRequired);
        }
        if self.items.is_empty() {
            return Err(OrderError::NoItems);
        }
        self.items.iter().try_for_each(OrderItem::validate)?;
        checked_total(&self.items).map(|_| ())
    }

    pub fn customer_id(&self) -> &EntityId {
        &self.customer_id
    }

    /// Returns the items in insertion order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items, saturating at `u32::MAX`.
    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity()))
    }

    /// Sum of every item's line value, computed on every call.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::order_number).sum()
    }

    /// Appends an item. A rejected item leaves the order unchanged.
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), OrderError> {
        item.validate()?;
        checked_total(&self.items)?
            .checked_add(item.checked_order_number()?)
            .ok_or(OrderError::AmountOverflow)?;
        self.items.push(item);
        Ok(())
    }
}

fn checked_total(items: &[OrderItem]) -> Result<Money, OrderError> {
    items.iter().try_fold(Money::zero(), |total, item| {
        total
            .checked_add(item.checked_order_number()?)
            .ok_or(OrderError::AmountOverflow)
    })
}

impl Entity for Order {
    const ENTITY_NAME: &'static str = "Order";

    fn id(&self) -> &EntityId {
        &self.id
    }
}
