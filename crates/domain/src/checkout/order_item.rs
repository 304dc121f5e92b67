use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::money::Money;

use super::OrderError;

/// A line of an order: a product at a unit price, in some quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    id: EntityId,
    name: String,
    price: Money,
    product_id: EntityId,
    quantity: u32,
}

impl OrderItem {
    /// Creates a validated order item.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        price: Money,
        product_id: impl Into<EntityId>,
        quantity: u32,
    ) -> Result<Self, OrderError> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            price,
            product_id: product_id.into(),
            quantity,
        };
        item.validate()?;
        Ok(item)
    }

    pub(super) fn validate(&self) -> Result<(), OrderError> {
        if self.id.is_blank() {
            return Err(OrderError::IdRequired);
        }
        if self.name.trim().is_empty() {
            return Err(OrderError::ItemNameRequired);
        }
        if self.product_id.is_blank() {
            return Err(OrderError::ProductIdRequired);
        }
        if self.quantity == 0 {
            return Err(OrderError::InvalidQuantity {
                quantity: self.quantity,
            });
        }
        if self.price.is_negative() {
            return Err(OrderError::NegativePrice { price: self.price });
        }
        self.checked_order_number()?;
        Ok(())
    }

    pub(super) fn checked_order_number(&self) -> Result<Money, OrderError> {
        self.price
            .checked_multiply(self.quantity)
            .ok_or(OrderError::AmountOverflow)
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn product_id(&self) -> &EntityId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line value: unit price times quantity, computed on every call.
    pub fn order_number(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

impl Entity for OrderItem {
    const ENTITY_NAME: &'static str = "OrderItem";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_number() {
        let item = OrderItem::new("i1", "Item 1", Money::from_dollars(10), "p1", 2).unwrap();
        assert_eq!(item.order_number(), Money::from_dollars(20));
    }

    #[test]
    fn test_zero_quantity_fails() {
        assert_eq!(
            OrderItem::new("i1", "Item 1", Money::from_dollars(10), "p1", 0),
            Err(OrderError::InvalidQuantity { quantity: 0 })
        );
    }

    #[test]
    fn test_missing_references_fail() {
        assert_eq!(
            OrderItem::new("", "Item 1", Money::zero(), "p1", 1),
            Err(OrderError::IdRequired)
        );
        assert_eq!(
            OrderItem::new("i1", "", Money::zero(), "p1", 1),
            Err(OrderError::ItemNameRequired)
        );
        assert_eq!(
            OrderItem::new("i1", "Item 1", Money::zero(), "", 1),
            Err(OrderError::ProductIdRequired)
        );
    }

    #[test]
    fn test_line_value_overflow_fails() {
        assert_eq!(
            OrderItem::new("i1", "Big", Money::from_cents(i64::MAX / 2), "p1", 3),
            Err(OrderError::AmountOverflow)
        );
        let item = OrderItem::new("i1", "Big", Money::from_cents(i64::MAX / 2), "p1", 2).unwrap();
        assert_eq!(item.order_number(), Money::from_cents(i64::MAX - 1));
    }

    #[test]
    fn test_negative_price_fails() {
        assert!(matches!(
            OrderItem::new("i1", "Item 1", Money::from_cents(-5), "p1", 1),
            Err(OrderError::NegativePrice { .. })
        ));
    }
}
