//! Order aggregate and its items.

mod order;
mod order_item;

pub use order::Order;
pub use order_item::OrderItem;

use thiserror::Error;

use crate::money::Money;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Order or item id is empty.
    #[error("Id is required")]
    IdRequired,

    /// Customer ID is required.
    #[error("Customer id is required")]
    CustomerIdRequired,

    /// Order has no items.
    #[error("Order must have at least one item")]
    NoItems,

    /// Item name is empty.
    #[error("Item name is required")]
    ItemNameRequired,

    /// Item does not reference a product.
    #[error("Product id is required")]
    ProductIdRequired,

    /// Invalid quantity.
    #[error("Quantity must be greater than 0")]
    InvalidQuantity { quantity: u32 },

    /// Invalid price.
    #[error("Price must not be negative: {price}")]
    NegativePrice { price: Money },

    /// A line value or the order total does not fit in a `Money`.
    #[error("Order amount is too large")]
    AmountOverflow,
}
