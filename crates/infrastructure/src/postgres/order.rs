use std::collections::HashMap;

use async_trait::async_trait;
use common::EntityId;
use domain::{Entity, Money, Order, OrderItem, Repository, RepositoryError};
use sqlx::{PgPool, Postgres, Row, Transaction, postgres::PgRow};

use super::{insert_error, to_i32};

const INSERT_ITEM: &str = r#"
    INSERT INTO order_items (id, order_id, product_id, name, price, quantity, position)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
"#;

const UPSERT_ITEM: &str = r#"
    INSERT INTO order_items (id, order_id, product_id, name, price, quantity, position)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    ON CONFLICT (id) DO UPDATE
    SET product_id = EXCLUDED.product_id,
        name = EXCLUDED.name,
        price = EXCLUDED.price,
        quantity = EXCLUDED.quantity,
        position = EXCLUDED.position
    WHERE order_items.order_id = EXCLUDED.order_id
"#;

/// PostgreSQL repository for orders and their items.
///
/// An order and its items are always written in one transaction. Items are
/// read back in their original position.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_item(row: &PgRow) -> Result<OrderItem, RepositoryError> {
        let id: String = row.try_get("id").map_err(RepositoryError::storage)?;
        let name: String = row.try_get("name").map_err(RepositoryError::storage)?;
        let price: i64 = row.try_get("price").map_err(RepositoryError::storage)?;
        let product_id: String = row.try_get("product_id").map_err(RepositoryError::storage)?;
        let quantity: i32 = row.try_get("quantity").map_err(RepositoryError::storage)?;

        // Negative quantities are rejected by the item constructor as zero.
        let quantity = u32::try_from(quantity).unwrap_or(0);
        Ok(OrderItem::new(
            id,
            name,
            Money::from_cents(price),
            product_id,
            quantity,
        )?)
    }

    /// Writes every item of `order` with `statement`. An item id that is
    /// already stored under another order is reported as `AlreadyExists`.
    async fn write_items(
        tx: &mut Transaction<'_, Postgres>,
        order: &Order,
        statement: &'static str,
    ) -> Result<(), RepositoryError> {
        for (position, item) in order.items().iter().enumerate() {
            let result = sqlx::query(statement)
                .bind(item.id().as_str())
                .bind(order.id().as_str())
                .bind(item.product_id().as_str())
                .bind(item.name())
                .bind(item.price().cents())
                .bind(to_i32(item.quantity())?)
                .bind(to_i32(position)?)
                .execute(&mut **tx)
                .await
                .map_err(|e| insert_error::<OrderItem>(item.id(), "order_items_pkey", e))?;

            // The upsert skips rows owned by a different order.
            if result.rows_affected() == 0 {
                return Err(RepositoryError::already_exists::<OrderItem>(item.id()));
            }
        }
        Ok(())
    }

    async fn load_items(&self, order_id: &EntityId) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, product_id, name, price, quantity
            FROM order_items
            WHERE order_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(order_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        rows.iter().map(Self::row_to_item).collect()
    }
}

#[async_trait]
impl Repository<Order> for PostgresOrderRepository {
    #[tracing::instrument(skip(self, order), fields(id = %order.id(), items = order.item_count()))]
    async fn create(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::storage)?;

        sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES ($1, $2, $3)")
            .bind(order.id().as_str())
            .bind(order.customer_id().as_str())
            .bind(order.total().cents())
            .execute(&mut *tx)
            .await
            .map_err(|e| insert_error::<Order>(order.id(), "orders_pkey", e))?;

        Self::write_items(&mut tx, order, INSERT_ITEM).await?;

        tx.commit().await.map_err(RepositoryError::storage)?;
        Ok(())
    }

    #[tracing::instrument(skip(self, order), fields(id = %order.id(), items = order.item_count()))]
    async fn update(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(RepositoryError::storage)?;

        let result = sqlx::query("UPDATE orders SET customer_id = $2, total = $3 WHERE id = $1")
            .bind(order.id().as_str())
            .bind(order.customer_id().as_str())
            .bind(order.total().cents())
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<Order>(order.id()));
        }

        Self::write_items(&mut tx, order, UPSERT_ITEM).await?;

        // Items no longer part of the order.
        let item_ids: Vec<String> = order.items().iter().map(|i| i.id().to_string()).collect();
        sqlx::query("DELETE FROM order_items WHERE order_id = $1 AND NOT (id = ANY($2))")
            .bind(order.id().as_str())
            .bind(&item_ids)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::storage)?;

        tx.commit().await.map_err(RepositoryError::storage)?;
        Ok(())
    }

    async fn find(&self, id: &EntityId) -> Result<Order, RepositoryError> {
        let row = sqlx::query("SELECT id, customer_id FROM orders WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::storage)?
            .ok_or_else(|| RepositoryError::not_found::<Order>(id))?;

        let customer_id: String = row.try_get("customer_id").map_err(RepositoryError::storage)?;
        let items = self.load_items(id).await?;

        Ok(Order::new(id.clone(), customer_id, items)?)
    }

    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let order_rows =
            sqlx::query("SELECT id, customer_id FROM orders ORDER BY created_at ASC, id ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(RepositoryError::storage)?;

        let item_rows = sqlx::query(
            r#"
            SELECT id, order_id, product_id, name, price, quantity
            FROM order_items
            ORDER BY order_id ASC, position ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        let mut items_by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
        for row in &item_rows {
            let order_id: String = row.try_get("order_id").map_err(RepositoryError::storage)?;
            items_by_order
                .entry(order_id)
                .or_default()
                .push(Self::row_to_item(row)?);
        }

        order_rows
            .iter()
            .map(|row| -> Result<Order, RepositoryError> {
                let id: String = row.try_get("id").map_err(RepositoryError::storage)?;
                let customer_id: String =
                    row.try_get("customer_id").map_err(RepositoryError::storage)?;
                let items = items_by_order.remove(&id).unwrap_or_default();
                Ok(Order::new(id, customer_id, items)?)
            })
            .collect()
    }
}
