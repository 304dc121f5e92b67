use async_trait::async_trait;
use common::EntityId;
use domain::{Entity, Money, Product, Repository, RepositoryError};
use sqlx::{PgPool, Row, postgres::PgRow};

use super::insert_error;

/// PostgreSQL repository for products.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_product(row: PgRow) -> Result<Product, RepositoryError> {
        let id: String = row.try_get("id").map_err(RepositoryError::storage)?;
        let name: String = row.try_get("name").map_err(RepositoryError::storage)?;
        let price: i64 = row.try_get("price").map_err(RepositoryError::storage)?;

        Ok(Product::new(id, name, Money::from_cents(price))?)
    }
}

#[async_trait]
impl Repository<Product> for PostgresProductRepository {
    #[tracing::instrument(skip(self, product), fields(id = %product.id()))]
    async fn create(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO products (id, name, price) VALUES ($1, $2, $3)")
            .bind(product.id().as_str())
            .bind(product.name())
            .bind(product.price().cents())
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error::<Product>(product.id(), "products_pkey", e))?;

        Ok(())
    }

    #[tracing::instrument(skip(self, product), fields(id = %product.id()))]
    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE products SET name = $2, price = $3 WHERE id = $1")
            .bind(product.id().as_str())
            .bind(product.name())
            .bind(product.price().cents())
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<Product>(product.id()));
        }
        Ok(())
    }

    async fn find(&self, id: &EntityId) -> Result<Product, RepositoryError> {
        let row = sqlx::query("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::storage)?
            .ok_or_else(|| RepositoryError::not_found::<Product>(id))?;

        Self::row_to_product(row)
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, price FROM products ORDER BY created_at ASC, id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::storage)?;

        rows.into_iter().map(Self::row_to_product).collect()
    }
}
