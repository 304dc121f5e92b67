use async_trait::async_trait;
use common::EntityId;
use domain::{Address, AddressError, Customer, Entity, Repository, RepositoryError};
use sqlx::{PgPool, Row, postgres::PgRow};

use super::{insert_error, to_i32, to_i64};

/// PostgreSQL repository for customers.
#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_customer(row: PgRow) -> Result<Customer, RepositoryError> {
        let id: String = row.try_get("id").map_err(RepositoryError::storage)?;
        let name: String = row.try_get("name").map_err(RepositoryError::storage)?;
        let street: Option<String> = row.try_get("street").map_err(RepositoryError::storage)?;
        let number: Option<i32> = row.try_get("number").map_err(RepositoryError::storage)?;
        let zipcode: Option<String> = row.try_get("zipcode").map_err(RepositoryError::storage)?;
        let city: Option<String> = row.try_get("city").map_err(RepositoryError::storage)?;
        let active: bool = row.try_get("active").map_err(RepositoryError::storage)?;
        let reward_points: i64 = row
            .try_get("reward_points")
            .map_err(RepositoryError::storage)?;

        let mut customer = Customer::new(id, name)?;
        if street.is_some() || number.is_some() || zipcode.is_some() || city.is_some() {
            // A missing column fails address validation like an empty one.
            let number = u32::try_from(number.unwrap_or(0))
                .map_err(|_| AddressError::NumberRequired)?;
            customer.change_address(Address::new(
                street.unwrap_or_default(),
                number,
                zipcode.unwrap_or_default(),
                city.unwrap_or_default(),
            )?);
        }
        if active {
            customer.activate()?;
        }
        let reward_points = u64::try_from(reward_points).map_err(RepositoryError::storage)?;
        customer.add_reward_points(reward_points);
        Ok(customer)
    }
}

/// Splits an optional address into nullable columns.
fn address_columns(
    address: Option<&Address>,
) -> Result<(Option<&str>, Option<i32>, Option<&str>, Option<&str>), RepositoryError> {
    match address {
        Some(address) => Ok((
            Some(address.street()),
            Some(to_i32(address.number())?),
            Some(address.zipcode()),
            Some(address.city()),
        )),
        None => Ok((None, None, None, None)),
    }
}

#[async_trait]
impl Repository<Customer> for PostgresCustomerRepository {
    #[tracing::instrument(skip(self, customer), fields(id = %customer.id()))]
    async fn create(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let (street, number, zipcode, city) = address_columns(customer.address())?;

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, street, number, zipcode, city, active, reward_points)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(customer.id().as_str())
        .bind(customer.name())
        .bind(street)
        .bind(number)
        .bind(zipcode)
        .bind(city)
        .bind(customer.is_active())
        .bind(to_i64(customer.reward_points())?)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error::<Customer>(customer.id(), "customers_pkey", e))?;

        Ok(())
    }

    #[tracing::instrument(skip(self, customer), fields(id = %customer.id()))]
    async fn update(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let (street, number, zipcode, city) = address_columns(customer.address())?;

        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, street = $3, number = $4, zipcode = $5, city = $6,
                active = $7, reward_points = $8
            WHERE id = $1
            "#,
        )
        .bind(customer.id().as_str())
        .bind(customer.name())
        .bind(street)
        .bind(number)
        .bind(zipcode)
        .bind(city)
        .bind(customer.is_active())
        .bind(to_i64(customer.reward_points())?)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::not_found::<Customer>(customer.id()));
        }
        Ok(())
    }

    async fn find(&self, id: &EntityId) -> Result<Customer, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::storage)?
        .ok_or_else(|| RepositoryError::not_found::<Customer>(id))?;

        Self::row_to_customer(row)
    }

    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(RepositoryError::storage)?;

        rows.into_iter().map(Self::row_to_customer).collect()
    }
}
