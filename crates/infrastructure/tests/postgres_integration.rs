//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p infrastructure --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use common::EntityId;
use domain::{
    Address, AddressError, Customer, DomainError, Entity, Money, Order, OrderItem, Product,
    Repository, RepositoryError,
};
use infrastructure::{
    PostgresCustomerRepository, PostgresOrderRepository, PostgresProductRepository,
    run_migrations,
};
use serial_test::serial;
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_pool = PgPool::connect(&connection_string).await.unwrap();
            run_migrations(&temp_pool).await.unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh pool with cleared tables
async fn get_test_pool() -> PgPool {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE order_items, orders, products, customers")
        .execute(&pool)
        .await
        .unwrap();

    pool
}

fn address() -> Address {
    Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap()
}

/// Stores a customer and two products so orders can reference them.
async fn seed(pool: &PgPool) -> (Customer, Product, Product) {
    let customer = Customer::new("c1", "Customer 1").unwrap();
    let product_1 = Product::new("p1", "Product 1", Money::from_dollars(10)).unwrap();
    let product_2 = Product::new("p2", "Product 2", Money::from_dollars(20)).unwrap();

    PostgresCustomerRepository::new(pool.clone())
        .create(&customer)
        .await
        .unwrap();
    let products = PostgresProductRepository::new(pool.clone());
    products.create(&product_1).await.unwrap();
    products.create(&product_2).await.unwrap();

    (customer, product_1, product_2)
}

fn item_for(id: &str, product: &Product, quantity: u32) -> OrderItem {
    OrderItem::new(id, product.name(), product.price(), product.id().clone(), quantity).unwrap()
}

// ============================================================================
// Customers
// ============================================================================

#[tokio::test]
#[serial]
async fn test_customer_create_and_find() {
    let repo = PostgresCustomerRepository::new(get_test_pool().await);
    let mut customer = Customer::new("123", "Customer 1").unwrap();
    customer.change_address(address());
    customer.activate().unwrap();
    customer.add_reward_points(10);

    repo.create(&customer).await.unwrap();

    let found = repo.find(&EntityId::from("123")).await.unwrap();
    assert_eq!(found, customer);
}

#[tokio::test]
#[serial]
async fn test_customer_without_address_round_trips() {
    let repo = PostgresCustomerRepository::new(get_test_pool().await);
    let customer = Customer::new("123", "Customer 1").unwrap();

    repo.create(&customer).await.unwrap();

    let found = repo.find(customer.id()).await.unwrap();
    assert!(found.address().is_none());
    assert!(!found.is_active());
}

#[tokio::test]
#[serial]
async fn test_customer_update() {
    let repo = PostgresCustomerRepository::new(get_test_pool().await);
    let mut customer = Customer::new("123", "Customer 1").unwrap();
    repo.create(&customer).await.unwrap();

    customer.change_name("Customer 2").unwrap();
    customer.change_address(address());
    repo.update(&customer).await.unwrap();

    let found = repo.find(customer.id()).await.unwrap();
    assert_eq!(found.name(), "Customer 2");
    assert_eq!(found.address(), Some(&address()));
}

#[tokio::test]
#[serial]
async fn test_customer_find_missing() {
    let repo = PostgresCustomerRepository::new(get_test_pool().await);

    let err = repo.find(&EntityId::from("456ABC")).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Customer not found");
}

#[tokio::test]
#[serial]
async fn test_customer_duplicate_create() {
    let repo = PostgresCustomerRepository::new(get_test_pool().await);
    let customer = Customer::new("123", "Customer 1").unwrap();
    repo.create(&customer).await.unwrap();

    let err = repo.create(&customer).await.unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::AlreadyExists {
            entity: "Customer",
            ..
        }
    ));
}

#[tokio::test]
#[serial]
async fn test_customer_find_all() {
    let repo = PostgresCustomerRepository::new(get_test_pool().await);
    let first = Customer::new("123", "Customer 1").unwrap();
    let mut second = Customer::new("456", "Customer 2").unwrap();
    second.change_address(address());
    repo.create(&first).await.unwrap();
    repo.create(&second).await.unwrap();

    let customers = repo.find_all().await.unwrap();
    assert_eq!(customers.len(), 2);
    assert!(customers.contains(&first));
    assert!(customers.contains(&second));
}

#[tokio::test]
#[serial]
async fn test_partial_address_row_is_reported() {
    let pool = get_test_pool().await;
    sqlx::query(
        r#"
        INSERT INTO customers (id, name, number, zipcode, city, active)
        VALUES ('123', 'Customer 1', 1, 'Zipcode 1', 'City 1', FALSE)
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();
    let repo = PostgresCustomerRepository::new(pool);

    let err = repo.find(&EntityId::from("123")).await.unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::InvalidRecord(DomainError::Address(AddressError::StreetRequired))
    ));
}

#[tokio::test]
#[serial]
async fn test_invalid_customer_row_is_reported() {
    let pool = get_test_pool().await;
    sqlx::query("INSERT INTO customers (id, name, active) VALUES ('123', 'Customer 1', TRUE)")
        .execute(&pool)
        .await
        .unwrap();
    let repo = PostgresCustomerRepository::new(pool);

    let err = repo.find(&EntityId::from("123")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidRecord(_)));
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
#[serial]
async fn test_product_lifecycle() {
    let repo = PostgresProductRepository::new(get_test_pool().await);
    let mut product = Product::new("p1", "Product 1", Money::from_dollars(100)).unwrap();
    repo.create(&product).await.unwrap();
    assert_eq!(repo.find(product.id()).await.unwrap(), product);

    product.change_name("Product 2").unwrap();
    product.change_price(Money::from_cents(20_050)).unwrap();
    repo.update(&product).await.unwrap();

    let found = repo.find(product.id()).await.unwrap();
    assert_eq!(found.name(), "Product 2");
    assert_eq!(found.price(), Money::from_cents(20_050));
}

#[tokio::test]
#[serial]
async fn test_product_update_missing() {
    let repo = PostgresProductRepository::new(get_test_pool().await);
    let product = Product::new("p1", "Product 1", Money::zero()).unwrap();

    let err = repo.update(&product).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[serial]
async fn test_product_find_all() {
    let repo = PostgresProductRepository::new(get_test_pool().await);
    let product_1 = Product::new("p1", "Product 1", Money::from_dollars(100)).unwrap();
    let product_2 = Product::new("p2", "Product 2", Money::from_dollars(200)).unwrap();
    repo.create(&product_1).await.unwrap();
    repo.create(&product_2).await.unwrap();

    let products = repo.find_all().await.unwrap();
    assert_eq!(products.len(), 2);
    assert!(products.contains(&product_1));
    assert!(products.contains(&product_2));
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
#[serial]
async fn test_order_create_and_find() {
    let pool = get_test_pool().await;
    let (customer, product_1, _) = seed(&pool).await;
    let repo = PostgresOrderRepository::new(pool.clone());

    let order = Order::new("o1", customer.id().clone(), vec![item_for("i1", &product_1, 2)])
        .unwrap();
    repo.create(&order).await.unwrap();

    let found = repo.find(order.id()).await.unwrap();
    assert_eq!(found, order);

    let total: i64 = sqlx::query_scalar("SELECT total FROM orders WHERE id = 'o1'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, Money::from_dollars(20).cents());
}

#[tokio::test]
#[serial]
async fn test_order_update_with_added_item() {
    let pool = get_test_pool().await;
    let (customer, product_1, product_2) = seed(&pool).await;
    let repo = PostgresOrderRepository::new(pool.clone());

    let mut order = Order::new("o1", customer.id().clone(), vec![item_for("i1", &product_1, 2)])
        .unwrap();
    repo.create(&order).await.unwrap();

    order.add_item(item_for("i2", &product_2, 1)).unwrap();
    repo.update(&order).await.unwrap();

    let found = repo.find(order.id()).await.unwrap();
    let ids: Vec<_> = found.items().iter().map(|i| i.id().as_str()).collect();
    assert_eq!(ids, vec!["i1", "i2"]);
    assert_eq!(found.total(), Money::from_dollars(40));

    let total: i64 = sqlx::query_scalar("SELECT total FROM orders WHERE id = 'o1'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, Money::from_dollars(40).cents());
}

#[tokio::test]
#[serial]
async fn test_order_update_missing() {
    let pool = get_test_pool().await;
    let (customer, product_1, _) = seed(&pool).await;
    let repo = PostgresOrderRepository::new(pool);

    let order = Order::new("o1", customer.id().clone(), vec![item_for("i1", &product_1, 1)])
        .unwrap();
    let err = repo.update(&order).await.unwrap_err();
    assert_eq!(err.to_string(), "Order not found");
}

#[tokio::test]
#[serial]
async fn test_order_find_missing() {
    let repo = PostgresOrderRepository::new(get_test_pool().await);

    let err = repo.find(&EntityId::from("456ABC")).await.unwrap_err();
    assert_eq!(err.to_string(), "Order not found");
}

#[tokio::test]
#[serial]
async fn test_order_duplicate_create_leaves_nothing_behind() {
    let pool = get_test_pool().await;
    let (customer, product_1, product_2) = seed(&pool).await;
    let repo = PostgresOrderRepository::new(pool.clone());

    let order = Order::new("o1", customer.id().clone(), vec![item_for("i1", &product_1, 1)])
        .unwrap();
    repo.create(&order).await.unwrap();

    let duplicate = Order::new("o1", customer.id().clone(), vec![item_for("i9", &product_2, 1)])
        .unwrap();
    let err = repo.create(&duplicate).await.unwrap_err();
    assert!(matches!(err, RepositoryError::AlreadyExists { entity: "Order", .. }));

    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(items, 1);
}

#[tokio::test]
#[serial]
async fn test_order_create_cannot_take_items_of_another_order() {
    let pool = get_test_pool().await;
    let (customer, product_1, product_2) = seed(&pool).await;
    let repo = PostgresOrderRepository::new(pool.clone());

    let first = Order::new("o1", customer.id().clone(), vec![item_for("i1", &product_1, 1)])
        .unwrap();
    repo.create(&first).await.unwrap();

    let second = Order::new("o2", customer.id().clone(), vec![item_for("i1", &product_2, 5)])
        .unwrap();
    let err = repo.create(&second).await.unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::AlreadyExists {
            entity: "OrderItem",
            ..
        }
    ));

    assert_eq!(repo.find(first.id()).await.unwrap(), first);
    assert!(repo.find(second.id()).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[serial]
async fn test_order_update_cannot_take_items_of_another_order() {
    let pool = get_test_pool().await;
    let (customer, product_1, product_2) = seed(&pool).await;
    let repo = PostgresOrderRepository::new(pool.clone());

    let first = Order::new("o1", customer.id().clone(), vec![item_for("i1", &product_1, 1)])
        .unwrap();
    let mut second = Order::new("o2", customer.id().clone(), vec![item_for("i2", &product_2, 1)])
        .unwrap();
    repo.create(&first).await.unwrap();
    repo.create(&second).await.unwrap();

    second.add_item(item_for("i1", &product_2, 3)).unwrap();
    let err = repo.update(&second).await.unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::AlreadyExists {
            entity: "OrderItem",
            ..
        }
    ));

    assert_eq!(repo.find(first.id()).await.unwrap(), first);
    let stored = repo.find(&EntityId::from("o2")).await.unwrap();
    assert_eq!(stored.item_count(), 1);

    let total: i64 = sqlx::query_scalar("SELECT total FROM orders WHERE id = 'o2'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(total, Money::from_dollars(20).cents());
}

#[tokio::test]
#[serial]
async fn test_order_find_all() {
    let pool = get_test_pool().await;
    let (customer, product_1, product_2) = seed(&pool).await;
    let repo = PostgresOrderRepository::new(pool);

    let order_1 = Order::new(
        "o1",
        customer.id().clone(),
        vec![item_for("i1", &product_1, 2), item_for("i2", &product_2, 1)],
    )
    .unwrap();
    let order_2 = Order::new("o2", customer.id().clone(), vec![item_for("i3", &product_2, 3)])
        .unwrap();
    repo.create(&order_1).await.unwrap();
    repo.create(&order_2).await.unwrap();

    let orders = repo.find_all().await.unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders.contains(&order_1));
    assert!(orders.contains(&order_2));
}
