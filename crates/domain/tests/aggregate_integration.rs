//! Integration tests covering the entity lifecycles end to end.

use domain::{
    Address, Customer, CustomerAddressChangedEvent, CustomerCreatedEvent, CustomerError,
    DomainError, Entity, Money, Order, OrderError, OrderItem, Product,
};

fn address() -> Address {
    Address::new("Street 1", 123, "13330-250", "São Paulo").unwrap()
}

#[test]
fn test_customer_activation_lifecycle() {
    let mut customer = Customer::new("123", "John").unwrap();
    assert!(!customer.is_active());

    assert_eq!(customer.activate(), Err(CustomerError::AddressRequired));
    assert!(!customer.is_active());

    customer.change_address(address());
    customer.activate().unwrap();
    assert!(customer.is_active());
    assert_eq!(customer.address(), Some(&address()));

    customer.deactivate();
    assert!(!customer.is_active());
}

#[test]
fn test_customer_events_carry_current_state() {
    let mut customer = Customer::new("123", "John").unwrap();
    let created = CustomerCreatedEvent::from_customer(&customer);
    assert_eq!(created.name(), "CustomerCreatedEvent");
    assert_eq!(created.event_data().id.as_str(), "123");
    assert_eq!(created.event_data().name, "John");

    assert!(CustomerAddressChangedEvent::from_customer(&customer).is_none());

    customer.change_address(address());
    let changed = CustomerAddressChangedEvent::from_customer(&customer).unwrap();
    assert_eq!(changed.name(), "CustomerAddressChangedEvent");
    assert_eq!(changed.event_data().address, address());
}

#[test]
fn test_order_from_products() {
    let product_1 = Product::new("p1", "Product 1", Money::from_dollars(10)).unwrap();
    let product_2 = Product::new("p2", "Product 2", Money::from_dollars(20)).unwrap();
    let customer = Customer::new("c1", "Customer 1").unwrap();

    let items = vec![
        OrderItem::new("i1", product_1.name(), product_1.price(), product_1.id().clone(), 2)
            .unwrap(),
        OrderItem::new("i2", product_2.name(), product_2.price(), product_2.id().clone(), 1)
            .unwrap(),
    ];
    let order = Order::new("o1", customer.id().clone(), items).unwrap();

    assert_eq!(order.total(), Money::from_dollars(40));
    assert_eq!(order.total().to_string(), "$40.00");
    assert_eq!(order.items()[0].order_number(), Money::from_dollars(20));
    assert_eq!(order.customer_id(), customer.id());
}

#[test]
fn test_order_without_items_is_rejected() {
    let result = Order::new("o1", "c1", Vec::new());
    assert_eq!(result, Err(OrderError::NoItems));

    let error: DomainError = result.unwrap_err().into();
    assert_eq!(error.to_string(), "Order must have at least one item");
}

#[test]
fn test_rewards_accumulate() {
    let mut customer = Customer::new("c1", "Customer 1").unwrap();
    customer.add_reward_points(10);
    customer.add_reward_points(5);
    assert_eq!(customer.reward_points(), 15);
}
