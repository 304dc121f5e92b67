//! Handlers reacting to customer events.

use crate::event::{EventHandler, HandlerError};

use super::{
    CustomerAddressChanged, CustomerAddressChangedEvent, CustomerCreated, CustomerCreatedEvent,
};

/// Logs every new customer.
#[derive(Debug, Default)]
pub struct LogWhenCustomerIsCreatedHandler;

impl LogWhenCustomerIsCreatedHandler {
    pub fn message(event: &CustomerCreatedEvent) -> String {
        let data = event.event_data();
        format!("Customer {} created: {}", data.id, data.name)
    }
}

impl EventHandler<CustomerCreated> for LogWhenCustomerIsCreatedHandler {
    fn handle(&self, event: &CustomerCreatedEvent) -> Result<(), HandlerError> {
        tracing::info!(customer_id = %event.event_data().id, "{}", Self::message(event));
        Ok(())
    }
}

/// Sends a welcome notification to every new customer.
#[derive(Debug, Default)]
pub struct NotifyWhenCustomerIsCreatedHandler;

impl NotifyWhenCustomerIsCreatedHandler {
    pub fn message(event: &CustomerCreatedEvent) -> String {
        let data = event.event_data();
        format!("Sending welcome notification to {} ({})", data.name, data.id)
    }
}

impl EventHandler<CustomerCreated> for NotifyWhenCustomerIsCreatedHandler {
    fn handle(&self, event: &CustomerCreatedEvent) -> Result<(), HandlerError> {
        tracing::info!(customer_id = %event.event_data().id, "{}", Self::message(event));
        Ok(())
    }
}

/// Logs the new address of a customer.
#[derive(Debug, Default)]
pub struct LogWhenCustomerAddressChangesHandler;

impl LogWhenCustomerAddressChangesHandler {
    pub fn message(event: &CustomerAddressChangedEvent) -> String {
        let data = event.event_data();
        format!(
            "Address of customer {}, {} changed to: {}",
            data.id, data.name, data.address
        )
    }
}

impl EventHandler<CustomerAddressChanged> for LogWhenCustomerAddressChangesHandler {
    fn handle(&self, event: &CustomerAddressChangedEvent) -> Result<(), HandlerError> {
        tracing::info!(customer_id = %event.event_data().id, "{}", Self::message(event));
        Ok(())
    }
}
