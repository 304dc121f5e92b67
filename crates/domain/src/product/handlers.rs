use crate::event::{EventHandler, HandlerError};

use super::{ProductCreated, ProductCreatedEvent};

/// Announces every new product by e-mail.
#[derive(Debug, Default)]
pub struct SendEmailWhenProductIsCreatedHandler;

impl SendEmailWhenProductIsCreatedHandler {
    pub fn message(event: &ProductCreatedEvent) -> String {
        let data = event.event_data();
        format!(
            "Sending email about new product {} ({}): {}",
            data.name, data.price, data.description
        )
    }
}

impl EventHandler<ProductCreated> for SendEmailWhenProductIsCreatedHandler {
    fn handle(&self, event: &ProductCreatedEvent) -> Result<(), HandlerError> {
        tracing::info!(product = %event.event_data().name, "{}", Self::message(event));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    #[test]
    fn test_message_mentions_product() {
        let event = ProductCreatedEvent::new(ProductCreated {
            name: "Product 1".to_string(),
            description: "Product 1 description".to_string(),
            price: Money::from_dollars(10),
        });

        assert_eq!(event.name(), "ProductCreatedEvent");
        assert_eq!(
            SendEmailWhenProductIsCreatedHandler::message(&event),
            "Sending email about new product Product 1 ($10.00): Product 1 description"
        );
        assert!(SendEmailWhenProductIsCreatedHandler.handle(&event).is_ok());
    }
}
