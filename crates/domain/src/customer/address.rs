use serde::{Deserialize, Serialize};

use super::AddressError;

/// Postal address of a customer.
///
/// Immutable once built; every field is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    number: u32,
    zipcode: String,
    city: String,
}

impl Address {
    /// Builds a validated address.
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zipcode: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, AddressError> {
        let address = Self {
            street: street.into(),
            number,
            zipcode: zipcode.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<(), AddressError> {
        if self.street.trim().is_empty() {
            return Err(AddressError::StreetRequired);
        }
        if self.number == 0 {
            return Err(AddressError::NumberRequired);
        }
        if self.zipcode.trim().is_empty() {
            return Err(AddressError::ZipcodeRequired);
        }
        if self.city.trim().is_empty() {
            return Err(AddressError::CityRequired);
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zipcode(&self) -> &str {
        &self.zipcode
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.street, self.number, self.zipcode, self.city
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address() {
        let address = Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap();
        assert_eq!(address.street(), "Street 1");
        assert_eq!(address.number(), 1);
        assert_eq!(address.zipcode(), "Zipcode 1");
        assert_eq!(address.city(), "City 1");
    }

    #[test]
    fn test_display_joins_fields() {
        let address = Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap();
        assert_eq!(address.to_string(), "Street 1, 1, Zipcode 1, City 1");
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        assert_eq!(
            Address::new("", 1, "Z", "C"),
            Err(AddressError::StreetRequired)
        );
        assert_eq!(
            Address::new("S", 0, "Z", "C"),
            Err(AddressError::NumberRequired)
        );
        assert_eq!(
            Address::new("S", 1, "  ", "C"),
            Err(AddressError::ZipcodeRequired)
        );
        assert_eq!(
            Address::new("S", 1, "Z", ""),
            Err(AddressError::CityRequired)
        );
    }

    #[test]
    fn test_serialization_is_flat() {
        let address = Address::new("Street 1", 10, "12345", "City").unwrap();
        let json = serde_json::to_value(&address).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "street": "Street 1",
                "number": 10,
                "zipcode": "12345",
                "city": "City",
            })
        );
    }
}
