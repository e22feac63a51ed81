use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Postal address as entered in the form
///
/// Every field is a free-form string; the provider is the authority on
/// whether an address is deliverable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    pub name: String,
    pub street1: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// Editable address fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Name,
    Street1,
    City,
    State,
    Zip,
    Country,
}

impl AddressField {
    pub const ALL: [AddressField; 6] = [
        AddressField::Name,
        AddressField::Street1,
        AddressField::City,
        AddressField::State,
        AddressField::Zip,
        AddressField::Country,
    ];

    /// Wire name, also used as the input placeholder
    pub fn key(self) -> &'static str {
        match self {
            AddressField::Name => "name",
            AddressField::Street1 => "street1",
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::Zip => "zip",
            AddressField::Country => "country",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl Address {
    /// Blank sender address; country defaults to the US
    pub fn blank() -> Self {
        Address {
            country: "US".to_string(),
            ..Default::default()
        }
    }

    /// Recipient pre-filled in the demo form
    pub fn demo_recipient() -> Self {
        Address {
            name: "Bilbo Baggins".to_string(),
            street1: "7402 Ralston rd".to_string(),
            city: "Arvada".to_string(),
            state: "CO".to_string(),
            zip: "80002".to_string(),
            country: "US".to_string(),
        }
    }

    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Name => &self.name,
            AddressField::Street1 => &self.street1,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Zip => &self.zip,
            AddressField::Country => &self.country,
        }
    }

    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        let slot = match field {
            AddressField::Name => &mut self.name,
            AddressField::Street1 => &mut self.street1,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::Zip => &mut self.zip,
            AddressField::Country => &mut self.country,
        };
        *slot = value.into();
    }
}
