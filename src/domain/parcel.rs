use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Parcel dimensions and weight, string-typed as the provider expects them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Parcel {
    pub length: String,
    pub width: String,
    pub height: String,
    /// Unit shared by length, width and height (e.g. "in", "cm")
    pub distance_unit: String,
    pub weight: String,
    /// Unit for weight (e.g. "lb", "kg")
    pub mass_unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParcelField {
    Length,
    Width,
    Height,
    DistanceUnit,
    Weight,
    MassUnit,
}

impl ParcelField {
    pub const ALL: [ParcelField; 6] = [
        ParcelField::Length,
        ParcelField::Width,
        ParcelField::Height,
        ParcelField::DistanceUnit,
        ParcelField::Weight,
        ParcelField::MassUnit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ParcelField::Length => "length",
            ParcelField::Width => "width",
            ParcelField::Height => "height",
            ParcelField::DistanceUnit => "distance_unit",
            ParcelField::Weight => "weight",
            ParcelField::MassUnit => "mass_unit",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Whether the field holds a number rather than a unit
    pub fn is_numeric(self) -> bool {
        !matches!(self, ParcelField::DistanceUnit | ParcelField::MassUnit)
    }
}

impl Parcel {
    /// 12 x 12 x 5 in, 5 lb
    pub fn demo() -> Self {
        Parcel {
            length: "12".to_string(),
            width: "12".to_string(),
            height: "5".to_string(),
            distance_unit: "in".to_string(),
            weight: "5".to_string(),
            mass_unit: "lb".to_string(),
        }
    }

    pub fn get(&self, field: ParcelField) -> &str {
        match field {
            ParcelField::Length => &self.length,
            ParcelField::Width => &self.width,
            ParcelField::Height => &self.height,
            ParcelField::DistanceUnit => &self.distance_unit,
            ParcelField::Weight => &self.weight,
            ParcelField::MassUnit => &self.mass_unit,
        }
    }

    pub fn set(&mut self, field: ParcelField, value: impl Into<String>) {
        let slot = match field {
            ParcelField::Length => &mut self.length,
            ParcelField::Width => &mut self.width,
            ParcelField::Height => &mut self.height,
            ParcelField::DistanceUnit => &mut self.distance_unit,
            ParcelField::Weight => &mut self.weight,
            ParcelField::MassUnit => &mut self.mass_unit,
        };
        *slot = value.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_parcel_serializes_with_wire_names() {
        let json = serde_json::to_value(Parcel::demo()).unwrap();
        assert_eq!(json["distance_unit"], "in");
        assert_eq!(json["mass_unit"], "lb");
        assert_eq!(json["length"], "12");
    }

    #[test]
    fn test_numeric_fields() {
        assert!(ParcelField::Weight.is_numeric());
        assert!(!ParcelField::MassUnit.is_numeric());
    }
}
