//! Shape checks run before anything is sent to the provider
//!
//! These only catch obviously malformed input (blank required fields,
//! non-numeric dimensions, unknown units). Deliverability is still the
//! provider's call.

use thiserror::Error;

use super::{Address, AddressField, Parcel, ParcelField, QuoteRequest};

pub const DISTANCE_UNITS: [&str; 6] = ["cm", "in", "ft", "mm", "m", "yd"];
pub const MASS_UNITS: [&str; 4] = ["g", "oz", "lb", "kg"];

/// Countries whose addresses need a state or province
pub const STATE_REQUIRED_COUNTRIES: [&str; 2] = ["US", "CA"];

/// Validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{side} address: {field} is required")]
    MissingAddressField { side: &'static str, field: &'static str },
    #[error("{side} address: country must be a 2-letter ISO code, got '{value}'")]
    InvalidCountry { side: &'static str, value: String },
    #[error("parcel: {field} is required")]
    MissingParcelField { field: &'static str },
    #[error("parcel: {field} must be a positive number, got '{value}'")]
    InvalidDimension { field: &'static str, value: String },
    #[error("parcel: unsupported {field} '{value}'")]
    InvalidUnit { field: &'static str, value: String },
}

/// Validate a full quote request, reporting the first problem found
pub fn validate_quote(request: &QuoteRequest) -> Result<(), ValidationError> {
    validate_address("from", &request.from)?;
    validate_address("to", &request.to)?;
    validate_parcel(&request.parcel)
}

pub fn validate_address(side: &'static str, address: &Address) -> Result<(), ValidationError> {
    for field in AddressField::ALL {
        if field == AddressField::State {
            continue;
        }
        if address.get(field).trim().is_empty() {
            return Err(ValidationError::MissingAddressField { side, field: field.key() });
        }
    }

    let country = address.country.trim();
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidCountry {
            side,
            value: address.country.clone(),
        });
    }

    let needs_state = STATE_REQUIRED_COUNTRIES
        .iter()
        .any(|c| c.eq_ignore_ascii_case(country));
    if needs_state && address.state.trim().is_empty() {
        return Err(ValidationError::MissingAddressField {
            side,
            field: AddressField::State.key(),
        });
    }

    Ok(())
}

pub fn validate_parcel(parcel: &Parcel) -> Result<(), ValidationError> {
    for field in ParcelField::ALL {
        let value = parcel.get(field).trim();
        if value.is_empty() {
            return Err(ValidationError::MissingParcelField { field: field.key() });
        }
        if field.is_numeric() {
            match value.parse::<f64>() {
                Ok(n) if n.is_finite() && n > 0.0 => {}
                _ => {
                    return Err(ValidationError::InvalidDimension {
                        field: field.key(),
                        value: value.to_string(),
                    })
                }
            }
        }
    }

    if !DISTANCE_UNITS.contains(&parcel.distance_unit.trim()) {
        return Err(ValidationError::InvalidUnit {
            field: "distance_unit",
            value: parcel.distance_unit.clone(),
        });
    }
    if !MASS_UNITS.contains(&parcel.mass_unit.trim()) {
        return Err(ValidationError::InvalidUnit {
            field: "mass_unit",
            value: parcel.mass_unit.clone(),
        });
    }

    Ok(())
}
