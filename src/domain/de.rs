//! Serde helpers for provider payloads

use serde::{Deserialize, Deserializer};

/// Read `null` the same as an absent field
///
/// Pair with `#[serde(default)]` so both cases end up as `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
