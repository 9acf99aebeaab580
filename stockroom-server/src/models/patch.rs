//! Helpers for partial-update payloads
//!
//! A field in a partial update has three states: absent, present with
//! null, and present with a value. Request structs model this as
//! `Option<Option<T>>` with `#[serde(default, deserialize_with = "present")]`:
//! absent stays `None`, null becomes `Some(None)`.

use serde::{Deserialize, Deserializer};

use super::ValidationError;

/// Deserialize a field that was present in the payload (null or not).
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Collapse a tri-state slot for a field that has no null state.
///
/// Absent stays absent; explicit null is a validation error.
pub fn non_null<T>(field: &'static str, slot: Option<Option<T>>) -> Result<Option<T>, ValidationError> {
    match slot {
        None => Ok(None),
        Some(None) => Err(ValidationError::NotNullable { field }),
        Some(Some(value)) => Ok(Some(value)),
    }
}
