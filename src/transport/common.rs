use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::domain::{ValidationError, VendorAccountId};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains invalid {field}: {value:?} ({reason})")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct VendorAccountIdJson {
    vendor_id: String,
    account_id: String,
}

impl From<VendorAccountIdJson> for VendorAccountId {
    fn from(value: VendorAccountIdJson) -> Self {
        Self {
            vendor_id: value.vendor_id,
            account_id: value.account_id,
        }
    }
}

/// Run a domain constructor over a required response field.
pub fn required<T>(
    field: &'static str,
    value: String,
    ctor: impl FnOnce(String) -> Result<T, ValidationError>,
) -> Result<T, TransportError> {
    ctor(value.clone()).map_err(|err| TransportError::InvalidField {
        field,
        value,
        reason: err.to_string(),
    })
}

/// Like [`required`], but `null`, missing and blank values all map to `None`.
pub fn optional<T>(
    field: &'static str,
    value: Option<String>,
    ctor: impl FnOnce(String) -> Result<T, ValidationError>,
) -> Result<Option<T>, TransportError> {
    match value {
        Some(value) if !value.trim().is_empty() => required(field, value, ctor).map(Some),
        _ => Ok(None),
    }
}

/// Map an optional enum field, rejecting values this crate does not know.
pub fn optional_enum<T>(
    field: &'static str,
    value: Option<String>,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>, TransportError> {
    match value {
        Some(value) if !value.trim().is_empty() => {
            parse(&value)
                .map(Some)
                .ok_or_else(|| TransportError::InvalidField {
                    field,
                    value,
                    reason: "unknown value".to_owned(),
                })
        }
        _ => Ok(None),
    }
}

/// `deserialize_with` helper: an explicit `null` decodes like a missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn metadata(value: Option<BTreeMap<String, String>>) -> BTreeMap<String, String> {
    value.unwrap_or_default()
}
