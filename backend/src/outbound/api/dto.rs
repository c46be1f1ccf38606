//! Response envelopes used by the backend API.
//!
//! Collection endpoints wrap their items as `{ "content": [...] }`. Lookup
//! collections are decoded loosely: null or malformed items are dropped so
//! one bad row cannot hide a whole category.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::domain::{AppError, ErrorCode};

#[derive(Debug, Deserialize)]
pub(crate) struct ContentEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub(crate) content: Vec<T>,
}

/// Decode every well-formed item of a `{ content: [...] }` envelope.
pub(crate) fn sanitized_content<T: DeserializeOwned>(
    envelope: &Value,
    context: &str,
) -> Result<Vec<T>, AppError> {
    let items = envelope
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::new(
                ErrorCode::VacmanApiDecodeError,
                format!("Failed to {context}: response has no content array"),
            )
        })?;

    let mut decoded = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if item.is_null() {
            debug!(index, context, "skipping null collection item");
            continue;
        }
        match T::deserialize(item) {
            Ok(value) => decoded.push(value),
            Err(error) => debug!(index, context, %error, "skipping malformed collection item"),
        }
    }
    Ok(decoded)
}
