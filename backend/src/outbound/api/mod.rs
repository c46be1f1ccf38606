//! Adapters speaking to the VacMan backend REST API.

pub(crate) mod dto;
mod gateway;
mod lookup_service;
mod profile_service;
mod request_service;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::domain::{AppError, ErrorCode};

pub use gateway::{CORRELATION_ID_HEADER, ReqwestApiGateway};
pub use lookup_service::HttpLookupService;
pub use profile_service::HttpProfileService;
pub use request_service::HttpRequestService;

const NOT_FOUND: u16 = 404;

/// Replace a backend 404 with the entity-specific not-found error.
fn not_found_as(error: AppError, code: ErrorCode, message: impl Into<String>) -> AppError {
    if error.http_status() == Some(NOT_FOUND) {
        AppError::new(code, message).with_http_status(NOT_FOUND)
    } else {
        error
    }
}

/// Render `pairs` as a query string including the leading `?`, or nothing.
fn encode_query(pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let mut serializer = form_urlencoded::Serializer::for_suffix(String::from("?"), 1);
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

fn json_body<T: Serialize>(value: &T, context: &str) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|error| {
        AppError::unexpected(format!("Failed to {context}: cannot encode body: {error}"))
    })
}
