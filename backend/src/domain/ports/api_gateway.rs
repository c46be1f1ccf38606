//! Port for the single remote call every backend-facing service goes through.
//!
//! The gateway resolves a relative path against the configured API base URL,
//! performs exactly one attempt, and reports failure as an [`AppError`]:
//! transport failures carry no HTTP status, non-2xx answers carry theirs.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::AppError;

/// HTTP verbs used against the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
}

impl ApiMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

/// One call to the backend API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: ApiMethod,
    /// Path relative to the API base URL, starting with `/`. May carry a
    /// query string.
    pub path: String,
    /// What the caller was trying to do, phrased to follow "Failed to ..."
    /// in error messages (for example `retrieve branch list`).
    pub context: String,
    pub bearer_token: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    fn new(method: ApiMethod, path: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            context: context.into(),
            bearer_token: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>, context: impl Into<String>) -> Self {
        Self::new(ApiMethod::Get, path, context)
    }

    pub fn post(path: impl Into<String>, context: impl Into<String>) -> Self {
        Self::new(ApiMethod::Post, path, context)
    }

    pub fn put(path: impl Into<String>, context: impl Into<String>) -> Self {
        Self::new(ApiMethod::Put, path, context)
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A successful (2xx) backend answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns a `VACMAN_API_DECODE_ERROR` carrying the response status when
    /// the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self, context: &str) -> Result<T, AppError> {
        serde_json::from_slice(&self.body)
            .map_err(|error| AppError::decode(context, self.status, error))
    }
}

/// Performs one backend API call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// Send `request` and return the response if the backend answered 2xx.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AppError>;
}
