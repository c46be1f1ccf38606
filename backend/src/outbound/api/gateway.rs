//! Reqwest-backed gateway to the VacMan backend API.
//!
//! This adapter owns transport details only: URL resolution, headers,
//! and the mapping of transport failures and non-2xx statuses onto
//! [`AppError`]. Exactly one attempt is made per call; there is no retry,
//! backoff, or timeout policy.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderName};
use reqwest::{Client, Method, Url};
use tracing::{debug, warn};

use crate::domain::ports::{ApiGateway, ApiMethod, ApiRequest, ApiResponse};
use crate::domain::{AppError, CorrelationId};

const DEFAULT_USER_AGENT: &str = "vacman-service-layer/0.1";

/// Header carrying the caller's [`CorrelationId`] to the backend.
pub const CORRELATION_ID_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

/// Gateway issuing requests relative to one API base URL.
#[derive(Debug, Clone)]
pub struct ReqwestApiGateway {
    client: Client,
    base_url: Url,
}

impl ReqwestApiGateway {
    /// Build a gateway with a default client.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(DEFAULT_USER_AGENT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Build a gateway around an existing client.
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `path` to the base URL, keeping any path the base already has.
    fn resolve(&self, path: &str, context: &str) -> Result<Url, AppError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let joined = format!("{base}/{}", path.trim_start_matches('/'));
        Url::parse(&joined).map_err(|error| {
            AppError::unexpected(format!(
                "Failed to {context}: invalid request URL '{joined}': {error}"
            ))
        })
    }
}

#[async_trait]
impl ApiGateway for ReqwestApiGateway {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AppError> {
        let ApiRequest {
            method,
            path,
            context,
            bearer_token,
            body,
        } = request;
        let url = self.resolve(&path, &context)?;

        let mut builder = self
            .client
            .request(to_reqwest_method(method), url)
            .header(ACCEPT, "application/json");
        if let Some(token) = bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(id) = CorrelationId::current() {
            builder = builder.header(CORRELATION_ID_HEADER, id.to_string());
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| map_transport_error(method, &path, &context, &error))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(method, &path, &context, &error))?;

        if !status.is_success() {
            warn!(
                method = method.as_str(),
                path = %path,
                status = status.as_u16(),
                "backend API answered with an error status"
            );
            return Err(AppError::api_status(
                &context,
                status.as_u16(),
                &body_preview(&bytes),
            ));
        }

        debug!(
            method = method.as_str(),
            path = %path,
            status = status.as_u16(),
            bytes = bytes.len(),
            "backend API call succeeded"
        );
        Ok(ApiResponse {
            status: status.as_u16(),
            body: bytes.to_vec(),
        })
    }
}

fn to_reqwest_method(method: ApiMethod) -> Method {
    match method {
        ApiMethod::Get => Method::GET,
        ApiMethod::Post => Method::POST,
        ApiMethod::Put => Method::PUT,
    }
}

fn map_transport_error(
    method: ApiMethod,
    path: &str,
    context: &str,
    error: &reqwest::Error,
) -> AppError {
    warn!(
        method = method.as_str(),
        path = %path,
        error = %error,
        "backend API unreachable"
    );
    AppError::network(context, error)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
