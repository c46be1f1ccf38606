//! Service-layer configuration loaded via OrthoConfig.

use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::AppError;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(AppError::invalid_configuration(format!(
                "unknown log format '{other}'; expected 'json' or 'pretty'"
            ))),
        }
    }
}

/// Settings controlling how services reach the backend API.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VACMAN")]
pub struct ApiSettings {
    /// Base URL every backend path is resolved against.
    pub api_base_url: Option<String>,
    /// Serve bundled fixtures instead of calling the backend.
    pub mock: Option<bool>,
    /// Share an in-memory cache between the lookup services.
    pub cache_enabled: Option<bool>,
    /// Lifetime of cached lookup responses; unset keeps them for the life of
    /// the process.
    pub cache_ttl_seconds: Option<u64>,
    /// `json` (default) or `pretty`.
    pub log_format: Option<String>,
}

impl ApiSettings {
    /// Return the configured base URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_CONFIGURATION` when the value is not an absolute
    /// `http` or `https` URL.
    pub fn api_base_url(&self) -> Result<Url, AppError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        let url = Url::parse(raw).map_err(|error| {
            AppError::invalid_configuration(format!("invalid API base URL '{raw}': {error}"))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(AppError::invalid_configuration(format!(
                "API base URL '{raw}' must use http or https, not '{scheme}'"
            ))),
        }
    }

    /// Whether fixture services replace the backend; off unless set.
    pub fn mock(&self) -> bool {
        self.mock.unwrap_or(false)
    }

    /// Whether lookup responses are cached; on unless set.
    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled.unwrap_or(true)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_seconds.map(Duration::from_secs)
    }

    /// # Errors
    ///
    /// Returns `INVALID_CONFIGURATION` for an unknown format name.
    pub fn log_format(&self) -> Result<LogFormat, AppError> {
        self.log_format
            .as_deref()
            .map_or(Ok(LogFormat::default()), str::parse)
    }
}

impl Default for ApiSettings {
    /// Every value at its default, ignoring the environment.
    fn default() -> Self {
        Self {
            api_base_url: None,
            mock: None,
            cache_enabled: None,
            cache_ttl_seconds: None,
            log_format: None,
        }
    }
}
