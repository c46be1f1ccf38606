//! The uniform error value returned by every service call.
//!
//! `AppError` is transport agnostic: it records what failed (`code`), a
//! human-readable message, and, when the failure came from the backend API,
//! the HTTP status it answered with. Errors raised inside a
//! [`CorrelationId`] scope remember that identifier.

use serde::{Deserialize, Serialize};

use super::CorrelationId;

/// Stable machine-readable application error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Failure with no more specific classification.
    UnexpectedError,
    /// Settings could not be turned into working services.
    InvalidConfiguration,
    /// The backend API answered with a non-success status.
    VacmanApiError,
    /// The backend API could not be reached.
    VacmanApiNetworkError,
    /// The backend API answered with a body that could not be decoded.
    VacmanApiDecodeError,
    /// No profile matches the requested id or user.
    ProfileNotFound,
    /// No referral request matches the requested id.
    RequestNotFound,
    /// Branch lookup miss.
    NoBranchFound,
    /// City lookup miss.
    NoCityFound,
    /// Classification lookup miss.
    NoClassificationFound,
    /// Employment equity lookup miss.
    NoEmploymentEquityFound,
    /// Employment tenure lookup miss.
    NoEmploymentTenureFound,
    /// Language lookup miss.
    NoLanguageFound,
    /// Language referral type lookup miss.
    NoLanguageReferralTypeFound,
    /// Language requirement lookup miss.
    NoLanguageRequirementFound,
    /// Non-advertised appointment lookup miss.
    NoNonAdvertisedAppointmentFound,
    /// Profile status lookup miss.
    NoProfileStatusFound,
    /// Province or territory lookup miss.
    NoProvinceFound,
    /// Request status lookup miss.
    NoRequestStatusFound,
    /// Security clearance lookup miss.
    NoSecurityClearanceFound,
    /// Selection process type lookup miss.
    NoSelectionProcessTypeFound,
    /// WFA status lookup miss.
    NoWfaStatusFound,
    /// Work schedule lookup miss.
    NoWorkScheduleFound,
}

impl ErrorCode {
    /// The wire spelling of the code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnexpectedError => "UNEXPECTED_ERROR",
            Self::InvalidConfiguration => "INVALID_CONFIGURATION",
            Self::VacmanApiError => "VACMAN_API_ERROR",
            Self::VacmanApiNetworkError => "VACMAN_API_NETWORK_ERROR",
            Self::VacmanApiDecodeError => "VACMAN_API_DECODE_ERROR",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::RequestNotFound => "REQUEST_NOT_FOUND",
            Self::NoBranchFound => "NO_BRANCH_FOUND",
            Self::NoCityFound => "NO_CITY_FOUND",
            Self::NoClassificationFound => "NO_CLASSIFICATION_FOUND",
            Self::NoEmploymentEquityFound => "NO_EMPLOYMENT_EQUITY_FOUND",
            Self::NoEmploymentTenureFound => "NO_EMPLOYMENT_TENURE_FOUND",
            Self::NoLanguageFound => "NO_LANGUAGE_FOUND",
            Self::NoLanguageReferralTypeFound => "NO_LANGUAGE_REFERRAL_TYPE_FOUND",
            Self::NoLanguageRequirementFound => "NO_LANGUAGE_REQUIREMENT_FOUND",
            Self::NoNonAdvertisedAppointmentFound => "NO_NON_ADVERTISED_APPOINTMENT_FOUND",
            Self::NoProfileStatusFound => "NO_PROFILE_STATUS_FOUND",
            Self::NoProvinceFound => "NO_PROVINCE_FOUND",
            Self::NoRequestStatusFound => "NO_REQUEST_STATUS_FOUND",
            Self::NoSecurityClearanceFound => "NO_SECURITY_CLEARANCE_FOUND",
            Self::NoSelectionProcessTypeFound => "NO_SELECTION_PROCESS_TYPE_FOUND",
            Self::NoWfaStatusFound => "NO_WFA_STATUS_FOUND",
            Self::NoWorkScheduleFound => "NO_WORK_SCHEDULE_FOUND",
        }
    }

    /// Whether the code reports an absent entity rather than a failure.
    #[must_use]
    pub fn is_not_found(self) -> bool {
        !matches!(
            self,
            Self::UnexpectedError
                | Self::InvalidConfiguration
                | Self::VacmanApiError
                | Self::VacmanApiNetworkError
                | Self::VacmanApiDecodeError
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use vacman::domain::{AppError, ErrorCode};
///
/// let err = AppError::new(ErrorCode::NoBranchFound, "Branch 7 not found.");
/// assert!(err.is_not_found());
/// assert!(err.http_status().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AppErrorDto", into = "AppErrorDto")]
pub struct AppError {
    code: ErrorCode,
    message: String,
    http_status: Option<u16>,
    correlation_id: Option<String>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppErrorValidationError {
    EmptyMessage,
}

impl std::fmt::Display for AppErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for AppErrorValidationError {}

impl AppError {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    ///
    /// The correlation identifier in scope, if any, is recorded.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, AppErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(AppErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            http_status: None,
            correlation_id: CorrelationId::current().map(|id| id.to_string()),
        })
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// HTTP status the backend answered with, when the error came from one.
    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn is_not_found(&self) -> bool {
        self.code.is_not_found()
    }

    /// Attach the HTTP status the backend answered with.
    #[must_use]
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Attach an explicit correlation identifier.
    #[must_use]
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// The backend could not be reached while performing `context`.
    pub fn network(context: &str, detail: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::VacmanApiNetworkError,
            format!("Network error while attempting to {context}: {detail}"),
        )
    }

    /// The backend answered `status` while performing `context`.
    pub fn api_status(context: &str, status: u16, body_preview: &str) -> Self {
        let message = if body_preview.is_empty() {
            format!("Failed to {context}. Server responded with status {status}.")
        } else {
            format!("Failed to {context}. Server responded with status {status}: {body_preview}")
        };
        Self::new(ErrorCode::VacmanApiError, message).with_http_status(status)
    }

    /// The backend answered `status` with a body that did not decode.
    pub fn decode(context: &str, status: u16, detail: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::VacmanApiDecodeError,
            format!("Failed to decode response while attempting to {context}: {detail}"),
        )
        .with_http_status(status)
    }

    /// Convenience constructor for [`ErrorCode::UnexpectedError`].
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnexpectedError, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidConfiguration`].
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfiguration, message)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    http_status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl From<AppError> for AppErrorDto {
    fn from(value: AppError) -> Self {
        Self {
            code: value.code,
            message: value.message,
            http_status: value.http_status,
            correlation_id: value.correlation_id,
        }
    }
}

impl TryFrom<AppErrorDto> for AppError {
    type Error = AppErrorValidationError;

    fn try_from(value: AppErrorDto) -> Result<Self, Self::Error> {
        let AppErrorDto {
            code,
            message,
            http_status,
            correlation_id,
        } = value;

        let mut error = AppError::try_new(code, message)?;
        error.http_status = http_status;
        // A decoded error keeps only the identifier it was serialised with.
        error.correlation_id = correlation_id;
        Ok(error)
    }
}
