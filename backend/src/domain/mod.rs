//! Domain primitives, records and ports.
//!
//! Purpose: define the typed records exchanged with the VacMan backend API,
//! the uniform [`AppError`] value, and the ports service implementations
//! plug into. Types here know nothing about HTTP or fixtures.
//!
//! Public surface:
//! - `AppError` / `ErrorCode`: error currency of every service call.
//! - `Language`: display language for localisation projections.
//! - `LookupModel`, `CityModel` and their localised forms; `LookupCategory`.
//! - `Profile`, `Request` and their update payloads.
//! - `CorrelationId`: task-local identifier forwarded to the backend.

mod correlation_id;
pub mod error;
mod language;
mod lookup;
pub mod ports;
mod profile;
mod request;

pub use self::correlation_id::CorrelationId;
pub use self::error::{AppError, AppErrorValidationError, ErrorCode};
pub use self::language::Language;
pub use self::lookup::{
    CityModel, LocalizedCityModel, LocalizedLookupModel, LookupCategory, LookupEntity,
    LookupModel,
};
pub use self::profile::{Profile, ProfilePutModel, ProfileQuery, StatusUpdate, UserSummary};
pub use self::request::{Request, RequestPutModel, RequestQuery};

/// Result alias used across the service layer.
///
/// # Examples
/// ```
/// use vacman::domain::{AppError, AppResult};
///
/// fn load() -> AppResult<u32> {
///     Err(AppError::unexpected("nope"))
/// }
/// assert!(load().is_err());
/// ```
pub type AppResult<T> = Result<T, AppError>;
