//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LookupService`, `ProfileService`, `RequestService`) are
//! what callers consume; driven ports (`ApiGateway`, `LookupCache`) are what
//! the HTTP-backed implementations depend on.

mod macros;
pub(crate) use macros::define_port_error;

mod api_gateway;
mod cache_key;
mod lookup_cache;
mod lookup_service;
mod profile_service;
mod request_service;

#[cfg(test)]
pub use api_gateway::MockApiGateway;
pub use api_gateway::{ApiGateway, ApiMethod, ApiRequest, ApiResponse};
pub use cache_key::{LookupCacheKey, LookupCacheKeyValidationError};
pub use lookup_cache::{LookupCache, LookupCacheError};
pub use lookup_service::LookupService;
pub use profile_service::ProfileService;
pub use request_service::RequestService;
