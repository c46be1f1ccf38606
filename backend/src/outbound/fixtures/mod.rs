//! Fixture-backed service implementations.
//!
//! These adapters satisfy the same ports as the HTTP ones but read bundled
//! JSON shipped under `backend/fixtures/`, so the service layer can run
//! without a backend. Lookup fixtures are read-only; profile and request
//! fixtures are copied into memory per service instance and may be mutated.

mod lookups;
mod profiles;
mod requests;

use serde::de::DeserializeOwned;

use crate::domain::{AppError, UserSummary};
use crate::outbound::api::dto::ContentEnvelope;

pub use lookups::{FixtureLookupService, bundled_lookup_json};
pub use profiles::FixtureProfileService;
pub use requests::FixtureRequestService;

/// The user fixture services act on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureUser(UserSummary);

impl FixtureUser {
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self(UserSummary {
            id,
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            business_email_address: None,
        })
    }

    pub fn summary(&self) -> &UserSummary {
        &self.0
    }
}

impl Default for FixtureUser {
    /// The first user in the bundled profiles.
    fn default() -> Self {
        Self(UserSummary {
            id: 1,
            first_name: Some("Jane".to_owned()),
            last_name: Some("Doe".to_owned()),
            business_email_address: Some("jane.doe@example.gc.ca".to_owned()),
        })
    }
}

impl From<UserSummary> for FixtureUser {
    fn from(value: UserSummary) -> Self {
        Self(value)
    }
}

fn decode_bundle<T: DeserializeOwned>(json: &str, what: &str) -> Result<Vec<T>, AppError> {
    serde_json::from_str::<ContentEnvelope<T>>(json)
        .map(|envelope| envelope.content)
        .map_err(|error| AppError::unexpected(format!("Failed to load {what} fixture: {error}")))
}
