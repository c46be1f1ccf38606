//! Employee profile aggregate and its update payloads.
//!
//! Profiles reference lookup records by value as the backend returns them.
//! The backend is the source of truth; nothing here enforces consistency
//! between the referenced lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CityModel, LookupModel};

/// Minimal identity of a user referenced from a profile or request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub business_email_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub profile_user: UserSummary,
    #[serde(default)]
    pub profile_status: Option<LookupModel>,
    #[serde(default)]
    pub classification: Option<LookupModel>,
    #[serde(default)]
    pub substantive_city: Option<CityModel>,
    #[serde(default)]
    pub wfa_status: Option<LookupModel>,
    #[serde(default)]
    pub language_of_correspondence: Option<LookupModel>,
    #[serde(default)]
    pub has_consented_to_privacy_terms: Option<bool>,
    #[serde(default)]
    pub additional_comment: Option<String>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// Body of `PUT /profiles/{id}`. Lookups are referenced by id; absent fields
/// are omitted from the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePutModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wfa_status_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_of_correspondence_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_consented_to_privacy_terms: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_comment: Option<String>,
}

/// Status transition payload shared by profiles and requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub code: String,
}

impl StatusUpdate {
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            id: None,
            code: code.into(),
        }
    }
}

/// Filters for `GET /profiles`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileQuery {
    /// Restrict to active (`true`) or inactive (`false`) profiles.
    pub active: Option<bool>,
    /// HR advisor filter; the backend accepts a user id or `me`.
    pub hr_advisor: Option<String>,
}

impl ProfileQuery {
    /// Query-string pairs in the backend's parameter spelling.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(active) = self.active {
            pairs.push(("active", active.to_string()));
        }
        if let Some(advisor) = &self.hr_advisor {
            pairs.push(("hr-advisor", advisor.clone()));
        }
        pairs
    }

    /// Whether `profile` satisfies the filters that can be checked locally.
    ///
    /// A profile is active unless its status code is `ARCHIVED`.
    pub fn matches(&self, profile: &Profile) -> bool {
        let Some(active) = self.active else {
            return true;
        };
        let archived = profile
            .profile_status
            .as_ref()
            .is_some_and(|status| status.code == ARCHIVED_STATUS_CODE);
        active != archived
    }
}

const ARCHIVED_STATUS_CODE: &str = "ARCHIVED";
