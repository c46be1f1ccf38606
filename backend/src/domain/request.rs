//! Vacancy referral request aggregate and its update payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LookupModel, UserSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: i64,
    #[serde(default)]
    pub status: Option<LookupModel>,
    #[serde(default)]
    pub classification: Option<LookupModel>,
    #[serde(default)]
    pub work_unit: Option<LookupModel>,
    #[serde(default)]
    pub selection_process_type: Option<LookupModel>,
    #[serde(default)]
    pub language_requirement: Option<LookupModel>,
    #[serde(default)]
    pub security_clearance: Option<LookupModel>,
    #[serde(default)]
    pub work_schedule: Option<LookupModel>,
    #[serde(default)]
    pub english_title: Option<String>,
    #[serde(default)]
    pub french_title: Option<String>,
    #[serde(default)]
    pub position_number: Option<String>,
    #[serde(default)]
    pub hiring_manager: Option<UserSummary>,
    #[serde(default)]
    pub hr_advisor: Option<UserSummary>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified_date: Option<DateTime<Utc>>,
}

/// Body of `PUT /requests/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPutModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_unit_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_process_type_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_requirement_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_clearance_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_schedule_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub french_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr_advisor_id: Option<i64>,
}

/// Filters for `GET /requests`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestQuery {
    /// HR advisor filter; the backend accepts a user id or `me`.
    pub hr_advisor: Option<String>,
    /// Keep only requests whose status has one of these ids.
    pub status_ids: Vec<i64>,
}

impl RequestQuery {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(advisor) = &self.hr_advisor {
            pairs.push(("hr-advisor", advisor.clone()));
        }
        pairs.extend(self.status_ids.iter().map(|id| ("status", id.to_string())));
        pairs
    }

    /// Whether `request` satisfies the status filter.
    pub fn matches(&self, request: &Request) -> bool {
        if self.status_ids.is_empty() {
            return true;
        }
        request
            .status
            .as_ref()
            .is_some_and(|status| self.status_ids.contains(&status.id))
    }
}
