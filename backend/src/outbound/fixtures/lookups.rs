//! Lookup services served from bundled JSON fixtures.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::LookupService;
use crate::domain::{AppError, LookupCategory, LookupEntity};
use crate::outbound::api::dto::sanitized_content;

macro_rules! bundled {
    ($slug:literal) => {
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/fixtures/lookups/",
            $slug,
            ".json"
        ))
    };
}

/// The bundled `{ content: [...] }` document for `category`, if one ships.
pub fn bundled_lookup_json(category: LookupCategory) -> Option<&'static str> {
    let json = match category.slug() {
        "branches" => bundled!("branches"),
        "cities" => bundled!("cities"),
        "classifications" => bundled!("classifications"),
        "employment-equities" => bundled!("employment-equities"),
        "employment-tenures" => bundled!("employment-tenures"),
        "language-referral-types" => bundled!("language-referral-types"),
        "language-requirements" => bundled!("language-requirements"),
        "languages" => bundled!("languages"),
        "non-advertised-appointments" => bundled!("non-advertised-appointments"),
        "profile-statuses" => bundled!("profile-statuses"),
        "provinces" => bundled!("provinces"),
        "request-statuses" => bundled!("request-statuses"),
        "security-clearances" => bundled!("security-clearances"),
        "selection-process-types" => bundled!("selection-process-types"),
        "wfa-statuses" => bundled!("wfa-statuses"),
        "work-schedules" => bundled!("work-schedules"),
        _ => return None,
    };
    Some(json)
}

/// In-memory lookup service with the same contract as the HTTP one.
///
/// Entries are held in fixture order; `get_by_code` returns the first entry
/// carrying the code. Nothing is cached because nothing is fetched.
///
/// # Examples
/// ```
/// use vacman::domain::{LookupCategory, LookupModel};
/// use vacman::outbound::fixtures::FixtureLookupService;
///
/// let json = r#"{"content":[{"id":1,"code":"NONE","nameEn":"Not Applicable","nameFr":"Sans objet"}]}"#;
/// let service: FixtureLookupService<LookupModel> =
///     FixtureLookupService::from_json(LookupCategory::NON_ADVERTISED_APPOINTMENT, json)?;
/// assert_eq!(service.entries().len(), 1);
/// # Ok::<(), vacman::domain::AppError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FixtureLookupService<E> {
    category: LookupCategory,
    entries: Arc<[E]>,
}

impl<E: LookupEntity> FixtureLookupService<E> {
    pub fn from_entries(category: LookupCategory, entries: Vec<E>) -> Self {
        Self {
            category,
            entries: entries.into(),
        }
    }

    /// Parse a `{ content: [...] }` document, dropping null or malformed
    /// entries the same way the HTTP service does.
    ///
    /// # Errors
    ///
    /// Returns `UNEXPECTED_ERROR` when the document is not JSON or has no
    /// `content` array.
    pub fn from_json(category: LookupCategory, json: &str) -> Result<Self, AppError> {
        let context = format!("load {category} fixture");
        let envelope: Value = serde_json::from_str(json).map_err(|error| {
            AppError::unexpected(format!("Failed to {context}: {error}"))
        })?;
        let entries = sanitized_content(&envelope, &context)
            .map_err(|error| AppError::unexpected(error.message().to_owned()))?;
        Ok(Self::from_entries(category, entries))
    }

    /// Service over the fixture shipped with the crate for `category`.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_CONFIGURATION` for a category with no bundled fixture.
    pub fn bundled(category: LookupCategory) -> Result<Self, AppError> {
        let json = bundled_lookup_json(category).ok_or_else(|| {
            AppError::invalid_configuration(format!(
                "no bundled fixture for lookup category '{category}'"
            ))
        })?;
        Self::from_json(category, json)
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    /// Synchronous form of [`LookupService::get_by_id`].
    pub fn entry_by_id(&self, id: i64) -> Result<E, AppError> {
        self.entries
            .iter()
            .find(|entry| entry.id() == id)
            .cloned()
            .ok_or_else(|| self.category.not_found_by_id(id))
    }

    /// Synchronous form of [`LookupService::get_by_code`].
    pub fn entry_by_code(&self, code: &str) -> Result<E, AppError> {
        self.entries
            .iter()
            .find(|entry| entry.code() == code)
            .cloned()
            .ok_or_else(|| self.category.not_found_by_code(code))
    }

    /// Resolve an optional id from an update payload.
    pub(crate) fn resolve(&self, id: Option<i64>) -> Result<Option<E>, AppError> {
        id.map(|id| self.entry_by_id(id)).transpose()
    }
}

#[async_trait]
impl<E: LookupEntity> LookupService<E> for FixtureLookupService<E> {
    fn category(&self) -> LookupCategory {
        self.category
    }

    async fn list_all(&self) -> Result<Vec<E>, AppError> {
        Ok(self.entries.to_vec())
    }

    async fn get_by_id(&self, id: i64) -> Result<E, AppError> {
        self.entry_by_id(id)
    }

    async fn get_by_code(&self, code: &str) -> Result<E, AppError> {
        self.entry_by_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CityModel, ErrorCode, Language, LookupModel};
    use rstest::rstest;

    #[rstest]
    fn every_category_ships_a_fixture() {
        for category in LookupCategory::ALL {
            let service = FixtureLookupService::<LookupModel>::bundled(category)
                .unwrap_or_else(|error| panic!("{category}: {error}"));
            assert!(!service.entries().is_empty(), "{category} fixture is empty");
        }
    }

    #[rstest]
    fn bundled_cities_carry_their_province() {
        let cities = FixtureLookupService::<CityModel>::bundled(LookupCategory::CITY)
            .expect("cities fixture");
        let gatineau = cities.entry_by_code("GAT").expect("Gatineau");
        assert_eq!(gatineau.province_territory.code, "QC");
    }

    #[rstest]
    #[tokio::test]
    async fn first_entry_with_code_wins() {
        let service = FixtureLookupService::from_entries(
            LookupCategory::WORK_SCHEDULE,
            vec![
                LookupModel::new(1, "FT", "Full-time", "Temps plein"),
                LookupModel::new(2, "FT", "Duplicate", "Doublon"),
            ],
        );
        assert_eq!(service.get_by_code("FT").await.expect("found").id, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_entries_use_category_code() {
        let service =
            FixtureLookupService::<LookupModel>::bundled(LookupCategory::WFA_STATUS).expect("fixture");
        let err = service.get_by_id(404).await.expect_err("absent");
        assert_eq!(err.code(), ErrorCode::NoWfaStatusFound);
        assert_eq!(err.message(), "WFA status with id '404' not found.");
        assert!(service.find_localized_by_code("NOPE", Language::Fr).await.is_none());
    }

    #[rstest]
    fn malformed_documents_are_rejected() {
        let err = FixtureLookupService::<LookupModel>::from_json(LookupCategory::BRANCH, "[]")
            .expect_err("no content array");
        assert_eq!(err.code(), ErrorCode::UnexpectedError);
    }
}
