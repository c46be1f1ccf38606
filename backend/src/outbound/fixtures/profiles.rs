//! Profile service over an in-memory copy of the bundled profiles.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::debug;

use super::{FixtureLookupService, FixtureUser, decode_bundle};
use crate::domain::ports::ProfileService;
use crate::domain::{
    AppError, CityModel, ErrorCode, LookupCategory, LookupModel, Profile, ProfilePutModel,
    ProfileQuery, StatusUpdate,
};

const PROFILES_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/profiles.json"));
const NEW_PROFILE_STATUS: &str = "INCOMPLETE";

/// Lookups an update payload may reference.
struct ProfileLookups {
    classifications: FixtureLookupService<LookupModel>,
    cities: FixtureLookupService<CityModel>,
    wfa_statuses: FixtureLookupService<LookupModel>,
    languages: FixtureLookupService<LookupModel>,
    statuses: FixtureLookupService<LookupModel>,
}

impl ProfileLookups {
    fn bundled() -> Result<Self, AppError> {
        Ok(Self {
            classifications: FixtureLookupService::bundled(LookupCategory::CLASSIFICATION)?,
            cities: FixtureLookupService::bundled(LookupCategory::CITY)?,
            wfa_statuses: FixtureLookupService::bundled(LookupCategory::WFA_STATUS)?,
            languages: FixtureLookupService::bundled(LookupCategory::LANGUAGE)?,
            statuses: FixtureLookupService::bundled(LookupCategory::PROFILE_STATUS)?,
        })
    }
}

/// Profile service for running without a backend.
///
/// Access tokens are accepted but ignored; "the current user" is the
/// [`FixtureUser`] the service was built with. Mutations change this
/// instance's copy only.
pub struct FixtureProfileService {
    profiles: Mutex<Vec<Profile>>,
    lookups: ProfileLookups,
    current_user: FixtureUser,
    clock: Arc<dyn Clock>,
}

impl FixtureProfileService {
    /// Service seeded from the bundled profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled fixture fails to decode.
    pub fn bundled() -> Result<Self, AppError> {
        Ok(Self {
            profiles: Mutex::new(decode_bundle(PROFILES_JSON, "profiles")?),
            lookups: ProfileLookups::bundled()?,
            current_user: FixtureUser::default(),
            clock: Arc::new(DefaultClock),
        })
    }

    #[must_use]
    pub fn with_current_user(mut self, user: FixtureUser) -> Self {
        self.current_user = user;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Profile>>, AppError> {
        self.profiles
            .lock()
            .map_err(|_| AppError::unexpected("profile fixture store is poisoned"))
    }

    fn with_profile<T>(
        &self,
        id: i64,
        apply: impl FnOnce(&mut Profile) -> T,
    ) -> Result<T, AppError> {
        let mut profiles = self.lock()?;
        let profile = profiles
            .iter_mut()
            .find(|profile| profile.id == id)
            .ok_or_else(|| profile_not_found(id))?;
        Ok(apply(profile))
    }
}

fn profile_not_found(id: i64) -> AppError {
    AppError::new(
        ErrorCode::ProfileNotFound,
        format!("Profile with id '{id}' not found."),
    )
}

#[async_trait]
impl ProfileService for FixtureProfileService {
    async fn list_profiles(
        &self,
        query: &ProfileQuery,
        _access_token: &str,
    ) -> Result<Vec<Profile>, AppError> {
        let profiles = self.lock()?;
        Ok(profiles
            .iter()
            .filter(|profile| query.matches(profile))
            .cloned()
            .collect())
    }

    async fn get_profile_by_id(&self, id: i64, _access_token: &str) -> Result<Profile, AppError> {
        self.with_profile(id, |profile| profile.clone())
    }

    async fn get_current_user_profile(&self, _access_token: &str) -> Result<Profile, AppError> {
        let user_id = self.current_user.summary().id;
        self.lock()?
            .iter()
            .find(|profile| profile.profile_user.id == user_id)
            .cloned()
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ProfileNotFound,
                    "Profile for the current user not found.",
                )
            })
    }

    async fn create_current_user_profile(&self, _access_token: &str) -> Result<Profile, AppError> {
        let status = self.lookups.statuses.entry_by_code(NEW_PROFILE_STATUS)?;
        let now = self.clock.utc();
        let user = self.current_user.summary();
        let mut profiles = self.lock()?;
        // One profile per user: repeat registrations return the existing one.
        if let Some(existing) = profiles
            .iter()
            .find(|profile| profile.profile_user.id == user.id)
        {
            debug!(profile_id = existing.id, "current user already has a fixture profile");
            return Ok(existing.clone());
        }
        let id = profiles.iter().map(|profile| profile.id).max().unwrap_or(0) + 1;
        let profile = Profile {
            id,
            profile_user: user.clone(),
            profile_status: Some(status),
            classification: None,
            substantive_city: None,
            wfa_status: None,
            language_of_correspondence: None,
            has_consented_to_privacy_terms: Some(false),
            additional_comment: None,
            created_date: Some(now),
            last_modified_date: Some(now),
        };
        profiles.push(profile.clone());
        debug!(profile_id = id, "created fixture profile");
        Ok(profile)
    }

    async fn update_profile(
        &self,
        id: i64,
        body: &ProfilePutModel,
        _access_token: &str,
    ) -> Result<Profile, AppError> {
        let classification = self.lookups.classifications.resolve(body.classification_id)?;
        let city = self.lookups.cities.resolve(body.city_id)?;
        let wfa_status = self.lookups.wfa_statuses.resolve(body.wfa_status_id)?;
        let language = self
            .lookups
            .languages
            .resolve(body.language_of_correspondence_id)?;
        let now = self.clock.utc();

        self.with_profile(id, |profile| {
            if classification.is_some() {
                profile.classification = classification;
            }
            if city.is_some() {
                profile.substantive_city = city;
            }
            if wfa_status.is_some() {
                profile.wfa_status = wfa_status;
            }
            if language.is_some() {
                profile.language_of_correspondence = language;
            }
            if let Some(consent) = body.has_consented_to_privacy_terms {
                profile.has_consented_to_privacy_terms = Some(consent);
            }
            if let Some(comment) = &body.additional_comment {
                profile.additional_comment = Some(comment.clone());
            }
            profile.last_modified_date = Some(now);
            profile.clone()
        })
    }

    async fn update_profile_status(
        &self,
        id: i64,
        status: &StatusUpdate,
        _access_token: &str,
    ) -> Result<(), AppError> {
        let resolved = match status.id {
            Some(status_id) => self.lookups.statuses.entry_by_id(status_id)?,
            None => self.lookups.statuses.entry_by_code(&status.code)?,
        };
        let now = self.clock.utc();
        self.with_profile(id, |profile| {
            profile.profile_status = Some(resolved);
            profile.last_modified_date = Some(now);
        })
    }
}
