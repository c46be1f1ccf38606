//! Driving port for employee profiles.
//!
//! Every call acts on behalf of an authenticated user and forwards that
//! user's access token to the backend.

use async_trait::async_trait;

use super::lookup_service::into_option_with;
use crate::domain::{AppError, Profile, ProfilePutModel, ProfileQuery, StatusUpdate};

#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn list_profiles(
        &self,
        query: &ProfileQuery,
        access_token: &str,
    ) -> Result<Vec<Profile>, AppError>;

    /// # Errors
    ///
    /// Returns `PROFILE_NOT_FOUND` when the backend has no such profile.
    async fn get_profile_by_id(&self, id: i64, access_token: &str) -> Result<Profile, AppError>;

    /// Like [`Self::get_profile_by_id`] but never fails; `None` when absent.
    async fn find_profile_by_id(&self, id: i64, access_token: &str) -> Option<Profile> {
        into_option_with(self.get_profile_by_id(id, access_token).await, "profile")
    }

    /// The profile of the user the token belongs to.
    async fn get_current_user_profile(&self, access_token: &str) -> Result<Profile, AppError>;

    /// Create a profile for the user the token belongs to.
    async fn create_current_user_profile(&self, access_token: &str) -> Result<Profile, AppError>;

    async fn update_profile(
        &self,
        id: i64,
        body: &ProfilePutModel,
        access_token: &str,
    ) -> Result<Profile, AppError>;

    async fn update_profile_status(
        &self,
        id: i64,
        status: &StatusUpdate,
        access_token: &str,
    ) -> Result<(), AppError>;
}
