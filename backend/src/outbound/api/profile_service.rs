//! Profile service backed by the VacMan backend API.

use std::sync::Arc;

use async_trait::async_trait;

use super::dto::ContentEnvelope;
use super::{encode_query, json_body, not_found_as};
use crate::domain::ports::{ApiGateway, ApiRequest, ProfileService};
use crate::domain::{AppError, ErrorCode, Profile, ProfilePutModel, ProfileQuery, StatusUpdate};

/// Reads and updates profiles through the shared [`ApiGateway`].
#[derive(Clone)]
pub struct HttpProfileService {
    gateway: Arc<dyn ApiGateway>,
}

impl HttpProfileService {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self { gateway }
    }

    async fn fetch_profile(&self, request: ApiRequest) -> Result<Profile, AppError> {
        let context = request.context.clone();
        self.gateway.send(request).await?.json(&context)
    }
}

fn profile_not_found(id: i64) -> impl FnOnce(AppError) -> AppError {
    move |error| {
        not_found_as(
            error,
            ErrorCode::ProfileNotFound,
            format!("Profile with id '{id}' not found."),
        )
    }
}

#[async_trait]
impl ProfileService for HttpProfileService {
    async fn list_profiles(
        &self,
        query: &ProfileQuery,
        access_token: &str,
    ) -> Result<Vec<Profile>, AppError> {
        let context = "retrieve profiles";
        let path = format!("/profiles{}", encode_query(&query.query_pairs()));
        let response = self
            .gateway
            .send(ApiRequest::get(path, context).with_bearer_token(access_token))
            .await?;
        let envelope: ContentEnvelope<Profile> = response.json(context)?;
        Ok(envelope.content)
    }

    async fn get_profile_by_id(&self, id: i64, access_token: &str) -> Result<Profile, AppError> {
        let request = ApiRequest::get(
            format!("/profiles/{id}"),
            format!("retrieve profile with id '{id}'"),
        )
        .with_bearer_token(access_token);
        self.fetch_profile(request)
            .await
            .map_err(profile_not_found(id))
    }

    async fn get_current_user_profile(&self, access_token: &str) -> Result<Profile, AppError> {
        let request = ApiRequest::get("/profiles/me", "retrieve current user profile")
            .with_bearer_token(access_token);
        self.fetch_profile(request).await.map_err(|error| {
            not_found_as(
                error,
                ErrorCode::ProfileNotFound,
                "Profile for the current user not found.",
            )
        })
    }

    async fn create_current_user_profile(&self, access_token: &str) -> Result<Profile, AppError> {
        let request = ApiRequest::post("/profiles/me", "register current user profile")
            .with_bearer_token(access_token);
        self.fetch_profile(request).await
    }

    async fn update_profile(
        &self,
        id: i64,
        body: &ProfilePutModel,
        access_token: &str,
    ) -> Result<Profile, AppError> {
        let context = format!("update profile with id '{id}'");
        let request = ApiRequest::put(format!("/profiles/{id}"), context.as_str())
            .with_bearer_token(access_token)
            .with_json(json_body(body, &context)?);
        self.fetch_profile(request)
            .await
            .map_err(profile_not_found(id))
    }

    async fn update_profile_status(
        &self,
        id: i64,
        status: &StatusUpdate,
        access_token: &str,
    ) -> Result<(), AppError> {
        let context = format!("update status of profile with id '{id}'");
        let request = ApiRequest::put(format!("/profiles/{id}/status"), context.as_str())
            .with_bearer_token(access_token)
            .with_json(json_body(status, &context)?);
        self.gateway
            .send(request)
            .await
            .map(drop)
            .map_err(profile_not_found(id))
    }
}
