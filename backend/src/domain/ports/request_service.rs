//! Driving port for vacancy referral requests.

use async_trait::async_trait;

use super::lookup_service::into_option_with;
use crate::domain::{AppError, Request, RequestPutModel, RequestQuery, StatusUpdate};

#[async_trait]
pub trait RequestService: Send + Sync {
    async fn list_requests(
        &self,
        query: &RequestQuery,
        access_token: &str,
    ) -> Result<Vec<Request>, AppError>;

    /// # Errors
    ///
    /// Returns `REQUEST_NOT_FOUND` when the backend has no such request.
    async fn get_request_by_id(&self, id: i64, access_token: &str) -> Result<Request, AppError>;

    /// Like [`Self::get_request_by_id`] but never fails; `None` when absent.
    async fn find_request_by_id(&self, id: i64, access_token: &str) -> Option<Request> {
        into_option_with(self.get_request_by_id(id, access_token).await, "request")
    }

    /// Open a new request owned by the user the token belongs to.
    async fn create_request(&self, access_token: &str) -> Result<Request, AppError>;

    async fn update_request(
        &self,
        id: i64,
        body: &RequestPutModel,
        access_token: &str,
    ) -> Result<Request, AppError>;

    async fn update_request_status(
        &self,
        id: i64,
        status: &StatusUpdate,
        access_token: &str,
    ) -> Result<(), AppError>;
}
