//! Request service backed by the VacMan backend API.

use std::sync::Arc;

use async_trait::async_trait;

use super::dto::ContentEnvelope;
use super::{encode_query, json_body, not_found_as};
use crate::domain::ports::{ApiGateway, ApiRequest, RequestService};
use crate::domain::{AppError, ErrorCode, Request, RequestPutModel, RequestQuery, StatusUpdate};

#[derive(Clone)]
pub struct HttpRequestService {
    gateway: Arc<dyn ApiGateway>,
}

impl HttpRequestService {
    pub fn new(gateway: Arc<dyn ApiGateway>) -> Self {
        Self { gateway }
    }

    async fn fetch_request(&self, request: ApiRequest) -> Result<Request, AppError> {
        let context = request.context.clone();
        self.gateway.send(request).await?.json(&context)
    }
}

fn request_not_found(id: i64) -> impl FnOnce(AppError) -> AppError {
    move |error| {
        not_found_as(
            error,
            ErrorCode::RequestNotFound,
            format!("Request with id '{id}' not found."),
        )
    }
}

#[async_trait]
impl RequestService for HttpRequestService {
    async fn list_requests(
        &self,
        query: &RequestQuery,
        access_token: &str,
    ) -> Result<Vec<Request>, AppError> {
        let context = "retrieve requests";
        let path = format!("/requests{}", encode_query(&query.query_pairs()));
        let response = self
            .gateway
            .send(ApiRequest::get(path, context).with_bearer_token(access_token))
            .await?;
        let envelope: ContentEnvelope<Request> = response.json(context)?;
        Ok(envelope.content)
    }

    async fn get_request_by_id(&self, id: i64, access_token: &str) -> Result<Request, AppError> {
        let request = ApiRequest::get(
            format!("/requests/{id}"),
            format!("retrieve request with id '{id}'"),
        )
        .with_bearer_token(access_token);
        self.fetch_request(request)
            .await
            .map_err(request_not_found(id))
    }

    async fn create_request(&self, access_token: &str) -> Result<Request, AppError> {
        let request =
            ApiRequest::post("/requests/me", "create request").with_bearer_token(access_token);
        self.fetch_request(request).await
    }

    async fn update_request(
        &self,
        id: i64,
        body: &RequestPutModel,
        access_token: &str,
    ) -> Result<Request, AppError> {
        let context = format!("update request with id '{id}'");
        let request = ApiRequest::put(format!("/requests/{id}"), context.as_str())
            .with_bearer_token(access_token)
            .with_json(json_body(body, &context)?);
        self.fetch_request(request)
            .await
            .map_err(request_not_found(id))
    }

    async fn update_request_status(
        &self,
        id: i64,
        status: &StatusUpdate,
        access_token: &str,
    ) -> Result<(), AppError> {
        let context = format!("update status of request with id '{id}'");
        let request = ApiRequest::put(format!("/requests/{id}/status"), context.as_str())
            .with_bearer_token(access_token)
            .with_json(json_body(status, &context)?);
        self.gateway
            .send(request)
            .await
            .map(drop)
            .map_err(request_not_found(id))
    }
}
