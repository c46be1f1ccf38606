//! Generic lookup service backed by the API gateway and a shared cache.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use url::form_urlencoded;

use super::NOT_FOUND;
use super::dto::sanitized_content;
use crate::domain::ports::{ApiGateway, ApiRequest, LookupCache, LookupCacheKey, LookupService};
use crate::domain::{AppError, LookupCategory, LookupEntity};

/// Serves one [`LookupCategory`] from the backend API.
///
/// Full collections read through the cache keyed by their endpoint path, so
/// repeated listings within the cache lifetime cost one backend call. Code
/// queries always go to the backend; their keys come from caller input and
/// would grow the cache without bound.
pub struct HttpLookupService<E> {
    category: LookupCategory,
    gateway: Arc<dyn ApiGateway>,
    cache: Arc<dyn LookupCache>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: LookupEntity> HttpLookupService<E> {
    pub fn new(
        category: LookupCategory,
        gateway: Arc<dyn ApiGateway>,
        cache: Arc<dyn LookupCache>,
    ) -> Self {
        Self {
            category,
            gateway,
            cache,
            _entity: PhantomData,
        }
    }

    async fn fetch_cached(&self, path: String, context: &str) -> Result<Arc<Value>, AppError> {
        let key = LookupCacheKey::new(path.as_str()).map_err(|error| {
            AppError::unexpected(format!("invalid lookup endpoint '{path}': {error}"))
        })?;

        match self.cache.get(&key).await {
            Ok(Some(value)) => {
                debug!(category = %self.category, key = %key, "lookup cache hit");
                return Ok(value);
            }
            Ok(None) => {}
            Err(error) => warn!(category = %self.category, %error, "lookup cache read failed"),
        }

        let value = Arc::new(self.fetch(path, context).await?);
        if let Err(error) = self.cache.put(&key, Arc::clone(&value)).await {
            warn!(category = %self.category, %error, "lookup cache write failed");
        }
        Ok(value)
    }

    async fn fetch(&self, path: String, context: &str) -> Result<Value, AppError> {
        let response = self.gateway.send(ApiRequest::get(path, context)).await?;
        response.json(context)
    }
}

#[async_trait]
impl<E: LookupEntity> LookupService<E> for HttpLookupService<E> {
    fn category(&self) -> LookupCategory {
        self.category
    }

    async fn list_all(&self) -> Result<Vec<E>, AppError> {
        let context = self.category.list_context();
        let envelope = self
            .fetch_cached(self.category.endpoint().to_owned(), &context)
            .await?;
        sanitized_content(&envelope, &context)
    }

    async fn get_by_code(&self, code: &str) -> Result<E, AppError> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("code", code)
            .finish();
        let path = format!("{}?{query}", self.category.endpoint());
        let context = format!(
            "retrieve {} with code '{code}'",
            self.category.entity_name().to_lowercase()
        );

        let envelope = match self.fetch(path, &context).await {
            Ok(envelope) => envelope,
            Err(error) if error.http_status() == Some(NOT_FOUND) => {
                return Err(self
                    .category
                    .not_found_by_code(code)
                    .with_http_status(NOT_FOUND));
            }
            Err(error) => return Err(error),
        };

        // The backend is assumed to keep codes unique; if it reports several
        // matches the first one wins.
        sanitized_content::<E>(&envelope, &context)?
            .into_iter()
            .next()
            .ok_or_else(|| self.category.not_found_by_code(code))
    }
}

#[cfg(test)]
mod tests {
    //! Engine behaviour against a mocked gateway.

    use super::*;
    use crate::domain::ports::{ApiResponse, MockApiGateway};
    use crate::domain::{ErrorCode, Language, LookupModel};
    use crate::outbound::cache::{DisabledLookupCache, InMemoryLookupCache};
    use mockall::predicate::function;
    use rstest::rstest;
    use serde_json::json;

    fn ok(body: Value) -> Result<ApiResponse, AppError> {
        Ok(ApiResponse {
            status: 200,
            body: serde_json::to_vec(&body).expect("serialise body"),
        })
    }

    fn branches() -> Value {
        json!({
            "content": [
                { "id": 1, "code": "HRSD", "nameEn": "Human Resources", "nameFr": "Ressources humaines" },
                { "id": 2, "code": "CFOB", "nameEn": "Chief Financial Officer", "nameFr": "Dirigeant principal des finances" },
            ]
        })
    }

    fn service(
        gateway: MockApiGateway,
        cache: Arc<dyn LookupCache>,
    ) -> HttpLookupService<LookupModel> {
        HttpLookupService::new(LookupCategory::BRANCH, Arc::new(gateway), cache)
    }

    #[rstest]
    #[tokio::test]
    async fn list_all_reads_through_the_cache() {
        let mut gateway = MockApiGateway::new();
        gateway
            .expect_send()
            .with(function(|request: &ApiRequest| request.path == "/codes/branches"))
            .times(1)
            .returning(|_| ok(branches()));
        let service = service(gateway, Arc::new(InMemoryLookupCache::new()));

        let first = service.list_all().await.expect("listed");
        let second = service.list_all().await.expect("listed from cache");
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn get_by_code_takes_first_of_several_matches() {
        let mut gateway = MockApiGateway::new();
        gateway
            .expect_send()
            .with(function(|request: &ApiRequest| {
                request.path == "/codes/branches?code=HRSD"
            }))
            .times(1)
            .returning(|_| {
                ok(json!({
                    "content": [
                        { "id": 7, "code": "HRSD", "nameEn": "First", "nameFr": "Premier" },
                        { "id": 8, "code": "HRSD", "nameEn": "Second", "nameFr": "Second" },
                    ]
                }))
            });
        let service = service(gateway, Arc::new(DisabledLookupCache));

        let branch = service.get_by_code("HRSD").await.expect("found");
        assert_eq!(branch.id, 7);
    }

    #[rstest]
    #[case::empty_content(ok(json!({ "content": [] })))]
    #[case::http_404(Err(AppError::api_status("retrieve branch", 404, "")))]
    #[tokio::test]
    async fn get_by_code_maps_absence_to_not_found(
        #[case] answer: Result<ApiResponse, AppError>,
    ) {
        let mut gateway = MockApiGateway::new();
        gateway
            .expect_send()
            .times(2)
            .returning(move |_| answer.clone());
        let service = service(gateway, Arc::new(DisabledLookupCache));

        let err = service.get_by_code("NOPE").await.expect_err("absent");
        assert_eq!(err.code(), ErrorCode::NoBranchFound);
        assert!(service.find_by_code("NOPE").await.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn code_queries_bypass_the_cache() {
        let mut gateway = MockApiGateway::new();
        gateway
            .expect_send()
            .times(6)
            .returning(|_| ok(json!({ "content": [] })));
        let cache = Arc::new(InMemoryLookupCache::new());
        let service = service(gateway, cache.clone());

        for index in 0..5 {
            assert!(service.find_by_code(&format!("BOGUS-{index}")).await.is_none());
        }
        assert!(cache.is_empty());

        service.list_all().await.expect("listed");
        assert_eq!(cache.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn get_by_code_escapes_the_query_value() {
        let mut gateway = MockApiGateway::new();
        gateway
            .expect_send()
            .with(function(|request: &ApiRequest| {
                request.path == "/codes/branches?code=A%26B+C"
            }))
            .times(1)
            .returning(|_| ok(json!({ "content": [] })));
        let service = service(gateway, Arc::new(DisabledLookupCache));

        assert!(service.get_by_code("A&B C").await.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn server_errors_propagate_with_status() {
        let mut gateway = MockApiGateway::new();
        gateway
            .expect_send()
            .returning(|_| Err(AppError::api_status("retrieve branch list", 500, "")));
        let service = service(gateway, Arc::new(InMemoryLookupCache::new()));

        let err = service.list_all().await.expect_err("server error");
        assert_eq!(err.code(), ErrorCode::VacmanApiError);
        assert_eq!(err.http_status(), Some(500));
        assert!(service.find_localized_by_id(1, Language::Fr).await.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn failures_are_not_cached() {
        let mut gateway = MockApiGateway::new();
        let mut calls = 0;
        gateway.expect_send().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(AppError::network("retrieve branch list", "connection reset"))
            } else {
                ok(branches())
            }
        });
        let service = service(gateway, Arc::new(InMemoryLookupCache::new()));

        assert!(service.list_all().await.is_err());
        assert_eq!(service.list_all().await.expect("recovered").len(), 2);
    }
}
