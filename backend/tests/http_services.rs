//! End-to-end tests for the HTTP-backed services over a mock backend.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use httpmock::prelude::*;
use rstest::{fixture, rstest};
use serde_json::json;
use url::Url;
use vacman::ApiServices;
use vacman::domain::ports::{ApiGateway, LookupCache, LookupService};
use vacman::domain::{
    ErrorCode, Language, LocalizedLookupModel, LookupCategory, LookupModel, ProfileQuery,
};
use vacman::outbound::api::{HttpLookupService, ReqwestApiGateway};
use vacman::outbound::cache::{DisabledLookupCache, InMemoryLookupCache};
use vacman::test_support::{MutableClock, lookup_envelope};

fn gateway(server: &MockServer) -> Arc<dyn ApiGateway> {
    let base = Url::parse(&server.url("/api/v1")).expect("valid base");
    Arc::new(ReqwestApiGateway::new(base).expect("client builds"))
}

fn appointments(
    server: &MockServer,
    cache: Arc<dyn LookupCache>,
) -> HttpLookupService<LookupModel> {
    HttpLookupService::new(
        LookupCategory::NON_ADVERTISED_APPOINTMENT,
        gateway(server),
        cache,
    )
}

#[fixture]
fn clock() -> Arc<MutableClock> {
    let start = Utc
        .with_ymd_and_hms(2025, 6, 2, 8, 0, 0)
        .single()
        .expect("valid timestamp");
    Arc::new(MutableClock::new(start))
}

#[rstest]
#[tokio::test]
async fn localised_lookup_by_id_and_absent_id() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/codes/non-advertised-appointments");
        then.status(200)
            .json_body(lookup_envelope(&[(1, "NONE", "Not Applicable", "Sans objet")]));
    });
    let service = appointments(&server, Arc::new(InMemoryLookupCache::new()));

    let entry = service
        .get_localized_by_id(1, Language::Fr)
        .await
        .expect("entry 1 exists");
    assert_eq!(
        entry,
        LocalizedLookupModel {
            id: 1,
            code: "NONE".to_owned(),
            name: "Sans objet".to_owned(),
        }
    );
    assert!(service.find_localized_by_id(99, Language::Fr).await.is_none());

    let err = service.get_by_id(99).await.expect_err("absent");
    assert_eq!(err.code(), ErrorCode::NoNonAdvertisedAppointmentFound);
}

#[rstest]
#[tokio::test]
async fn live_cache_entries_suppress_repeat_requests(clock: Arc<MutableClock>) {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/codes/non-advertised-appointments");
        then.status(200)
            .json_body(lookup_envelope(&[(1, "NONE", "Not Applicable", "Sans objet")]));
    });
    let cache = InMemoryLookupCache::with_clock(Some(Duration::from_secs(600)), clock.clone());
    let service = appointments(&server, Arc::new(cache));

    service.list_all().await.expect("first fetch");
    service.list_all().await.expect("served from cache");
    mock.assert_hits(1);

    clock.advance(Duration::from_secs(600));
    service.list_all().await.expect("refetched after expiry");
    mock.assert_hits(2);
}

#[rstest]
#[tokio::test]
async fn code_queries_take_the_first_match() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/codes/non-advertised-appointments")
            .query_param("code", "ACTING");
        then.status(200).json_body(lookup_envelope(&[
            (2, "ACTING", "Acting appointment", "Nomination intérimaire"),
            (5, "ACTING", "Acting (duplicate)", "Intérim (doublon)"),
        ]));
    });
    let service = appointments(&server, Arc::new(DisabledLookupCache));

    let entry = service
        .get_localized_by_code("ACTING", Language::En)
        .await
        .expect("found");
    mock.assert();
    assert_eq!(entry.id, 2);
    assert_eq!(entry.name, "Acting appointment");
}

#[rstest]
#[tokio::test]
async fn server_errors_surface_their_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/codes/non-advertised-appointments");
        then.status(500);
    });
    let service = appointments(&server, Arc::new(InMemoryLookupCache::new()));

    let err = service.list_all().await.expect_err("server error");
    assert_eq!(err.code(), ErrorCode::VacmanApiError);
    assert_eq!(err.http_status(), Some(500));
    assert!(service.find_by_code("NONE").await.is_none());
}

#[rstest]
#[tokio::test]
async fn one_cache_is_shared_across_the_registry() {
    let server = MockServer::start();
    let provinces = server.mock(|when, then| {
        when.method(GET).path("/api/v1/codes/provinces");
        then.status(200)
            .json_body(lookup_envelope(&[(11, "QC", "Quebec", "Québec")]));
    });
    let services = ApiServices::http(gateway(&server), Arc::new(InMemoryLookupCache::new()));
    let clone = services.clone();

    services.lookups.provinces.list_all().await.expect("first fetch");
    let names = clone
        .lookups
        .provinces
        .list_all_localized(Language::Fr)
        .await
        .expect("cached");

    provinces.assert_hits(1);
    assert_eq!(names[0].name, "Québec");
}

#[rstest]
#[tokio::test]
async fn missing_profiles_report_profile_not_found() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/profiles/12")
            .header("authorization", "Bearer tok");
        then.status(404).json_body(json!({ "detail": "not found" }));
    });
    let services = ApiServices::http(gateway(&server), Arc::new(DisabledLookupCache));

    let err = services
        .profiles
        .get_profile_by_id(12, "tok")
        .await
        .expect_err("absent");
    mock.assert();
    assert_eq!(err.code(), ErrorCode::ProfileNotFound);
    assert_eq!(err.http_status(), Some(404));
}

#[rstest]
#[tokio::test]
async fn profile_lists_forward_filters() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/profiles")
            .query_param("active", "true")
            .query_param("hr-advisor", "me");
        then.status(200).json_body(json!({
            "content": [
                { "id": 1, "profileUser": { "id": 5, "firstName": "Jane" } },
                { "id": 2, "profileUser": { "id": 6, "firstName": "Jean" } }
            ]
        }));
    });
    let services = ApiServices::http(gateway(&server), Arc::new(DisabledLookupCache));

    let query = ProfileQuery {
        active: Some(true),
        hr_advisor: Some("me".to_owned()),
    };
    let profiles = services
        .profiles
        .list_profiles(&query, "tok")
        .await
        .expect("listed");
    mock.assert();
    assert_eq!(profiles.len(), 2);
}

#[rstest]
#[tokio::test]
async fn requests_are_created_for_the_current_user() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/requests/me");
        then.status(201).json_body(json!({
            "id": 30,
            "status": { "id": 1, "code": "DRAFT", "nameEn": "Draft", "nameFr": "Ébauche" }
        }));
    });
    let services = ApiServices::http(gateway(&server), Arc::new(DisabledLookupCache));

    let request = services
        .requests
        .create_request("tok")
        .await
        .expect("created");
    mock.assert();
    assert_eq!(request.id, 30);
    assert_eq!(request.status.map(|status| status.code).as_deref(), Some("DRAFT"));
}
