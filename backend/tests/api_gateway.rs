//! Integration tests for the reqwest gateway against a mock backend.

use httpmock::prelude::*;
use rstest::rstest;
use serde_json::json;
use url::Url;
use vacman::domain::ports::{ApiGateway, ApiRequest};
use vacman::domain::{CorrelationId, ErrorCode};
use vacman::outbound::api::ReqwestApiGateway;

fn gateway_for(server: &MockServer, base_path: &str) -> ReqwestApiGateway {
    let base = Url::parse(&format!("{}{base_path}", server.base_url())).expect("valid base");
    ReqwestApiGateway::new(base).expect("client builds")
}

#[rstest]
#[tokio::test]
async fn successful_calls_return_the_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/codes/branches")
            .header("accept", "application/json");
        then.status(200).json_body(json!({ "content": [] }));
    });

    let response = gateway_for(&server, "/api/v1")
        .send(ApiRequest::get("/codes/branches", "retrieve branch list"))
        .await
        .expect("call succeeds");

    mock.assert();
    assert_eq!(response.status, 200);
    assert_eq!(
        response.json::<serde_json::Value>("retrieve branch list").expect("json"),
        json!({ "content": [] })
    );
}

#[rstest]
#[tokio::test]
async fn error_statuses_keep_status_and_body_preview() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/codes/cities");
        then.status(500).body("database offline");
    });

    let err = gateway_for(&server, "")
        .send(ApiRequest::get("/codes/cities", "retrieve city list"))
        .await
        .expect_err("server error");

    assert_eq!(err.code(), ErrorCode::VacmanApiError);
    assert_eq!(err.http_status(), Some(500));
    assert_eq!(
        err.message(),
        "Failed to retrieve city list. Server responded with status 500: database offline"
    );
}

#[rstest]
#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let gateway =
        ReqwestApiGateway::new(Url::parse("http://127.0.0.1:1/api").expect("valid base"))
            .expect("client builds");

    let err = gateway
        .send(ApiRequest::get("/codes/branches", "retrieve branch list"))
        .await
        .expect_err("connection refused");

    assert_eq!(err.code(), ErrorCode::VacmanApiNetworkError);
    assert_eq!(err.http_status(), None);
    assert!(
        err.message()
            .starts_with("Network error while attempting to retrieve branch list:")
    );
}

#[rstest]
#[tokio::test]
async fn forwards_token_correlation_id_and_body() {
    let server = MockServer::start();
    let correlation_id = CorrelationId::generate();
    let expected_id = correlation_id.to_string();
    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/profiles/7/status")
            .header("authorization", "Bearer secret-token")
            .header("x-correlation-id", expected_id.as_str())
            .json_body(json!({ "code": "APPROVED" }));
        then.status(204);
    });

    let request = ApiRequest::put("/profiles/7/status", "update profile status")
        .with_bearer_token("secret-token")
        .with_json(json!({ "code": "APPROVED" }));
    let gateway = gateway_for(&server, "");
    let response = CorrelationId::scope(correlation_id, gateway.send(request))
        .await
        .expect("call succeeds");

    mock.assert();
    assert_eq!(response.status, 204);
}

#[rstest]
#[tokio::test]
async fn errors_raised_in_scope_carry_the_correlation_id() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/profiles/me");
        then.status(401);
    });

    let correlation_id = CorrelationId::generate();
    let gateway = gateway_for(&server, "");
    let err = CorrelationId::scope(
        correlation_id,
        gateway.send(ApiRequest::get("/profiles/me", "retrieve current user profile")),
    )
    .await
    .expect_err("unauthorised");

    assert_eq!(err.http_status(), Some(401));
    assert_eq!(
        err.correlation_id(),
        Some(correlation_id.to_string().as_str())
    );
}

#[rstest]
#[tokio::test]
async fn undecodable_bodies_keep_the_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/codes/provinces");
        then.status(200).body("<html>maintenance</html>");
    });

    let response = gateway_for(&server, "")
        .send(ApiRequest::get("/codes/provinces", "retrieve province list"))
        .await
        .expect("2xx answers succeed at the transport level");
    let err = response
        .json::<serde_json::Value>("retrieve province list")
        .expect_err("not json");

    assert_eq!(err.code(), ErrorCode::VacmanApiDecodeError);
    assert_eq!(err.http_status(), Some(200));
}
