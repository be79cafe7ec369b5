//! HTTP-level behavior of the Mist client against a local stand-in.

use provisioning_service::services::{HttpMistConnector, MistConnector, MistError};
use secrecy::Secret;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn connector() -> HttpMistConnector {
    HttpMistConnector::new(Duration::from_secs(5)).expect("Failed to build connector")
}

fn token() -> Secret<String> {
    Secret::new("abc123".to_string())
}

#[tokio::test]
async fn get_self_sends_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/self"))
        .and(header("Authorization", "Token abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "admin@example.com",
            "privileges": [{ "scope": "org", "org_id": "org-1" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = connector()
        .connect(&server.uri(), &token())
        .expect("Failed to connect");
    let identity = api.get_self().await.expect("self call failed");

    assert_eq!(identity["privileges"][0]["org_id"], "org-1");
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;
    let created = json!({ "id": "site-1" });
    Mock::given(method("POST"))
        .and(path("/api/v1/orgs/org-1/sites"))
        .and(body_json(json!({ "name": "Branch-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(created))
        .expect(1)
        .mount(&server)
        .await;

    let api = connector()
        .connect(&server.uri(), &token())
        .expect("Failed to connect");
    let site = api
        .post("/api/v1/orgs/org-1/sites", &json!({ "name": "Branch-1" }))
        .await
        .expect("post failed");

    assert_eq!(site["id"], "site-1");
}

#[tokio::test]
async fn error_status_keeps_code_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/self"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = connector()
        .connect(&server.uri(), &token())
        .expect("Failed to connect");
    let err = api.get_self().await.unwrap_err();

    match err {
        MistError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/self"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let api = connector()
        .connect(&server.uri(), &token())
        .expect("Failed to connect");
    let err = api.get_self().await.unwrap_err();

    assert!(matches!(err, MistError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn empty_success_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/orgs/org-1/inventory"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let api = connector()
        .connect(&server.uri(), &token())
        .expect("Failed to connect");
    let value = api
        .post("/api/v1/orgs/org-1/inventory", &json!({}))
        .await
        .expect("post failed");

    assert!(value.is_null());
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let api = connector()
        .connect("http://127.0.0.1:1", &token())
        .expect("Failed to connect");

    let err = api.get_self().await.unwrap_err();

    assert!(matches!(err, MistError::Transport(_)), "got {:?}", err);
}

#[test]
fn host_with_path_is_refused() {
    let result = connector().connect("api.mist.com/api/v1", &token());

    assert!(matches!(result, Err(MistError::InvalidHost(_))));
}
