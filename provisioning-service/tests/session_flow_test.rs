//! Identity resolution, session context and site provisioning over HTTP.

mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, ORG_A, ORG_B, TOKEN_A, TOKEN_B};
use serde_json::json;

#[tokio::test]
async fn self_then_create_site_targets_resolved_org() {
    let app = TestApp::spawn();
    app.establish(TOKEN_A, ORG_A).await;

    let sites_path = format!("/api/v1/orgs/{}/sites", ORG_A);
    let created = json!({
        "id": "site-1",
        "name": "Branch-1",
        "timezone": "America/Chicago",
        "country_code": "US"
    });
    app.mist.respond("POST", &sites_path, created);

    let response = app
        .post("/sites/", Some(TOKEN_A), json!({ "name": "Branch-1" }))
        .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["id"], "site-1");
    assert_eq!(response.body["name"], "Branch-1");
    assert_eq!(response.body["status"], "created");

    let calls = app.mist.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].path, "/api/v1/self");
    assert_eq!(calls[1].method, "POST");
    assert_eq!(calls[1].path, sites_path);
    assert_eq!(calls[1].api_host, "api.mist.com");
    assert_eq!(calls[1].token, TOKEN_A);
    let sent = calls[1].body.as_ref().expect("site payload");
    assert_eq!(sent["name"], "Branch-1");
    assert_eq!(sent["timezone"], "America/Chicago");
    assert_eq!(sent["country_code"], "US");
}

#[tokio::test]
async fn self_returns_identity_and_stores_context() {
    let app = TestApp::spawn();
    app.stub_self(ORG_A);

    let response = app
        .post(
            "/org/self",
            Some(TOKEN_A),
            json!({ "api_host": "api.eu.mist.com" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"], "admin@example.com");
    assert_eq!(response.body["privileges"][0]["org_id"], ORG_A);

    let context = app.get("/context/", Some(TOKEN_A)).await;
    assert_eq!(context.status, StatusCode::OK);
    assert_eq!(context.body["status"], "found");
    assert_eq!(context.body["context"]["api_host"], "api.eu.mist.com");
    assert_eq!(context.body["context"]["org_id"], ORG_A);
}

#[tokio::test]
async fn self_with_empty_object_uses_default_host() {
    let app = TestApp::spawn();
    app.stub_self(ORG_A);

    let response = app.post("/org/self", Some(TOKEN_A), json!({})).await;
    assert_eq!(response.status, StatusCode::OK);

    let context = app.get("/context/", Some(TOKEN_A)).await;
    assert_eq!(context.body["context"]["api_host"], "api.mist.com");
    assert_eq!(context.body["context"]["org_id"], ORG_A);
    assert_eq!(app.mist.calls()[0].api_host, "api.mist.com");
}

#[tokio::test]
async fn self_with_unknown_org_is_rejected_without_storing() {
    let app = TestApp::spawn();
    app.stub_self(ORG_A);

    let response = app
        .post("/org/self", Some(TOKEN_A), json!({ "org_id": ORG_B }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);

    let context = app.get("/context/", Some(TOKEN_A)).await;
    assert_eq!(context.body["status"], "not_found");
}

#[tokio::test]
async fn self_with_malformed_host_is_rejected() {
    let app = TestApp::spawn();

    let response = app
        .post(
            "/org/self",
            Some(TOKEN_A),
            json!({ "api_host": "api.mist.com/api/v1" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["fields"]["api_host"].is_array());
    assert!(app.mist.calls().is_empty());
}

#[tokio::test]
async fn upstream_rejection_surfaces_as_bad_gateway() {
    let app = TestApp::spawn();
    app.mist
        .fail("GET", "/api/v1/self", 401, r#"{"detail":"Invalid token."}"#);

    let response = app
        .request(Method::POST, "/org/self", Some(TOKEN_A), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "Upstream API error");
    assert!(response.body["details"]
        .as_str()
        .unwrap_or_default()
        .contains("401"));
}

#[tokio::test]
async fn sites_without_context_fail_before_calling_mist() {
    let app = TestApp::spawn();

    let response = app
        .post("/sites/", Some(TOKEN_A), json!({ "name": "Branch-1" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["details"]
        .as_str()
        .unwrap_or_default()
        .contains("POST /org/self"));

    let listed = app.get("/sites/", Some(TOKEN_A)).await;
    assert_eq!(listed.status, StatusCode::BAD_REQUEST);

    assert!(app.mist.calls().is_empty());
}

#[tokio::test]
async fn list_sites_returns_upstream_array() {
    let app = TestApp::spawn();
    app.establish(TOKEN_A, ORG_A).await;
    app.mist.respond(
        "GET",
        &format!("/api/v1/orgs/{}/sites", ORG_A),
        json!([{ "id": "s1", "name": "HQ" }, { "id": "s2", "name": "Branch" }]),
    );

    let response = app.get("/sites", Some(TOKEN_A)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 2);
    assert_eq!(response.body["sites"][1]["name"], "Branch");
}

#[tokio::test]
async fn list_sites_rejects_non_array_payload() {
    let app = TestApp::spawn();
    app.establish(TOKEN_A, ORG_A).await;
    app.mist.respond(
        "GET",
        &format!("/api/v1/orgs/{}/sites", ORG_A),
        json!({ "detail": "not a list" }),
    );

    let response = app.get("/sites/", Some(TOKEN_A)).await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn credentials_do_not_share_context() {
    let app = TestApp::spawn();
    app.establish(TOKEN_A, ORG_A).await;

    let other = app.get("/context/", Some(TOKEN_B)).await;
    assert_eq!(other.body["status"], "not_found");

    let blocked = app
        .post("/sites/", Some(TOKEN_B), json!({ "name": "Branch-2" }))
        .await;
    assert_eq!(blocked.status, StatusCode::BAD_REQUEST);

    app.establish(TOKEN_B, ORG_B).await;

    let a = app.get("/context/", Some(TOKEN_A)).await;
    let b = app.get("/context/", Some(TOKEN_B)).await;
    assert_eq!(a.body["context"]["org_id"], ORG_A);
    assert_eq!(b.body["context"]["org_id"], ORG_B);
}

#[tokio::test]
async fn delete_context_is_idempotent() {
    let app = TestApp::spawn();
    app.establish(TOKEN_A, ORG_A).await;

    let first = app.delete("/context/", Some(TOKEN_A)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["status"], "deleted");
    assert_eq!(first.body["removed"], 2);

    let second = app.delete("/context/", Some(TOKEN_A)).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["removed"], 0);

    let context = app.get("/context/", Some(TOKEN_A)).await;
    assert_eq!(context.body["status"], "not_found");
}

#[tokio::test]
async fn store_outage_is_service_unavailable() {
    let app = TestApp::spawn();
    app.establish(TOKEN_A, ORG_A).await;
    app.store.set_available(false);

    let sites = app
        .post("/sites/", Some(TOKEN_A), json!({ "name": "Branch-1" }))
        .await;
    assert_eq!(sites.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(sites.body["error"], "Context store unavailable");

    let context = app.get("/context/", Some(TOKEN_A)).await;
    assert_eq!(context.status, StatusCode::SERVICE_UNAVAILABLE);

    // Only the /self call reached Mist.
    assert_eq!(app.mist.calls().len(), 1);
}

#[tokio::test]
async fn missing_credential_is_unauthorized() {
    let app = TestApp::spawn();

    let response = app.get("/context/", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let placeholder = app.get("/wan/applications", None).await;
    assert_eq!(placeholder.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn blank_credential_is_unauthorized() {
    let app = TestApp::spawn();

    let response = app.get("/context/", Some("   ")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn operator_key_backs_requests_without_header() {
    let app = TestApp::with_fallback(Some(TOKEN_A));
    app.stub_self(ORG_A);

    let response = app.request(Method::POST, "/org/self", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    // The explicit header and the operator key resolve to the same session.
    let context = app.get("/context/", Some(TOKEN_A)).await;
    assert_eq!(context.body["context"]["org_id"], ORG_A);
    assert_eq!(app.mist.calls()[0].token, TOKEN_A);
}

#[tokio::test]
async fn concurrent_sessions_stay_isolated() {
    let app = TestApp::spawn();
    app.stub_self(ORG_A);

    let tokens: Vec<String> = (0..8).map(|i| format!("token-concurrent-{:02}", i)).collect();
    let responses = futures::future::join_all(tokens.iter().map(|token| {
        app.request(Method::POST, "/org/self", Some(token.as_str()), None)
    }))
    .await;
    assert!(responses.iter().all(|r| r.status == StatusCode::OK));

    for token in &tokens {
        let context = app.get("/context/", Some(token.as_str())).await;
        assert_eq!(context.body["context"]["org_id"], ORG_A);
    }

    let cleared = app.delete("/context/", Some(tokens[0].as_str())).await;
    assert_eq!(cleared.body["removed"], 2);

    let untouched = app.get("/context/", Some(tokens[1].as_str())).await;
    assert_eq!(untouched.body["status"], "found");
}
