//! Shared setup for provisioning-service integration tests.
//!
//! Builds the full router over an in-memory context store and a mock Mist
//! connector, so no Redis or network access is needed.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use provisioning_service::{
    build_router,
    services::{InMemoryContextStore, MockMistConnector, SessionRepository},
    AppState, ServiceInfo,
};
use secrecy::Secret;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const TOKEN_A: &str = "token-alpha-0001";
pub const TOKEN_B: &str = "token-bravo-0002";
pub const ORG_A: &str = "6c7b2b4e-0000-4000-8000-00000000000a";
pub const ORG_B: &str = "6c7b2b4e-0000-4000-8000-00000000000b";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryContextStore>,
    pub mist: MockMistConnector,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn spawn() -> Self {
        Self::with_fallback(None)
    }

    /// App whose requests without `X-Mist-API-Key` use `key`.
    pub fn with_fallback(key: Option<&str>) -> Self {
        let store = Arc::new(InMemoryContextStore::new());
        let mist = MockMistConnector::new();

        let state = AppState {
            sessions: SessionRepository::new(store.clone(), "test-ctx", None),
            mist: Arc::new(mist.clone()),
            default_api_host: "api.mist.com".to_string(),
            fallback_api_key: key.map(|k| Secret::new(k.to_string())),
            service: ServiceInfo {
                name: "provisioning-service-test".to_string(),
                version: "0.0.0".to_string(),
                environment: "dev".to_string(),
            },
        };

        let router = build_router(state, &["*".to_string()]);

        Self {
            router,
            store,
            mist,
        }
    }

    /// Registers the `/api/v1/self` answer for an admin of `org_id`.
    pub fn stub_self(&self, org_id: &str) {
        self.mist.respond(
            "GET",
            "/api/v1/self",
            json!({
                "email": "admin@example.com",
                "privileges": [
                    { "scope": "org", "role": "admin", "org_id": org_id, "name": "Example Org" }
                ]
            }),
        );
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("x-mist-api-key", token);
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Runs `POST /org/self` with an empty body and asserts it succeeded.
    pub async fn establish(&self, token: &str, org_id: &str) {
        self.stub_self(org_id);
        let response = self.request(Method::POST, "/org/self", Some(token), None).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    }
}
