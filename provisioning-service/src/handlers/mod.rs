pub mod assurance;
pub mod context;
pub mod inventory;
pub mod org;
pub mod sites;
pub mod wan;
pub mod wired;
pub mod wireless;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::dtos::NotImplementedResponse;
use crate::services::metrics::{get_metrics, record_not_implemented};
use crate::AppState;

/// Result of an endpoint whose Mist integration has not been built.
///
/// Always a 501 so callers never mistake it for an empty upstream answer.
pub struct NotImplemented {
    operation: &'static str,
    request: Value,
}

impl NotImplemented {
    pub fn new<T: Serialize>(operation: &'static str, request: &T) -> Self {
        let request = serde_json::to_value(request).unwrap_or_else(|e| {
            tracing::warn!(operation, "Failed to echo request: {}", e);
            Value::Null
        });
        Self { operation, request }
    }

    /// Masks a top-level field of the echoed request.
    pub fn redact(mut self, field: &str) -> Self {
        if let Some(slot) = self.request.get_mut(field) {
            *slot = Value::String("[REDACTED]".to_string());
        }
        self
    }
}

impl IntoResponse for NotImplemented {
    fn into_response(self) -> Response {
        record_not_implemented(self.operation);
        tracing::info!(
            operation = self.operation,
            "Request validated; integration not implemented"
        );

        (
            StatusCode::NOT_IMPLEMENTED,
            Json(NotImplementedResponse {
                status: "not_implemented".to_string(),
                operation: self.operation.to_string(),
                detail: format!(
                    "{} is validated but not yet wired to the Mist API",
                    self.operation
                ),
                request: self.request,
            }),
        )
            .into_response()
    }
}

#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Process is up")
    ),
    tag = "Observability"
)]
pub async fn status() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Service health including context store reachability
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Context store unreachable")
    ),
    tag = "Observability"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_up = state.sessions.store().ping().await;

    if !store_up {
        tracing::warn!("Health check: context store unreachable");
    }

    let status = if store_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if store_up { "ok" } else { "degraded" },
            "service": state.service.name,
            "version": state.service.version,
            "environment": state.service.environment,
            "checks": {
                "context_store": if store_up { "up" } else { "down" }
            }
        })),
    )
}

#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Ready to serve traffic"),
        (status = 503, description = "Not ready")
    ),
    tag = "Observability"
)]
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if state.sessions.store().ping().await {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "not_ready" })),
        )
    }
}

pub async fn metrics() -> impl IntoResponse {
    get_metrics()
}

pub async fn root() -> Redirect {
    Redirect::temporary("/docs")
}
