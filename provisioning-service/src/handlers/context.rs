use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::dtos::org::{ContextDeletedResponse, ContextResponse};
use crate::middleware::ApiCredential;
use crate::AppState;

/// Show the session context stored for this credential
#[utoipa::path(
    get,
    path = "/context/",
    responses(
        (status = 200, description = "Stored context, if any", body = ContextResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 503, description = "Context store unavailable", body = ErrorResponse)
    ),
    tag = "Day 0 - Identity",
    security(
        ("mist_api_key" = [])
    )
)]
pub async fn get_context(
    State(state): State<AppState>,
    credential: ApiCredential,
) -> Result<Json<ContextResponse>, AppError> {
    let context = state.sessions.load(credential.scope()).await?;

    let status = if context.is_some() { "found" } else { "not_found" };
    Ok(Json(ContextResponse {
        status: status.to_string(),
        context,
    }))
}

/// Forget the session context for this credential
///
/// Idempotent: deleting twice reports `removed: 0` the second time.
#[utoipa::path(
    delete,
    path = "/context/",
    responses(
        (status = 200, description = "Context removed", body = ContextDeletedResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 503, description = "Context store unavailable", body = ErrorResponse)
    ),
    tag = "Day 0 - Identity",
    security(
        ("mist_api_key" = [])
    )
)]
pub async fn delete_context(
    State(state): State<AppState>,
    credential: ApiCredential,
) -> Result<Json<ContextDeletedResponse>, AppError> {
    let removed = state.sessions.clear(credential.scope()).await?;

    Ok(Json(ContextDeletedResponse {
        status: "deleted".to_string(),
        removed,
    }))
}
