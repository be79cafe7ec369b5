use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;
use service_core::error::AppError;

use crate::dtos::org::SelfRequest;
use crate::middleware::ApiCredential;
use crate::services::mist::resolve_org_id;
use crate::services::SessionContext;
use crate::utils::parse_optional_json;
use crate::AppState;

/// Resolve the credential's identity and start a session
///
/// Calls Mist `/api/v1/self`, stores the API host and organization for this
/// credential, and returns the identity payload unchanged. An empty body uses
/// the default host.
#[utoipa::path(
    post,
    path = "/org/self",
    request_body = SelfRequest,
    responses(
        (status = 200, description = "Identity payload from Mist"),
        (status = 400, description = "Malformed body or api_host", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Mist API error", body = ErrorResponse),
        (status = 503, description = "Context store unavailable", body = ErrorResponse)
    ),
    tag = "Day 0 - Identity",
    security(
        ("mist_api_key" = [])
    )
)]
pub async fn resolve_self(
    State(state): State<AppState>,
    credential: ApiCredential,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let request: SelfRequest = parse_optional_json(&body)?;

    let api_host = request
        .api_host
        .as_deref()
        .map(str::trim)
        .unwrap_or(&state.default_api_host)
        .to_string();

    let api = state.mist.connect(&api_host, credential.token())?;
    let identity = api.get_self().await?;
    let org_id = resolve_org_id(&identity, request.org_id.as_deref())?;

    state
        .sessions
        .save(credential.scope(), &SessionContext { api_host, org_id })
        .await?;

    Ok(Json(identity))
}
