use axum::{extract::State, Json};
use serde_json::Value;
use service_core::error::AppError;

use crate::dtos::sites::{SiteCreateRequest, SiteListResponse, SiteResponse};
use crate::middleware::ApiCredential;
use crate::services::mist::{org_sites_path, MistError};
use crate::utils::ValidatedJson;
use crate::AppState;

/// Create a site in the session's organization
#[utoipa::path(
    post,
    path = "/sites/",
    request_body = SiteCreateRequest,
    responses(
        (status = 200, description = "Site created", body = SiteResponse),
        (
            status = 400,
            description = "No session context; call POST /org/self first",
            body = ErrorResponse
        ),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Mist API error", body = ErrorResponse),
        (status = 503, description = "Context store unavailable", body = ErrorResponse)
    ),
    tag = "Day 0 - Sites",
    security(
        ("mist_api_key" = [])
    )
)]
pub async fn create_site(
    State(state): State<AppState>,
    credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<SiteCreateRequest>,
) -> Result<Json<SiteResponse>, AppError> {
    let context = state.sessions.require(credential.scope()).await?;

    let api = state.mist.connect(&context.api_host, credential.token())?;
    let payload = serde_json::to_value(&request)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to encode site: {}", e)))?;

    let site = api.post(&org_sites_path(&context.org_id), &payload).await?;
    let response = SiteResponse::from_upstream(&site, &request);

    tracing::info!(
        org_id = %context.org_id,
        site_id = %response.id,
        name = %response.name,
        "Site created"
    );

    Ok(Json(response))
}

/// List the sites of the session's organization
#[utoipa::path(
    get,
    path = "/sites/",
    responses(
        (status = 200, description = "Sites in the organization", body = SiteListResponse),
        (
            status = 400,
            description = "No session context; call POST /org/self first",
            body = ErrorResponse
        ),
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 502, description = "Mist API error", body = ErrorResponse),
        (status = 503, description = "Context store unavailable", body = ErrorResponse)
    ),
    tag = "Day 0 - Sites",
    security(
        ("mist_api_key" = [])
    )
)]
pub async fn list_sites(
    State(state): State<AppState>,
    credential: ApiCredential,
) -> Result<Json<SiteListResponse>, AppError> {
    let context = state.sessions.require(credential.scope()).await?;

    let api = state.mist.connect(&context.api_host, credential.token())?;
    let sites = match api.get(&org_sites_path(&context.org_id)).await? {
        Value::Array(sites) => sites,
        other => {
            return Err(MistError::UnexpectedPayload(format!(
                "expected a list of sites, got {}",
                json_kind(&other)
            ))
            .into())
        }
    };

    Ok(Json(SiteListResponse {
        count: sites.len(),
        sites,
    }))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
