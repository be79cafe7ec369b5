use axum::extract::Path;
use serde_json::json;

use super::NotImplemented;
use crate::dtos::assurance::{
    AlertAcknowledge, AlertsQuery, ClientPath, ClientsQuery, MarvisQuery, SiteFilterQuery,
    SiteHealthQuery, SleCategory, SleQuery,
};
use crate::middleware::ApiCredential;
use crate::utils::{ValidatedJson, ValidatedPath, ValidatedQuery};

#[utoipa::path(
    get,
    path = "/assurance/health/sites/{site_id}",
    params(("site_id" = String, Path, description = "Site ID")),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn get_site_health(
    _credential: ApiCredential,
    Path(site_id): Path<String>,
) -> NotImplemented {
    NotImplemented::new("assurance.get_site_health", &json!({ "site_id": site_id }))
}

#[utoipa::path(
    get,
    path = "/assurance/health/sites",
    params(SiteHealthQuery),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn list_sites_health(
    _credential: ApiCredential,
    ValidatedQuery(query): ValidatedQuery<SiteHealthQuery>,
) -> NotImplemented {
    NotImplemented::new("assurance.list_sites_health", &query)
}

#[utoipa::path(
    get,
    path = "/assurance/health/devices/{device_id}",
    params(("device_id" = String, Path, description = "Device ID")),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn get_device_health(
    _credential: ApiCredential,
    Path(device_id): Path<String>,
) -> NotImplemented {
    NotImplemented::new(
        "assurance.get_device_health",
        &json!({ "device_id": device_id }),
    )
}

#[utoipa::path(
    get,
    path = "/assurance/clients/{site_id}",
    params(
        ("site_id" = String, Path, description = "Site ID"),
        ClientsQuery
    ),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn list_clients(
    _credential: ApiCredential,
    Path(site_id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<ClientsQuery>,
) -> NotImplemented {
    NotImplemented::new(
        "assurance.list_clients",
        &json!({ "site_id": site_id, "limit": query.limit }),
    )
}

#[utoipa::path(
    get,
    path = "/assurance/clients/{site_id}/{client_mac}",
    params(ClientPath),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Malformed MAC address", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn get_client(
    _credential: ApiCredential,
    ValidatedPath(path): ValidatedPath<ClientPath>,
) -> NotImplemented {
    NotImplemented::new("assurance.get_client", &path)
}

/// List alerts, optionally filtered by site, severity and acknowledgement
#[utoipa::path(
    get,
    path = "/assurance/alerts",
    params(AlertsQuery),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn list_alerts(
    _credential: ApiCredential,
    ValidatedQuery(query): ValidatedQuery<AlertsQuery>,
) -> NotImplemented {
    NotImplemented::new("assurance.list_alerts", &query)
}

#[utoipa::path(
    get,
    path = "/assurance/alerts/{alert_id}",
    params(("alert_id" = String, Path, description = "Alert ID")),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn get_alert(_credential: ApiCredential, Path(alert_id): Path<String>) -> NotImplemented {
    NotImplemented::new("assurance.get_alert", &json!({ "alert_id": alert_id }))
}

#[utoipa::path(
    post,
    path = "/assurance/alerts/acknowledge",
    request_body = AlertAcknowledge,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn acknowledge_alerts(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<AlertAcknowledge>,
) -> NotImplemented {
    NotImplemented::new("assurance.acknowledge_alerts", &request)
}

/// Service Level Expectation report for a site
#[utoipa::path(
    get,
    path = "/assurance/sle/{site_id}",
    params(
        ("site_id" = String, Path, description = "Site ID"),
        SleQuery
    ),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn get_sle_report(
    _credential: ApiCredential,
    Path(site_id): Path<String>,
    ValidatedQuery(query): ValidatedQuery<SleQuery>,
) -> NotImplemented {
    NotImplemented::new(
        "assurance.get_sle_report",
        &json!({ "site_id": site_id, "time_range": query.time_range }),
    )
}

/// SLEs for one category: `wireless`, `wired` or `wan`
#[utoipa::path(
    get,
    path = "/assurance/sle/{category}/{site_id}",
    params(
        ("category" = SleCategory, Path, description = "wireless, wired or wan"),
        ("site_id" = String, Path, description = "Site ID")
    ),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 400, description = "Unknown SLE category"),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn get_category_sle(
    _credential: ApiCredential,
    Path((category, site_id)): Path<(SleCategory, String)>,
) -> NotImplemented {
    let operation = match category {
        SleCategory::Wireless => "assurance.get_wireless_sle",
        SleCategory::Wired => "assurance.get_wired_sle",
        SleCategory::Wan => "assurance.get_wan_sle",
    };
    NotImplemented::new(operation, &json!({ "site_id": site_id }))
}

/// Ask Marvis a natural-language question
#[utoipa::path(
    post,
    path = "/assurance/marvis/query",
    request_body = MarvisQuery,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn query_marvis(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<MarvisQuery>,
) -> NotImplemented {
    NotImplemented::new("assurance.query_marvis", &request)
}

#[utoipa::path(
    get,
    path = "/assurance/marvis/actions",
    params(SiteFilterQuery),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn get_marvis_actions(
    _credential: ApiCredential,
    ValidatedQuery(query): ValidatedQuery<SiteFilterQuery>,
) -> NotImplemented {
    NotImplemented::new("assurance.get_marvis_actions", &query)
}

#[utoipa::path(
    get,
    path = "/assurance/marvis/insights",
    params(SiteFilterQuery),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 2 - Assurance",
    security(("mist_api_key" = []))
)]
pub async fn get_marvis_insights(
    _credential: ApiCredential,
    ValidatedQuery(query): ValidatedQuery<SiteFilterQuery>,
) -> NotImplemented {
    NotImplemented::new("assurance.get_marvis_insights", &query)
}
