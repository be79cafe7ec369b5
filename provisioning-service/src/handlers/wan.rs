use serde_json::json;

use super::NotImplemented;
use crate::dtos::wan::{
    ApplicationCreate, GatewayTemplateCreate, HubProfileCreate, TrafficSteeringCreate,
};
use crate::middleware::ApiCredential;
use crate::utils::ValidatedJson;

/// Define an application signature for steering
#[utoipa::path(
    post,
    path = "/wan/applications",
    request_body = ApplicationCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - WAN",
    security(("mist_api_key" = []))
)]
pub async fn create_application(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<ApplicationCreate>,
) -> NotImplemented {
    NotImplemented::new("wan.create_application", &request)
}

/// Deploy a hub profile for the SD-WAN topology
#[utoipa::path(
    post,
    path = "/wan/hub-profiles",
    request_body = HubProfileCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - WAN",
    security(("mist_api_key" = []))
)]
pub async fn create_hub_profile(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<HubProfileCreate>,
) -> NotImplemented {
    NotImplemented::new("wan.create_hub_profile", &request)
}

/// Deploy a WAN edge gateway template
#[utoipa::path(
    post,
    path = "/wan/gateway-templates",
    request_body = GatewayTemplateCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - WAN",
    security(("mist_api_key" = []))
)]
pub async fn create_gateway_template(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<GatewayTemplateCreate>,
) -> NotImplemented {
    NotImplemented::new("wan.create_gateway_template", &request)
}

#[utoipa::path(
    get,
    path = "/wan/applications",
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - WAN",
    security(("mist_api_key" = []))
)]
pub async fn list_applications(_credential: ApiCredential) -> NotImplemented {
    NotImplemented::new("wan.list_applications", &json!({}))
}

#[utoipa::path(
    get,
    path = "/wan/gateway-templates",
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - WAN",
    security(("mist_api_key" = []))
)]
pub async fn list_gateway_templates(_credential: ApiCredential) -> NotImplemented {
    NotImplemented::new("wan.list_gateway_templates", &json!({}))
}

/// Steer or block traffic for a set of applications
#[utoipa::path(
    post,
    path = "/wan/traffic-steering",
    request_body = TrafficSteeringCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - WAN",
    security(("mist_api_key" = []))
)]
pub async fn create_traffic_steering(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<TrafficSteeringCreate>,
) -> NotImplemented {
    NotImplemented::new("wan.create_traffic_steering", &request)
}
