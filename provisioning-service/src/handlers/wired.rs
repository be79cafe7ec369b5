use serde_json::json;

use super::NotImplemented;
use crate::dtos::wired::{NetworkCreate, PortProfileCreate, SwitchTemplateCreate};
use crate::middleware::ApiCredential;
use crate::utils::ValidatedJson;

/// Create a LAN network (VLAN)
#[utoipa::path(
    post,
    path = "/wired/networks",
    request_body = NetworkCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wired",
    security(("mist_api_key" = []))
)]
pub async fn create_network(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<NetworkCreate>,
) -> NotImplemented {
    NotImplemented::new("wired.create_network", &request)
}

/// Deploy a switch template
#[utoipa::path(
    post,
    path = "/wired/templates",
    request_body = SwitchTemplateCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wired",
    security(("mist_api_key" = []))
)]
pub async fn create_switch_template(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<SwitchTemplateCreate>,
) -> NotImplemented {
    NotImplemented::new("wired.create_switch_template", &request)
}

#[utoipa::path(
    get,
    path = "/wired/networks",
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wired",
    security(("mist_api_key" = []))
)]
pub async fn list_networks(_credential: ApiCredential) -> NotImplemented {
    NotImplemented::new("wired.list_networks", &json!({}))
}

#[utoipa::path(
    get,
    path = "/wired/templates",
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wired",
    security(("mist_api_key" = []))
)]
pub async fn list_switch_templates(_credential: ApiCredential) -> NotImplemented {
    NotImplemented::new("wired.list_switch_templates", &json!({}))
}

#[utoipa::path(
    post,
    path = "/wired/port-profiles",
    request_body = PortProfileCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wired",
    security(("mist_api_key" = []))
)]
pub async fn create_port_profile(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<PortProfileCreate>,
) -> NotImplemented {
    NotImplemented::new("wired.create_port_profile", &request)
}
