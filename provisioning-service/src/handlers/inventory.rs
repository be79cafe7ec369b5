use axum::extract::Path;
use serde_json::json;

use super::NotImplemented;
use crate::dtos::inventory::{ClaimDevice, DeviceAssignment, InventoryQuery};
use crate::middleware::ApiCredential;
use crate::utils::{ValidatedJson, ValidatedQuery};

/// Assign claimed devices to a site
#[utoipa::path(
    post,
    path = "/inventory/assign",
    request_body = DeviceAssignment,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 0 - Inventory",
    security(("mist_api_key" = []))
)]
pub async fn assign_devices(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<DeviceAssignment>,
) -> NotImplemented {
    NotImplemented::new("inventory.assign_devices", &request)
}

/// Claim devices into the organization inventory
#[utoipa::path(
    post,
    path = "/inventory/claim",
    request_body = ClaimDevice,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 0 - Inventory",
    security(("mist_api_key" = []))
)]
pub async fn claim_devices(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<ClaimDevice>,
) -> NotImplemented {
    NotImplemented::new("inventory.claim_devices", &request)
}

#[utoipa::path(
    get,
    path = "/inventory/devices",
    params(InventoryQuery),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 0 - Inventory",
    security(("mist_api_key" = []))
)]
pub async fn list_devices(
    _credential: ApiCredential,
    ValidatedQuery(query): ValidatedQuery<InventoryQuery>,
) -> NotImplemented {
    NotImplemented::new("inventory.list_devices", &query)
}

#[utoipa::path(
    get,
    path = "/inventory/devices/{serial}",
    params(
        ("serial" = String, Path, description = "Device serial number")
    ),
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 0 - Inventory",
    security(("mist_api_key" = []))
)]
pub async fn get_device(_credential: ApiCredential, Path(serial): Path<String>) -> NotImplemented {
    NotImplemented::new("inventory.get_device", &json!({ "serial": serial }))
}
