use serde_json::json;

use super::NotImplemented;
use crate::dtos::wireless::{
    LabelCreate, OrgPskCreate, RfTemplateCreate, WlanCreate, WlanTemplateCreate, WxRuleCreate,
};
use crate::middleware::ApiCredential;
use crate::utils::ValidatedJson;

/// Create an RF template
#[utoipa::path(
    post,
    path = "/wireless/rf-templates",
    request_body = RfTemplateCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wireless",
    security(("mist_api_key" = []))
)]
pub async fn create_rf_template(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<RfTemplateCreate>,
) -> NotImplemented {
    NotImplemented::new("wireless.create_rf_template", &request)
}

/// Deploy a WLAN template
#[utoipa::path(
    post,
    path = "/wireless/wlan-templates",
    request_body = WlanTemplateCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wireless",
    security(("mist_api_key" = []))
)]
pub async fn create_wlan_template(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<WlanTemplateCreate>,
) -> NotImplemented {
    NotImplemented::new("wireless.create_wlan_template", &request)
}

/// Create a WLAN (SSID)
#[utoipa::path(
    post,
    path = "/wireless/wlans",
    request_body = WlanCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wireless",
    security(("mist_api_key" = []))
)]
pub async fn create_wlan(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<WlanCreate>,
) -> NotImplemented {
    NotImplemented::new("wireless.create_wlan", &request)
}

/// Create a label for policy matching
#[utoipa::path(
    post,
    path = "/wireless/labels",
    request_body = LabelCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wireless",
    security(("mist_api_key" = []))
)]
pub async fn create_label(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<LabelCreate>,
) -> NotImplemented {
    NotImplemented::new("wireless.create_label", &request)
}

/// Deploy a wireless security rule
#[utoipa::path(
    post,
    path = "/wireless/wxrules",
    request_body = WxRuleCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wireless",
    security(("mist_api_key" = []))
)]
pub async fn create_wxrule(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<WxRuleCreate>,
) -> NotImplemented {
    NotImplemented::new("wireless.create_wxrule", &request)
}

/// Create an organization PSK
///
/// The passphrase is redacted from the echoed request.
#[utoipa::path(
    post,
    path = "/wireless/org-psks",
    request_body = OrgPskCreate,
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wireless",
    security(("mist_api_key" = []))
)]
pub async fn create_org_psk(
    _credential: ApiCredential,
    ValidatedJson(request): ValidatedJson<OrgPskCreate>,
) -> NotImplemented {
    NotImplemented::new("wireless.create_org_psk", &request).redact("passphrase")
}

#[utoipa::path(
    get,
    path = "/wireless/rf-templates",
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wireless",
    security(("mist_api_key" = []))
)]
pub async fn list_rf_templates(_credential: ApiCredential) -> NotImplemented {
    NotImplemented::new("wireless.list_rf_templates", &json!({}))
}

#[utoipa::path(
    get,
    path = "/wireless/wlan-templates",
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wireless",
    security(("mist_api_key" = []))
)]
pub async fn list_wlan_templates(_credential: ApiCredential) -> NotImplemented {
    NotImplemented::new("wireless.list_wlan_templates", &json!({}))
}

#[utoipa::path(
    get,
    path = "/wireless/wlans",
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wireless",
    security(("mist_api_key" = []))
)]
pub async fn list_wlans(_credential: ApiCredential) -> NotImplemented {
    NotImplemented::new("wireless.list_wlans", &json!({}))
}

#[utoipa::path(
    get,
    path = "/wireless/labels",
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wireless",
    security(("mist_api_key" = []))
)]
pub async fn list_labels(_credential: ApiCredential) -> NotImplemented {
    NotImplemented::new("wireless.list_labels", &json!({}))
}

#[utoipa::path(
    get,
    path = "/wireless/org-psks",
    responses(
        (status = 401, description = "Missing or invalid credential", body = ErrorResponse),
        (status = 501, description = "Not implemented", body = NotImplementedResponse)
    ),
    tag = "Day 1 - Wireless",
    security(("mist_api_key" = []))
)]
pub async fn list_org_psks(_credential: ApiCredential) -> NotImplemented {
    NotImplemented::new("wireless.list_org_psks", &json!({}))
}
