use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::default_true;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct DeviceAssignment {
    #[validate(length(min = 1, message = "At least one serial number is required"))]
    #[schema(example = json!(["A0123456789"]))]
    pub serial_numbers: Vec<String>,

    #[validate(length(min = 1, message = "Site ID is required"))]
    pub site_id: String,

    /// Let Mist manage configuration once assigned.
    #[serde(default = "default_true")]
    pub managed: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ClaimDevice {
    #[validate(length(min = 1, message = "At least one claim code is required"))]
    pub claim_codes: Vec<String>,

    #[validate(length(min = 1, message = "Org ID is required"))]
    pub org_id: String,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryQuery {
    /// Only devices not yet assigned to a site.
    #[serde(default)]
    pub unassigned: bool,
}
