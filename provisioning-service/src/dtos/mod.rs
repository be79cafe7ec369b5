pub mod assurance;
pub mod inventory;
pub mod org;
pub mod sites;
pub mod wan;
pub mod wired;
pub mod wireless;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Validation error")]
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "upstream status 404: Not Found")]
    pub details: Option<String>,
    /// Per-field validation messages, present on 422 responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = json!({"vlan_id": ["VLAN ID must be between 1 and 4094"]}))]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

/// Body of every endpoint whose Mist integration does not exist yet.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotImplementedResponse {
    #[schema(example = "not_implemented")]
    pub status: String,
    #[schema(example = "wired.create_network")]
    pub operation: String,
    pub detail: String,
    /// The validated request, echoed back.
    #[schema(value_type = Object)]
    pub request: serde_json::Value,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PolicyAction {
    #[default]
    Allow,
    Deny,
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn default_country_code() -> String {
    "US".to_string()
}
