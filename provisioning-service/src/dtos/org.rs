use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::services::SessionContext;
use crate::utils::validation::validate_api_host;

/// Identity handshake. An empty body resolves against the default host.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct SelfRequest {
    /// Regional Mist API host; defaults to `api.mist.com`
    #[validate(custom(function = "validate_api_host"))]
    #[schema(example = "api.eu.mist.com")]
    pub api_host: Option<String>,

    /// Pick this org when the credential has privileges on several.
    #[validate(length(min = 1, message = "org_id cannot be empty"))]
    pub org_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContextResponse {
    /// `found` or `not_found`
    #[schema(example = "found")]
    pub status: String,
    pub context: Option<SessionContext>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContextDeletedResponse {
    #[schema(example = "deleted")]
    pub status: String,
    /// Keys actually removed; 0 when nothing was stored.
    #[schema(example = 2)]
    pub removed: u64,
}
