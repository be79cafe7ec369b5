use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::default_country_code;
use crate::utils::validation::validate_country_code;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SiteCreateRequest {
    #[validate(length(min = 1, max = 64, message = "Site name must be 1-64 characters"))]
    #[schema(example = "Branch-Austin-001")]
    pub name: String,

    #[schema(example = "123 Main St, Austin, TX")]
    pub address: Option<String>,

    /// IANA timezone
    #[serde(default = "default_timezone")]
    #[validate(length(min = 1, message = "Timezone cannot be empty"))]
    #[schema(example = "America/Chicago")]
    pub timezone: String,

    #[serde(default = "default_country_code")]
    #[validate(custom(function = "validate_country_code"))]
    #[schema(example = "US")]
    pub country_code: String,

    pub notes: Option<String>,
}

fn default_timezone() -> String {
    "America/Chicago".to_string()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SiteResponse {
    #[schema(example = "4ac1dcf4-9d8b-7211-65c4-057819f0862b")]
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub timezone: String,
    pub country_code: String,
    #[schema(example = "created")]
    pub status: String,
}

impl SiteResponse {
    /// Maps the upstream site, falling back to what the caller sent for any
    /// field Mist leaves out.
    pub fn from_upstream(site: &Value, request: &SiteCreateRequest) -> Self {
        let field = |name: &str| site.get(name).and_then(Value::as_str).map(str::to_string);

        Self {
            id: field("id").unwrap_or_default(),
            name: field("name").unwrap_or_else(|| request.name.clone()),
            address: field("address").or_else(|| request.address.clone()),
            timezone: field("timezone").unwrap_or_else(|| request.timezone.clone()),
            country_code: field("country_code").unwrap_or_else(|| request.country_code.clone()),
            status: "created".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SiteListResponse {
    #[schema(value_type = Vec<Object>)]
    pub sites: Vec<Value>,
    pub count: usize,
}
