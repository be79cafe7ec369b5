use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::utils::validation::validate_mac;

#[derive(Debug, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SiteHealthQuery {
    /// Minimum health score filter
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "min_score must be between 0 and 100"))]
    #[param(minimum = 0, maximum = 100)]
    pub min_score: i32,
}

#[derive(Debug, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientsQuery {
    #[serde(default = "default_client_limit")]
    #[validate(range(min = 1, max = 1000, message = "limit must be between 1 and 1000"))]
    #[param(minimum = 1, maximum = 1000)]
    pub limit: i32,
}

fn default_client_limit() -> i32 {
    100
}

#[derive(Debug, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct ClientPath {
    pub site_id: String,

    #[validate(custom(function = "validate_mac"))]
    #[param(example = "aa:bb:cc:dd:ee:ff")]
    pub client_mac: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Major,
    Critical,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AlertsQuery {
    pub site_id: Option<String>,
    #[param(inline)]
    pub severity: Option<Severity>,
    pub acknowledged: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AlertAcknowledge {
    #[validate(length(min = 1, message = "At least one alert ID is required"))]
    pub alert_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    Hour,
    #[default]
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SleQuery {
    #[serde(default)]
    #[param(inline)]
    pub time_range: TimeRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SleCategory {
    Wireless,
    Wired,
    Wan,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct MarvisQuery {
    /// Natural-language question for Marvis
    #[validate(length(min = 1, max = 1000, message = "Query must be 1-1000 characters"))]
    #[schema(example = "Why is AP-Floor2-003 disconnecting?")]
    pub query: String,

    pub site_id: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SiteFilterQuery {
    pub site_id: Option<String>,
}
