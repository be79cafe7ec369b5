use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

use super::PolicyAction;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ApplicationCreate {
    #[validate(length(min = 1, message = "Application name is required"))]
    #[schema(example = "salesforce")]
    pub name: String,

    #[serde(default = "default_app_type")]
    pub app_type: String,

    /// Hostname patterns, e.g. `*.salesforce.com`
    #[serde(default)]
    pub hostnames: Vec<String>,

    #[serde(default)]
    pub ips: Vec<String>,

    #[validate(range(min = 0, max = 63, message = "DSCP must be between 0 and 63"))]
    #[schema(example = 46)]
    pub dscp: Option<i32>,

    #[serde(default = "default_traffic_class")]
    pub traffic_class: String,
}

fn default_app_type() -> String {
    "custom".to_string()
}

fn default_traffic_class() -> String {
    "best-effort".to_string()
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct HubProfileCreate {
    #[validate(length(min = 1, message = "Hub profile name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "At least one hub site is required"))]
    pub hub_site_ids: Vec<String>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub tunnel_configs: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct GatewayTemplateCreate {
    #[validate(length(min = 1, message = "Template name is required"))]
    pub name: String,

    /// WAN/LAN port layout keyed by interface name
    #[serde(default)]
    #[schema(value_type = Object)]
    pub port_config: Map<String, Value>,

    #[serde(default = "default_tunnel_provider")]
    pub tunnel_provider: String,

    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub routing_policies: Vec<Value>,

    #[schema(value_type = Option<Object>)]
    pub idp_profiles: Option<Map<String, Value>>,
}

fn default_tunnel_provider() -> String {
    "mist".to_string()
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct TrafficSteeringCreate {
    #[validate(length(min = 1, message = "Policy name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "At least one application is required"))]
    pub application_ids: Vec<String>,

    #[serde(default)]
    pub action: PolicyAction,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn application(dscp: i32) -> ApplicationCreate {
        serde_json::from_value(json!({"name": "voice", "dscp": dscp})).unwrap()
    }

    #[test]
    fn dscp_bounds() {
        assert!(application(0).validate().is_ok());
        assert!(application(63).validate().is_ok());
        assert!(application(-1).validate().is_err());
        assert!(application(64).validate().is_err());
    }

    #[test]
    fn application_defaults() {
        let app: ApplicationCreate = serde_json::from_value(json!({"name": "voice"})).unwrap();
        assert_eq!(app.app_type, "custom");
        assert_eq!(app.traffic_class, "best-effort");
        assert!(app.dscp.is_none());
        assert!(app.validate().is_ok());
    }

    #[test]
    fn traffic_steering_action_parses() {
        let body = json!({"name": "p", "application_ids": ["a"], "action": "deny"});
        let policy: TrafficSteeringCreate = serde_json::from_value(body).unwrap();
        assert_eq!(policy.action, PolicyAction::Deny);

        let bad = serde_json::from_value::<TrafficSteeringCreate>(
            json!({"name": "p", "application_ids": ["a"], "action": "drop"}),
        );
        assert!(bad.is_err());
    }
}
