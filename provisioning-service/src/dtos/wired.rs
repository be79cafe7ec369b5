use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

use super::default_true;
use crate::utils::validation::{validate_cidr, validate_ip};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct NetworkCreate {
    #[validate(length(min = 1, message = "Network name is required"))]
    #[schema(example = "corp")]
    pub name: String,

    #[validate(range(min = 1, max = 4094, message = "VLAN ID must be between 1 and 4094"))]
    #[schema(example = 10, minimum = 1, maximum = 4094)]
    pub vlan_id: i32,

    #[validate(custom(function = "validate_cidr"))]
    #[schema(example = "10.0.10.0/24")]
    pub subnet: String,

    #[validate(custom(function = "validate_ip"))]
    #[schema(example = "10.0.10.1")]
    pub gateway: Option<String>,

    #[serde(default)]
    pub isolation: bool,

    #[serde(default = "default_true")]
    pub internet_access: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SwitchTemplateCreate {
    #[validate(length(min = 1, message = "Template name is required"))]
    pub name: String,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub port_usages: Map<String, Value>,

    /// Network IDs to include
    #[serde(default)]
    pub networks: Vec<String>,

    /// RADIUS settings for 802.1X
    #[schema(value_type = Option<Object>)]
    pub radius_config: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PortMode {
    #[default]
    Access,
    Trunk,
    Dynamic,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct PortProfileCreate {
    #[validate(length(min = 1, message = "Port profile name is required"))]
    pub name: String,

    #[serde(default)]
    pub mode: PortMode,

    #[validate(range(min = 1, max = 4094, message = "VLAN ID must be between 1 and 4094"))]
    pub vlan_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn network(vlan_id: i32) -> NetworkCreate {
        serde_json::from_value(json!({
            "name": "corp",
            "vlan_id": vlan_id,
            "subnet": "10.0.10.0/24",
            "gateway": "10.0.10.1"
        }))
        .unwrap()
    }

    #[test]
    fn vlan_bounds() {
        assert!(network(1).validate().is_ok());
        assert!(network(4094).validate().is_ok());

        for vlan_id in [0, 4095] {
            let errors = network(vlan_id).validate().unwrap_err();
            assert!(errors.field_errors().contains_key("vlan_id"));
        }
    }

    #[test]
    fn subnet_and_gateway_are_checked() {
        let mut net = network(10);
        net.subnet = "10.0.10.0".to_string();
        net.gateway = Some("gateway".to_string());

        let errors = net.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("subnet"));
        assert!(fields.contains_key("gateway"));
    }

    #[test]
    fn network_defaults() {
        let net = network(10);
        assert!(!net.isolation);
        assert!(net.internet_access);
    }

    #[test]
    fn port_profile_defaults_to_access() {
        let profile: PortProfileCreate = serde_json::from_value(json!({"name": "ap"})).unwrap();
        assert_eq!(profile.mode, PortMode::Access);
        assert!(profile.validate().is_ok());

        let body = json!({"name": "ap", "mode": "trunk", "vlan_id": 4095});
        let profile: PortProfileCreate = serde_json::from_value(body).unwrap();
        assert!(profile.validate().is_err());
    }
}
