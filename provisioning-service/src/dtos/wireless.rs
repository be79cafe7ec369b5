use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;
use validator::Validate;

use super::{default_country_code, default_true, PolicyAction};
use crate::utils::validation::validate_country_code;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RfTemplateCreate {
    #[validate(length(min = 1, message = "Template name is required"))]
    #[schema(example = "office-rf")]
    pub name: String,

    #[serde(default = "default_band_24")]
    #[schema(value_type = Object, example = json!({"enabled": true, "power": 8}))]
    pub band_24: Value,

    #[serde(default = "default_band_5")]
    #[schema(value_type = Object, example = json!({"enabled": true, "power": 12}))]
    pub band_5: Value,

    #[serde(default = "default_band_6")]
    #[schema(value_type = Object, example = json!({"enabled": false}))]
    pub band_6: Value,

    /// Regulatory domain
    #[serde(default = "default_country_code")]
    #[validate(custom(function = "validate_country_code"))]
    pub country_code: String,
}

fn default_band_24() -> Value {
    json!({"enabled": true, "power": 8})
}

fn default_band_5() -> Value {
    json!({"enabled": true, "power": 12})
}

fn default_band_6() -> Value {
    json!({"enabled": false})
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TemplateScope {
    #[default]
    Site,
    Org,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct WlanTemplateCreate {
    #[validate(length(min = 1, message = "Template name is required"))]
    pub name: String,

    #[serde(default)]
    pub applies_to: TemplateScope,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    Open,
    #[default]
    Psk,
    Eap,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum WlanBand {
    #[serde(rename = "2.4")]
    Band24,
    #[serde(rename = "5")]
    Band5,
    #[serde(rename = "6")]
    Band6,
    #[default]
    #[serde(rename = "both")]
    Both,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct WlanCreate {
    #[validate(length(min = 1, max = 32, message = "SSID must be 1-32 characters"))]
    #[schema(example = "Corp-WiFi")]
    pub ssid: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub auth_type: AuthType,

    #[validate(range(min = 1, max = 4094, message = "VLAN ID must be between 1 and 4094"))]
    pub vlan_id: Option<i32>,

    #[serde(default)]
    pub hide_ssid: bool,

    #[serde(default)]
    pub band: WlanBand,

    /// Parent WLAN template
    pub template_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LabelType {
    #[default]
    Wlan,
    Client,
    Ap,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LabelCreate {
    #[validate(length(min = 1, message = "Label name is required"))]
    pub name: String,

    #[serde(default)]
    pub label_type: LabelType,

    #[serde(default)]
    pub values: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct WxRuleCreate {
    #[validate(length(min = 1, message = "Rule name is required"))]
    pub name: String,

    /// Evaluation order, lowest first
    #[validate(range(min = 1, message = "Order must be at least 1"))]
    pub order: i32,

    #[serde(default)]
    pub action: PolicyAction,

    #[serde(default)]
    pub src_labels: Vec<String>,

    #[serde(default)]
    pub dst_labels: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PskUsage {
    Single,
    #[default]
    Multi,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrgPskCreate {
    #[validate(length(min = 1, message = "PSK name is required"))]
    pub name: String,

    #[validate(length(min = 8, max = 63, message = "Passphrase must be 8-63 characters"))]
    #[schema(min_length = 8, max_length = 63)]
    pub passphrase: String,

    #[validate(length(min = 1, max = 32, message = "SSID must be 1-32 characters"))]
    pub ssid: String,

    #[validate(range(min = 1, max = 4094, message = "VLAN ID must be between 1 and 4094"))]
    pub vlan_id: Option<i32>,

    #[serde(default)]
    pub usage: PskUsage,

    /// Seconds until the key expires
    #[validate(range(min = 0, message = "Expiry cannot be negative"))]
    pub expiry: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn psk(passphrase: &str) -> OrgPskCreate {
        serde_json::from_value(json!({
            "name": "guest",
            "passphrase": passphrase,
            "ssid": "Guest"
        }))
        .unwrap()
    }

    #[test]
    fn passphrase_length_bounds() {
        assert!(psk(&"p".repeat(7)).validate().is_err());
        assert!(psk(&"p".repeat(8)).validate().is_ok());
        assert!(psk(&"p".repeat(63)).validate().is_ok());
        assert!(psk(&"p".repeat(64)).validate().is_err());
    }

    #[test]
    fn psk_defaults_to_multi_use() {
        assert_eq!(psk("password1").usage, PskUsage::Multi);
    }

    #[test]
    fn rf_template_band_defaults() {
        let rf: RfTemplateCreate = serde_json::from_value(json!({"name": "office"})).unwrap();
        assert_eq!(rf.band_24, json!({"enabled": true, "power": 8}));
        assert_eq!(rf.band_5, json!({"enabled": true, "power": 12}));
        assert_eq!(rf.band_6, json!({"enabled": false}));
        assert_eq!(rf.country_code, "US");
    }

    #[test]
    fn wlan_enums_and_ssid_length() {
        let body = json!({"ssid": "Corp", "band": "2.4", "auth_type": "eap"});
        let wlan: WlanCreate = serde_json::from_value(body).unwrap();
        assert_eq!(wlan.band, WlanBand::Band24);
        assert_eq!(wlan.auth_type, AuthType::Eap);
        assert!(wlan.enabled);

        let wlan: WlanCreate = serde_json::from_value(json!({"ssid": "x".repeat(33)})).unwrap();
        assert!(wlan.validate().is_err());

        let unknown_band = json!({"ssid": "Corp", "band": "60"});
        assert!(serde_json::from_value::<WlanCreate>(unknown_band).is_err());
    }

    #[test]
    fn wxrule_order_starts_at_one() {
        let rule: WxRuleCreate = serde_json::from_value(json!({"name": "r", "order": 0})).unwrap();
        assert!(rule.validate().is_err());
        let rule: WxRuleCreate = serde_json::from_value(json!({"name": "r", "order": 1})).unwrap();
        assert!(rule.validate().is_ok());
        assert_eq!(rule.action, PolicyAction::Allow);
    }
}
