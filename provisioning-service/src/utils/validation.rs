use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use std::net::IpAddr;
use validator::{Validate, ValidationError};

use crate::services::mist::base_url;

/// JSON body that has passed `validator` checks.
///
/// Syntax errors are a 400; well-formed JSON with the wrong shape or values
/// is a 422.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(e) => AppError::InvalidBody(e.body_text()),
        other => AppError::BadRequest(anyhow::anyhow!("Json parse error: {}", other.body_text())),
    }
}

/// Like [`ValidatedJson`] but an empty body yields `T::default()`.
pub fn parse_optional_json<T>(body: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Validate + Default,
{
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(T::default());
    }

    let value: T = serde_json::from_slice(body).map_err(|e| {
        if e.is_data() {
            AppError::InvalidBody(e.to_string())
        } else {
            AppError::BadRequest(anyhow::anyhow!("Json parse error: {}", e))
        }
    })?;

    value.validate()?;
    Ok(value)
}

pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: QueryRejection| AppError::InvalidBody(e.body_text()))?;

        value.validate()?;

        Ok(ValidatedQuery(value))
    }
}

pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e: PathRejection| AppError::InvalidBody(e.body_text()))?;

        value.validate()?;

        Ok(ValidatedPath(value))
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn validate_api_host(host: &str) -> Result<(), ValidationError> {
    base_url(host)
        .map(|_| ())
        .map_err(|_| invalid("api_host", "must be a host name such as api.mist.com"))
}

/// `a.b.c.d/nn` or an IPv6 prefix.
pub fn validate_cidr(value: &str) -> Result<(), ValidationError> {
    let err = || invalid("cidr", "must be a subnet in CIDR notation, e.g. 10.0.10.0/24");

    let (addr, prefix) = value.split_once('/').ok_or_else(err)?;
    let addr: IpAddr = addr.parse().map_err(|_| err())?;
    let prefix: u8 = prefix.parse().map_err(|_| err())?;
    let max = if addr.is_ipv4() { 32 } else { 128 };

    if prefix > max {
        return Err(err());
    }
    Ok(())
}

pub fn validate_ip(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| invalid("ip", "must be an IPv4 or IPv6 address"))
}

/// ISO 3166-1 alpha-2, upper case.
pub fn validate_country_code(value: &str) -> Result<(), ValidationError> {
    if value.len() == 2 && value.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(invalid("country_code", "must be two upper-case letters, e.g. US"))
    }
}

/// `aa:bb:cc:dd:ee:ff`, `aa-bb-cc-dd-ee-ff` or bare `aabbccddeeff`.
pub fn validate_mac(value: &str) -> Result<(), ValidationError> {
    let err = || invalid("mac", "must be a MAC address such as aa:bb:cc:dd:ee:ff");

    let hex: String = if value.len() == 17 {
        let separator = value.as_bytes()[2];
        if separator != b':' && separator != b'-' {
            return Err(err());
        }
        let groups: Vec<&str> = value.split(separator as char).collect();
        if groups.len() != 6 || groups.iter().any(|g| g.len() != 2) {
            return Err(err());
        }
        groups.concat()
    } else {
        value.to_string()
    };

    if hex.len() == 12 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn cidr_accepts_v4_and_v6() {
        assert!(validate_cidr("10.0.10.0/24").is_ok());
        assert!(validate_cidr("0.0.0.0/0").is_ok());
        assert!(validate_cidr("2001:db8::/32").is_ok());
    }

    #[test]
    fn cidr_rejects_bad_prefixes() {
        assert!(validate_cidr("10.0.10.0").is_err());
        assert!(validate_cidr("10.0.10.0/33").is_err());
        assert!(validate_cidr("10.0.10/24").is_err());
        assert!(validate_cidr("vlan10/24").is_err());
    }

    #[test]
    fn ip_addresses() {
        assert!(validate_ip("10.0.10.1").is_ok());
        assert!(validate_ip("fe80::1").is_ok());
        assert!(validate_ip("10.0.10.256").is_err());
    }

    #[test]
    fn country_codes() {
        assert!(validate_country_code("US").is_ok());
        assert!(validate_country_code("us").is_err());
        assert!(validate_country_code("USA").is_err());
    }

    #[test]
    fn mac_addresses() {
        assert!(validate_mac("aa:bb:cc:dd:ee:ff").is_ok());
        assert!(validate_mac("AA-BB-CC-DD-EE-FF").is_ok());
        assert!(validate_mac("aabbccddeeff").is_ok());
        assert!(validate_mac("aa:bb-cc:dd:ee:ff").is_err());
        assert!(validate_mac("aa:bb:cc:dd:ee:gg").is_err());
        assert!(validate_mac("aabbccddee").is_err());
    }

    #[test]
    fn api_hosts() {
        assert!(validate_api_host("api.eu.mist.com").is_ok());
        assert!(validate_api_host("https://api.mist.com").is_ok());
        assert!(validate_api_host("api.mist.com/api/v1").is_err());
    }

    #[derive(Debug, Default, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1))]
        name: Option<String>,
    }

    #[test]
    fn optional_json_defaults_on_empty_body() {
        let sample: Sample = parse_optional_json(b"").unwrap();
        assert!(sample.name.is_none());
        let sample: Sample = parse_optional_json(b"  \n").unwrap();
        assert!(sample.name.is_none());
    }

    #[test]
    fn optional_json_distinguishes_syntax_from_data_errors() {
        assert!(matches!(
            parse_optional_json::<Sample>(b"{not json"),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            parse_optional_json::<Sample>(br#"{"name": 5}"#),
            Err(AppError::InvalidBody(_))
        ));
        assert!(matches!(
            parse_optional_json::<Sample>(br#"{"name": ""}"#),
            Err(AppError::ValidationError(_))
        ));
    }
}
