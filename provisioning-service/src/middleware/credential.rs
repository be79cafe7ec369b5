//! Caller credential for the Mist API.
//!
//! Every provisioning route takes an [`ApiCredential`]. It is read from the
//! `X-Mist-API-Key` header, or the operator default when the header is absent,
//! and checked once before any handler logic runs.

use crate::services::SessionScope;
use crate::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use secrecy::{ExposeSecret, Secret};
use service_core::error::AppError;

pub const API_KEY_HEADER: &str = "x-mist-api-key";

const MAX_TOKEN_LEN: usize = 512;

#[derive(Clone)]
pub struct ApiCredential {
    token: Secret<String>,
    scope: SessionScope,
}

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredential")
            .field("scope", &self.scope.fingerprint())
            .finish()
    }
}

impl ApiCredential {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let token = raw.trim();

        if token.is_empty() {
            return Err(AppError::Unauthorized(anyhow::anyhow!("Empty Mist API key")));
        }
        if token.len() > MAX_TOKEN_LEN {
            return Err(AppError::Unauthorized(anyhow::anyhow!(
                "Mist API key exceeds {} bytes",
                MAX_TOKEN_LEN
            )));
        }
        if !token.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(AppError::Unauthorized(anyhow::anyhow!(
                "Mist API key must be printable ASCII without whitespace"
            )));
        }

        Ok(Self {
            scope: SessionScope::from_token(token),
            token: Secret::new(token.to_string()),
        })
    }

    pub fn token(&self) -> &Secret<String> {
        &self.token
    }

    pub fn scope(&self) -> &SessionScope {
        &self.scope
    }
}

#[async_trait]
impl FromRequestParts<AppState> for ApiCredential {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credential = match parts.headers.get(API_KEY_HEADER) {
            Some(value) => {
                let raw = value.to_str().map_err(|_| {
                    AppError::Unauthorized(anyhow::anyhow!(
                        "X-Mist-API-Key must be printable ASCII"
                    ))
                })?;
                ApiCredential::parse(raw)?
            }
            None => {
                let fallback = state.fallback_api_key.as_ref().ok_or_else(|| {
                    AppError::Unauthorized(anyhow::anyhow!(
                        "Missing X-Mist-API-Key header (no operator default configured)"
                    ))
                })?;
                ApiCredential::parse(fallback.expose_secret())?
            }
        };

        tracing::Span::current().record("session", credential.scope.fingerprint());

        Ok(credential)
    }
}
