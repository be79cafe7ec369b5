//! Mist cloud REST client.
//!
//! A client is bound to one API host and one credential. Handlers obtain one
//! per request through [`MistConnector`], which lets tests swap in
//! [`MockMistConnector`] without a network.

use crate::services::metrics::record_mist_call;
use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use service_core::observability::{TracedClientExt, TracedRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

pub const SELF_PATH: &str = "/api/v1/self";

const MAX_ERROR_BODY: usize = 512;

pub fn org_sites_path(org_id: &str) -> String {
    format!("/api/v1/orgs/{}/sites", org_id)
}

#[derive(Debug, Error)]
pub enum MistError {
    #[error("invalid api host: {0}")]
    InvalidHost(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed upstream response: {0}")]
    Decode(String),

    #[error("unexpected upstream payload: {0}")]
    UnexpectedPayload(String),
}

#[async_trait]
pub trait MistApi: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, MistError>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value, MistError>;

    /// Identity of the credential, including its `privileges`.
    async fn get_self(&self) -> Result<Value, MistError> {
        self.get(SELF_PATH).await
    }
}

pub trait MistConnector: Send + Sync {
    fn connect(
        &self,
        api_host: &str,
        token: &Secret<String>,
    ) -> Result<Arc<dyn MistApi>, MistError>;
}

/// Normalizes a configured host into a base URL without trailing slash.
///
/// A bare host gets `https://`; an explicit `http://` or `https://` scheme is
/// kept so a local stand-in can be targeted.
pub fn base_url(api_host: &str) -> Result<String, MistError> {
    let host = api_host.trim();
    if host.is_empty() {
        return Err(MistError::InvalidHost("empty host".to_string()));
    }

    let candidate = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| MistError::InvalidHost(format!("{}: {}", host, e)))?;
    if url.host_str().is_none() || url.query().is_some() || url.path() != "/" {
        return Err(MistError::InvalidHost(host.to_string()));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Picks the organization the session should act on from a `/self` payload.
///
/// With `requested`, any privilege naming that org qualifies. Without it, the
/// first org-scoped privilege wins, then any privilege carrying an `org_id`.
pub fn resolve_org_id(identity: &Value, requested: Option<&str>) -> Result<String, MistError> {
    let privileges = identity
        .get("privileges")
        .and_then(Value::as_array)
        .ok_or_else(|| MistError::UnexpectedPayload("identity has no privileges".to_string()))?;

    fn org_of(privilege: &Value) -> Option<&str> {
        privilege
            .get("org_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    let found = match requested {
        Some(wanted) => privileges
            .iter()
            .filter_map(org_of)
            .find(|id| *id == wanted),
        None => privileges
            .iter()
            .find(|p| p.get("scope").and_then(Value::as_str) == Some("org"))
            .and_then(org_of)
            .or_else(|| privileges.iter().find_map(org_of)),
    };

    match (found, requested) {
        (Some(id), _) => Ok(id.to_string()),
        (None, Some(wanted)) => Err(MistError::UnexpectedPayload(format!(
            "credential has no privilege on org {}",
            wanted
        ))),
        (None, None) => Err(MistError::UnexpectedPayload(
            "credential has no organization privilege".to_string(),
        )),
    }
}

#[derive(Clone)]
pub struct HttpMistConnector {
    client: Client,
}

impl HttpMistConnector {
    pub fn new(timeout: Duration) -> Result<Self, MistError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("provisioning-service/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MistError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

impl MistConnector for HttpMistConnector {
    fn connect(
        &self,
        api_host: &str,
        token: &Secret<String>,
    ) -> Result<Arc<dyn MistApi>, MistError> {
        let client = MistClient::new(self.client.clone(), api_host, token.clone())?;
        Ok(Arc::new(client))
    }
}

#[derive(Clone)]
pub struct MistClient {
    client: Client,
    base_url: String,
    token: Secret<String>,
}

impl MistClient {
    pub fn new(client: Client, api_host: &str, token: Secret<String>) -> Result<Self, MistError> {
        Ok(Self {
            client,
            base_url: base_url(api_host)?,
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: TracedRequest) -> TracedRequest {
        request
            .header(
                "Authorization",
                &format!("Token {}", self.token.expose_secret()),
            )
            .header("Accept", "application/json")
    }

    async fn execute(
        &self,
        method: &'static str,
        path: &str,
        request: TracedRequest,
    ) -> Result<Value, MistError> {
        tracing::debug!(method, path, base_url = %self.base_url, "Calling Mist API");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                record_mist_call(method, "transport");
                tracing::warn!(method, path, "Mist API transport failure: {}", e);
                return Err(MistError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            record_mist_call(method, "transport");
            MistError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            record_mist_call(method, "status");
            tracing::warn!(
                method,
                path,
                status = status.as_u16(),
                "Mist API returned error status"
            );
            return Err(MistError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        if body.trim().is_empty() {
            record_mist_call(method, "ok");
            return Ok(Value::Null);
        }

        match serde_json::from_str(&body) {
            Ok(value) => {
                record_mist_call(method, "ok");
                Ok(value)
            }
            Err(e) => {
                record_mist_call(method, "decode");
                Err(MistError::Decode(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl MistApi for MistClient {
    async fn get(&self, path: &str) -> Result<Value, MistError> {
        let request = self.authorize(self.client.traced_get(&self.url(path)));
        self.execute("GET", path, request).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, MistError> {
        let request = self.authorize(self.client.traced_post(&self.url(path))).json(body);
        self.execute("POST", path, request).await
    }
}

fn truncate(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

/// A call seen by [`MockMistConnector`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub api_host: String,
    pub token: String,
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

type CannedResponse = Result<Value, (u16, String)>;

#[derive(Default)]
struct MockState {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<HashMap<(&'static str, String), CannedResponse>>,
}

/// In-process stand-in for the Mist cloud. Unregistered routes answer 404.
#[derive(Clone, Default)]
pub struct MockMistConnector {
    state: Arc<MockState>,
}

impl MockMistConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: &'static str, path: &str, body: Value) {
        if let Ok(mut responses) = self.state.responses.lock() {
            responses.insert((method, path.to_string()), Ok(body));
        }
    }

    pub fn fail(&self, method: &'static str, path: &str, status: u16, body: &str) {
        if let Ok(mut responses) = self.state.responses.lock() {
            responses.insert((method, path.to_string()), Err((status, body.to_string())));
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state
            .calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl MistConnector for MockMistConnector {
    fn connect(
        &self,
        api_host: &str,
        token: &Secret<String>,
    ) -> Result<Arc<dyn MistApi>, MistError> {
        base_url(api_host)?;
        Ok(Arc::new(MockMistClient {
            api_host: api_host.to_string(),
            token: token.expose_secret().clone(),
            state: self.state.clone(),
        }))
    }
}

struct MockMistClient {
    api_host: String,
    token: String,
    state: Arc<MockState>,
}

impl MockMistClient {
    fn answer(
        &self,
        method: &'static str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, MistError> {
        if let Ok(mut calls) = self.state.calls.lock() {
            calls.push(RecordedCall {
                api_host: self.api_host.clone(),
                token: self.token.clone(),
                method,
                path: path.to_string(),
                body: body.cloned(),
            });
        }

        let canned = self
            .state
            .responses
            .lock()
            .map_err(|e| MistError::Transport(e.to_string()))?
            .get(&(method, path.to_string()))
            .cloned();

        match canned {
            Some(Ok(value)) => Ok(value),
            Some(Err((status, body))) => Err(MistError::Status { status, body }),
            None => Err(MistError::Status {
                status: 404,
                body: format!("no canned response for {} {}", method, path),
            }),
        }
    }
}

#[async_trait]
impl MistApi for MockMistClient {
    async fn get(&self, path: &str) -> Result<Value, MistError> {
        self.answer("GET", path, None)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, MistError> {
        self.answer("POST", path, Some(body))
    }
}
