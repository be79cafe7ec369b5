//! Session context: the `(api_host, org_id)` pair recorded by the identity
//! handshake and read back by every downstream call.
//!
//! Context is partitioned by a fingerprint of the caller's API credential, so
//! two operators driving the service concurrently never see each other's org.

use crate::services::context_store::{ContextStore, StoreError};
use crate::services::error::ServiceError;
use crate::services::metrics::record_context_event;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use utoipa::ToSchema;

const API_HOST_KEY: &str = "api_host";
const ORG_ID_KEY: &str = "org_id";
const FINGERPRINT_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionContext {
    /// Mist API host the session talks to, e.g. `api.mist.com`
    pub api_host: String,
    pub org_id: String,
}

/// Stable, non-reversible partition key derived from an API credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionScope(String);

impl SessionScope {
    pub fn from_token(token: &str) -> Self {
        let digest = Sha256::digest(token.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(FINGERPRINT_LEN);
        Self(encoded)
    }

    pub fn fingerprint(&self) -> &str {
        &self.0
    }
}

#[derive(Clone)]
pub struct SessionRepository {
    store: Arc<dyn ContextStore>,
    prefix: String,
    ttl_seconds: Option<u64>,
}

impl SessionRepository {
    pub fn new(
        store: Arc<dyn ContextStore>,
        prefix: impl Into<String>,
        ttl_seconds: Option<u64>,
    ) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            ttl_seconds,
        }
    }

    pub fn store(&self) -> &Arc<dyn ContextStore> {
        &self.store
    }

    fn key(&self, scope: &SessionScope, name: &str) -> String {
        format!("{}:{}:{}", self.prefix, scope.fingerprint(), name)
    }

    /// Overwrites both keys in one atomic write, so a failed save leaves the
    /// previous context intact.
    pub async fn save(
        &self,
        scope: &SessionScope,
        context: &SessionContext,
    ) -> Result<(), StoreError> {
        let entries = [
            (self.key(scope, API_HOST_KEY), context.api_host.clone()),
            (self.key(scope, ORG_ID_KEY), context.org_id.clone()),
        ];
        self.store.set_many(&entries, self.ttl_seconds).await?;

        record_context_event("saved");
        tracing::info!(
            session = %scope.fingerprint(),
            api_host = %context.api_host,
            org_id = %context.org_id,
            "Session context saved"
        );
        Ok(())
    }

    /// `None` unless both keys are present and non-empty.
    pub async fn load(
        &self,
        scope: &SessionScope,
    ) -> Result<Option<SessionContext>, StoreError> {
        let api_host = self.store.get(&self.key(scope, API_HOST_KEY)).await?;
        let org_id = self.store.get(&self.key(scope, ORG_ID_KEY)).await?;

        match (api_host, org_id) {
            (Some(api_host), Some(org_id)) if !api_host.is_empty() && !org_id.is_empty() => {
                record_context_event("loaded");
                Ok(Some(SessionContext { api_host, org_id }))
            }
            _ => {
                record_context_event("missing");
                Ok(None)
            }
        }
    }

    pub async fn require(&self, scope: &SessionScope) -> Result<SessionContext, ServiceError> {
        self.load(scope).await?.ok_or(ServiceError::MissingContext)
    }

    /// Returns the number of keys actually removed (0..=2).
    pub async fn clear(&self, scope: &SessionScope) -> Result<u64, StoreError> {
        let removed = self.store.delete(&self.key(scope, API_HOST_KEY)).await?
            + self.store.delete(&self.key(scope, ORG_ID_KEY)).await?;

        record_context_event("cleared");
        tracing::info!(session = %scope.fingerprint(), removed, "Session context cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::context_store::InMemoryContextStore;

    fn repository() -> (Arc<InMemoryContextStore>, SessionRepository) {
        let store = Arc::new(InMemoryContextStore::new());
        let repo = SessionRepository::new(store.clone(), "mist-ctx", None);
        (store, repo)
    }

    fn context() -> SessionContext {
        SessionContext {
            api_host: "api.mist.com".to_string(),
            org_id: "org-123".to_string(),
        }
    }

    #[test]
    fn fingerprint_is_stable_and_short() {
        let a = SessionScope::from_token("token-a");
        assert_eq!(a, SessionScope::from_token("token-a"));
        assert_ne!(a, SessionScope::from_token("token-b"));
        assert_eq!(a.fingerprint().len(), FINGERPRINT_LEN);
        assert!(a.fingerprint().chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!a.fingerprint().contains("token"));
    }

    #[tokio::test]
    async fn save_then_load() {
        let (store, repo) = repository();
        let scope = SessionScope::from_token("token-a");

        repo.save(&scope, &context()).await.unwrap();

        assert_eq!(repo.load(&scope).await.unwrap(), Some(context()));
        let key = format!("mist-ctx:{}:org_id", scope.fingerprint());
        assert_eq!(store.get(&key).await.unwrap().as_deref(), Some("org-123"));
    }

    #[tokio::test]
    async fn half_written_context_is_missing() {
        let (store, repo) = repository();
        let scope = SessionScope::from_token("token-a");
        let key = format!("mist-ctx:{}:api_host", scope.fingerprint());
        store.set(&key, "api.mist.com", None).await.unwrap();

        assert_eq!(repo.load(&scope).await.unwrap(), None);
        assert!(matches!(
            repo.require(&scope).await,
            Err(ServiceError::MissingContext)
        ));
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_context() {
        let (store, repo) = repository();
        let scope = SessionScope::from_token("token-a");
        let us = SessionContext {
            api_host: "api.mist.com".to_string(),
            org_id: "org-US".to_string(),
        };
        let eu = SessionContext {
            api_host: "api.eu.mist.com".to_string(),
            org_id: "org-EU".to_string(),
        };
        repo.save(&scope, &us).await.unwrap();

        store.reject_writes_to(Some(":org_id"));
        assert!(repo.save(&scope, &eu).await.is_err());

        assert_eq!(repo.load(&scope).await.unwrap(), Some(us));
    }

    #[tokio::test]
    async fn scopes_are_isolated() {
        let (_, repo) = repository();
        let a = SessionScope::from_token("token-a");
        let b = SessionScope::from_token("token-b");

        repo.save(&a, &context()).await.unwrap();

        assert_eq!(repo.load(&b).await.unwrap(), None);
        assert_eq!(repo.clear(&b).await.unwrap(), 0);
        assert_eq!(repo.load(&a).await.unwrap(), Some(context()));
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let (_, repo) = repository();
        let scope = SessionScope::from_token("token-a");
        repo.save(&scope, &context()).await.unwrap();

        assert_eq!(repo.clear(&scope).await.unwrap(), 2);
        assert_eq!(repo.clear(&scope).await.unwrap(), 0);
        assert_eq!(repo.load(&scope).await.unwrap(), None);
    }

    #[tokio::test]
    async fn store_outage_is_an_error_not_missing_context() {
        let (store, repo) = repository();
        let scope = SessionScope::from_token("token-a");
        repo.save(&scope, &context()).await.unwrap();
        store.set_available(false);

        assert!(matches!(
            repo.require(&scope).await,
            Err(ServiceError::Store(StoreError::Unavailable(_)))
        ));
    }
}
