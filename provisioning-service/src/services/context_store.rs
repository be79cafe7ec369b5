//! Key-value store holding per-session provisioning context.

use async_trait::async_trait;
use redis::{aio::ConnectionManager, Client};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::OnceCell;

const PING_TIMEOUT: Duration = Duration::from_secs(2);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("context store unavailable: {0}")]
    Unavailable(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// String store keyed per session.
#[async_trait]
pub trait ContextStore: Send + Sync {
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>)
        -> Result<(), StoreError>;

    /// Writes every entry or none of them.
    async fn set_many(
        &self,
        entries: &[(String, String)],
        ttl_seconds: Option<u64>,
    ) -> Result<(), StoreError>;

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Returns how many keys were removed; a missing key yields `Ok(0)`.
    async fn delete(&self, key: &str) -> Result<u64, StoreError>;

    /// Reachability check. Never fails; an unreachable store is `false`.
    async fn ping(&self) -> bool;
}

/// Redis-backed store. The connection is opened on first use, so the service
/// starts (and reports itself degraded) while Redis is still unreachable.
#[derive(Clone)]
pub struct RedisContextStore {
    client: Client,
    manager: Arc<OnceCell<ConnectionManager>>,
}

impl RedisContextStore {
    /// Only parses the URL; no connection is attempted.
    pub fn new(url: &str) -> Result<Self, StoreError> {
        let client = Client::open(url)?;
        Ok(Self {
            client,
            manager: Arc::new(OnceCell::new()),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager, StoreError> {
        let manager = self
            .manager
            .get_or_try_init(|| async {
                // ConnectionManager reconnects on its own after the first connection.
                let connect = self.client.get_connection_manager_with_backoff(2, 100, 1);
                let manager = tokio::time::timeout(CONNECT_TIMEOUT, connect)
                    .await
                    .map_err(|_| {
                        StoreError::Unavailable("timed out connecting to Redis".to_string())
                    })?
                    .map_err(|e| {
                        tracing::error!("Failed to get Redis connection manager: {}", e);
                        StoreError::from(e)
                    })?;
                tracing::info!("Connected to context store");
                Ok::<_, StoreError>(manager)
            })
            .await?;
        Ok(manager.clone())
    }
}

#[async_trait]
impl ContextStore for RedisContextStore {
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl_seconds {
            cmd.arg("EX").arg(ttl);
        }

        let _: () = cmd.query_async(&mut conn).await.map_err(|e| {
            tracing::error!(key = %key, "Failed to write context key: {}", e);
            StoreError::from(e)
        })?;
        Ok(())
    }

    async fn set_many(
        &self,
        entries: &[(String, String)],
        ttl_seconds: Option<u64>,
    ) -> Result<(), StoreError> {
        let mut conn = self.connection().await?;
        let mut pipe = redis::pipe();
        pipe.atomic();
        for (key, value) in entries {
            let cmd = pipe.cmd("SET").arg(key).arg(value);
            if let Some(ttl) = ttl_seconds {
                cmd.arg("EX").arg(ttl);
            }
            cmd.ignore();
        }

        let _: () = pipe.query_async(&mut conn).await.map_err(|e| {
            tracing::error!(keys = entries.len(), "Failed to write context keys: {}", e);
            StoreError::from(e)
        })?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                tracing::error!(key = %key, "Failed to read context key: {}", e);
                StoreError::from(e)
            })?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        let mut conn = self.connection().await?;
        let removed: u64 = redis::cmd("DEL")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                tracing::error!(key = %key, "Failed to delete context key: {}", e);
                StoreError::from(e)
            })?;
        Ok(removed)
    }

    async fn ping(&self) -> bool {
        let round_trip = async {
            let mut conn = self.connection().await?;
            let _: String = redis::cmd("PING").query_async(&mut conn).await?;
            Ok::<_, StoreError>(())
        };

        match tokio::time::timeout(PING_TIMEOUT, round_trip).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::warn!("Context store ping failed: {}", e);
                false
            }
            Err(_) => {
                tracing::warn!("Context store ping timed out");
                false
            }
        }
    }
}

/// Process-local store for tests and single-node development.
pub struct InMemoryContextStore {
    entries: Mutex<HashMap<String, (String, Option<Instant>)>>,
    available: AtomicBool,
    rejected_suffix: Mutex<Option<String>>,
}

impl Default for InMemoryContextStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContextStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            rejected_suffix: Mutex::new(None),
        }
    }

    /// Simulates an outage: every operation fails and `ping` reports `false`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Makes writes to keys ending in `suffix` fail while reads keep working.
    pub fn reject_writes_to(&self, suffix: Option<&str>) {
        if let Ok(mut rejected) = self.rejected_suffix.lock() {
            *rejected = suffix.map(str::to_string);
        }
    }

    fn check_writable(&self, key: &str) -> Result<(), StoreError> {
        let rejected = self
            .rejected_suffix
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("context store mutex poisoned: {}", e)))?;
        match rejected.as_deref() {
            Some(suffix) if key.ends_with(suffix) => Err(StoreError::Unavailable(format!(
                "write to {} rejected",
                key
            ))),
            _ => Ok(()),
        }
    }

    fn guard(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, (String, Option<Instant>)>>, StoreError>
    {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store offline".to_string()));
        }
        self.entries
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("context store mutex poisoned: {}", e)))
    }
}

#[async_trait]
impl ContextStore for InMemoryContextStore {
    async fn set(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: Option<u64>,
    ) -> Result<(), StoreError> {
        self.check_writable(key)?;
        let expires_at = ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl));
        self.guard()?
            .insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }

    async fn set_many(
        &self,
        entries: &[(String, String)],
        ttl_seconds: Option<u64>,
    ) -> Result<(), StoreError> {
        for (key, _) in entries {
            self.check_writable(key)?;
        }

        let expires_at = ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl));
        let mut stored = self.guard()?;
        for (key, value) in entries {
            stored.insert(key.clone(), (value.clone(), expires_at));
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.guard()?;
        let expired = matches!(
            entries.get(key),
            Some((_, Some(expires_at))) if *expires_at <= Instant::now()
        );
        if expired {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|(value, _)| value.clone()))
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        Ok(self.guard()?.remove(key).map_or(0, |_| 1))
    }

    async fn ping(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}
