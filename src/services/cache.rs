use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Derived league statistics stay cached for hours; mutations invalidate.
pub const LEAGUE_CACHE_TTL_SECONDS: usize = 6 * 60 * 60;

/// Best-effort JSON cache over Redis.
///
/// Every operation degrades to a miss: a missing backend, a connection
/// failure, or a decode failure logs a warning and lets the caller recompute.
/// Correctness never depends on this service.
#[derive(Clone)]
pub struct CacheService {
    client: Option<Arc<redis::Client>>,
}

impl CacheService {
    pub fn new(client: Option<Arc<redis::Client>>) -> Self {
        Self { client }
    }

    /// A cache that always misses, for contexts without a Redis backend.
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let client = self.client.as_ref()?;
        let mut conn = match client.get_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!("Cache unavailable for get {}: {}", key, e);
                return None;
            }
        };
        let raw: Option<String> = match conn.get(key).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };
        let raw = raw?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Cache entry for {} failed to decode: {}", key, e);
                None
            }
        }
    }

    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl_seconds: usize) {
        let Some(client) = self.client.as_ref() else {
            return;
        };
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize cache entry for {}: {}", key, e);
                return;
            }
        };
        match client.get_async_connection().await {
            Ok(mut conn) => {
                if let Err(e) = conn.set_ex::<_, _, ()>(key, raw, ttl_seconds).await {
                    tracing::warn!("Cache write failed for {}: {}", key, e);
                }
            }
            Err(e) => tracing::warn!("Cache unavailable for set {}: {}", key, e),
        }
    }

    pub async fn delete(&self, key: &str) {
        let Some(client) = self.client.as_ref() else {
            return;
        };
        match client.get_async_connection().await {
            Ok(mut conn) => {
                if let Err(e) = conn.del::<_, ()>(key).await {
                    tracing::warn!("Cache delete failed for {}: {}", key, e);
                }
            }
            Err(e) => tracing::warn!("Cache unavailable for delete {}: {}", key, e),
        }
    }

    /// Drop every cached derivation for a league. Called after result updates
    /// and membership changes, before the next read.
    pub async fn invalidate_league(&self, league_id: Uuid) {
        for key in [
            league_table_key(league_id),
            leaderboard_key(league_id, "goals"),
            leaderboard_key(league_id, "assists"),
            leaderboard_key(league_id, "rating"),
        ] {
            self.delete(&key).await;
        }
    }
}

pub fn league_table_key(league_id: Uuid) -> String {
    format!("league:{}:table", league_id)
}

pub fn leaderboard_key(league_id: Uuid, metric: &str) -> String {
    format!("league:{}:top:{}", league_id, metric)
}
