//! Redis-backed key-value store with automatic reconnection.

use async_trait::async_trait;
use redis::{AsyncCommands, RedisError, aio::ConnectionManager};
use std::time::Duration;

use crate::relay::ports::{KeyValueStore, StoreError, StoreResult};

/// Key-value store over a Redis connection manager.
///
/// Correspondence records map to plain string keys and the ban set to a
/// native Redis set, so membership updates are atomic per member.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    conn: ConnectionManager,
}

impl RedisKeyValueStore {
    /// Connects to the Redis server at `url`.
    ///
    /// Supports both `redis://` and `rediss://` (TLS) URLs; the database
    /// index is taken from the URL path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the URL is invalid or the server is
    /// unreachable.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url).map_err(store_error)?;
        let conn = ConnectionManager::new(client).await.map_err(store_error)?;
        Ok(Self { conn })
    }
}

fn store_error(err: RedisError) -> StoreError {
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        StoreError::unavailable(err)
    } else {
        StoreError::operation(err)
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(store_error)
    }

    async fn set(&self, key: &str, value: &str, expiry: Option<Duration>) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        match expiry {
            Some(ttl) => conn
                .set_ex(key, value, ttl.as_secs().max(1))
                .await
                .map_err(store_error),
            None => conn.set(key, value).await.map_err(store_error),
        }
    }

    async fn add_member(&self, key: &str, member: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.sadd(key, member).await.map_err(store_error)
    }

    async fn remove_member(&self, key: &str, member: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        conn.srem(key, member).await.map_err(store_error)
    }

    async fn is_member(&self, key: &str, member: &str) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        conn.sismember(key, member).await.map_err(store_error)
    }
}
