//! Key-value store port backing the correspondence ledger and the ban set.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable, process-external store with string values and string sets.
///
/// Every method is a single round-trip; no operation spans several keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the string stored at `key`.
    ///
    /// Returns `None` when the key does not exist.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` at `key`, replacing any previous value.
    ///
    /// The key expires after `expiry` when one is given and never otherwise.
    async fn set(&self, key: &str, value: &str, expiry: Option<Duration>) -> StoreResult<()>;

    /// Adds `member` to the set at `key`. Adding an existing member is a
    /// no-op.
    async fn add_member(&self, key: &str, member: &str) -> StoreResult<()>;

    /// Removes `member` from the set at `key`. Removing an absent member is a
    /// no-op.
    async fn remove_member(&self, key: &str, member: &str) -> StoreResult<()>;

    /// Tests whether `member` belongs to the set at `key`.
    async fn is_member(&self, key: &str, member: &str) -> StoreResult<bool>;
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// The store was reached but rejected the operation.
    #[error("store operation failed: {0}")]
    Operation(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps a connectivity failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }

    /// Wraps a failed operation.
    pub fn operation(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Operation(Arc::new(err))
    }
}
