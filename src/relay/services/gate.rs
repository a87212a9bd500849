//! Access gate: the per-deployment ban set.

use std::sync::Arc;
use tracing::info;

use crate::relay::{
    domain::{BAN_SET_SENTINEL, KeyNamespace, UserId},
    ports::{KeyValueStore, StoreResult},
};

/// Ban/unban transitions over the ban set of one deployment.
///
/// The gate never touches correspondence records.
pub struct AccessGate<S>
where
    S: KeyValueStore,
{
    store: Arc<S>,
    namespace: KeyNamespace,
    ban_set_key: String,
}

impl<S> AccessGate<S>
where
    S: KeyValueStore,
{
    /// Creates a gate over `store` scoped to `namespace`.
    #[must_use]
    pub fn new(store: Arc<S>, namespace: &KeyNamespace) -> Self {
        Self {
            store,
            namespace: namespace.clone(),
            ban_set_key: namespace.ban_set_key(),
        }
    }

    /// Seeds the ban set with [`BAN_SET_SENTINEL`] so the key exists before
    /// the first real ban.
    ///
    /// # Errors
    ///
    /// Returns [`crate::relay::ports::StoreError`] when the write fails.
    pub async fn initialize(&self) -> StoreResult<()> {
        self.store
            .add_member(&self.ban_set_key, BAN_SET_SENTINEL)
            .await
    }

    /// Adds `user` to the ban set. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::relay::ports::StoreError`] when the write fails.
    pub async fn ban(&self, user: UserId) -> StoreResult<()> {
        self.store
            .add_member(&self.ban_set_key, &self.namespace.ban_member(user))
            .await?;
        info!(%user, "user banned");
        Ok(())
    }

    /// Removes `user` from the ban set. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::relay::ports::StoreError`] when the write fails.
    pub async fn unban(&self, user: UserId) -> StoreResult<()> {
        self.store
            .remove_member(&self.ban_set_key, &self.namespace.ban_member(user))
            .await?;
        info!(%user, "user unbanned");
        Ok(())
    }

    /// Tests whether `user` is banned.
    ///
    /// # Errors
    ///
    /// Returns [`crate::relay::ports::StoreError`] when the read fails.
    pub async fn is_banned(&self, user: UserId) -> StoreResult<bool> {
        self.store
            .is_member(&self.ban_set_key, &self.namespace.ban_member(user))
            .await
    }
}
