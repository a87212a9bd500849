//! In-memory key-value store.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::relay::ports::{KeyValueStore, StoreError, StoreResult};

/// Thread-safe in-memory key-value store.
///
/// Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<RwLock<InMemoryStoreState>>,
    unavailable: Arc<AtomicBool>,
}

#[derive(Debug, Default)]
struct InMemoryStoreState {
    values: HashMap<String, StoredValue>,
    sets: HashMap<String, HashSet<String>>,
}

#[derive(Debug)]
struct StoredValue {
    value: String,
    expires_at: Option<Instant>,
}

impl StoredValue {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| deadline > now)
    }
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail with
    /// [`StoreError::Unavailable`] until called again with `false`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Writes a raw string value, bypassing any record encoding.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    pub fn insert_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check_available()?;
        let mut state = self.state.write().map_err(poisoned)?;
        state.values.insert(
            key.to_owned(),
            StoredValue {
                value: value.to_owned(),
                expires_at: None,
            },
        );
        Ok(())
    }

    /// Returns the number of live string values.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    pub fn value_count(&self) -> StoreResult<usize> {
        self.check_available()?;
        let state = self.state.read().map_err(poisoned)?;
        let now = Instant::now();
        Ok(state.values.values().filter(|v| v.is_live(now)).count())
    }

    /// Returns the members of the set at `key`, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    pub fn members(&self, key: &str) -> StoreResult<Vec<String>> {
        self.check_available()?;
        let state = self.state.read().map_err(poisoned)?;
        let mut members: Vec<String> = state
            .sets
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        members.sort();
        Ok(members)
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "in-memory store marked unavailable",
            )));
        }
        Ok(())
    }
}

fn poisoned(err: impl std::fmt::Display) -> StoreError {
    StoreError::operation(std::io::Error::other(err.to_string()))
}

fn wrong_type(key: &str) -> StoreError {
    StoreError::operation(std::io::Error::other(format!(
        "WRONGTYPE operation against key '{key}' holding the wrong kind of value"
    )))
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check_available()?;
        let state = self.state.read().map_err(poisoned)?;
        if state.sets.contains_key(key) {
            return Err(wrong_type(key));
        }
        let now = Instant::now();
        Ok(state
            .values
            .get(key)
            .filter(|stored| stored.is_live(now))
            .map(|stored| stored.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, expiry: Option<Duration>) -> StoreResult<()> {
        self.check_available()?;
        let mut state = self.state.write().map_err(poisoned)?;
        state.sets.remove(key);
        state.values.insert(
            key.to_owned(),
            StoredValue {
                value: value.to_owned(),
                expires_at: expiry.and_then(|ttl| Instant::now().checked_add(ttl)),
            },
        );
        Ok(())
    }

    async fn add_member(&self, key: &str, member: &str) -> StoreResult<()> {
        self.check_available()?;
        let mut state = self.state.write().map_err(poisoned)?;
        if state.values.contains_key(key) {
            return Err(wrong_type(key));
        }
        state
            .sets
            .entry(key.to_owned())
            .or_default()
            .insert(member.to_owned());
        Ok(())
    }

    async fn remove_member(&self, key: &str, member: &str) -> StoreResult<()> {
        self.check_available()?;
        let mut state = self.state.write().map_err(poisoned)?;
        if state.values.contains_key(key) {
            return Err(wrong_type(key));
        }
        let emptied = state.sets.get_mut(key).is_some_and(|set| {
            set.remove(member);
            set.is_empty()
        });
        if emptied {
            state.sets.remove(key);
        }
        Ok(())
    }

    async fn is_member(&self, key: &str, member: &str) -> StoreResult<bool> {
        self.check_available()?;
        let state = self.state.read().map_err(poisoned)?;
        if state.values.contains_key(key) {
            return Err(wrong_type(key));
        }
        Ok(state.sets.get(key).is_some_and(|set| set.contains(member)))
    }
}
