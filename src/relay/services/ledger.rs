//! Correspondence ledger: routing metadata for forward-chat messages.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::relay::{
    domain::{CorrespondenceRecord, KeyNamespace, MessageId, RecordFormatError},
    ports::{KeyValueStore, StoreError},
};

use super::RelayError;

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors returned by [`CorrespondenceLedger`].
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// Store round-trip failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No record exists for the forward-chat message.
    #[error("no correspondence record for forward-chat message {0}")]
    NotFound(MessageId),

    /// The stored value does not follow the record grammar.
    #[error("corrupted correspondence record for forward-chat message {forward_message}: {source}")]
    Malformed {
        /// Forward-chat message whose record is corrupted.
        forward_message: MessageId,
        /// Decoding failure.
        source: RecordFormatError,
    },
}

impl From<LedgerError> for RelayError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Store(source) => Self::Store(source),
            LedgerError::NotFound(forward_message) => Self::NotFound(forward_message),
            LedgerError::Malformed {
                forward_message,
                source,
            } => Self::MalformedRecord {
                forward_message,
                source,
            },
        }
    }
}

/// Maps forward-chat message ids to the sender and reply target they came
/// from.
pub struct CorrespondenceLedger<S>
where
    S: KeyValueStore,
{
    store: Arc<S>,
    namespace: KeyNamespace,
    retention: Option<Duration>,
}

impl<S> CorrespondenceLedger<S>
where
    S: KeyValueStore,
{
    /// Creates a ledger over `store` scoped to `namespace`.
    ///
    /// Records never expire unless [`Self::with_retention`] is applied.
    #[must_use]
    pub const fn new(store: Arc<S>, namespace: KeyNamespace) -> Self {
        Self {
            store,
            namespace,
            retention: None,
        }
    }

    /// Expires every record written from now on after `retention`.
    #[must_use]
    pub const fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = Some(retention);
        self
    }

    /// Returns the key namespace of this deployment.
    #[must_use]
    pub const fn namespace(&self) -> &KeyNamespace {
        &self.namespace
    }

    /// Stores `record` for the forward-chat message `forward_message`.
    ///
    /// An existing record under the same id is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Store`] when the write fails.
    pub async fn record(
        &self,
        forward_message: MessageId,
        record: &CorrespondenceRecord,
    ) -> LedgerResult<()> {
        let key = self.namespace.correspondence_key(forward_message);
        let value = record.encode();
        self.store.set(&key, &value, self.retention).await?;
        debug!(%forward_message, sender = %record.sender(), mode = %record.reply_mode(), "recorded correspondence");
        Ok(())
    }

    /// Reads the record for the forward-chat message `forward_message`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] for untracked messages,
    /// [`LedgerError::Malformed`] when the stored value is corrupted, and
    /// [`LedgerError::Store`] when the read fails.
    pub async fn lookup(&self, forward_message: MessageId) -> LedgerResult<CorrespondenceRecord> {
        let key = self.namespace.correspondence_key(forward_message);
        let raw = self
            .store
            .get(&key)
            .await?
            .ok_or(LedgerError::NotFound(forward_message))?;
        CorrespondenceRecord::decode(&raw).map_err(|source| LedgerError::Malformed {
            forward_message,
            source,
        })
    }
}
