//! Error taxonomy for relay event processing and startup.

use thiserror::Error;

use crate::relay::{
    domain::{ChatId, MessageId, RecordFormatError},
    ports::{DeliveryError, StoreError},
};

/// Result type for relay event processing.
pub type RelayResult<T> = Result<T, RelayError>;

/// Errors raised while processing one inbound event.
///
/// None of these are retried; the caller reports them to the operators.
#[derive(Debug, Clone, Error)]
pub enum RelayError {
    /// The store was unreachable or rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An operator replied to a forward-chat message with no record.
    #[error("no correspondence record for forward-chat message {0}")]
    NotFound(MessageId),

    /// A stored record violates the record grammar.
    #[error("corrupted correspondence record for forward-chat message {forward_message}: {source}")]
    MalformedRecord {
        /// Forward-chat message whose record is corrupted.
        forward_message: MessageId,
        /// Decoding failure.
        source: RecordFormatError,
    },

    /// The transport failed to deliver a message, copy, or forward.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// The bot lacks the rights it needs in the forward chat.
    #[error(transparent)]
    Permission(#[from] PermissionError),
}

/// Rights the bot is missing in the forward chat.
///
/// Raised only at startup; the relay refuses to run without them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PermissionError {
    /// The bot is not a member of the forward chat.
    #[error("bot is not a member of forward chat {chat} (status '{status}')")]
    NotMember {
        /// The forward chat.
        chat: ChatId,
        /// Membership status reported by the transport.
        status: String,
    },

    /// A required right is not granted.
    #[error("{0} is false")]
    MissingRight(&'static str),
}
