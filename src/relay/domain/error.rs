//! Error types for relay domain parsing.

use thiserror::Error;

/// Errors returned while decoding a stored correspondence record.
///
/// Every variant carries the raw stored value so operators can inspect the
/// corrupted entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordFormatError {
    /// The value contains no whitespace separator.
    #[error("wrong format: no separator in '{0}'")]
    MissingSeparator(String),

    /// The sender token is not an integer.
    #[error("wrong format: invalid sender id in '{0}'")]
    InvalidSender(String),

    /// The reply-mode token is absent.
    #[error("wrong format: missing reply mode in '{0}'")]
    MissingReplyMode(String),

    /// The reply-mode token is neither `0` nor `1`.
    #[error("wrong format: unknown reply mode in '{0}'")]
    UnknownReplyMode(String),

    /// Reply mode `1` without an original message id.
    #[error("wrong format: missing original message id in '{0}'")]
    MissingOriginalMessage(String),

    /// The original message token is not an integer.
    #[error("wrong format: invalid original message id in '{0}'")]
    InvalidOriginalMessage(String),

    /// Tokens remain after the grammar is satisfied.
    #[error("wrong format: unexpected trailing tokens in '{0}'")]
    TrailingTokens(String),
}
