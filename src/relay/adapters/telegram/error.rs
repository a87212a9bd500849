//! Errors of the Bot API adapter.

use thiserror::Error;

use crate::relay::ports::DeliveryError;

/// Result type for Bot API calls.
pub type TelegramResult<T> = Result<T, TelegramError>;

/// Errors returned by [`super::TelegramClient`].
#[derive(Debug, Error)]
pub enum TelegramError {
    /// The HTTP request failed or the body could not be decoded.
    #[error("bot api request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The Bot API answered with `ok = false`.
    #[error("bot api method {method} failed (code {code:?}): {description}")]
    Api {
        /// Method name.
        method: &'static str,
        /// Error code reported by the API.
        code: Option<i32>,
        /// Description reported by the API.
        description: String,
    },

    /// The Bot API answered `ok = true` without a result.
    #[error("bot api method {0} returned no result")]
    MissingResult(&'static str),
}

impl From<TelegramError> for DeliveryError {
    fn from(err: TelegramError) -> Self {
        match err {
            TelegramError::Http(source) => Self::unavailable(source),
            TelegramError::Api { .. } | TelegramError::MissingResult(_) => {
                Self::Rejected(err.to_string())
            }
        }
    }
}
