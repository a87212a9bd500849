//! Messaging transport port used to deliver relayed messages.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::relay::domain::{ChatId, MessageId};

/// Result type for delivery operations.
pub type DeliveryResult<T> = Result<T, DeliveryError>;

/// Markup dialect of an outgoing text message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextFormat {
    /// Literal text.
    #[default]
    Plain,
    /// Text using the transport's `MarkdownV2` dialect.
    MarkdownV2,
}

/// A text message to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingText {
    chat: ChatId,
    text: String,
    format: TextFormat,
    reply_to: Option<MessageId>,
}

impl OutgoingText {
    /// Creates a plain, standalone text message for `chat`.
    #[must_use]
    pub fn new(chat: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat,
            text: text.into(),
            format: TextFormat::Plain,
            reply_to: None,
        }
    }

    /// Sets the markup dialect.
    #[must_use]
    pub const fn with_format(mut self, format: TextFormat) -> Self {
        self.format = format;
        self
    }

    /// Sends the message as a reply to `message` in the same chat.
    #[must_use]
    pub const fn replying_to(mut self, message: MessageId) -> Self {
        self.reply_to = Some(message);
        self
    }

    /// Returns the destination chat.
    #[must_use]
    pub const fn chat(&self) -> ChatId {
        self.chat
    }

    /// Returns the message body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the markup dialect.
    #[must_use]
    pub const fn format(&self) -> TextFormat {
        self.format
    }

    /// Returns the message this one replies to.
    #[must_use]
    pub const fn reply_to(&self) -> Option<MessageId> {
        self.reply_to
    }
}

/// Delivery contract of the messaging transport.
///
/// Every method returns the identifier the transport assigned to the newly
/// created message in the destination chat.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// Sends a text message.
    async fn send_text(&self, message: OutgoingText) -> DeliveryResult<MessageId>;

    /// Forwards `message` from `from` into `to`, keeping the author visible.
    async fn forward(
        &self,
        to: ChatId,
        from: ChatId,
        message: MessageId,
    ) -> DeliveryResult<MessageId>;

    /// Copies `message` from `from` into `to` without attribution,
    /// optionally as a reply to `reply_to` in the destination chat.
    async fn copy(
        &self,
        to: ChatId,
        from: ChatId,
        message: MessageId,
        reply_to: Option<MessageId>,
    ) -> DeliveryResult<MessageId>;
}

/// Errors returned by transport implementations.
#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// The transport refused the request.
    #[error("delivery rejected: {0}")]
    Rejected(String),

    /// The transport could not be reached.
    #[error("transport unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeliveryError {
    /// Wraps a connectivity failure.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
