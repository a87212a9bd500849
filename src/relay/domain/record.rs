//! Correspondence records and their store encoding.

use super::{MessageId, RecordFormatError, ReplyMode, UserId};

/// Routing metadata for one message placed in the forward chat.
///
/// Records are immutable: they are created when a message is delivered into
/// the forward chat and only read afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrespondenceRecord {
    sender: UserId,
    reply_mode: ReplyMode,
}

impl CorrespondenceRecord {
    /// Creates a record from its parts.
    #[must_use]
    pub const fn new(sender: UserId, reply_mode: ReplyMode) -> Self {
        Self { sender, reply_mode }
    }

    /// Record for an identity header; replies go out standalone.
    #[must_use]
    pub const fn without_reply(sender: UserId) -> Self {
        Self::new(sender, ReplyMode::WithoutReply)
    }

    /// Record for a content copy; replies thread under `original`.
    #[must_use]
    pub const fn as_reply(sender: UserId, original: MessageId) -> Self {
        Self::new(sender, ReplyMode::AsReply(original))
    }

    /// Returns the user who sent the original message.
    #[must_use]
    pub const fn sender(&self) -> UserId {
        self.sender
    }

    /// Returns how replies are delivered back to the sender.
    #[must_use]
    pub const fn reply_mode(&self) -> ReplyMode {
        self.reply_mode
    }

    /// Returns the sender's message id when replies are threaded.
    #[must_use]
    pub const fn original_message(&self) -> Option<MessageId> {
        self.reply_mode.original_message()
    }

    /// Encodes the record as `"<sender> <mode>"` or
    /// `"<sender> <mode> <original>"`.
    #[must_use]
    pub fn encode(&self) -> String {
        let code = self.reply_mode.code();
        match self.reply_mode.original_message() {
            None => format!("{} {code}", self.sender),
            Some(original) => format!("{} {code} {original}", self.sender),
        }
    }

    /// Decodes a stored value produced by [`CorrespondenceRecord::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`RecordFormatError`] when the value lacks a separator, a token
    /// is not an integer, the reply mode is unknown, the original message id
    /// is missing for threaded replies, or extra tokens follow.
    pub fn decode(raw: &str) -> Result<Self, RecordFormatError> {
        if !raw.contains(char::is_whitespace) {
            return Err(RecordFormatError::MissingSeparator(raw.to_owned()));
        }

        let mut tokens = raw.split_whitespace();
        let sender = tokens
            .next()
            .and_then(|token| token.parse::<i64>().ok())
            .map(UserId::new)
            .ok_or_else(|| RecordFormatError::InvalidSender(raw.to_owned()))?;

        let mode_token = tokens
            .next()
            .ok_or_else(|| RecordFormatError::MissingReplyMode(raw.to_owned()))?;
        let reply_mode = match mode_token.parse::<u8>() {
            Ok(ReplyMode::WITHOUT_REPLY_CODE) => ReplyMode::WithoutReply,
            Ok(ReplyMode::AS_REPLY_CODE) => {
                let original_token = tokens
                    .next()
                    .ok_or_else(|| RecordFormatError::MissingOriginalMessage(raw.to_owned()))?;
                let original = original_token
                    .parse::<i32>()
                    .map_err(|_| RecordFormatError::InvalidOriginalMessage(raw.to_owned()))?;
                ReplyMode::AsReply(MessageId::new(original))
            }
            _ => return Err(RecordFormatError::UnknownReplyMode(raw.to_owned())),
        };

        if tokens.next().is_some() {
            return Err(RecordFormatError::TrailingTokens(raw.to_owned()));
        }

        Ok(Self::new(sender, reply_mode))
    }
}
