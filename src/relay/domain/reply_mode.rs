//! How an operator reply is delivered back to the original sender.

use super::MessageId;
use std::fmt;

/// Delivery mode recorded alongside each message placed in the forward chat.
///
/// Replies to an identity header arrive as standalone messages; replies to a
/// content copy are threaded under the sender's original message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyMode {
    /// Deliver the operator's reply as a standalone message.
    WithoutReply,
    /// Deliver the operator's reply as a reply to the sender's own message.
    AsReply(MessageId),
}

impl ReplyMode {
    /// Storage code for [`ReplyMode::WithoutReply`].
    pub const WITHOUT_REPLY_CODE: u8 = 0;
    /// Storage code for [`ReplyMode::AsReply`].
    pub const AS_REPLY_CODE: u8 = 1;

    /// Returns the integer code written to the store.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::WithoutReply => Self::WITHOUT_REPLY_CODE,
            Self::AsReply(_) => Self::AS_REPLY_CODE,
        }
    }

    /// Returns the sender's message that a reply should thread under.
    #[must_use]
    pub const fn original_message(self) -> Option<MessageId> {
        match self {
            Self::WithoutReply => None,
            Self::AsReply(id) => Some(id),
        }
    }
}

impl fmt::Display for ReplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithoutReply => f.write_str("without-reply"),
            Self::AsReply(id) => write!(f, "as-reply-to-{id}"),
        }
    }
}
