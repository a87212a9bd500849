//! Store key layout for one relay deployment.

use super::{ChatId, MessageId, UserId};

/// Key prefix shared by every deployment.
pub const DEFAULT_KEY_PREFIX: &str = "anonmail";

/// Placeholder member seeded into every ban set.
///
/// Some store back ends drop a set once its last member is removed; the
/// sentinel keeps the ban-set key present. Real members are namespaced keys
/// (see [`KeyNamespace::ban_member`]), so the bare sentinel never matches one.
pub const BAN_SET_SENTINEL: &str = "777";

/// Keys owned by one deployment, scoped by its forward chat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyNamespace {
    prefix: String,
    forward_chat: ChatId,
}

impl KeyNamespace {
    /// Creates the namespace for `forward_chat` using [`DEFAULT_KEY_PREFIX`].
    #[must_use]
    pub fn new(forward_chat: ChatId) -> Self {
        Self::with_prefix(DEFAULT_KEY_PREFIX, forward_chat)
    }

    /// Creates the namespace for `forward_chat` under a custom prefix.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>, forward_chat: ChatId) -> Self {
        Self {
            prefix: prefix.into(),
            forward_chat,
        }
    }

    /// Returns the forward chat this namespace belongs to.
    #[must_use]
    pub const fn forward_chat(&self) -> ChatId {
        self.forward_chat
    }

    /// Key of the deployment's ban set: `<prefix>_<F>_banned_list`.
    #[must_use]
    pub fn ban_set_key(&self) -> String {
        format!("{}_{}_banned_list", self.prefix, self.forward_chat)
    }

    /// Key of the record for a forward-chat message:
    /// `<prefix>_<F>_<message>`.
    #[must_use]
    pub fn correspondence_key(&self, forward_message: MessageId) -> String {
        format!("{}_{}_{forward_message}", self.prefix, self.forward_chat)
    }

    /// Ban-set member representing `user`: `<prefix>_<F>_<user>`.
    #[must_use]
    pub fn ban_member(&self, user: UserId) -> String {
        format!("{}_{}_{user}", self.prefix, self.forward_chat)
    }
}
