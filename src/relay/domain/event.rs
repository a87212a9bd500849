//! Inbound message model and routing classification.

use super::{BotCommand, ChatId, MessageId, UserId};

/// Chat an inbound message was posted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatInfo {
    id: ChatId,
    username: Option<String>,
    title: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl ChatInfo {
    /// Creates chat metadata with only an identifier.
    #[must_use]
    pub const fn new(id: ChatId) -> Self {
        Self {
            id,
            username: None,
            title: None,
            first_name: None,
            last_name: None,
        }
    }

    /// Sets the public username of the chat.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the title of a group or channel.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the names of the user on the other side of a personal chat.
    #[must_use]
    pub fn with_names(mut self, first_name: impl Into<String>, last_name: Option<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = last_name;
        self
    }

    /// Returns the chat identifier.
    #[must_use]
    pub const fn id(&self) -> ChatId {
        self.id
    }

    /// Human-readable chat label used in operator error reports.
    ///
    /// Prefers `@username`, then the title, then the personal names.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(username) = self.username.as_deref().filter(|name| !name.is_empty()) {
            return format!("@{username}");
        }
        if let Some(title) = self.title.as_deref().filter(|title| !title.is_empty()) {
            return title.to_owned();
        }
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }
}

/// Account that authored an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderProfile {
    id: UserId,
    first_name: String,
    last_name: Option<String>,
    username: Option<String>,
}

impl SenderProfile {
    /// Creates a sender profile.
    #[must_use]
    pub fn new(id: UserId, first_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: None,
            username: None,
        }
    }

    /// Sets the last name.
    #[must_use]
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Sets the public username.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the public username, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|name| !name.is_empty())
    }

    /// Returns `"first last"`, or only the first name when there is no last
    /// name.
    #[must_use]
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref().filter(|name| !name.is_empty()) {
            Some(last_name) => format!("{} {last_name}", self.first_name),
            None => self.first_name.clone(),
        }
    }
}

/// A message received from the transport, reduced to what routing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    id: MessageId,
    chat: ChatInfo,
    sender: Option<SenderProfile>,
    text: Option<String>,
    reply_to: Option<MessageId>,
}

impl InboundMessage {
    /// Creates an inbound message without text or reply target.
    #[must_use]
    pub const fn new(id: MessageId, chat: ChatInfo, sender: Option<SenderProfile>) -> Self {
        Self {
            id,
            chat,
            sender,
            text: None,
            reply_to: None,
        }
    }

    /// Sets the message text (or media caption).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Marks the message as a reply to `target` in the same chat.
    #[must_use]
    pub const fn replying_to(mut self, target: MessageId) -> Self {
        self.reply_to = Some(target);
        self
    }

    /// Returns the message identifier within its chat.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the chat the message was posted in.
    #[must_use]
    pub const fn chat(&self) -> &ChatInfo {
        &self.chat
    }

    /// Returns the author, absent for anonymous channel posts.
    #[must_use]
    pub const fn sender(&self) -> Option<&SenderProfile> {
        self.sender.as_ref()
    }

    /// Returns the text, if the message carries any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the message this one replies to.
    #[must_use]
    pub const fn reply_to(&self) -> Option<MessageId> {
        self.reply_to
    }

    /// Returns the author when the message was sent in a one-to-one chat with
    /// the bot.
    #[must_use]
    pub fn personal_sender(&self) -> Option<&SenderProfile> {
        self.sender
            .as_ref()
            .filter(|sender| sender.id().value() == self.chat.id().value())
    }
}

/// Ban-set transition requested by an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BanAction {
    /// Add the sender to the ban set.
    Ban,
    /// Remove the sender from the ban set.
    Unban,
}

impl BanAction {
    /// Confirmation posted back into the forward chat.
    #[must_use]
    pub const fn confirmation(self) -> &'static str {
        match self {
            Self::Ban => "banned",
            Self::Unban => "unbanned",
        }
    }
}

/// Routing decision for one inbound message.
///
/// Guards are evaluated in declaration order; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutedEvent {
    /// One-to-one message from an end user to the bot.
    PersonalMessage {
        /// Author of the message.
        sender: SenderProfile,
    },
    /// Operator `/ban` or `/unban` replying to a tracked forward-chat message.
    ForwardChatBanReply {
        /// Forward-chat message the command replies to.
        target: MessageId,
        /// Requested transition.
        action: BanAction,
    },
    /// Operator reply to relay back to the original sender.
    ForwardChatRelayReply {
        /// Forward-chat message the reply targets.
        target: MessageId,
    },
    /// Anything the relay does not mediate, including commands addressed to
    /// another bot.
    Other,
}

impl RoutedEvent {
    /// Classifies `message` for the deployment whose forward chat is
    /// `forward_chat`.
    ///
    /// `bot_username` is used to recognise addressed commands such as
    /// `/ban@relay_bot`.
    #[must_use]
    pub fn classify(
        message: &InboundMessage,
        forward_chat: ChatId,
        bot_username: Option<&str>,
    ) -> Self {
        let foreign_command = message
            .text()
            .is_some_and(|text| BotCommand::addressed_elsewhere(text, bot_username));
        if foreign_command {
            return Self::Other;
        }

        if let Some(sender) = message.personal_sender() {
            return Self::PersonalMessage {
                sender: sender.clone(),
            };
        }

        if message.chat().id() != forward_chat {
            return Self::Other;
        }
        let Some(target) = message.reply_to() else {
            return Self::Other;
        };

        let action = message
            .text()
            .and_then(|text| BotCommand::parse(text, bot_username))
            .and_then(BotCommand::ban_action);
        match action {
            Some(action) => Self::ForwardChatBanReply { target, action },
            None => Self::ForwardChatRelayReply { target },
        }
    }
}
