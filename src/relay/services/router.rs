//! Router: relays personal messages into the forward chat and operator
//! replies back to their senders.

use std::sync::Arc;
use tracing::{debug, info};

use crate::relay::{
    domain::{
        BanAction, ChatId, CorrespondenceRecord, InboundMessage, MessageId, RoutedEvent,
        SenderProfile, UserId, identity_header,
    },
    ports::{KeyValueStore, OutgoingText, RelayTransport, TextFormat},
};

use super::{AccessGate, CorrespondenceLedger, RelayResult};

/// Notice sent to banned users instead of relaying their message.
pub const BANNED_NOTICE: &str = "you are banned :S";

/// Deployment settings consumed by the router.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouterSettings {
    operators: Vec<UserId>,
    bot_username: Option<String>,
}

impl RouterSettings {
    /// Creates settings with no operators and no bot username.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operator accounts; their personal messages bypass the ban
    /// check.
    #[must_use]
    pub fn with_operators(mut self, operators: impl IntoIterator<Item = UserId>) -> Self {
        self.operators = operators.into_iter().collect();
        self
    }

    /// Sets the bot's own username, used to recognise `/cmd@bot` commands.
    #[must_use]
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        self.bot_username = Some(username.into());
        self
    }

    /// Returns the bot's own username.
    #[must_use]
    pub fn bot_username(&self) -> Option<&str> {
        self.bot_username.as_deref()
    }

    /// Returns whether `user` is an operator.
    #[must_use]
    pub fn is_operator(&self, user: UserId) -> bool {
        self.operators.contains(&user)
    }
}

/// What the router did with one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A personal message was relayed into the forward chat.
    Relayed {
        /// Forward-chat id of the identity header.
        header: MessageId,
        /// Forward-chat id of the forwarded content.
        content: MessageId,
    },
    /// A banned user's personal message was refused.
    Rejected {
        /// The banned sender.
        sender: UserId,
    },
    /// An operator changed a sender's ban state.
    BanUpdated {
        /// The affected sender.
        user: UserId,
        /// Transition applied.
        action: BanAction,
    },
    /// An operator reply was copied back to the original sender.
    RepliedToSender {
        /// Recipient of the reply.
        user: UserId,
        /// Id of the copy in the recipient's chat.
        message: MessageId,
    },
    /// The message is not something the relay mediates.
    Ignored,
}

/// Routes inbound messages between end users and the forward chat.
///
/// Events must be routed one at a time; the router performs no coordination
/// between concurrent calls.
pub struct Router<S, T>
where
    S: KeyValueStore,
    T: RelayTransport,
{
    ledger: CorrespondenceLedger<S>,
    gate: Arc<AccessGate<S>>,
    transport: Arc<T>,
    settings: RouterSettings,
}

impl<S, T> Router<S, T>
where
    S: KeyValueStore,
    T: RelayTransport,
{
    /// Creates a router. The forward chat is the one `ledger` is scoped to.
    #[must_use]
    pub const fn new(
        ledger: CorrespondenceLedger<S>,
        gate: Arc<AccessGate<S>>,
        transport: Arc<T>,
        settings: RouterSettings,
    ) -> Self {
        Self {
            ledger,
            gate,
            transport,
            settings,
        }
    }

    /// Returns the router settings.
    #[must_use]
    pub const fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    /// Returns the forward chat of this deployment.
    #[must_use]
    pub const fn forward_chat(&self) -> ChatId {
        self.ledger.namespace().forward_chat()
    }

    /// Routes one inbound message.
    ///
    /// # Errors
    ///
    /// Returns [`super::RelayError`] when a store operation, a record lookup,
    /// or a delivery fails. Work completed before the failure is not undone.
    pub async fn route(&self, message: &InboundMessage) -> RelayResult<RouteOutcome> {
        let event = RoutedEvent::classify(
            message,
            self.forward_chat(),
            self.settings.bot_username(),
        );
        debug!(message = %message.id(), chat = %message.chat().id(), ?event, "routing message");

        match event {
            RoutedEvent::PersonalMessage { sender } => {
                self.relay_to_forward_chat(message, &sender).await
            }
            RoutedEvent::ForwardChatBanReply { target, action } => {
                self.apply_ban_action(message, target, action).await
            }
            RoutedEvent::ForwardChatRelayReply { target } => {
                self.relay_to_sender(message, target).await
            }
            RoutedEvent::Other => Ok(RouteOutcome::Ignored),
        }
    }

    async fn relay_to_forward_chat(
        &self,
        message: &InboundMessage,
        sender: &SenderProfile,
    ) -> RelayResult<RouteOutcome> {
        let user = sender.id();
        if !self.settings.is_operator(user) && self.gate.is_banned(user).await? {
            self.transport
                .send_text(OutgoingText::new(message.chat().id(), BANNED_NOTICE))
                .await?;
            return Ok(RouteOutcome::Rejected { sender: user });
        }

        let forward_chat = self.forward_chat();
        let header_text =
            OutgoingText::new(forward_chat, identity_header(sender)).with_format(TextFormat::MarkdownV2);
        let header = self.transport.send_text(header_text).await?;
        self.ledger
            .record(header, &CorrespondenceRecord::without_reply(user))
            .await?;

        let content = self
            .transport
            .forward(forward_chat, message.chat().id(), message.id())
            .await?;
        self.ledger
            .record(content, &CorrespondenceRecord::as_reply(user, message.id()))
            .await?;

        Ok(RouteOutcome::Relayed { header, content })
    }

    async fn apply_ban_action(
        &self,
        message: &InboundMessage,
        target: MessageId,
        action: BanAction,
    ) -> RelayResult<RouteOutcome> {
        let record = self.ledger.lookup(target).await?;
        let user = record.sender();
        match action {
            BanAction::Ban => self.gate.ban(user).await?,
            BanAction::Unban => self.gate.unban(user).await?,
        }

        let confirmation = OutgoingText::new(message.chat().id(), action.confirmation())
            .replying_to(message.id());
        self.transport.send_text(confirmation).await?;
        Ok(RouteOutcome::BanUpdated { user, action })
    }

    async fn relay_to_sender(
        &self,
        message: &InboundMessage,
        target: MessageId,
    ) -> RelayResult<RouteOutcome> {
        let record = self.ledger.lookup(target).await?;
        let user = record.sender();
        let copy = self
            .transport
            .copy(
                user.personal_chat(),
                message.chat().id(),
                message.id(),
                record.original_message(),
            )
            .await?;
        info!(%user, %target, "operator reply delivered");
        Ok(RouteOutcome::RepliedToSender {
            user,
            message: copy,
        })
    }
}
