//! Update dispatcher: fixed-text commands, routing, and error reporting.

use std::sync::Arc;
use tracing::error;

use crate::relay::{
    domain::{BotCommand, InboundMessage},
    ports::{KeyValueStore, OperatorNotifier, OutgoingText, RelayTransport, TextFormat},
};

use super::{RelayResult, RouteOutcome, Router, error_report};

/// Reply to the liveness command.
pub const ALIVE_REPLY: &str = "ok";

/// What the dispatcher did with one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The greeting was sent in reply to `/start`.
    Greeted,
    /// The liveness reply was sent in reply to `/ok`.
    Alive,
    /// The message went through the router.
    Routed(RouteOutcome),
}

/// Entry point for every inbound message.
///
/// `/start` and `/ok` are answered directly; everything else goes through
/// the [`Router`]. Failures are reported to the operators and returned.
pub struct UpdateDispatcher<S, T, N>
where
    S: KeyValueStore,
    T: RelayTransport,
    N: OperatorNotifier,
{
    router: Router<S, T>,
    transport: Arc<T>,
    notifier: Arc<N>,
    start_message: String,
}

impl<S, T, N> UpdateDispatcher<S, T, N>
where
    S: KeyValueStore,
    T: RelayTransport,
    N: OperatorNotifier,
{
    /// Creates a dispatcher.
    ///
    /// `start_message` is `MarkdownV2` text sent in reply to `/start`.
    #[must_use]
    pub fn new(
        router: Router<S, T>,
        transport: Arc<T>,
        notifier: Arc<N>,
        start_message: impl Into<String>,
    ) -> Self {
        Self {
            router,
            transport,
            notifier,
            start_message: start_message.into(),
        }
    }

    /// Handles one inbound message to completion.
    ///
    /// # Errors
    ///
    /// Returns the [`super::RelayError`] raised while handling the message,
    /// after it has been reported to the operators.
    pub async fn dispatch(&self, message: &InboundMessage) -> RelayResult<DispatchOutcome> {
        let result = self.handle(message).await;
        if let Err(err) = &result {
            error!(message = %message.id(), chat = %message.chat().id(), error = %err, "failed to handle message");
            self.notifier
                .notify(&error_report(err, message.chat()))
                .await;
        }
        result
    }

    async fn handle(&self, message: &InboundMessage) -> RelayResult<DispatchOutcome> {
        let command = message
            .text()
            .and_then(|text| BotCommand::parse(text, self.router.settings().bot_username()));
        let chat = message.chat().id();

        match command {
            Some(BotCommand::Start) => {
                let greeting = OutgoingText::new(chat, self.start_message.as_str())
                    .with_format(TextFormat::MarkdownV2);
                self.transport.send_text(greeting).await?;
                Ok(DispatchOutcome::Greeted)
            }
            Some(BotCommand::Ok) => {
                self.transport
                    .send_text(OutgoingText::new(chat, ALIVE_REPLY))
                    .await?;
                Ok(DispatchOutcome::Alive)
            }
            Some(BotCommand::Ban | BotCommand::Unban) | None => {
                Ok(DispatchOutcome::Routed(self.router.route(message).await?))
            }
        }
    }
}
