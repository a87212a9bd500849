//! HTTPS client for the Bot API.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

use super::api::{
    ApiResponse, BotCommandEntry, ChatMember, CopyMessage, ForwardMessage, GetChatMember,
    GetUpdates, Message, MessageIdResult, ReplyParameters, SendMessage, SetMyCommands, Update,
    User,
};
use super::{TelegramError, TelegramResult};
use crate::relay::{
    domain::{ChatId, MessageId, UserId},
    ports::{DeliveryResult, OutgoingText, RelayTransport, TextFormat},
};

/// Public Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Headroom added to the long-poll timeout for the HTTP request timeout.
const REQUEST_TIMEOUT_MARGIN: Duration = Duration::from_secs(15);

/// Bot API client authenticated with one bot token.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TelegramClient {
    /// Creates a client for `token` against [`DEFAULT_API_URL`].
    ///
    /// `poll_timeout` is the long-poll timeout the client will be used with;
    /// requests time out a little after it.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] when the HTTP client cannot be built.
    pub fn new(token: &str, poll_timeout: Duration) -> TelegramResult<Self> {
        Self::with_api_url(DEFAULT_API_URL, token, poll_timeout)
    }

    /// Creates a client for `token` against a custom Bot API server.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] when the HTTP client cannot be built.
    pub fn with_api_url(
        api_url: &str,
        token: &str,
        poll_timeout: Duration,
    ) -> TelegramResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(poll_timeout + REQUEST_TIMEOUT_MARGIN)
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/bot{token}", api_url.trim_end_matches('/')),
        })
    }

    async fn call<P, R>(&self, method: &'static str, payload: &P) -> TelegramResult<R>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = format!("{}/{method}", self.endpoint);
        let response: ApiResponse<R> = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await?
            .json()
            .await?;

        if !response.ok {
            return Err(TelegramError::Api {
                method,
                code: response.error_code,
                description: response.description.unwrap_or_default(),
            });
        }
        response.result.ok_or(TelegramError::MissingResult(method))
    }

    /// Returns the bot's own account.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] when the call fails.
    pub async fn get_me(&self) -> TelegramResult<User> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Returns `user`'s membership in `chat`.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] when the call fails.
    pub async fn get_chat_member(&self, chat: ChatId, user: UserId) -> TelegramResult<ChatMember> {
        let payload = GetChatMember {
            chat_id: chat.value(),
            user_id: user.value(),
        };
        self.call("getChatMember", &payload).await
    }

    /// Replaces the bot's command menu.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] when the call fails.
    pub async fn set_my_commands(&self, commands: Vec<BotCommandEntry>) -> TelegramResult<()> {
        let _: bool = self
            .call("setMyCommands", &SetMyCommands { commands })
            .await?;
        Ok(())
    }

    /// Long-polls for `message` updates starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError`] when the call fails.
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u32,
    ) -> TelegramResult<Vec<Update>> {
        let payload = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: vec!["message"],
        };
        self.call("getUpdates", &payload).await
    }
}

#[async_trait]
impl RelayTransport for TelegramClient {
    async fn send_text(&self, message: OutgoingText) -> DeliveryResult<MessageId> {
        let payload = SendMessage {
            chat_id: message.chat().value(),
            text: message.text(),
            parse_mode: match message.format() {
                TextFormat::Plain => None,
                TextFormat::MarkdownV2 => Some("MarkdownV2"),
            },
            reply_parameters: message
                .reply_to()
                .map(|target| ReplyParameters::to(target.value())),
        };
        let sent: Message = self.call("sendMessage", &payload).await?;
        debug!(chat = %message.chat(), message = sent.message_id, "text sent");
        Ok(MessageId::new(sent.message_id))
    }

    async fn forward(
        &self,
        to: ChatId,
        from: ChatId,
        message: MessageId,
    ) -> DeliveryResult<MessageId> {
        let payload = ForwardMessage {
            chat_id: to.value(),
            from_chat_id: from.value(),
            message_id: message.value(),
        };
        let forwarded: Message = self.call("forwardMessage", &payload).await?;
        Ok(MessageId::new(forwarded.message_id))
    }

    async fn copy(
        &self,
        to: ChatId,
        from: ChatId,
        message: MessageId,
        reply_to: Option<MessageId>,
    ) -> DeliveryResult<MessageId> {
        let payload = CopyMessage {
            chat_id: to.value(),
            from_chat_id: from.value(),
            message_id: message.value(),
            reply_parameters: reply_to.map(|target| ReplyParameters::to(target.value())),
        };
        let copied: MessageIdResult = self.call("copyMessage", &payload).await?;
        Ok(MessageId::new(copied.message_id))
    }
}
