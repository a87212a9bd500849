//! Wire types of the Bot API subset used by the relay.

use serde::{Deserialize, Serialize};

/// Envelope returned by every Bot API method.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Method result when `ok` is true.
    pub result: Option<T>,
    /// Human-readable failure description.
    pub description: Option<String>,
    /// Failure code.
    pub error_code: Option<i32>,
}

/// A user or bot account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Account id.
    pub id: i64,
    /// Whether the account is a bot.
    #[serde(default)]
    pub is_bot: bool,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: Option<String>,
    /// Public username.
    pub username: Option<String>,
    /// Bot only: whether privacy mode is disabled.
    pub can_read_all_group_messages: Option<bool>,
    /// Bot only: whether inline mode is enabled.
    pub supports_inline_queries: Option<bool>,
}

/// A chat.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Chat {
    /// Chat id.
    pub id: i64,
    /// `private`, `group`, `supergroup`, or `channel`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Title of groups and channels.
    pub title: Option<String>,
    /// Public username.
    pub username: Option<String>,
    /// First name of the other party in a private chat.
    pub first_name: Option<String>,
    /// Last name of the other party in a private chat.
    pub last_name: Option<String>,
}

/// A message. Media payloads are kept opaque; only their presence matters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    /// Message id within the chat.
    pub message_id: i32,
    /// Author; absent for channel posts.
    pub from: Option<User>,
    /// Chat the message belongs to.
    pub chat: Chat,
    /// Text of a text message.
    pub text: Option<String>,
    /// Caption of a media message.
    pub caption: Option<String>,
    /// Message this one replies to.
    pub reply_to_message: Option<Box<Message>>,
    /// Photo sizes.
    pub photo: Option<serde_json::Value>,
    /// Animation.
    pub animation: Option<serde_json::Value>,
    /// Audio file.
    pub audio: Option<serde_json::Value>,
    /// General file.
    pub document: Option<serde_json::Value>,
    /// Sticker.
    pub sticker: Option<serde_json::Value>,
    /// Video.
    pub video: Option<serde_json::Value>,
    /// Video note.
    pub video_note: Option<serde_json::Value>,
    /// Voice note.
    pub voice: Option<serde_json::Value>,
}

impl Message {
    /// Returns whether the message carries text or media worth relaying.
    ///
    /// Service messages (joins, pins, title changes) carry neither.
    #[must_use]
    pub const fn has_content(&self) -> bool {
        self.text.is_some()
            || self.photo.is_some()
            || self.animation.is_some()
            || self.audio.is_some()
            || self.document.is_some()
            || self.sticker.is_some()
            || self.video.is_some()
            || self.video_note.is_some()
            || self.voice.is_some()
    }
}

/// An incoming update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Update {
    /// Monotonic update id.
    pub update_id: i64,
    /// New incoming message.
    pub message: Option<Message>,
}

/// Bot membership in a chat.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatMember {
    /// `creator`, `administrator`, `member`, `restricted`, `left`, or
    /// `kicked`.
    pub status: String,
    /// Restricted only: may send text.
    pub can_send_messages: Option<bool>,
    /// Restricted only, legacy: may send media.
    pub can_send_media_messages: Option<bool>,
    /// Restricted only: may send photos.
    pub can_send_photos: Option<bool>,
    /// Restricted only: may send videos.
    pub can_send_videos: Option<bool>,
    /// Restricted only: may send documents.
    pub can_send_documents: Option<bool>,
}

/// Result of `copyMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MessageIdResult {
    /// Id of the copy.
    pub message_id: i32,
}

/// Reply target of an outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplyParameters {
    /// Message to reply to.
    pub message_id: i32,
    /// Send anyway when the target was deleted.
    pub allow_sending_without_reply: bool,
}

impl ReplyParameters {
    /// Replies to `message_id`, tolerating a deleted target.
    #[must_use]
    pub const fn to(message_id: i32) -> Self {
        Self {
            message_id,
            allow_sending_without_reply: true,
        }
    }
}

/// Payload of `sendMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMessage<'a> {
    /// Destination chat.
    pub chat_id: i64,
    /// Message body.
    pub text: &'a str,
    /// Markup dialect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
    /// Reply target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,
}

/// Payload of `forwardMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ForwardMessage {
    /// Destination chat.
    pub chat_id: i64,
    /// Source chat.
    pub from_chat_id: i64,
    /// Source message.
    pub message_id: i32,
}

/// Payload of `copyMessage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CopyMessage {
    /// Destination chat.
    pub chat_id: i64,
    /// Source chat.
    pub from_chat_id: i64,
    /// Source message.
    pub message_id: i32,
    /// Reply target in the destination chat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_parameters: Option<ReplyParameters>,
}

/// Payload of `getChatMember`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GetChatMember {
    /// Chat to inspect.
    pub chat_id: i64,
    /// Member to inspect.
    pub user_id: i64,
}

/// Payload of `getUpdates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetUpdates {
    /// First update to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Long-poll timeout in seconds.
    pub timeout: u32,
    /// Update kinds to receive.
    pub allowed_updates: Vec<&'static str>,
}

/// One entry of the bot's command menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotCommandEntry {
    /// Command name without the slash.
    pub command: String,
    /// Menu description.
    pub description: String,
}

/// Payload of `setMyCommands`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetMyCommands {
    /// Complete command menu.
    pub commands: Vec<BotCommandEntry>,
}
