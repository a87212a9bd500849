//! Conversion from Bot API messages to the relay's inbound model.

use super::api;
use crate::relay::domain::{ChatId, ChatInfo, InboundMessage, MessageId, SenderProfile, UserId};

/// Converts a Bot API message into an [`InboundMessage`].
///
/// Returns `None` for service messages that carry neither text nor media.
/// Media captions are exposed as the message text.
#[must_use]
pub fn inbound_message(message: api::Message) -> Option<InboundMessage> {
    if !message.has_content() {
        return None;
    }

    let api::Message {
        message_id,
        from,
        chat,
        text,
        caption,
        reply_to_message,
        ..
    } = message;

    let mut chat_info = ChatInfo::new(ChatId::new(chat.id));
    if let Some(username) = chat.username {
        chat_info = chat_info.with_username(username);
    }
    if let Some(title) = chat.title {
        chat_info = chat_info.with_title(title);
    }
    if let Some(first_name) = chat.first_name {
        chat_info = chat_info.with_names(first_name, chat.last_name);
    }

    let sender = from.map(sender_profile);
    let mut inbound = InboundMessage::new(MessageId::new(message_id), chat_info, sender);
    if let Some(body) = text.or(caption) {
        inbound = inbound.with_text(body);
    }
    if let Some(target) = reply_to_message {
        inbound = inbound.replying_to(MessageId::new(target.message_id));
    }
    Some(inbound)
}

fn sender_profile(user: api::User) -> SenderProfile {
    let mut profile = SenderProfile::new(UserId::new(user.id), user.first_name);
    if let Some(last_name) = user.last_name {
        profile = profile.with_last_name(last_name);
    }
    if let Some(username) = user.username {
        profile = profile.with_username(username);
    }
    profile
}
