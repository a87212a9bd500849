//! Startup check of the bot's rights in the forward chat.

use super::api::{ChatMember, User};
use crate::relay::{domain::ChatId, services::PermissionError};

/// Verifies that the bot can operate in `forward_chat`.
///
/// Creators and administrators always pass. Other members must be allowed
/// to send messages and media, and the bot account must read all group
/// messages and support inline queries.
///
/// # Errors
///
/// Returns [`PermissionError`] naming the first missing right.
pub fn check_forward_chat_rights(
    forward_chat: ChatId,
    member: &ChatMember,
    bot: &User,
) -> Result<(), PermissionError> {
    match member.status.as_str() {
        "creator" | "administrator" => return Ok(()),
        "member" => {}
        "restricted" => {
            if member.can_send_messages != Some(true) {
                return Err(PermissionError::MissingRight("can_send_messages"));
            }
            let can_send_media = member.can_send_media_messages.unwrap_or(false)
                || (member.can_send_photos.unwrap_or(false)
                    && member.can_send_videos.unwrap_or(false)
                    && member.can_send_documents.unwrap_or(false));
            if !can_send_media {
                return Err(PermissionError::MissingRight("can_send_media_messages"));
            }
        }
        other => {
            return Err(PermissionError::NotMember {
                chat: forward_chat,
                status: other.to_owned(),
            });
        }
    }

    if bot.can_read_all_group_messages != Some(true) {
        return Err(PermissionError::MissingRight("can_read_all_group_messages"));
    }
    if bot.supports_inline_queries != Some(true) {
        return Err(PermissionError::MissingRight("supports_inline_queries"));
    }
    Ok(())
}
