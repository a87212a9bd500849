//! Identity header posted ahead of each relayed message.

use super::SenderProfile;
use crate::markup::escape_markdown_v2;

/// Renders the `MarkdownV2` identity header for `sender`.
///
/// The display name links to the public profile when the sender has a
/// username; the escaped numeric id always links to the in-app profile.
#[must_use]
pub fn identity_header(sender: &SenderProfile) -> String {
    let name = escape_markdown_v2(&sender.full_name());
    let mut header = match sender.username() {
        Some(username) => format!("[{name}](https://t.me/{username})"),
        None => name,
    };

    let id = sender.id();
    let escaped_id = escape_markdown_v2(&id.to_string());
    header.push_str(&format!(
        " \\([{escaped_id}](tg://openmessage?user_id={id})\\)"
    ));
    header
}
