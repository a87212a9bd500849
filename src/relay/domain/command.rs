//! Bot command recognition.

use super::BanAction;

/// Commands the relay reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotCommand {
    /// Greeting shown when a user opens the conversation.
    Start,
    /// Liveness check.
    Ok,
    /// Ban the sender of the replied-to message.
    Ban,
    /// Lift a ban on the sender of the replied-to message.
    Unban,
}

impl BotCommand {
    /// Returns the command name without the leading slash.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Ok => "ok",
            Self::Ban => "ban",
            Self::Unban => "unban",
        }
    }

    /// Recognises a command in the first token of `text`.
    ///
    /// Accepts `/name` and `/name@<bot>`; names are case-sensitive. Returns
    /// `None` for plain text, unknown commands, and commands addressed to a
    /// different bot.
    #[must_use]
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let (name, addressee) = split_command(text)?;
        if addressee.is_some_and(|addressee| !is_ours(addressee, bot_username)) {
            return None;
        }

        [Self::Start, Self::Ok, Self::Ban, Self::Unban]
            .into_iter()
            .find(|candidate| candidate.name() == name)
    }

    /// Returns whether `text` starts with a command addressed to another bot.
    ///
    /// Such messages belong to that bot and are not relayed.
    #[must_use]
    pub fn addressed_elsewhere(text: &str, bot_username: Option<&str>) -> bool {
        split_command(text)
            .and_then(|(_, addressee)| addressee)
            .is_some_and(|addressee| !is_ours(addressee, bot_username))
    }

    /// Returns the ban-set transition for `/ban` and `/unban`.
    #[must_use]
    pub const fn ban_action(self) -> Option<BanAction> {
        match self {
            Self::Ban => Some(BanAction::Ban),
            Self::Unban => Some(BanAction::Unban),
            Self::Start | Self::Ok => None,
        }
    }
}

fn split_command(text: &str) -> Option<(&str, Option<&str>)> {
    let command = text.split_whitespace().next()?.strip_prefix('/')?;
    Some(match command.split_once('@') {
        Some((name, addressee)) => (name, Some(addressee)),
        None => (command, None),
    })
}

fn is_ours(addressee: &str, bot_username: Option<&str>) -> bool {
    bot_username.is_some_and(|username| username.eq_ignore_ascii_case(addressee))
}
