//! Domain model for the anonymous relay.
//!
//! The relay domain models correspondence records, the store key layout of a
//! deployment, and the classification of inbound messages. All transport and
//! store concerns are kept outside the domain boundary.

mod command;
mod error;
mod event;
mod header;
mod ids;
mod namespace;
mod record;
mod reply_mode;

pub use command::BotCommand;
pub use error::RecordFormatError;
pub use event::{BanAction, ChatInfo, InboundMessage, RoutedEvent, SenderProfile};
pub use header::identity_header;
pub use ids::{ChatId, MessageId, UserId};
pub use namespace::{BAN_SET_SENTINEL, DEFAULT_KEY_PREFIX, KeyNamespace};
pub use record::CorrespondenceRecord;
pub use reply_mode::ReplyMode;
