//! Telegram Bot API adapter.
//!
//! [`TelegramClient`] speaks the HTTPS Bot API and implements
//! [`RelayTransport`](crate::relay::ports::RelayTransport). The poller feeds
//! `message` updates to an [`UpdateDispatcher`](crate::relay::services::UpdateDispatcher)
//! one at a time.

pub mod api;
mod client;
mod convert;
mod error;
mod poller;
mod rights;

pub use client::{DEFAULT_API_URL, TelegramClient};
pub use convert::inbound_message;
pub use error::{TelegramError, TelegramResult};
pub use poller::{DEFAULT_POLL_TIMEOUT_SECS, UpdatePoller};
pub use rights::check_forward_chat_rights;
