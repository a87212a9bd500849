//! Deployment configuration.
//!
//! The configuration is a JSON document with kebab-case keys:
//!
//! ```json
//! {
//!   "token": "123456:bot-token",
//!   "admin-list": [1111, 2222],
//!   "forward-chat-id": -1001234567890,
//!   "redis-database-address": "localhost:6379",
//!   "redis-database-id": 0,
//!   "start-message": "Hello, send me anything and I'll forward it to my owner",
//!   "record-retention-secs": 2592000
//! }
//! ```
//!
//! Only `token` and `forward-chat-id` are required. Optional keys that are
//! absent or empty fall back to their defaults.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::relay::domain::{ChatId, UserId};

/// Configuration file used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "./cfg.json";

/// Store endpoint used when the configuration names none.
pub const DEFAULT_REDIS_DATABASE_ADDRESS: &str = "localhost:6379";

/// Greeting used when the configuration names none.
pub const DEFAULT_START_MESSAGE: &str = "Hello, send me anything and I'll forward it to my owner";

/// Errors returned while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The path does not name a file.
    #[error("config path '{0}' does not name a file")]
    InvalidPath(Utf8PathBuf),

    /// The file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The bot token is empty.
    #[error("config is missing the bot token")]
    MissingToken,
}

/// Deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    token: String,
    #[serde(default)]
    admin_list: Vec<i64>,
    forward_chat_id: i64,
    #[serde(default)]
    redis_database_address: String,
    #[serde(default)]
    redis_database_id: i64,
    #[serde(default)]
    start_message: String,
    #[serde(default)]
    record_retention_secs: Option<u64>,
}

impl Config {
    /// Parses configuration JSON and applies defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid JSON or missing required
    /// keys, and [`ConfigError::MissingToken`] for an empty token.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw)?;
        if config.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if config.redis_database_address.trim().is_empty() {
            DEFAULT_REDIS_DATABASE_ADDRESS.clone_into(&mut config.redis_database_address);
        }
        if config.start_message.is_empty() {
            DEFAULT_START_MESSAGE.clone_into(&mut config.start_message);
        }
        Ok(config)
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| ConfigError::InvalidPath(path.to_owned()))?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let read_error = |source| ConfigError::Read {
            path: path.to_owned(),
            source,
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let contents = dir.read_to_string(file_name).map_err(read_error)?;
        Self::from_json(&contents)
    }

    /// Returns the bot token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the forward chat.
    #[must_use]
    pub const fn forward_chat(&self) -> ChatId {
        ChatId::new(self.forward_chat_id)
    }

    /// Returns the operator accounts listed in `admin-list`.
    #[must_use]
    pub fn operators(&self) -> Vec<UserId> {
        self.admin_list.iter().copied().map(UserId::new).collect()
    }

    /// Returns the chats that receive error reports: every operator plus
    /// the forward chat.
    #[must_use]
    pub fn operator_chats(&self) -> Vec<ChatId> {
        let mut chats: Vec<ChatId> = self.admin_list.iter().copied().map(ChatId::new).collect();
        let forward_chat = self.forward_chat();
        if !chats.contains(&forward_chat) {
            chats.push(forward_chat);
        }
        chats
    }

    /// Returns the store connection URL.
    ///
    /// A bare `host:port` address becomes `redis://host:port/<db>`; an address
    /// that already carries a scheme is used as is.
    #[must_use]
    pub fn redis_url(&self) -> String {
        let address = self.redis_database_address.trim();
        if address.starts_with("redis://") || address.starts_with("rediss://") {
            return address.to_owned();
        }
        format!("redis://{address}/{}", self.redis_database_id)
    }

    /// Returns the `MarkdownV2` greeting sent in reply to `/start`.
    #[must_use]
    pub fn start_message(&self) -> &str {
        &self.start_message
    }

    /// Returns how long correspondence records are kept, if limited.
    #[must_use]
    pub fn record_retention(&self) -> Option<Duration> {
        self.record_retention_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
