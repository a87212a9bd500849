//! Adapters for the relay ports.
//!
//! # Available Adapters
//!
//! - [`memory`]: Thread-safe in-memory store, transport, and notifier for
//!   tests
//! - [`redis`]: Redis-backed [`KeyValueStore`]
//! - [`telegram`]: Bot API client implementing [`RelayTransport`], plus the
//!   update poller and the startup rights check
//!
//! [`KeyValueStore`]: crate::relay::ports::KeyValueStore
//! [`RelayTransport`]: crate::relay::ports::RelayTransport

pub mod memory;
pub mod redis;
pub mod telegram;
