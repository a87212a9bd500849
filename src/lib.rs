//! Anonrelay: anonymous message relay.
//!
//! This crate relays messages from arbitrary end users into a single shared
//! "forward chat" watched by a small set of operators, and routes operator
//! replies in that chat back to the original senders.
//!
//! # Architecture
//!
//! Anonrelay follows hexagonal architecture principles:
//!
//! - **Domain**: Pure routing logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the store, the transport, and
//!   operator notification
//! - **Adapters**: Concrete implementations of ports (Redis, Bot API,
//!   in-memory)
//!
//! # Modules
//!
//! - [`relay`]: Correspondence ledger, access gate, and router
//! - [`config`]: Deployment configuration file
//! - [`markup`]: `MarkdownV2` escaping

pub mod config;
pub mod markup;
pub mod relay;
