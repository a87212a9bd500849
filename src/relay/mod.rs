//! Anonymous relay between end users and a shared forward chat.
//!
//! Personal messages are relayed into the forward chat behind an identity
//! header; operator replies in that chat are routed back to the original
//! sender. The correspondence ledger remembers where each forward-chat
//! message came from and the access gate keeps the ban set. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
