//! Port contracts for the relay.
//!
//! Ports define infrastructure-agnostic interfaces used by the ledger, the
//! access gate, and the router.

pub mod notifier;
pub mod store;
pub mod transport;

pub use notifier::OperatorNotifier;
pub use store::{KeyValueStore, StoreError, StoreResult};
pub use transport::{DeliveryError, DeliveryResult, OutgoingText, RelayTransport, TextFormat};

#[cfg(test)]
pub use transport::MockRelayTransport;
