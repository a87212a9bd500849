//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! exercising the relay without a store server or a messaging transport.

mod notifier;
mod store;
mod transport;

pub use notifier::RecordingNotifier;
pub use store::InMemoryKeyValueStore;
pub use transport::{Delivery, RecordingTransport};
