//! Application services for the relay.
//!
//! The ledger and the access gate own the deployment's keys in the store;
//! the router decides what to do with each inbound message and the
//! dispatcher wraps it with fixed-text commands and error reporting.

mod dispatcher;
mod error;
mod gate;
mod ledger;
mod notifier;
mod router;

pub use dispatcher::{ALIVE_REPLY, DispatchOutcome, UpdateDispatcher};
pub use error::{PermissionError, RelayError, RelayResult};
pub use gate::AccessGate;
pub use ledger::{CorrespondenceLedger, LedgerError, LedgerResult};
pub use notifier::{BroadcastNotifier, error_report};
pub use router::{BANNED_NOTICE, RouteOutcome, Router, RouterSettings};
