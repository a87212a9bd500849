//! Unit tests for the relay module.
//!
//! Domain tests cover record encoding, key layout, command recognition, and
//! classification. Service tests drive the ledger, gate, router, and
//! dispatcher over the in-memory adapters.

mod ledger_tests;
