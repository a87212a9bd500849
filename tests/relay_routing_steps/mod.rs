//! Step definitions for relay routing scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
