//! Shared types, adapter traits, and error types for the confsync service.
//!
//! This crate contains everything the server crate and the store/notifier
//! adapter implementations have in common. Keeping it separate lets adapter
//! crates compile without depending on the server.

pub mod error;
pub mod notifier;
pub mod prelude;
pub mod store;

// vim: ts=4
