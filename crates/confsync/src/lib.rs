//! confsync is a cluster-synchronized configuration service.
//!
//! Every instance keeps a process-wide in-memory copy of each settings
//! group, read on every request without touching the store. Updates go
//! through a commit protocol that persists only the fields that actually
//! changed, then broadcasts a change notification so every instance
//! (the committing one included) reloads the affected group from the store.
//!
//! The persistent store and the notification transport are adapters; see
//! [`store::SettingsStore`] and [`notifier::ChangeNotifier`].

// Re-export shared types and adapter traits from confsync-types
pub use confsync_types::error;
pub use confsync_types::notifier;
pub use confsync_types::store;

// Local modules
pub mod app;
pub mod broadcast;
pub mod prelude;
pub mod routes;
pub mod settings;

// vim: ts=4
