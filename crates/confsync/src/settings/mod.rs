//! Settings subsystem: cache, dirty-field tracking, commit protocol, facade

pub mod cache;
pub mod handler;
pub mod reload;
pub mod service;
pub mod types;

pub use cache::SettingsCache;
pub use service::{SETTINGS_CHANGE_TOPIC, SettingsService};
pub use types::{AuthSettings, CachedGroup, ElasticSettings, FieldSet, Provider, SettingsGroup};

// vim: ts=4
