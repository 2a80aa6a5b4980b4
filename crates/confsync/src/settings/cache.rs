//! Process-wide settings cache.

use parking_lot::RwLock;
use std::sync::Arc;

use super::types::{AuthSettings, CachedGroup, ElasticSettings};

/// In-process copy of every settings group.
///
/// Reads clone an `Arc` under a short read lock and never touch I/O.
/// Writers swap the whole group value at once, so readers never observe a
/// partially updated group. Groups start at their default until loaded from
/// the store.
#[derive(Debug, Default)]
pub struct SettingsCache {
	auth: RwLock<Arc<AuthSettings>>,
	elastic: RwLock<Arc<ElasticSettings>>,
}

impl SettingsCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Current cached value of a group.
	pub fn get<G: CachedGroup>(&self) -> Arc<G> {
		G::cached(self)
	}

	/// Atomically swap the cached value of a group.
	///
	/// Used both by local commits and by remote-change reloads.
	pub fn replace<G: CachedGroup>(&self, value: G) {
		G::replace(self, value);
	}

	pub fn auth(&self) -> Arc<AuthSettings> {
		self.auth.read().clone()
	}

	pub fn elastic(&self) -> Arc<ElasticSettings> {
		self.elastic.read().clone()
	}

	pub fn replace_auth(&self, value: AuthSettings) {
		*self.auth.write() = Arc::new(value);
	}

	pub fn replace_elastic(&self, value: ElasticSettings) {
		*self.elastic.write() = Arc::new(value);
	}
}

impl CachedGroup for AuthSettings {
	fn cached(cache: &SettingsCache) -> Arc<Self> {
		cache.auth()
	}

	fn replace(cache: &SettingsCache, value: Self) {
		cache.replace_auth(value);
	}
}

impl CachedGroup for ElasticSettings {
	fn cached(cache: &SettingsCache) -> Arc<Self> {
		cache.elastic()
	}

	fn replace(cache: &SettingsCache, value: Self) {
		cache.replace_elastic(value);
	}
}


// vim: ts=4
