//! Settings service: loading, the commit protocol, and cache refresh.

use std::sync::Arc;
use tokio::sync::Mutex;

use confsync_types::notifier::{ChangeEvent, ChangeNotifier};
use confsync_types::store::{FieldValues, SettingsStore};

use super::cache::SettingsCache;
use super::types::{AuthSettings, CachedGroup, ElasticSettings, FieldSet, SettingsGroup};
use crate::prelude::*;

/// Topic published after every successful commit.
pub const SETTINGS_CHANGE_TOPIC: &str = "settings.change";

/// The single path by which a settings group's persisted state and cached
/// state are updated together.
pub struct SettingsService {
	store: Arc<dyn SettingsStore>,
	notifier: Arc<dyn ChangeNotifier>,
	cache: SettingsCache,
	auth_lock: Mutex<()>,
	elastic_lock: Mutex<()>,
}

impl SettingsService {
	pub fn new(store: Arc<dyn SettingsStore>, notifier: Arc<dyn ChangeNotifier>) -> Self {
		Self {
			store,
			notifier,
			cache: SettingsCache::new(),
			auth_lock: Mutex::new(()),
			elastic_lock: Mutex::new(()),
		}
	}

	pub fn cache(&self) -> &SettingsCache {
		&self.cache
	}

	/// Per-group writer serialization.
	///
	/// Callers applying request input to a group must hold this lock across
	/// snapshot, diff, and [`commit`](Self::commit), so two in-flight updates
	/// never diff against a stale cached value.
	pub fn commit_lock(&self, group: &str) -> &Mutex<()> {
		match group {
			ElasticSettings::NAME => &self.elastic_lock,
			_ => &self.auth_lock,
		}
	}

	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ChangeEvent> {
		self.notifier.subscribe()
	}

	/// Load every group from the store into the cache.
	pub async fn load_all(&self) -> CsResult<()> {
		self.reload_group::<AuthSettings>().await?;
		self.reload_group::<ElasticSettings>().await?;
		Ok(())
	}

	/// Reload every group; used when a notification carries no group name.
	pub async fn reload_all(&self) -> CsResult<()> {
		self.load_all().await
	}

	/// Reload one group from the store into the cache.
	///
	/// Stored fields are overlaid on the group default, so partial documents
	/// and documents written by older schema versions load cleanly.
	pub async fn reload_group<G: CachedGroup>(&self) -> CsResult<()> {
		let fields = self.store.read_fields(G::NAME).await?;
		let value = merge_fields::<G>(fields)?;
		self.cache.replace(value);
		debug!("Settings group '{}' loaded", G::NAME);
		Ok(())
	}

	/// Commit the dirty fields of `group`: persist them, refresh the local
	/// cache, and notify the cluster.
	///
	/// An empty field set is a no-op: no store write, no notification.
	/// A persistence failure leaves both the store and the cache as if the
	/// call had never happened; retrying is safe. A broadcast failure after
	/// a successful persist is logged and swallowed, because the store is
	/// authoritative and peers reconcile on their next reload.
	pub async fn commit<G: CachedGroup>(&self, group: G, fields: &FieldSet) -> CsResult<()> {
		for field in fields.iter() {
			if !G::FIELDS.contains(&field) {
				return Err(Error::ValidationError(format!(
					"Unknown field '{}' in settings group '{}'",
					field,
					G::NAME
				)));
			}
		}

		if fields.is_empty() {
			debug!("Settings group '{}': nothing to commit", G::NAME);
			return Ok(());
		}

		let dirty = project_fields(&group, fields)?;
		self.store.upsert_fields(G::NAME, &dirty).await?;
		self.cache.replace(group);
		info!("Settings group '{}' committed: {}", G::NAME, fields);

		let payload = serde_json::json!({ "group": G::NAME });
		if let Err(err) = self.notifier.publish(SETTINGS_CHANGE_TOPIC, payload).await {
			warn!("Settings change broadcast failed: {}", err);
		}

		Ok(())
	}
}

/// Overlay stored fields on the group default and deserialize.
fn merge_fields<G: SettingsGroup>(fields: FieldValues) -> CsResult<G> {
	let serde_json::Value::Object(mut obj) = serde_json::to_value(G::default())
		.map_err(|err| Error::ConfigError(format!("Settings group is not an object: {}", err)))?
	else {
		return Err(Error::ConfigError("Settings group is not an object".into()));
	};

	for (name, value) in fields {
		// Fields no longer part of the schema are ignored
		if G::FIELDS.contains(&name.as_str()) {
			obj.insert(name, value);
		}
	}

	serde_json::from_value(serde_json::Value::Object(obj)).map_err(|err| {
		Error::ValidationError(format!("Invalid stored value for group '{}': {}", G::NAME, err))
	})
}

/// Serialize a group and keep only the dirty attributes.
fn project_fields<G: SettingsGroup>(group: &G, fields: &FieldSet) -> CsResult<FieldValues> {
	let serde_json::Value::Object(mut obj) = serde_json::to_value(group).map_err(|err| {
		Error::ValidationError(format!("Failed to serialize group '{}': {}", G::NAME, err))
	})?
	else {
		return Err(Error::ConfigError("Settings group is not an object".into()));
	};

	let mut dirty = FieldValues::new();
	for field in fields.iter() {
		if let Some(value) = obj.remove(field) {
			dirty.insert(field.to_string(), value);
		}
	}
	Ok(dirty)
}


// vim: ts=4
