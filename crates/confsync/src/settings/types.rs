//! Settings group data model and dirty-field tracking.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::sync::Arc;

use super::cache::SettingsCache;

/// Identity provider entry owned by the auth group.
///
/// Provider-specific configuration is opaque to the synchronization core and
/// travels as flattened JSON alongside the id.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Provider {
	#[serde(default)]
	pub id: Box<str>,

	#[serde(flatten)]
	pub options: serde_json::Map<String, serde_json::Value>,
}

impl Provider {
	/// A provider without an id has not been persisted yet.
	pub fn has_id(&self) -> bool {
		!self.id.is_empty()
	}
}

/// Authentication settings group.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct AuthSettings {
	pub providers: Vec<Provider>,
	/// Session expiration in seconds.
	pub expire: i64,
	/// Maximum session duration in seconds.
	pub max_duration: i64,
}

impl Default for AuthSettings {
	fn default() -> Self {
		AuthSettings { providers: Vec::new(), expire: 86_400, max_duration: 604_800 }
	}
}

/// Elasticsearch output settings group.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ElasticSettings {
	pub addresses: Vec<String>,
	pub proxy_requests: bool,
}

impl ElasticSettings {
	/// The single externally visible address.
	///
	/// The group can hold several addresses, but the external surface only
	/// ever reads and edits the first one.
	pub fn primary_address(&self) -> &str {
		self.addresses.first().map(String::as_str).unwrap_or("")
	}
}

/// A named bundle of configuration attributes persisted and cached as a unit.
pub trait SettingsGroup:
	Clone + Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
	/// Stable group name, used as the store document key.
	const NAME: &'static str;

	/// Full attribute schema of the group.
	const FIELDS: &'static [&'static str];
}

impl SettingsGroup for AuthSettings {
	const NAME: &'static str = "auth";
	const FIELDS: &'static [&'static str] = &["providers", "expire", "max_duration"];
}

impl SettingsGroup for ElasticSettings {
	const NAME: &'static str = "elastic";
	const FIELDS: &'static [&'static str] = &["addresses", "proxy_requests"];
}

/// A settings group with a slot in the process-wide cache.
pub trait CachedGroup: SettingsGroup {
	fn cached(cache: &SettingsCache) -> Arc<Self>;
	fn replace(cache: &SettingsCache, value: Self);
}

/// Per-commit set of attribute names that changed relative to the cache.
///
/// Lives only for the duration of one commit call.
#[derive(Clone, Debug, Default)]
pub struct FieldSet(BTreeSet<&'static str>);

impl FieldSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, field: &'static str) {
		self.0.insert(field);
	}

	pub fn contains(&self, field: &str) -> bool {
		self.0.contains(field)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.0.iter().copied()
	}
}

impl FromIterator<&'static str> for FieldSet {
	fn from_iter<I: IntoIterator<Item = &'static str>>(iter: I) -> Self {
		FieldSet(iter.into_iter().collect())
	}
}

impl std::fmt::Display for FieldSet {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		let mut first = true;
		for field in self.iter() {
			if !first {
				write!(f, ", ")?;
			}
			write!(f, "{}", field)?;
			first = false;
		}
		Ok(())
	}
}


// vim: ts=4
