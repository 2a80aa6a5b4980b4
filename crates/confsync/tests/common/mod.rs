//! Test doubles for the settings store and the change notifier.
#![allow(unused)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use confsync::error::{CsResult, Error};
use confsync::notifier::{ChangeEvent, ChangeNotifier};
use confsync::store::{FieldValues, SettingsStore};

/// In-memory settings store recording every write.
#[derive(Debug, Default)]
pub struct MemoryStore {
	groups: Mutex<HashMap<String, FieldValues>>,
	writes: Mutex<Vec<(String, Vec<String>)>>,
	fail_writes: AtomicBool,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Make every subsequent upsert fail, simulating an unreachable store.
	pub fn fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, Ordering::SeqCst);
	}

	/// Every upsert so far: (group name, sorted dirty field names).
	pub fn write_log(&self) -> Vec<(String, Vec<String>)> {
		self.writes.lock().clone()
	}

	pub fn write_count(&self) -> usize {
		self.writes.lock().len()
	}

	/// Current stored document of a group (empty if never written).
	pub fn stored(&self, group: &str) -> FieldValues {
		self.groups.lock().get(group).cloned().unwrap_or_default()
	}
}

#[async_trait]
impl SettingsStore for MemoryStore {
	async fn read_fields(&self, group: &str) -> CsResult<FieldValues> {
		Ok(self.stored(group))
	}

	async fn upsert_fields(&self, group: &str, fields: &FieldValues) -> CsResult<()> {
		if self.fail_writes.load(Ordering::SeqCst) {
			return Err(Error::PersistenceError("store unreachable".into()));
		}

		let mut names: Vec<String> = fields.keys().cloned().collect();
		names.sort();
		self.writes.lock().push((group.to_string(), names));

		self.groups.lock().entry(group.to_string()).or_default().extend(fields.clone());
		Ok(())
	}
}

/// Notifier whose publish always fails; subscriptions still work.
#[derive(Debug)]
pub struct FailingNotifier {
	sender: tokio::sync::broadcast::Sender<ChangeEvent>,
}

impl FailingNotifier {
	pub fn new() -> Self {
		let (sender, _) = tokio::sync::broadcast::channel(8);
		Self { sender }
	}
}

#[async_trait]
impl ChangeNotifier for FailingNotifier {
	async fn publish(&self, _topic: &str, _data: serde_json::Value) -> CsResult<()> {
		Err(Error::NotificationError("transport down".into()))
	}

	fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ChangeEvent> {
		self.sender.subscribe()
	}
}
