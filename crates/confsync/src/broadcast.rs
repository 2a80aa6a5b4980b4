//! In-process change notifier.
//!
//! Single-node deployments and tests use this adapter; clustered
//! deployments plug a real transport in through the
//! [`ChangeNotifier`] trait. Subscribers on this instance (the reload task
//! included) receive everything published here, which is exactly the
//! "originator also reloads" behavior the commit protocol expects.

use async_trait::async_trait;
use tokio::sync::broadcast;

use confsync_types::notifier::{ChangeEvent, ChangeNotifier};

use crate::prelude::*;

/// Configuration
#[derive(Clone, Debug)]
pub struct NotifierConfig {
	/// Maximum number of events to buffer per subscriber
	pub buffer_size: usize,
}

impl Default for NotifierConfig {
	fn default() -> Self {
		Self { buffer_size: 128 }
	}
}

#[derive(Debug)]
pub struct LocalNotifier {
	sender: broadcast::Sender<ChangeEvent>,
}

impl LocalNotifier {
	/// Create a new notifier with default config
	pub fn new() -> Self {
		Self::with_config(NotifierConfig::default())
	}

	/// Create with custom config
	pub fn with_config(config: NotifierConfig) -> Self {
		let (sender, _) = broadcast::channel(config.buffer_size);
		Self { sender }
	}
}

impl Default for LocalNotifier {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl ChangeNotifier for LocalNotifier {
	async fn publish(&self, topic: &str, data: serde_json::Value) -> CsResult<()> {
		let event = ChangeEvent { topic: topic.into(), data };

		// A send error only means nobody is subscribed right now
		let receivers = self.sender.send(event).unwrap_or(0);
		debug!("Published '{}' to {} subscribers", topic, receivers);
		Ok(())
	}

	fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
		self.sender.subscribe()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_publish_reaches_all_subscribers() {
		let notifier = LocalNotifier::new();

		let mut rx1 = notifier.subscribe();
		let mut rx2 = notifier.subscribe();

		notifier.publish("settings.change", serde_json::json!({ "group": "auth" })).await.unwrap();

		let event = rx1.recv().await.unwrap();
		assert_eq!(event.topic.as_ref(), "settings.change");

		let event = rx2.recv().await.unwrap();
		assert_eq!(event.data, serde_json::json!({ "group": "auth" }));
	}

	#[tokio::test]
	async fn test_publish_without_subscribers_is_ok() {
		let notifier = LocalNotifier::new();

		let result = notifier.publish("settings.change", serde_json::Value::Null).await;
		assert!(result.is_ok());
	}

	#[tokio::test]
	async fn test_subscriber_only_sees_later_events() {
		let notifier = LocalNotifier::new();

		notifier.publish("settings.change", serde_json::Value::Null).await.unwrap();

		let mut rx = notifier.subscribe();
		notifier.publish("settings.change", serde_json::json!({ "group": "elastic" })).await.unwrap();

		let event = rx.recv().await.unwrap();
		assert_eq!(event.data, serde_json::json!({ "group": "elastic" }));
		assert!(rx.try_recv().is_err());
	}
}

// vim: ts=4
