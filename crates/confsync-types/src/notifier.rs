//! Cluster change-notification adapter.
//!
//! Delivery is best-effort: events may be lost, duplicated, or reordered.
//! Subscribers reload authoritative state from the store instead of trusting
//! event payloads, so the transport only has to be a wake-up signal.

use async_trait::async_trait;
use std::fmt::Debug;
use tokio::sync::broadcast;

use crate::prelude::*;

/// An event received from the cluster notification channel.
#[derive(Clone, Debug)]
pub struct ChangeEvent {
	pub topic: Box<str>,
	pub data: serde_json::Value,
}

/// Best-effort publish/subscribe channel shared by all instances.
#[async_trait]
pub trait ChangeNotifier: Debug + Send + Sync {
	/// Publish an event to every instance, the local one included.
	async fn publish(&self, topic: &str, data: serde_json::Value) -> CsResult<()>;

	/// Subscribe to events from every instance.
	fn subscribe(&self) -> broadcast::Receiver<ChangeEvent>;
}

// vim: ts=4
