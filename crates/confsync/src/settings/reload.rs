//! Change-notification subscriber that keeps the cache consistent.

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use super::service::{SETTINGS_CHANGE_TOPIC, SettingsService};
use super::types::{AuthSettings, ElasticSettings, SettingsGroup};
use crate::prelude::*;

/// Spawn the reload task for this instance.
///
/// Runs until the notifier's channel closes. Every received
/// `settings.change` event reloads the named group from the store and swaps
/// it into the cache; events without a recognizable group name trigger a
/// full reload, so an empty payload still converges. Reloading is
/// idempotent and reads authoritative state, which is what makes lost,
/// duplicated, and reordered notifications tolerable.
pub fn spawn(service: Arc<SettingsService>) -> tokio::task::JoinHandle<()> {
	let mut rx = service.subscribe();

	tokio::spawn(async move {
		loop {
			match rx.recv().await {
				Ok(event) => {
					if event.topic.as_ref() != SETTINGS_CHANGE_TOPIC {
						continue;
					}

					let group = event.data.get("group").and_then(|g| g.as_str());
					debug!("Settings change received: group={}", group.unwrap_or("*"));

					let res = if group == Some(AuthSettings::NAME) {
						service.reload_group::<AuthSettings>().await
					} else if group == Some(ElasticSettings::NAME) {
						service.reload_group::<ElasticSettings>().await
					} else {
						service.reload_all().await
					};

					if let Err(err) = res {
						warn!("Settings reload failed: {}", err);
					}
				}
				Err(RecvError::Lagged(n)) => {
					warn!("Settings notifications lagged, skipped {} events", n);
					if let Err(err) = service.reload_all().await {
						warn!("Settings reload failed: {}", err);
					}
				}
				Err(RecvError::Closed) => {
					debug!("Settings notification channel closed");
					return;
				}
			}
		}
	})
}

// vim: ts=4
