//! Cross-instance synchronization tests
//!
//! Two service instances share one store and one notification channel; a
//! commit on one must eventually show up in the other's cache.

mod common;

use std::sync::Arc;
use std::time::Duration;

use confsync::broadcast::LocalNotifier;
use confsync::notifier::ChangeNotifier;
use confsync::store::SettingsStore;
use confsync::settings::{AuthSettings, ElasticSettings, FieldSet, SettingsService, reload};

use common::MemoryStore;

async fn wait_until(mut check: impl FnMut() -> bool) {
	for _ in 0..200 {
		if check() {
			return;
		}
		tokio::time::sleep(Duration::from_millis(5)).await;
	}
	panic!("condition not reached within timeout");
}

#[tokio::test]
async fn test_commit_on_one_instance_reaches_the_other() {
	let store = Arc::new(MemoryStore::new());
	let notifier = Arc::new(LocalNotifier::new());

	let instance_a = Arc::new(SettingsService::new(store.clone(), notifier.clone()));
	let instance_b = Arc::new(SettingsService::new(store, notifier));

	instance_a.load_all().await.unwrap();
	instance_b.load_all().await.unwrap();
	let _reload_b = reload::spawn(instance_b.clone());

	let mut elastic = ElasticSettings::default();
	elastic.addresses = vec!["http://es:9200".to_string()];
	let fields: FieldSet = ["addresses"].into_iter().collect();
	instance_a.commit(elastic, &fields).await.unwrap();

	// A sees its own commit immediately
	assert_eq!(instance_a.cache().elastic().primary_address(), "http://es:9200");

	// B converges once its reload task processes the notification
	let b = instance_b.clone();
	wait_until(move || b.cache().elastic().primary_address() == "http://es:9200").await;
}

#[tokio::test]
async fn test_originating_instance_also_reloads() {
	let store = Arc::new(MemoryStore::new());
	let notifier = Arc::new(LocalNotifier::new());

	let instance = Arc::new(SettingsService::new(store.clone(), notifier.clone()));
	instance.load_all().await.unwrap();
	let _reload = reload::spawn(instance.clone());

	// Another instance wrote directly to the store and notified
	let mut fields = confsync::store::FieldValues::new();
	fields.insert("expire".to_string(), serde_json::json!(7200));
	store.upsert_fields("auth", &fields).await.unwrap();
	notifier
		.publish("settings.change", serde_json::json!({ "group": "auth" }))
		.await
		.unwrap();

	let i = instance.clone();
	wait_until(move || i.cache().auth().expire == 7200).await;
}

#[tokio::test]
async fn test_empty_payload_reloads_every_group() {
	let store = Arc::new(MemoryStore::new());
	let notifier = Arc::new(LocalNotifier::new());

	let instance = Arc::new(SettingsService::new(store.clone(), notifier.clone()));
	instance.load_all().await.unwrap();
	let _reload = reload::spawn(instance.clone());

	let mut auth_fields = confsync::store::FieldValues::new();
	auth_fields.insert("expire".to_string(), serde_json::json!(600));
	store.upsert_fields("auth", &auth_fields).await.unwrap();

	let mut elastic_fields = confsync::store::FieldValues::new();
	elastic_fields.insert("proxy_requests".to_string(), serde_json::json!(true));
	store.upsert_fields("elastic", &elastic_fields).await.unwrap();

	// Payload without a group name, as the minimal wire contract allows
	notifier.publish("settings.change", serde_json::Value::Null).await.unwrap();

	let i = instance.clone();
	wait_until(move || i.cache().auth().expire == 600 && i.cache().elastic().proxy_requests).await;
}

#[tokio::test]
async fn test_duplicate_notifications_are_harmless() {
	let store = Arc::new(MemoryStore::new());
	let notifier = Arc::new(LocalNotifier::new());

	let instance = Arc::new(SettingsService::new(store.clone(), notifier.clone()));
	instance.load_all().await.unwrap();
	let _reload = reload::spawn(instance.clone());

	let mut fields = confsync::store::FieldValues::new();
	fields.insert("expire".to_string(), serde_json::json!(1800));
	store.upsert_fields("auth", &fields).await.unwrap();

	for _ in 0..3 {
		notifier
			.publish("settings.change", serde_json::json!({ "group": "auth" }))
			.await
			.unwrap();
	}

	let i = instance.clone();
	wait_until(move || i.cache().auth().expire == 1800).await;
	assert_eq!(instance.cache().auth().max_duration, AuthSettings::default().max_duration);
}

#[tokio::test]
async fn test_unrelated_topics_are_ignored() {
	let store = Arc::new(MemoryStore::new());
	let notifier = Arc::new(LocalNotifier::new());

	let instance = Arc::new(SettingsService::new(store.clone(), notifier.clone()));
	instance.load_all().await.unwrap();
	let _reload = reload::spawn(instance.clone());

	let mut fields = confsync::store::FieldValues::new();
	fields.insert("expire".to_string(), serde_json::json!(999));
	store.upsert_fields("auth", &fields).await.unwrap();

	notifier.publish("tenant.change", serde_json::Value::Null).await.unwrap();
	tokio::time::sleep(Duration::from_millis(50)).await;

	// The cache only moves on the settings topic
	assert_eq!(instance.cache().auth().expire, AuthSettings::default().expire);

	notifier.publish("settings.change", serde_json::json!({ "group": "auth" })).await.unwrap();
	let i = instance.clone();
	wait_until(move || i.cache().auth().expire == 999).await;
}
