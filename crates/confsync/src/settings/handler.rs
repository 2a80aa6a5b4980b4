//! Settings facade handlers
//!
//! Thin translation between the external flat representation and the cached
//! groups: diff against the cache, then hand dirty fields to the commit
//! protocol.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{AuthSettings, ElasticSettings, FieldSet, Provider, SettingsGroup};
use crate::prelude::*;

/// External representation: the auth and elastic groups projected to the
/// flat shape clients read and edit.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SettingsData {
	pub auth_providers: Vec<Provider>,
	pub auth_expire: i64,
	pub auth_max_duration: i64,
	pub elastic_address: String,
	pub elastic_proxy_requests: bool,
}

impl SettingsData {
	fn snapshot(auth: &AuthSettings, elastic: &ElasticSettings) -> Self {
		SettingsData {
			auth_providers: auth.providers.clone(),
			auth_expire: auth.expire,
			auth_max_duration: auth.max_duration,
			elastic_address: elastic.primary_address().to_string(),
			elastic_proxy_requests: elastic.proxy_requests,
		}
	}
}

/// GET /api/settings - Current settings snapshot from the cache
pub async fn get_settings(State(app): State<App>) -> CsResult<(StatusCode, Json<SettingsData>)> {
	let auth = app.settings.cache().auth();
	let elastic = app.settings.cache().elastic();

	Ok((StatusCode::OK, Json(SettingsData::snapshot(&auth, &elastic))))
}

/// PUT /api/settings - Apply an update and return the post-commit snapshot
///
/// Groups are committed in sequence, not as one transaction: if the elastic
/// commit succeeds and the auth commit fails, the elastic change stays and
/// the caller gets the error.
pub async fn put_settings(
	State(app): State<App>,
	Json(data): Json<SettingsData>,
) -> CsResult<(StatusCode, Json<SettingsData>)> {
	if app.opts.read_only {
		warn!("Settings update rejected: instance is read-only");
		return Err(Error::AccessDenied);
	}

	if data.auth_expire < 0 || data.auth_max_duration < 0 {
		return Err(Error::ValidationError("Durations must not be negative".into()));
	}

	apply_elastic(&app, &data).await?;
	apply_auth(&app, &data).await?;

	let auth = app.settings.cache().auth();
	let elastic = app.settings.cache().elastic();

	Ok((StatusCode::OK, Json(SettingsData::snapshot(&auth, &elastic))))
}

async fn apply_elastic(app: &App, data: &SettingsData) -> CsResult<()> {
	let service = &app.settings;
	let _guard = service.commit_lock(ElasticSettings::NAME).lock().await;

	let cached = service.cache().elastic();
	let mut candidate = (*cached).clone();
	let mut fields = FieldSet::new();

	if cached.primary_address() != data.elastic_address {
		candidate.addresses = if data.elastic_address.is_empty() {
			Vec::new()
		} else {
			vec![data.elastic_address.clone()]
		};
		fields.add("addresses");
	}

	if cached.proxy_requests != data.elastic_proxy_requests {
		candidate.proxy_requests = data.elastic_proxy_requests;
		fields.add("proxy_requests");
	}

	service.commit(candidate, &fields).await
}

async fn apply_auth(app: &App, data: &SettingsData) -> CsResult<()> {
	let service = &app.settings;
	let _guard = service.commit_lock(AuthSettings::NAME).lock().await;

	let cached = service.cache().auth();
	let mut candidate = (*cached).clone();

	// Provider ids are assigned at first persistence, so the providers field
	// is committed even when the submitted list is unchanged.
	let mut fields = FieldSet::new();
	fields.add("providers");

	if cached.expire != data.auth_expire {
		candidate.expire = data.auth_expire;
		fields.add("expire");
	}

	if cached.max_duration != data.auth_max_duration {
		candidate.max_duration = data.auth_max_duration;
		fields.add("max_duration");
	}

	candidate.providers = data.auth_providers.clone();
	for provider in &mut candidate.providers {
		if !provider.has_id() {
			provider.id = Uuid::now_v7().to_string().into();
		}
	}

	service.commit(candidate, &fields).await
}


// vim: ts=4
