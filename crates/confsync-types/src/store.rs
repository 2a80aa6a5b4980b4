//! Adapter that persists settings groups as documents with field-level upsert.

use async_trait::async_trait;
use std::{collections::HashMap, fmt::Debug};

use crate::prelude::*;

/// Attribute name to JSON value mapping for one settings group.
pub type FieldValues = HashMap<String, serde_json::Value>;

/// Document-oriented settings persistence, keyed by group name.
///
/// The store is the single source of truth for the cluster. Two instances
/// upserting disjoint field sets of the same group must not clobber each
/// other, which is what makes concurrent partial updates safe.
#[async_trait]
pub trait SettingsStore: Debug + Send + Sync {
	/// Read every stored field of a settings group.
	///
	/// Returns an empty map if the group has never been persisted.
	async fn read_fields(&self, group: &str) -> CsResult<FieldValues>;

	/// Upsert only the listed fields of a settings group.
	///
	/// Fields not present in `fields` are left untouched in the store.
	async fn upsert_fields(&self, group: &str, fields: &FieldValues) -> CsResult<()>;
}

// vim: ts=4
