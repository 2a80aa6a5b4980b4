//! SQLite-backed settings store.
//!
//! Each settings group is stored as one row per field, so a partial upsert
//! only touches the rows named in the dirty set and concurrent writers
//! updating disjoint fields of the same group never clobber each other.

use async_trait::async_trait;
use sqlx::{
	Row,
	sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
};
use std::path::Path;

use confsync::{
	prelude::*,
	store::{FieldValues, SettingsStore},
};

mod schema;

#[derive(Debug)]
pub struct StoreAdapterSqlite {
	db: SqlitePool,
}

impl StoreAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> CsResult<Self> {
		let opts = SqliteConnectOptions::new().filename(path.as_ref()).create_if_missing(true);
		let db = SqlitePoolOptions::new().connect_with(opts).await.map_err(db_err)?;
		schema::init_db(&db).await.map_err(db_err)?;
		Ok(Self { db })
	}
}

#[async_trait]
impl SettingsStore for StoreAdapterSqlite {
	async fn read_fields(&self, group: &str) -> CsResult<FieldValues> {
		let rows = sqlx::query("SELECT field, value FROM settings WHERE group_name = ?")
			.bind(group)
			.fetch_all(&self.db)
			.await
			.map_err(db_err)?;

		let mut fields = FieldValues::new();
		for row in rows {
			let field: String = row.get("field");
			let value: Option<String> = row.get("value");
			fields.insert(
				field,
				value
					.and_then(|v| serde_json::from_str(&v).ok())
					.unwrap_or(serde_json::Value::Null),
			);
		}

		Ok(fields)
	}

	async fn upsert_fields(&self, group: &str, fields: &FieldValues) -> CsResult<()> {
		let mut tx = self.db.begin().await.map_err(db_err)?;

		for (field, value) in fields {
			sqlx::query(
				"INSERT OR REPLACE INTO settings (group_name, field, value) VALUES (?, ?, ?)",
			)
			.bind(group)
			.bind(field)
			.bind(value.to_string())
			.execute(&mut *tx)
			.await
			.map_err(db_err)?;
		}

		tx.commit().await.map_err(db_err)?;
		Ok(())
	}
}

fn db_err(err: sqlx::Error) -> Error {
	warn!("DB: {:#?}", err);
	Error::PersistenceError(err.to_string())
}

// vim: ts=4
