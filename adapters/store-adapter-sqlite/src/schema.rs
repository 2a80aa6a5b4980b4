//! Database schema initialization

use sqlx::SqlitePool;

/// Initialize the database schema
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS settings (
		group_name text NOT NULL,
		field text NOT NULL,
		value text,
		PRIMARY KEY(group_name, field)
	)",
	)
	.execute(db)
	.await?;

	Ok(())
}

// vim: ts=4
