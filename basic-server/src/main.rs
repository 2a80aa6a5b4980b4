use std::{env, path, sync::Arc};

use confsync::app::AppBuilder;
use confsync::broadcast::LocalNotifier;
use confsync_store_adapter_sqlite::StoreAdapterSqlite;

#[tokio::main]
async fn main() {
	let db_dir = path::PathBuf::from(env::var("DB_DIR").unwrap_or("./data".to_string()));
	let listen = env::var("LISTEN").unwrap_or("127.0.0.1:8080".to_string());

	tokio::fs::create_dir_all(&db_dir).await.expect("Cannot create data dir");
	let store = Arc::new(
		StoreAdapterSqlite::new(db_dir.join("settings.db"))
			.await
			.expect("FATAL: Failed to open settings store"),
	);
	let notifier = Arc::new(LocalNotifier::new());

	let mut builder = AppBuilder::new();
	builder.listen(listen).store(store).notifier(notifier);
	builder.run().await.expect("FATAL: Server failed");
}

// vim: ts=4
