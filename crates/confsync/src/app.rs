//! App state type

use std::sync::Arc;

use confsync_types::notifier::ChangeNotifier;
use confsync_types::store::SettingsStore;

use crate::prelude::*;
use crate::routes;
use crate::settings::{reload, service::SettingsService};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub settings: Arc<SettingsService>,
	pub opts: AppBuilderOpts,
}

pub type App = Arc<AppState>;

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// Stand-in for the deployment's access-control collaborator: when set,
	/// every settings update is rejected.
	pub read_only: bool,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	store: Option<Arc<dyn SettingsStore>>,
	notifier: Option<Arc<dyn ChangeNotifier>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			opts: AppBuilderOpts { listen: "127.0.0.1:8080".into(), read_only: false },
			store: None,
			notifier: None,
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self { self.opts.listen = listen.into(); self }
	pub fn read_only(&mut self, read_only: bool) -> &mut Self { self.opts.read_only = read_only; self }

	// Adapters
	pub fn store(&mut self, store: Arc<dyn SettingsStore>) -> &mut Self { self.store = Some(store); self }
	pub fn notifier(&mut self, notifier: Arc<dyn ChangeNotifier>) -> &mut Self { self.notifier = Some(notifier); self }

	pub async fn run(self) -> CsResult<()> {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		info!("confsync v{}", VERSION);

		let store =
			self.store.ok_or_else(|| Error::ConfigError("No settings store configured".into()))?;
		let notifier = self
			.notifier
			.ok_or_else(|| Error::ConfigError("No change notifier configured".into()))?;

		let settings = Arc::new(SettingsService::new(store, notifier));
		settings.load_all().await?;

		let app: App = Arc::new(AppState { settings: settings.clone(), opts: self.opts });

		// Keeps this instance consistent with commits made anywhere in the
		// cluster, its own included
		reload::spawn(settings);

		let router = routes::init(app.clone());
		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on {}", app.opts.listen);
		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self { Self::new() }
}

// vim: ts=4
