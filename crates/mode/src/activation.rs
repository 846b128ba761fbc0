//! Per-dialect defaults ownership and lazy mode activation.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use velum_defaults::{Dialect, LanguageServiceDefaults, NotifyScheduler};

use crate::host::EditorHost;
use crate::loader::{ActivationError, LanguageMode, ModeLoader};

/// Composition root for the markup language services.
///
/// Owns one [`LanguageServiceDefaults`] per dialect and loads each
/// dialect's mode at most once, on first activation. The per-dialect
/// defaults accessors form the public configuration API: embedders adjust
/// options and extra libraries through them whether or not the mode has
/// loaded yet; the mode picks the current state up during setup and follows
/// later changes through the registry's notifications.
pub struct LanguageContribution {
	loader: Arc<dyn ModeLoader>,
	entries: [DialectEntry; Dialect::ALL.len()],
}

struct DialectEntry {
	dialect: Dialect,
	defaults: Arc<LanguageServiceDefaults>,
	mode: OnceCell<Arc<dyn LanguageMode>>,
}

impl LanguageContribution {
	/// Creates the contribution with shipped per-dialect defaults.
	pub fn new(loader: Arc<dyn ModeLoader>, scheduler: Arc<dyn NotifyScheduler>) -> Self {
		let entries = Dialect::ALL.map(|dialect| DialectEntry {
			dialect,
			defaults: LanguageServiceDefaults::new(dialect, Arc::clone(&scheduler)),
			mode: OnceCell::new(),
		});
		Self { loader, entries }
	}

	fn entry(&self, dialect: Dialect) -> &DialectEntry {
		let entry = &self.entries[dialect as usize];
		debug_assert_eq!(entry.dialect, dialect);
		entry
	}

	/// Returns the defaults registry for `dialect`.
	pub fn defaults(&self, dialect: Dialect) -> &Arc<LanguageServiceDefaults> {
		&self.entry(dialect).defaults
	}

	/// Returns the HTML defaults registry.
	pub fn html(&self) -> &Arc<LanguageServiceDefaults> {
		self.defaults(Dialect::Html)
	}

	/// Returns the Handlebars defaults registry.
	pub fn handlebars(&self) -> &Arc<LanguageServiceDefaults> {
		self.defaults(Dialect::Handlebars)
	}

	/// Returns the Razor defaults registry.
	pub fn razor(&self) -> &Arc<LanguageServiceDefaults> {
		self.defaults(Dialect::Razor)
	}

	/// Returns true once the dialect's mode has loaded and set up.
	pub fn is_activated(&self, dialect: Dialect) -> bool {
		self.entry(dialect).mode.initialized()
	}

	/// Activates a dialect, loading its mode if this is the first use.
	///
	/// Concurrent activations of the same dialect share one load; a failed
	/// load leaves the dialect inactive so a later activation can retry.
	pub async fn activate(&self, dialect: Dialect) -> Result<(), ActivationError> {
		let entry = self.entry(dialect);
		entry
			.mode
			.get_or_try_init(|| async {
				debug!(dialect = %dialect, "mode.load");
				let mode = self
					.loader
					.load(dialect)
					.await
					.map_err(|source| ActivationError::ModeLoad { dialect, source })?;
				mode.setup(&entry.defaults);
				info!(dialect = %dialect, "mode.activate");
				Ok(mode)
			})
			.await?;
		Ok(())
	}

	/// Resolves a host language identifier and activates its dialect.
	pub async fn activate_language_id(&self, language_id: &str) -> Result<Dialect, ActivationError> {
		let Some(dialect) = Dialect::from_language_id(language_id) else {
			return Err(ActivationError::UnknownLanguage(language_id.to_string()));
		};
		self.activate(dialect).await?;
		Ok(dialect)
	}

	/// Registers an activation hook with the host for every dialect.
	///
	/// The hook spawns activation onto the tokio runtime; a failure is
	/// logged and swallowed since the host callback has no error channel.
	pub fn register(self: &Arc<Self>, host: &dyn EditorHost) {
		for dialect in Dialect::ALL {
			let contribution = Arc::clone(self);
			host.on_language(
				dialect.language_id(),
				Box::new(move || {
					let contribution = Arc::clone(&contribution);
					tokio::spawn(async move {
						if let Err(error) = contribution.activate(dialect).await {
							warn!(dialect = %dialect, error = %error, "mode activation failed");
						}
					});
				}),
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;
	use std::sync::atomic::{AtomicUsize, Ordering};

	use async_trait::async_trait;
	use parking_lot::Mutex;
	use velum_defaults::ManualScheduler;

	use super::*;

	struct RecordingMode {
		setups: AtomicUsize,
		seen_dialect: Mutex<Option<Dialect>>,
	}

	impl RecordingMode {
		fn new() -> Arc<Self> {
			Arc::new(Self {
				setups: AtomicUsize::new(0),
				seen_dialect: Mutex::new(None),
			})
		}
	}

	impl LanguageMode for RecordingMode {
		fn setup(&self, defaults: &Arc<LanguageServiceDefaults>) {
			self.setups.fetch_add(1, Ordering::SeqCst);
			*self.seen_dialect.lock() = Some(defaults.dialect());
		}
	}

	struct CountingLoader {
		loads: AtomicUsize,
		mode: Arc<RecordingMode>,
	}

	impl CountingLoader {
		fn new(mode: Arc<RecordingMode>) -> Arc<Self> {
			Arc::new(Self {
				loads: AtomicUsize::new(0),
				mode,
			})
		}
	}

	#[async_trait]
	impl ModeLoader for CountingLoader {
		async fn load(
			&self,
			_dialect: Dialect,
		) -> Result<Arc<dyn LanguageMode>, Box<dyn std::error::Error + Send + Sync>> {
			self.loads.fetch_add(1, Ordering::SeqCst);
			Ok(self.mode.clone())
		}
	}

	struct FailOnceLoader {
		attempts: AtomicUsize,
		mode: Arc<RecordingMode>,
	}

	#[async_trait]
	impl ModeLoader for FailOnceLoader {
		async fn load(
			&self,
			_dialect: Dialect,
		) -> Result<Arc<dyn LanguageMode>, Box<dyn std::error::Error + Send + Sync>> {
			if self.attempts.fetch_add(1, Ordering::SeqCst) == 0 {
				return Err("module fetch failed".into());
			}
			Ok(self.mode.clone())
		}
	}

	fn contribution(loader: Arc<dyn ModeLoader>) -> Arc<LanguageContribution> {
		let scheduler: Arc<dyn NotifyScheduler> = Arc::new(ManualScheduler::new());
		Arc::new(LanguageContribution::new(loader, scheduler))
	}

	#[tokio::test]
	async fn activation_loads_each_mode_once() {
		let mode = RecordingMode::new();
		let loader = CountingLoader::new(mode.clone());
		let contribution = contribution(loader.clone());

		assert!(!contribution.is_activated(Dialect::Html));
		contribution.activate(Dialect::Html).await.unwrap();
		contribution.activate(Dialect::Html).await.unwrap();

		assert!(contribution.is_activated(Dialect::Html));
		assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
		assert_eq!(mode.setups.load(Ordering::SeqCst), 1);
		assert_eq!(*mode.seen_dialect.lock(), Some(Dialect::Html));
	}

	#[tokio::test]
	async fn concurrent_activations_share_one_load() {
		let mode = RecordingMode::new();
		let loader = CountingLoader::new(mode.clone());
		let contribution = contribution(loader.clone());

		let (a, b) = tokio::join!(
			contribution.activate(Dialect::Handlebars),
			contribution.activate(Dialect::Handlebars)
		);
		a.unwrap();
		b.unwrap();

		assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
		assert_eq!(mode.setups.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn dialects_activate_independently() {
		let mode = RecordingMode::new();
		let loader = CountingLoader::new(mode.clone());
		let contribution = contribution(loader.clone());

		contribution.activate(Dialect::Html).await.unwrap();
		assert!(!contribution.is_activated(Dialect::Razor));

		contribution.activate(Dialect::Razor).await.unwrap();
		assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn unknown_language_id_is_rejected() {
		let loader = CountingLoader::new(RecordingMode::new());
		let contribution = contribution(loader);

		let error = contribution.activate_language_id("css").await.unwrap_err();
		assert!(matches!(error, ActivationError::UnknownLanguage(id) if id == "css"));
	}

	#[tokio::test]
	async fn language_id_activation_resolves_dialect() {
		let loader = CountingLoader::new(RecordingMode::new());
		let contribution = contribution(loader);

		let dialect = contribution.activate_language_id("handlebars").await.unwrap();
		assert_eq!(dialect, Dialect::Handlebars);
		assert!(contribution.is_activated(Dialect::Handlebars));
	}

	#[tokio::test]
	async fn failed_load_can_be_retried() {
		let mode = RecordingMode::new();
		let loader = Arc::new(FailOnceLoader {
			attempts: AtomicUsize::new(0),
			mode: mode.clone(),
		});
		let contribution = contribution(loader);

		let error = contribution.activate(Dialect::Html).await.unwrap_err();
		assert!(matches!(error, ActivationError::ModeLoad { dialect: Dialect::Html, .. }));
		assert!(!contribution.is_activated(Dialect::Html));

		contribution.activate(Dialect::Html).await.unwrap();
		assert!(contribution.is_activated(Dialect::Html));
		assert_eq!(mode.setups.load(Ordering::SeqCst), 1);
	}

	#[derive(Default)]
	struct FakeHost {
		hooks: Mutex<HashMap<String, Box<dyn Fn() + Send + Sync>>>,
	}

	impl EditorHost for FakeHost {
		fn on_language(&self, language_id: &str, activate: Box<dyn Fn() + Send + Sync>) {
			self.hooks.lock().insert(language_id.to_string(), activate);
		}
	}

	#[tokio::test]
	async fn register_wires_every_dialect() {
		let loader = CountingLoader::new(RecordingMode::new());
		let contribution = contribution(loader);
		let host = FakeHost::default();

		contribution.register(&host);

		let hooks = host.hooks.lock();
		for dialect in Dialect::ALL {
			assert!(hooks.contains_key(dialect.language_id()));
		}
	}

	#[tokio::test]
	async fn host_hook_activates_the_dialect() {
		let mode = RecordingMode::new();
		let loader = CountingLoader::new(mode.clone());
		let contribution = contribution(loader);
		let host = FakeHost::default();

		contribution.register(&host);
		(host.hooks.lock()["html"])();

		// Let the spawned activation run on the current-thread runtime.
		for _ in 0..16 {
			tokio::task::yield_now().await;
		}
		assert!(contribution.is_activated(Dialect::Html));
		assert_eq!(mode.setups.load(Ordering::SeqCst), 1);
	}
}
