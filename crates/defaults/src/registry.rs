//! The per-dialect defaults registry.
//!
//! [`LanguageServiceDefaults`] holds the configuration bundles and the
//! extra-library mapping for one dialect and broadcasts their changes to the
//! language mode. Configuration changes notify synchronously; extra-library
//! changes coalesce into one deferred notification per scheduling window.
//!
//! # Notification ordering
//!
//! - `did_change` fires before the mutating setter returns.
//! - `did_extra_libs_change` fires strictly after the mutating call stack
//!   unwinds, once per window, after every mutation coalesced into it.
//!
//! Emission never happens under the state lock, so listeners may read the
//! registry (or mutate it, opening a new window) from inside a callback.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::dialect::Dialect;
use crate::events::{EventEmitter, Subscription};
use crate::extra_libs::{self, ExtraLib, ExtraLibHandle, ExtraLibSource};
use crate::options::{ModeConfiguration, Options};
use crate::scheduler::NotifyScheduler;

/// Configuration registry for one dialect.
///
/// Constructed once per dialect by the composition root and shared behind
/// [`Arc`] for the process lifetime.
pub struct LanguageServiceDefaults {
	dialect: Dialect,
	state: Mutex<DefaultsState>,
	did_change: EventEmitter<LanguageServiceDefaults>,
	did_extra_libs_change: EventEmitter<LanguageServiceDefaults>,
	scheduler: Arc<dyn NotifyScheduler>,
	weak_self: Weak<LanguageServiceDefaults>,
}

struct DefaultsState {
	options: Options,
	mode_configuration: ModeConfiguration,
	extra_libs: HashMap<String, ExtraLib>,
	/// One flush task is in flight; further mutations schedule nothing.
	notify_pending: bool,
}

impl LanguageServiceDefaults {
	/// Creates a registry with the shipped defaults for `dialect`.
	pub fn new(dialect: Dialect, scheduler: Arc<dyn NotifyScheduler>) -> Arc<Self> {
		Self::with_defaults(
			dialect,
			Options::default(),
			ModeConfiguration::for_dialect(dialect),
			scheduler,
		)
	}

	/// Creates a registry with explicit initial bundles.
	pub fn with_defaults(
		dialect: Dialect,
		options: Options,
		mode_configuration: ModeConfiguration,
		scheduler: Arc<dyn NotifyScheduler>,
	) -> Arc<Self> {
		Arc::new_cyclic(|weak| Self {
			dialect,
			state: Mutex::new(DefaultsState {
				options,
				mode_configuration,
				extra_libs: HashMap::new(),
				notify_pending: false,
			}),
			did_change: EventEmitter::new(),
			did_extra_libs_change: EventEmitter::new(),
			scheduler,
			weak_self: weak.clone(),
		})
	}

	/// Returns the dialect this registry configures.
	pub fn dialect(&self) -> Dialect {
		self.dialect
	}

	/// Returns the current options bundle.
	pub fn options(&self) -> Options {
		self.state.lock().options.clone()
	}

	/// Returns the current mode configuration.
	pub fn mode_configuration(&self) -> ModeConfiguration {
		self.state.lock().mode_configuration
	}

	/// Replaces the options bundle wholesale and notifies synchronously.
	///
	/// `None` coerces to the default bundle. No validation is performed;
	/// the bundle is handed to the mode as-is.
	pub fn set_options(&self, options: Option<Options>) {
		self.state.lock().options = options.unwrap_or_default();
		trace!(dialect = %self.dialect, "defaults.set_options");
		self.did_change.emit(self);
	}

	/// Replaces the mode configuration wholesale and notifies synchronously.
	///
	/// Shares the `did_change` channel with [`set_options`](Self::set_options).
	/// `None` coerces to the all-off [`ModeConfiguration::default`].
	pub fn set_mode_configuration(&self, config: Option<ModeConfiguration>) {
		self.state.lock().mode_configuration = config.unwrap_or_default();
		trace!(dialect = %self.dialect, "defaults.set_mode_configuration");
		self.did_change.emit(self);
	}

	/// Subscribes to synchronous configuration-change notifications.
	pub fn on_did_change(
		&self,
		listener: impl Fn(&LanguageServiceDefaults) + Send + Sync + 'static,
	) -> Subscription {
		self.did_change.subscribe(listener)
	}

	/// Subscribes to the debounced extra-libraries notification.
	pub fn on_did_extra_libs_change(
		&self,
		listener: impl Fn(&LanguageServiceDefaults) + Send + Sync + 'static,
	) -> Subscription {
		self.did_extra_libs_change.subscribe(listener)
	}

	/// Returns a snapshot of the extra-library mapping.
	///
	/// Copy-on-read: later registry mutations are not visible through a
	/// previously returned snapshot.
	pub fn extra_libs(&self) -> HashMap<String, ExtraLib> {
		self.state.lock().extra_libs.clone()
	}

	/// Returns the entry registered at `path`, if any.
	pub fn extra_lib(&self, path: &str) -> Option<ExtraLib> {
		self.state.lock().extra_libs.get(path).cloned()
	}

	/// Registers an extra library, returning its disposal handle.
	///
	/// Without a `file_path` a unique placeholder path is synthesized.
	/// Re-registering identical content at the same path is a no-op and
	/// yields an inert handle; different content replaces the entry and
	/// bumps its version. Any effective mutation schedules the debounced
	/// notification.
	pub fn add_extra_lib(
		&self,
		content: impl Into<String>,
		file_path: Option<&str>,
	) -> ExtraLibHandle {
		let content = content.into();
		let path = match file_path {
			Some(path) => path.to_string(),
			None => extra_libs::placeholder_path(),
		};

		let version = {
			let mut state = self.state.lock();
			let version = match state.extra_libs.get(&path) {
				Some(existing) if existing.content == content => return ExtraLibHandle::inert(),
				Some(existing) => existing.version + 1,
				None => 1,
			};
			state.extra_libs.insert(path.clone(), ExtraLib {
				content,
				version,
			});
			self.schedule_extra_libs_notify(&mut state);
			version
		};

		trace!(dialect = %self.dialect, path = %path, version, "defaults.extra_lib.add");
		ExtraLibHandle::live(self.weak_self.clone(), path, version)
	}

	/// Replaces the whole extra-library mapping.
	///
	/// Every supplied source is stored with version 1; paths absent from
	/// `libs` are dropped and duplicate paths overwrite earlier entries in
	/// list order. Always schedules exactly one debounced notification,
	/// including for an empty `libs`.
	pub fn set_extra_libs(&self, libs: Vec<ExtraLibSource>) {
		let count = libs.len();
		{
			let mut state = self.state.lock();
			state.extra_libs.clear();
			for source in libs {
				let path = source
					.file_path
					.unwrap_or_else(extra_libs::placeholder_path);
				state.extra_libs.insert(path, ExtraLib {
					content: source.content,
					version: 1,
				});
			}
			self.schedule_extra_libs_notify(&mut state);
		}
		debug!(dialect = %self.dialect, count, "defaults.extra_libs.replace");
	}

	/// Compare-and-delete used by [`ExtraLibHandle::dispose`].
	///
	/// Removes the entry at `path` only if it still holds `version`.
	/// Returns whether an entry was removed.
	pub(crate) fn remove_extra_lib_if_current(&self, path: &str, version: u32) -> bool {
		let removed = {
			let mut state = self.state.lock();
			match state.extra_libs.get(path) {
				Some(existing) if existing.version == version => {
					state.extra_libs.remove(path);
					self.schedule_extra_libs_notify(&mut state);
					true
				}
				_ => false,
			}
		};
		if removed {
			trace!(dialect = %self.dialect, path = %path, version, "defaults.extra_lib.remove");
		}
		removed
	}

	/// Marks the window pending and hands one flush task to the scheduler.
	///
	/// Must be called with the state lock held so the pending check and the
	/// mutation it covers are a single atomic step.
	fn schedule_extra_libs_notify(&self, state: &mut DefaultsState) {
		if state.notify_pending {
			return;
		}
		state.notify_pending = true;
		let registry = self.weak_self.clone();
		self.scheduler.schedule(Box::new(move || {
			if let Some(registry) = registry.upgrade() {
				registry.flush_extra_libs_notify();
			}
		}));
	}

	fn flush_extra_libs_notify(&self) {
		{
			let mut state = self.state.lock();
			if !state.notify_pending {
				return;
			}
			state.notify_pending = false;
		}
		trace!(dialect = %self.dialect, "defaults.extra_libs.changed");
		self.did_extra_libs_change.emit(self);
	}
}
