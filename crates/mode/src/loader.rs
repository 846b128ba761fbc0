//! Language mode and loader traits.
//!
//! The mode is the heavy analysis module: it registers the real providers
//! (completion, formatting, highlighting) against the editor, reading its
//! configuration from the dialect's [`LanguageServiceDefaults`]. This crate
//! only defines the seam; the implementation ships separately and is pulled
//! in on demand through a [`ModeLoader`].

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use velum_defaults::{Dialect, LanguageServiceDefaults};

/// Errors surfaced by dialect activation.
#[derive(Debug, Error)]
pub enum ActivationError {
	/// The host reported a language id no dialect claims.
	#[error("no dialect registered for language id `{0}`")]
	UnknownLanguage(String),
	/// The loader failed to produce the mode.
	#[error("failed to load language mode for `{dialect}`")]
	ModeLoad {
		/// Dialect whose activation failed.
		dialect: Dialect,
		/// Underlying loader failure.
		#[source]
		source: Box<dyn std::error::Error + Send + Sync>,
	},
}

/// The externally supplied analysis module for one dialect.
pub trait LanguageMode: Send + Sync {
	/// Performs all language-service registration for the dialect.
	///
	/// Called exactly once, right after the mode is loaded. The mode is
	/// expected to read the registry's current state here and subscribe to
	/// its change notifications for the rest of the process lifetime.
	fn setup(&self, defaults: &Arc<LanguageServiceDefaults>);
}

/// Loads the analysis module for a dialect on demand.
#[async_trait]
pub trait ModeLoader: Send + Sync {
	/// Resolves the mode for `dialect`.
	async fn load(
		&self,
		dialect: Dialect,
	) -> Result<Arc<dyn LanguageMode>, Box<dyn std::error::Error + Send + Sync>>;
}
