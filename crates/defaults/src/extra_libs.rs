//! Supplemental library sources and their disposal capability.
//!
//! An extra library is a source unit (ambient declarations, shared
//! snippets) registered by an embedder to extend analysis beyond the open
//! document. Entries are versioned per path; the handle returned at
//! insertion time removes its entry only while the stored version still
//! matches, so a stale handle can never clobber a newer registration.

use std::sync::Weak;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::registry::LanguageServiceDefaults;

/// A registered extra library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraLib {
	/// Source text.
	pub content: String,
	/// Monotonically increasing per-path version, starting at 1.
	pub version: u32,
}

/// Input to [`LanguageServiceDefaults::set_extra_libs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraLibSource {
	/// Source text.
	pub content: String,
	/// Registration path; a unique placeholder is synthesized when absent.
	#[serde(default)]
	pub file_path: Option<String>,
}

impl ExtraLibSource {
	/// A source registered under a synthesized placeholder path.
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
			file_path: None,
		}
	}

	/// A source registered under an explicit path.
	pub fn at(content: impl Into<String>, file_path: impl Into<String>) -> Self {
		Self {
			content: content.into(),
			file_path: Some(file_path.into()),
		}
	}
}

/// Synthesizes a placeholder path that cannot collide with caller paths.
pub(crate) fn placeholder_path() -> String {
	format!("inmemory://extra-lib/{}", Uuid::new_v4())
}

/// Capability to remove one extra-library registration.
///
/// Disposal is an optimistic compare-and-delete: the entry is removed only
/// if the path still holds the version captured at insertion time. A handle
/// from a no-op insertion, or one whose entry was since replaced or
/// dropped, disposes silently without effect.
#[derive(Debug)]
pub struct ExtraLibHandle {
	state: HandleState,
}

#[derive(Debug)]
enum HandleState {
	Inert,
	Live {
		registry: Weak<LanguageServiceDefaults>,
		path: String,
		version: u32,
	},
}

impl ExtraLibHandle {
	pub(crate) fn inert() -> Self {
		Self {
			state: HandleState::Inert,
		}
	}

	pub(crate) fn live(registry: Weak<LanguageServiceDefaults>, path: String, version: u32) -> Self {
		Self {
			state: HandleState::Live {
				registry,
				path,
				version,
			},
		}
	}

	/// Returns true if disposing this handle can never remove anything.
	pub fn is_inert(&self) -> bool {
		matches!(self.state, HandleState::Inert)
	}

	/// Returns the registration path this handle guards, if any.
	pub fn path(&self) -> Option<&str> {
		match &self.state {
			HandleState::Inert => None,
			HandleState::Live { path, .. } => Some(path),
		}
	}

	/// Removes the guarded entry if its version is still current.
	pub fn dispose(self) {
		if let HandleState::Live {
			registry,
			path,
			version,
		} = self.state
			&& let Some(registry) = registry.upgrade()
		{
			registry.remove_extra_lib_if_current(&path, version);
		}
	}
}
