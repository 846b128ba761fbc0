//! The consumed editor-host activation interface.

/// Host-side hook registration for first use of a language.
///
/// The host invokes the registered callback exactly once, when a document
/// of the given language id is first used. Implemented by the editor
/// integration layer; this crate only consumes it.
pub trait EditorHost {
	/// Registers `activate` to run on first use of `language_id`.
	fn on_language(&self, language_id: &str, activate: Box<dyn Fn() + Send + Sync>);
}
