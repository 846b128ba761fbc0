//! Supported markup dialects.
//!
//! Each dialect gets its own isolated [`LanguageServiceDefaults`] instance;
//! the template variants share the markup analysis but keep diagnostics and
//! formatting off by default (the template syntax would produce noise).
//!
//! [`LanguageServiceDefaults`]: crate::LanguageServiceDefaults

use std::fmt;

/// A markup dialect served by the language service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
	/// Plain HTML documents.
	Html,
	/// Handlebars templates.
	Handlebars,
	/// Razor templates.
	Razor,
}

impl Dialect {
	/// All dialects, in activation-registration order.
	pub const ALL: [Dialect; 3] = [Dialect::Html, Dialect::Handlebars, Dialect::Razor];

	/// Returns the host editor's language identifier for this dialect.
	pub fn language_id(self) -> &'static str {
		match self {
			Self::Html => "html",
			Self::Handlebars => "handlebars",
			Self::Razor => "razor",
		}
	}

	/// Returns a human-readable dialect name.
	pub fn display_name(self) -> &'static str {
		match self {
			Self::Html => "HTML",
			Self::Handlebars => "Handlebars",
			Self::Razor => "Razor",
		}
	}

	/// Returns true for the template-engine variants.
	pub fn is_template(self) -> bool {
		matches!(self, Self::Handlebars | Self::Razor)
	}

	/// Resolves a host language identifier back to a dialect.
	pub fn from_language_id(language_id: &str) -> Option<Dialect> {
		match language_id {
			"html" => Some(Self::Html),
			"handlebars" => Some(Self::Handlebars),
			"razor" => Some(Self::Razor),
			_ => None,
		}
	}
}

impl fmt::Display for Dialect {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.language_id())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn language_ids_round_trip() {
		for dialect in Dialect::ALL {
			assert_eq!(Dialect::from_language_id(dialect.language_id()), Some(dialect));
		}
		assert_eq!(Dialect::from_language_id("css"), None);
	}

	#[test]
	fn template_variants() {
		assert!(!Dialect::Html.is_template());
		assert!(Dialect::Handlebars.is_template());
		assert!(Dialect::Razor.is_template());
	}
}
