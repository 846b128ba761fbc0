//! Configuration bundles held by a defaults registry.
//!
//! Both [`Options`] and [`ModeConfiguration`] are replaced wholesale on every
//! setter call; there is no partial merge. All types carry serde derives with
//! container-level defaults so embedders can ship partial bundles in config
//! files and get the shipped defaults for the rest.

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;

/// Attribute wrapping strategy used by the formatter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapAttributes {
	/// Wrap only when the line would exceed the wrap length.
	#[default]
	Auto,
	/// Wrap every attribute onto its own line.
	Force,
	/// Wrap every attribute, aligned with the first.
	ForceAligned,
	/// Wrap every attribute and the closing bracket.
	ForceExpandMultiline,
}

/// Formatting parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
	/// Indentation width in columns.
	pub tab_size: u32,
	/// Indent with spaces instead of tabs.
	pub insert_spaces: bool,
	/// Maximum line length before wrapping.
	pub wrap_line_length: u32,
	/// Comma-separated tag list left untouched by the formatter.
	pub unformatted: String,
	/// Comma-separated tag list whose content is left untouched.
	pub content_unformatted: String,
	/// Indent `<head>` and `<body>` sections.
	pub indent_inner_html: bool,
	/// Keep existing line breaks.
	pub preserve_new_lines: bool,
	/// Maximum consecutive preserved line breaks, unlimited when absent.
	pub max_preserve_new_lines: Option<u32>,
	/// Indent handlebars-style blocks.
	pub indent_handlebars: bool,
	/// Ensure a trailing newline.
	pub end_with_newline: bool,
	/// Comma-separated tag list preceded by an extra blank line.
	pub extra_liners: String,
	/// Attribute wrapping strategy.
	pub wrap_attributes: WrapAttributes,
}

impl Default for FormatOptions {
	fn default() -> Self {
		Self {
			tab_size: 4,
			insert_spaces: false,
			wrap_line_length: 120,
			unformatted: "a, abbr, acronym, b, bdo, big, br, button, cite, code, dfn, em, font, \
			              i, img, input, kbd, label, map, object, q, samp, select, small, span, \
			              strike, strong, sub, sup, textarea, tt, u, var"
				.into(),
			content_unformatted: "pre".into(),
			indent_inner_html: false,
			preserve_new_lines: true,
			max_preserve_new_lines: None,
			indent_handlebars: false,
			end_with_newline: false,
			extra_liners: "head, body, /html".into(),
			wrap_attributes: WrapAttributes::Auto,
		}
	}
}

/// Suggestion-engine toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestOptions {
	/// Offer HTML5 tags and attributes.
	pub html5: bool,
}

impl Default for SuggestOptions {
	fn default() -> Self {
		Self { html5: true }
	}
}

/// Tag/attribute data-provider toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataOptions {
	/// Use the built-in tag and attribute catalog.
	pub use_default_data_provider: bool,
}

impl Default for DataOptions {
	fn default() -> Self {
		Self {
			use_default_data_provider: true,
		}
	}
}

/// The full configuration bundle of a defaults registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
	/// Formatting parameters.
	pub format: FormatOptions,
	/// Suggestion-engine toggles.
	pub suggest: SuggestOptions,
	/// Data-provider toggles.
	pub data: DataOptions,
}

/// Feature toggles consumed by the language mode during setup.
///
/// The derived [`Default`] leaves every toggle off, matching the coercion
/// applied when a setter receives no bundle. Use [`ModeConfiguration::for_dialect`]
/// for the shipped per-dialect defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfiguration {
	/// Completion provider.
	pub completions: bool,
	/// Hover provider.
	pub hovers: bool,
	/// Document symbol provider.
	pub document_symbols: bool,
	/// Document link provider.
	pub links: bool,
	/// Document highlight provider.
	pub document_highlights: bool,
	/// Rename provider.
	pub rename: bool,
	/// Color provider.
	pub colors: bool,
	/// Folding range provider.
	pub folding_ranges: bool,
	/// Selection range provider.
	pub selection_ranges: bool,
	/// Signature help provider.
	pub signature_help: bool,
	/// Diagnostic publishing.
	pub diagnostics: bool,
	/// Whole-document formatting edits.
	pub document_formatting_edits: bool,
	/// Range formatting edits.
	pub document_range_formatting_edits: bool,
}

impl ModeConfiguration {
	/// Returns the shipped defaults for a dialect.
	///
	/// Every provider is enabled; diagnostics and the two formatting
	/// providers stay off for the template variants.
	pub fn for_dialect(dialect: Dialect) -> Self {
		let markup_only = !dialect.is_template();
		Self {
			completions: true,
			hovers: true,
			document_symbols: true,
			links: true,
			document_highlights: true,
			rename: true,
			colors: true,
			folding_ranges: true,
			selection_ranges: true,
			signature_help: true,
			diagnostics: markup_only,
			document_formatting_edits: markup_only,
			document_range_formatting_edits: markup_only,
		}
	}
}
