//! Lazy activation of the markup language services.
//!
//! The host editor signals first use of a dialect through [`EditorHost`];
//! [`LanguageContribution`] responds by loading the heavy analysis module
//! via a [`ModeLoader`] and handing it that dialect's
//! [`LanguageServiceDefaults`] registry. Each dialect's mode loads at most
//! once per process.
//!
//! [`LanguageServiceDefaults`]: velum_defaults::LanguageServiceDefaults

mod activation;
mod host;
mod loader;

pub use activation::LanguageContribution;
pub use host::EditorHost;
pub use loader::{ActivationError, LanguageMode, ModeLoader};

/// Re-export of the defaults registry crate.
pub use velum_defaults as defaults;
