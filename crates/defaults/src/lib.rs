//! Per-dialect language service defaults.
//!
//! Each supported [`Dialect`] owns one [`LanguageServiceDefaults`] instance
//! holding its configuration bundles and extra-library mapping. The language
//! mode reads the registry during setup and subscribes to its change
//! notifications:
//! - configuration changes ([`LanguageServiceDefaults::set_options`],
//!   [`LanguageServiceDefaults::set_mode_configuration`]) notify
//!   synchronously, once per call;
//! - extra-library mutations coalesce into one deferred notification per
//!   scheduling window, delivered through an injected [`NotifyScheduler`].
//!
//! Registries are explicitly constructed by the embedder's composition root
//! (see the `velum-mode` crate) rather than living as module globals, so
//! they can be exercised in isolation with a [`ManualScheduler`].

mod dialect;
mod events;
mod extra_libs;
mod options;
mod registry;
mod scheduler;

pub use dialect::Dialect;
pub use events::{EventEmitter, Subscription};
pub use extra_libs::{ExtraLib, ExtraLibHandle, ExtraLibSource};
pub use options::{
	DataOptions, FormatOptions, ModeConfiguration, Options, SuggestOptions, WrapAttributes,
};
pub use registry::LanguageServiceDefaults;
pub use scheduler::{ManualScheduler, NotifyScheduler, ScheduledTask, TokioScheduler};
