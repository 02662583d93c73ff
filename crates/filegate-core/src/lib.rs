//! # filegate-core
//!
//! File-type acceptance rules for assignment uploads.
//!
//! Given an instructor's [`AcceptanceConfig`], the [`Evaluator`] computes:
//! - the accepted extension list ([`AcceptedTypes`]),
//! - display labels for the enabled categories,
//! - the MIME filter for an upload widget,
//!
//! and checks submitted files against those rules and the
//! [`SubmissionLimits`] of the [`PluginSettings`].

rust_i18n::i18n!("locales", fallback = "en");

pub mod category;
pub mod config;
pub mod diagnostics;
pub mod evaluator;
pub mod i18n;
pub mod localization;
pub mod other_extensions;
pub mod registry;
pub mod submission;

pub use category::Category;
pub use config::{
    AcceptanceConfig, ConfigError, ConfigWarning, MAX_FILES, PluginSettings,
    PluginSettingsBuilder, SubmissionLimits, generate_schema,
};
pub use diagnostics::{Diagnostic, DiagnosticLevel, FilegateError, FilegateResult};
pub use evaluator::{AcceptedTypes, Evaluator};
pub use localization::{I18nLocalizer, Localizer};
pub use other_extensions::{is_valid_other_extensions, parse_other_extensions};
pub use registry::{MimeRegistry, MimeRegistryBuilder, TypeEntry, TypeRegistry};
#[cfg(feature = "filesystem")]
pub use submission::collect_submission;
pub use submission::{
    MAX_SUMMARY_FILES, SubmissionReport, SubmissionSummary, SubmittedFile, check_submission,
};

/// Accepted types for `config` using the built-in type registry.
///
/// Shorthand for `Evaluator::with_builtin().compute_accepted_types(config)`.
pub fn compute_accepted_types(config: &AcceptanceConfig) -> AcceptedTypes {
    Evaluator::with_builtin().compute_accepted_types(config)
}
