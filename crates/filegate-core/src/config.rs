//! Assignment upload settings

use crate::category::Category;
use crate::localization::{I18nLocalizer, Localizer};
use crate::other_extensions::{
    OTHER_EXTENSIONS_PLACEHOLDER, is_valid_other_extensions, sanitize_for_storage,
};
use crate::registry::{MimeRegistry, TypeEntry};
use rust_i18n::t;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod builder;

pub use builder::PluginSettingsBuilder;

/// Upper bound for the number of files in one submission.
pub const MAX_FILES: u32 = 20;

/// Settings file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = ".filegate.toml";

/// Errors that make a settings value unusable.
///
/// These block saving. For soft issues, see [`ConfigWarning`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Other file types are enforced but the text is not a `*.ext` list.
    #[error(
        "invalid other file types text '{text}' (expected a list like {placeholder})",
        placeholder = OTHER_EXTENSIONS_PLACEHOLDER
    )]
    InvalidOtherExtensions { text: String },

    /// More files per submission than the plugin supports.
    #[error("maxfilesubmissions {requested} exceeds the limit of {limit}")]
    TooManyFilesAllowed { requested: u32, limit: u32 },

    /// Validation produced warnings that were promoted to errors.
    #[error("settings validation failed with {} warning(s)", .0.len())]
    ValidationFailed(Vec<ConfigWarning>),
}

/// A soft problem found by [`PluginSettings::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    /// Settings field the warning refers to (e.g. `"acceptance.otherdocstext"`)
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

/// How many files a student may submit and how large they may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SubmissionLimits {
    /// Maximum number of files per submission (0 disables file submissions)
    #[serde(rename = "maxfilesubmissions", default = "default_max_files")]
    #[schemars(description = "Maximum number of files per submission, 1-20 (0 disables file submissions)")]
    pub max_files: u32,

    /// Maximum size of a single file in bytes (0 leaves the host limit in place)
    #[serde(rename = "maxsubmissionsizebytes", default)]
    #[schemars(description = "Maximum size of a single file in bytes (0 leaves the host limit in place)")]
    pub max_submission_bytes: u64,
}

fn default_max_files() -> u32 {
    MAX_FILES
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            max_files: MAX_FILES,
            max_submission_bytes: 0,
        }
    }
}

impl SubmissionLimits {
    /// Whether students may submit files at all.
    pub fn submissions_enabled(&self) -> bool {
        self.max_files > 0
    }

    /// Per-file size cap, if one is set.
    pub fn size_limit(&self) -> Option<u64> {
        (self.max_submission_bytes > 0).then_some(self.max_submission_bytes)
    }
}

/// Which file types a submission may contain.
///
/// Immutable once constructed: derive a changed copy with the consuming
/// `with_*` methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AcceptanceConfig {
    /// Restrict submissions to the enabled categories
    #[serde(rename = "restrictfiletypes", default)]
    #[schemars(description = "Restrict submissions to the enabled categories; when false every type is accepted")]
    restrict_enabled: bool,

    /// Enabled categories
    #[serde(default)]
    #[schemars(description = "Enabled categories: word, pdf, image, video, audio, other")]
    categories: BTreeSet<Category>,

    /// Free-text extension list used by the `other` category
    #[serde(rename = "otherdocstext", default)]
    #[schemars(description = "Extensions accepted by the 'other' category, e.g. \"*.xlsx, *.pptx\"")]
    other_extensions: String,
}

impl AcceptanceConfig {
    /// Accept every file type.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Accept only the given categories.
    pub fn restricted(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            restrict_enabled: true,
            categories: categories.into_iter().collect(),
            other_extensions: String::new(),
        }
    }

    /// Copy with the other-extensions text replaced.
    #[must_use]
    pub fn with_other_extensions(mut self, raw: impl Into<String>) -> Self {
        self.other_extensions = raw.into();
        self
    }

    /// Copy with one more category enabled.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category);
        self
    }

    /// Copy with the restriction switch set.
    #[must_use]
    pub fn with_restriction(mut self, enabled: bool) -> Self {
        self.restrict_enabled = enabled;
        self
    }

    pub fn restrict_enabled(&self) -> bool {
        self.restrict_enabled
    }

    pub fn is_enabled(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Enabled categories in evaluation order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().copied()
    }

    pub fn other_extensions(&self) -> &str {
        &self.other_extensions
    }

    /// Whether the other-extensions text is enforced (restriction on and
    /// the `other` category enabled).
    pub fn other_enforced(&self) -> bool {
        self.restrict_enabled && self.is_enabled(Category::Other)
    }
}

/// Root of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Upload settings for one assignment")]
pub struct PluginSettings {
    /// Submission count and size limits
    #[serde(default)]
    limits: SubmissionLimits,

    /// File type acceptance rules
    #[serde(default)]
    acceptance: AcceptanceConfig,

    /// Locale for category labels (e.g., "en", "es", "zh-CN")
    #[serde(default)]
    #[schemars(description = "Locale for category labels (e.g., \"en\", \"es\", \"zh-CN\")")]
    locale: Option<String>,

    /// Extra file types merged into the built-in registry
    #[serde(default)]
    #[schemars(description = "Extra file types merged into the built-in registry")]
    types: Vec<TypeEntry>,
}

impl PluginSettings {
    /// Load settings from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings or use defaults, returning any load warning
    ///
    /// When a path is given but cannot be loaded, the defaults are returned
    /// together with a message describing the failure. No settings locale is
    /// available in that case, so the message uses the process locale.
    pub fn load_or_default(path: Option<&PathBuf>) -> (Self, Option<String>) {
        match path {
            Some(p) => match Self::load(p) {
                Ok(settings) => (settings, None),
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load settings");
                    let warning = t!(
                        "config.load_warning",
                        path = p.display().to_string(),
                        error = e.to_string()
                    );
                    (Self::default(), Some(warning.to_string()))
                }
            },
            None => (Self::default(), None),
        }
    }

    /// Serialize to the TOML settings file format.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn limits(&self) -> &SubmissionLimits {
        &self.limits
    }

    pub fn acceptance(&self) -> &AcceptanceConfig {
        &self.acceptance
    }

    /// Copy with the label locale replaced.
    #[must_use]
    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn types(&self) -> &[TypeEntry] {
        &self.types
    }

    /// Type registry: the built-in table with this file's `types` applied.
    pub fn registry(&self) -> MimeRegistry {
        MimeRegistry::builder()
            .with_builtin()
            .entries(self.types.iter().cloned())
            .build()
    }

    /// Localizer for the configured locale, English when unset.
    pub fn localizer(&self) -> I18nLocalizer {
        self.locale
            .as_deref()
            .map(I18nLocalizer::new)
            .unwrap_or_default()
    }

    /// Check the settings for soft problems.
    ///
    /// Messages use the settings' own locale, English when unset.
    ///
    /// Nothing here stops the settings from being evaluated; the builder's
    /// `build()` rejects the hard errors separately.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let localizer = self.localizer();
        let locale = localizer.locale();
        let mut warnings = Vec::new();

        if self.limits.max_files > MAX_FILES {
            warnings.push(ConfigWarning {
                field: "limits.maxfilesubmissions".to_string(),
                message: t!(
                    "config.max_files_above_limit",
                    locale = locale,
                    value = self.limits.max_files,
                    limit = MAX_FILES
                )
                .to_string(),
                suggestion: Some(
                    t!(
                        "config.max_files_above_limit_suggestion",
                        locale = locale,
                        limit = MAX_FILES
                    )
                    .to_string(),
                ),
            });
        }

        if self.acceptance.other_enforced() {
            let text = self.acceptance.other_extensions();
            if text.trim().is_empty() {
                warnings.push(ConfigWarning {
                    field: "acceptance.otherdocstext".to_string(),
                    message: t!("config.other_text_empty", locale = locale).to_string(),
                    suggestion: Some(
                        t!(
                            "config.other_text_empty_suggestion",
                            locale = locale,
                            placeholder = OTHER_EXTENSIONS_PLACEHOLDER
                        )
                        .to_string(),
                    ),
                });
            } else if !is_valid_other_extensions(text) {
                warnings.push(ConfigWarning {
                    field: "acceptance.otherdocstext".to_string(),
                    message: t!("config.other_text_invalid", locale = locale, text = text)
                        .to_string(),
                    suggestion: Some(
                        t!(
                            "config.other_text_invalid_suggestion",
                            locale = locale,
                            placeholder = OTHER_EXTENSIONS_PLACEHOLDER
                        )
                        .to_string(),
                    ),
                });
            }
        }

        if !self.acceptance.restrict_enabled() && self.acceptance.categories().next().is_some() {
            warnings.push(ConfigWarning {
                field: "acceptance.categories".to_string(),
                message: t!("config.categories_ignored", locale = locale).to_string(),
                suggestion: Some(
                    t!("config.categories_ignored_suggestion", locale = locale).to_string(),
                ),
            });
        }

        for entry in &self.types {
            if entry.extension.trim().is_empty() {
                warnings.push(ConfigWarning {
                    field: "types".to_string(),
                    message: t!(
                        "config.type_entry_blank",
                        locale = locale,
                        mime = entry.mime_type.as_str()
                    )
                    .to_string(),
                    suggestion: None,
                });
            }
        }

        warnings
    }
}

/// JSON schema describing the settings file.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(PluginSettings)
}
