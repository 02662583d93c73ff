use super::*;

/// Builder for saving [`PluginSettings`] the way the settings form does.
///
/// Uses the `&mut Self` return pattern for chaining setter calls, with a
/// terminal `build()` that sanitizes and checks the values and returns
/// `Result<PluginSettings, ConfigError>`.
///
/// **Note:** `build()` and `build_unchecked()` drain the builder's state.
/// A second call produces default settings.
///
/// # Examples
///
/// ```rust
/// use filegate_core::{Category, PluginSettings};
///
/// let settings = PluginSettings::builder()
///     .max_files(3)
///     .restrict_file_types(true)
///     .category(Category::Pdf)
///     .category(Category::Other)
///     .other_extensions("*.xlsx, *.pptx")
///     .build()
///     .expect("valid settings");
///
/// assert_eq!(settings.limits().max_files, 3);
/// assert!(settings.acceptance().is_enabled(Category::Other));
/// ```
pub struct PluginSettingsBuilder {
    max_files: Option<u32>,
    max_submission_bytes: Option<u64>,
    restrict_enabled: Option<bool>,
    categories: BTreeSet<Category>,
    other_extensions: Option<String>,
    locale: Option<Option<String>>,
    types: Vec<TypeEntry>,
}

impl PluginSettingsBuilder {
    /// Create a new builder with all fields unset (defaults are applied at
    /// build time).
    ///
    /// Prefer [`PluginSettings::builder()`] over calling this directly.
    fn new() -> Self {
        Self {
            max_files: None,
            max_submission_bytes: None,
            restrict_enabled: None,
            categories: BTreeSet::new(),
            other_extensions: None,
            locale: None,
            types: Vec::new(),
        }
    }

    /// Set the maximum number of files per submission (0 disables submissions).
    pub fn max_files(&mut self, max: u32) -> &mut Self {
        self.max_files = Some(max);
        self
    }

    /// Set the per-file size cap in bytes (0 for none).
    pub fn max_submission_bytes(&mut self, bytes: u64) -> &mut Self {
        self.max_submission_bytes = Some(bytes);
        self
    }

    /// Turn the file type restriction on or off.
    pub fn restrict_file_types(&mut self, enabled: bool) -> &mut Self {
        self.restrict_enabled = Some(enabled);
        self
    }

    /// Enable a category.
    pub fn category(&mut self, category: Category) -> &mut Self {
        self.categories.insert(category);
        self
    }

    /// Enable several categories.
    pub fn categories(&mut self, categories: impl IntoIterator<Item = Category>) -> &mut Self {
        self.categories.extend(categories);
        self
    }

    /// Set the other-extensions text as typed by the instructor.
    pub fn other_extensions(&mut self, raw: impl Into<String>) -> &mut Self {
        self.other_extensions = Some(raw.into());
        self
    }

    /// Set the locale.
    pub fn locale(&mut self, locale: Option<String>) -> &mut Self {
        self.locale = Some(locale);
        self
    }

    /// Add a custom type registry entry.
    pub fn type_entry(&mut self, entry: TypeEntry) -> &mut Self {
        self.types.push(entry);
        self
    }

    /// Build the settings, replacing `"` with `'` in the other-extensions
    /// text and rejecting values the settings form would refuse.
    ///
    /// Returns `Err(ConfigError)` if:
    /// - `max_files` is above [`MAX_FILES`]
    /// - restriction and the `other` category are both enabled and the
    ///   other-extensions text is not a `*.ext` list
    pub fn build(&mut self) -> Result<PluginSettings, ConfigError> {
        let settings = self.build_unchecked();

        if settings.limits.max_files > MAX_FILES {
            return Err(ConfigError::TooManyFilesAllowed {
                requested: settings.limits.max_files,
                limit: MAX_FILES,
            });
        }

        let acceptance = &settings.acceptance;
        if acceptance.other_enforced() && !is_valid_other_extensions(acceptance.other_extensions())
        {
            return Err(ConfigError::InvalidOtherExtensions {
                text: acceptance.other_extensions().to_string(),
            });
        }

        Ok(settings)
    }

    /// Build the settings and also reject any soft
    /// [`PluginSettings::validate`] warning.
    pub fn build_strict(&mut self) -> Result<PluginSettings, ConfigError> {
        let settings = self.build()?;
        let warnings = settings.validate();
        if !warnings.is_empty() {
            return Err(ConfigError::ValidationFailed(warnings));
        }
        Ok(settings)
    }

    /// Build the settings without rejecting anything.
    ///
    /// The other-extensions text is still sanitized. Intended for tests that
    /// need intentionally invalid settings.
    pub fn build_unchecked(&mut self) -> PluginSettings {
        let defaults = PluginSettings::default();

        let other_extensions = self
            .other_extensions
            .take()
            .map(|raw| sanitize_for_storage(&raw))
            .unwrap_or_default();

        PluginSettings {
            limits: SubmissionLimits {
                max_files: self.max_files.take().unwrap_or(defaults.limits.max_files),
                max_submission_bytes: self
                    .max_submission_bytes
                    .take()
                    .unwrap_or(defaults.limits.max_submission_bytes),
            },
            acceptance: AcceptanceConfig {
                restrict_enabled: self
                    .restrict_enabled
                    .take()
                    .unwrap_or(defaults.acceptance.restrict_enabled),
                categories: std::mem::take(&mut self.categories),
                other_extensions,
            },
            locale: self.locale.take().unwrap_or(defaults.locale),
            types: std::mem::take(&mut self.types),
        }
    }
}

impl Default for PluginSettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginSettings {
    /// Create a new [`PluginSettingsBuilder`] for constructing settings.
    pub fn builder() -> PluginSettingsBuilder {
        PluginSettingsBuilder::new()
    }
}
