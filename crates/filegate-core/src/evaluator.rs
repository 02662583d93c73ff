//! Acceptance rule evaluation.
//!
//! [`Evaluator`] turns an [`AcceptanceConfig`] into the accepted extension
//! list, display labels and the upload widget's MIME filter. Every operation
//! is a pure function of the configuration plus read-only registry lookups.

use std::fmt;
#[cfg(feature = "filesystem")]
use std::collections::HashSet;
#[cfg(feature = "filesystem")]
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::category::Category;
use crate::config::{AcceptanceConfig, PluginSettings};
#[cfg(feature = "filesystem")]
use crate::diagnostics::FilegateResult;
use crate::localization::Localizer;
use crate::other_extensions::{parse_other_extensions, picker_tokens};
use crate::registry::{MimeRegistry, TypeRegistry};
#[cfg(feature = "filesystem")]
use crate::submission::{
    SubmissionReport, SubmissionSummary, check_submission, collect_submission,
};

/// Result of evaluating an acceptance configuration.
///
/// `Any` means the restriction is off. `Only` lists what is accepted in
/// evaluation order, duplicates included; an empty `Only` list accepts
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptedTypes {
    Any,
    Only(Vec<String>),
}

impl AcceptedTypes {
    pub fn is_any(&self) -> bool {
        matches!(self, AcceptedTypes::Any)
    }

    /// The listed values, or `None` for [`AcceptedTypes::Any`].
    pub fn values(&self) -> Option<&[String]> {
        match self {
            AcceptedTypes::Any => None,
            AcceptedTypes::Only(values) => Some(values),
        }
    }

    /// Check a file name against the accepted extensions.
    ///
    /// A name matches an extension when it ends with `.` followed by the
    /// extension, compared ASCII case-insensitively. Empty extensions never
    /// match.
    ///
    /// ```
    /// use filegate_core::AcceptedTypes;
    ///
    /// let accepted = AcceptedTypes::Only(vec!["pdf".to_string()]);
    /// assert!(accepted.accepts("Report.PDF"));
    /// assert!(!accepted.accepts("pdf"));
    /// assert!(AcceptedTypes::Any.accepts("anything.exe"));
    /// ```
    pub fn accepts(&self, file_name: &str) -> bool {
        match self {
            AcceptedTypes::Any => true,
            AcceptedTypes::Only(extensions) => extensions
                .iter()
                .any(|ext| has_extension(file_name, ext)),
        }
    }
}

fn has_extension(file_name: &str, ext: &str) -> bool {
    let name = file_name.as_bytes();
    let ext = ext.as_bytes();
    if ext.is_empty() || name.len() <= ext.len() {
        return false;
    }
    let dot = name.len() - ext.len() - 1;
    name[dot] == b'.' && name[dot + 1..].eq_ignore_ascii_case(ext)
}

impl fmt::Display for AcceptedTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceptedTypes::Any => f.write_str("*"),
            AcceptedTypes::Only(values) => f.write_str(&values.join(", ")),
        }
    }
}

/// Evaluates acceptance configurations against a type registry.
///
/// Cheap to clone and safe to share between threads; it holds no mutable
/// state.
#[derive(Clone)]
pub struct Evaluator {
    registry: Arc<dyn TypeRegistry>,
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("registry", &self.registry.name())
            .finish()
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl Evaluator {
    pub fn new(registry: Arc<dyn TypeRegistry>) -> Self {
        Self { registry }
    }

    /// Evaluator over [`MimeRegistry::builtin`].
    pub fn with_builtin() -> Self {
        Self::new(Arc::new(MimeRegistry::builtin()))
    }

    /// Evaluator over the registry described by `settings`, including its
    /// custom type entries.
    pub fn for_settings(settings: &PluginSettings) -> Self {
        Self::new(Arc::new(settings.registry()))
    }

    pub fn registry(&self) -> &dyn TypeRegistry {
        self.registry.as_ref()
    }

    /// Extensions the registry lists under the category's group key.
    ///
    /// Unknown keys resolve to an empty list. [`Category::Other`] passes its
    /// flag name `other` through; evaluation never uses that lookup, since
    /// its extensions come from the free text.
    pub fn resolve_category_extensions(&self, category: Category) -> Vec<String> {
        let key = category.group_key();
        let extensions = self.registry.extensions_for(key);
        if extensions.is_empty() {
            tracing::debug!(
                registry = self.registry.name(),
                key,
                %category,
                "no extensions registered for group"
            );
        }
        extensions
    }

    /// Accepted extensions for `config`.
    ///
    /// ```
    /// use filegate_core::{AcceptanceConfig, AcceptedTypes, Category, Evaluator};
    ///
    /// let evaluator = Evaluator::with_builtin();
    ///
    /// let open = AcceptanceConfig::unrestricted();
    /// assert_eq!(evaluator.compute_accepted_types(&open), AcceptedTypes::Any);
    ///
    /// let pdf_only = AcceptanceConfig::restricted([Category::Pdf]);
    /// assert_eq!(
    ///     evaluator.compute_accepted_types(&pdf_only),
    ///     AcceptedTypes::Only(vec!["pdf".to_string()])
    /// );
    /// ```
    pub fn compute_accepted_types(&self, config: &AcceptanceConfig) -> AcceptedTypes {
        if !config.restrict_enabled() {
            return AcceptedTypes::Any;
        }

        let mut accepted = Vec::new();
        for category in config.categories().filter(|c| !c.is_free_text()) {
            accepted.extend(self.resolve_category_extensions(category));
        }
        if config.is_enabled(Category::Other) {
            accepted.extend(parse_other_extensions(config.other_extensions()));
        }

        tracing::debug!(count = accepted.len(), "computed accepted types");
        AcceptedTypes::Only(accepted)
    }

    /// Display labels for the enabled categories, in evaluation order.
    ///
    /// Registry categories render as `"<name> (<ext>/<ext>/...)"`; the
    /// parentheses stay, empty, when the registry knows no extensions for
    /// them. The other category always renders as its fixed label.
    pub fn describe_accepted_types(
        &self,
        config: &AcceptanceConfig,
        localizer: &dyn Localizer,
    ) -> Vec<String> {
        config
            .categories()
            .map(|category| self.category_label(category, localizer))
            .collect()
    }

    /// Checkbox labels for every category, enabled or not.
    pub fn describe_all_categories(&self, localizer: &dyn Localizer) -> Vec<(Category, String)> {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.category_label(category, localizer)))
            .collect()
    }

    /// MIME types for the upload widget's accepted-type filter.
    ///
    /// Registry categories contribute the MIME types of their group. The
    /// other text contributes the MIME type of each `.ext` token the
    /// registry knows; unknown tokens contribute nothing.
    pub fn accepted_mime_types(&self, config: &AcceptanceConfig) -> AcceptedTypes {
        if !config.restrict_enabled() {
            return AcceptedTypes::Any;
        }

        let mut mime_types = Vec::new();
        for category in config.categories().filter(|c| !c.is_free_text()) {
            mime_types.extend(self.registry.mime_types_for(category.group_key()));
        }
        if config.is_enabled(Category::Other) {
            for token in picker_tokens(config.other_extensions()) {
                let found = self.registry.mime_types_for(&token);
                if found.is_empty() {
                    tracing::debug!(token = %token, "no MIME type registered for extension");
                }
                mime_types.extend(found);
            }
        }

        AcceptedTypes::Only(mime_types)
    }

    /// File types listed to students next to the upload widget.
    ///
    /// Empty when the restriction is off. Otherwise the label of each enabled
    /// registry category followed by the extensions from the other text.
    pub fn permitted_file_types(
        &self,
        config: &AcceptanceConfig,
        localizer: &dyn Localizer,
    ) -> Vec<String> {
        if !config.restrict_enabled() {
            return Vec::new();
        }

        let mut permitted: Vec<String> = config
            .categories()
            .filter(|c| !c.is_free_text())
            .map(|category| self.category_label(category, localizer))
            .collect();
        if config.is_enabled(Category::Other) {
            permitted.extend(parse_other_extensions(config.other_extensions()));
        }
        permitted
    }

    /// Collect the files under `paths` and check them against `settings`.
    ///
    /// Each path may be a single file or a directory, which is walked
    /// recursively. All files are checked together as one submission.
    #[cfg(feature = "filesystem")]
    pub fn check_paths(
        &self,
        settings: &PluginSettings,
        paths: &[PathBuf],
    ) -> FilegateResult<SubmissionReport> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for path in paths {
            for file in collect_submission(path)? {
                if seen.insert(identity_key(&file.path)) {
                    files.push(file);
                }
            }
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));

        let accepted = self.compute_accepted_types(settings.acceptance());
        let diagnostics = check_submission(&files, settings, &accepted);

        tracing::debug!(
            files = files.len(),
            diagnostics = diagnostics.len(),
            "checked submission"
        );
        Ok(SubmissionReport {
            files_checked: files.len(),
            summary: SubmissionSummary::from_files(&files),
            diagnostics,
        })
    }

    fn category_label(&self, category: Category, localizer: &dyn Localizer) -> String {
        if category.is_free_text() {
            return localizer.other_label();
        }
        let name = localizer.category_name(category);
        let extensions = self.resolve_category_extensions(category);
        format!("{name} ({})", extensions.join("/"))
    }
}

/// Key under which two spellings of the same submitted file compare equal.
///
/// The parent directory is canonicalized and the file name kept, so
/// relative and absolute spellings collapse while a symlink stays distinct
/// from its target. Paths that cannot be canonicalized key on themselves.
#[cfg(feature = "filesystem")]
fn identity_key(path: &Path) -> PathBuf {
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return path.to_path_buf();
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    match std::fs::canonicalize(parent) {
        Ok(dir) => dir.join(name),
        Err(_) => path.to_path_buf(),
    }
}
