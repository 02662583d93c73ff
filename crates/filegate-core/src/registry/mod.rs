//! File type registry: maps lookup keys to extensions and MIME types.
//!
//! This module provides:
//!
//! - [`TypeRegistry`] -- trait the evaluator resolves categories through
//! - [`TypeEntry`] -- one registry row (extension, MIME type, groups)
//! - [`MimeRegistry`] -- table-backed implementation with a built-in table
//! - [`MimeRegistryBuilder`] -- layers custom rows over the built-in table
//!
//! ## Key semantics
//!
//! [`MimeRegistry`] interprets a lookup key in one of three ways:
//!
//! - `.ext` selects the entry for that extension;
//! - a key containing `/` selects entries with that exact MIME type;
//! - anything else selects entries listing the key among their groups.
//!
//! Keys compare ASCII case-insensitively. Unknown keys yield empty lists.

mod builtin;

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use builtin::BUILTIN_TYPES;

/// Source of extension and MIME type lists for a lookup key.
///
/// The evaluator holds an `Arc<dyn TypeRegistry>`, so implementations must be
/// `Send + Sync`. Implementations must not fail on unknown keys: they return
/// an empty list instead.
///
/// # Example
///
/// ```
/// use filegate_core::registry::TypeRegistry;
///
/// struct OnlyPdf;
///
/// impl TypeRegistry for OnlyPdf {
///     fn extensions_for(&self, key: &str) -> Vec<String> {
///         if key == "application/pdf" {
///             vec!["pdf".to_string()]
///         } else {
///             Vec::new()
///         }
///     }
/// }
///
/// assert_eq!(OnlyPdf.extensions_for("application/pdf"), vec!["pdf"]);
/// assert!(OnlyPdf.mime_types_for("application/pdf").is_empty());
/// ```
pub trait TypeRegistry: Send + Sync {
    /// Extensions (bare, without a leading dot) registered under `key`, in
    /// registry order.
    fn extensions_for(&self, key: &str) -> Vec<String>;

    /// MIME types registered under `key`, in registry order.
    fn mime_types_for(&self, _key: &str) -> Vec<String> {
        Vec::new()
    }

    /// Human-readable name for this registry (used in logging).
    ///
    /// Defaults to the unqualified struct name.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// One row of a [`MimeRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeEntry {
    /// File extension without the leading dot (e.g. `"xlsx"`)
    #[schemars(description = "File extension without the leading dot (e.g. \"xlsx\")")]
    pub extension: String,

    /// MIME type reported for the extension
    #[schemars(description = "MIME type reported for the extension")]
    pub mime_type: String,

    /// Groups the extension belongs to (e.g. `["document"]`)
    #[serde(default)]
    #[schemars(description = "Groups the extension belongs to (e.g. [\"document\"])")]
    pub groups: Vec<String>,
}

impl TypeEntry {
    pub fn new(
        extension: impl Into<String>,
        mime_type: impl Into<String>,
        groups: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let extension = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
            mime_type: mime_type.into(),
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    fn matches(&self, key: &Key<'_>) -> bool {
        match key {
            Key::Extension(ext) => self.extension.eq_ignore_ascii_case(ext),
            Key::MimeType(mime) => self.mime_type.eq_ignore_ascii_case(mime),
            Key::Group(group) => self.groups.iter().any(|g| g.eq_ignore_ascii_case(group)),
        }
    }
}

enum Key<'a> {
    Extension(&'a str),
    MimeType(&'a str),
    Group(&'a str),
}

impl<'a> Key<'a> {
    fn parse(raw: &'a str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Some(ext) = raw.strip_prefix('.') {
            return (!ext.is_empty()).then_some(Key::Extension(ext));
        }
        if raw.contains('/') {
            return Some(Key::MimeType(raw));
        }
        Some(Key::Group(raw))
    }
}

/// Table-backed [`TypeRegistry`].
///
/// Most callers should use [`MimeRegistry::builtin`]. To add or override
/// rows, use [`MimeRegistry::builder`].
#[derive(Debug, Clone, Default)]
pub struct MimeRegistry {
    entries: Vec<TypeEntry>,
}

impl MimeRegistry {
    /// Create a registry with no rows. Every lookup returns an empty list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in table.
    pub fn builtin() -> Self {
        Self::builder().with_builtin().build()
    }

    /// Create a [`MimeRegistryBuilder`].
    ///
    /// # Example
    ///
    /// ```
    /// use filegate_core::registry::{MimeRegistry, TypeEntry, TypeRegistry};
    ///
    /// let registry = MimeRegistry::builder()
    ///     .with_builtin()
    ///     .entry(TypeEntry::new("ipynb", "application/x-ipynb+json", ["notebook"]))
    ///     .build();
    ///
    /// assert_eq!(registry.extensions_for("notebook"), vec!["ipynb"]);
    /// ```
    pub fn builder() -> MimeRegistryBuilder {
        MimeRegistryBuilder::new()
    }

    /// All rows in lookup order.
    pub fn entries(&self) -> &[TypeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup<'a, F>(&'a self, key: &str, project: F) -> Vec<String>
    where
        F: Fn(&'a TypeEntry) -> &'a str,
    {
        let Some(key) = Key::parse(key) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|entry| entry.matches(&key))
            .map(project)
            .filter(|value| seen.insert(value.to_ascii_lowercase()))
            .map(str::to_string)
            .collect()
    }
}

impl TypeRegistry for MimeRegistry {
    fn extensions_for(&self, key: &str) -> Vec<String> {
        self.lookup(key, |entry| entry.extension.as_str())
    }

    fn mime_types_for(&self, key: &str) -> Vec<String> {
        self.lookup(key, |entry| entry.mime_type.as_str())
    }
}

/// Builder for constructing a [`MimeRegistry`].
///
/// Rows keep insertion order. Adding a row whose extension is already present
/// replaces that row in place, so custom rows can override the built-in table
/// without changing lookup order.
#[derive(Debug, Default)]
pub struct MimeRegistryBuilder {
    entries: Vec<TypeEntry>,
}

impl MimeRegistryBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Add every row of the built-in table.
    pub fn with_builtin(mut self) -> Self {
        for &(extension, mime_type, groups) in BUILTIN_TYPES {
            self = self.entry(TypeEntry::new(extension, mime_type, groups.iter().copied()));
        }
        self
    }

    /// Add or replace a single row.
    pub fn entry(mut self, entry: TypeEntry) -> Self {
        if entry.extension.is_empty() {
            tracing::debug!(mime = %entry.mime_type, "skipping type entry without extension");
            return self;
        }
        match self
            .entries
            .iter_mut()
            .find(|e| e.extension.eq_ignore_ascii_case(&entry.extension))
        {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    /// Add or replace several rows.
    pub fn entries(mut self, entries: impl IntoIterator<Item = TypeEntry>) -> Self {
        for entry in entries {
            self = self.entry(entry);
        }
        self
    }

    pub fn build(self) -> MimeRegistry {
        MimeRegistry {
            entries: self.entries,
        }
    }
}
