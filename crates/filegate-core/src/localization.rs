//! Display strings for categories and submission summaries.

use rust_i18n::t;

use crate::category::Category;
use crate::i18n::{DEFAULT_LOCALE, resolve_locale};

/// Resolves user-facing strings.
///
/// Labels are display input only; nothing in the evaluator depends on their
/// content. Tests can substitute a fixed implementation.
pub trait Localizer: Send + Sync {
    /// Display name of a category, e.g. "PDF documents".
    fn category_name(&self, category: Category) -> String;

    /// Fixed label used for the free-text category.
    fn other_label(&self) -> String {
        self.category_name(Category::Other)
    }

    /// Short text for a number of submitted files.
    fn file_count(&self, count: usize) -> String;

    /// Hint pointing at the full file list of a large submission.
    fn view_all(&self, count: usize) -> String {
        self.file_count(count)
    }

    /// Locale code the strings are produced in.
    fn locale(&self) -> &str {
        DEFAULT_LOCALE
    }
}

/// [`Localizer`] backed by the bundled `rust-i18n` translations.
///
/// The locale is fixed per value, so concurrent callers using different
/// locales never observe each other's choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nLocalizer {
    locale: String,
}

impl I18nLocalizer {
    /// Create a localizer for `locale`, falling back to English when the
    /// locale has no bundled translation.
    pub fn new(locale: &str) -> Self {
        Self {
            locale: resolve_locale(locale),
        }
    }
}

impl Default for I18nLocalizer {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Localizer for I18nLocalizer {
    fn category_name(&self, category: Category) -> String {
        let locale = self.locale.as_str();
        match category {
            Category::Word => t!("category.word", locale = locale),
            Category::Pdf => t!("category.pdf", locale = locale),
            Category::Image => t!("category.image", locale = locale),
            Category::Video => t!("category.video", locale = locale),
            Category::Audio => t!("category.audio", locale = locale),
            Category::Other => t!("category.other", locale = locale),
        }
        .to_string()
    }

    fn file_count(&self, count: usize) -> String {
        t!("summary.count_files", locale = self.locale.as_str(), count = count).to_string()
    }

    fn view_all(&self, count: usize) -> String {
        t!("summary.view_all", locale = self.locale.as_str(), count = count).to_string()
    }

    fn locale(&self) -> &str {
        &self.locale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_category_names() {
        let localizer = I18nLocalizer::new("en_US.UTF-8");
        assert_eq!(localizer.locale(), "en");
        assert_eq!(localizer.category_name(Category::Pdf), "PDF documents");
        assert_eq!(localizer.category_name(Category::Word), "Word documents");
        assert_eq!(localizer.other_label(), "Other file types");
    }

    #[test]
    fn spanish_category_names() {
        let localizer = I18nLocalizer::new("es_ES");
        assert_eq!(localizer.locale(), "es");
        assert_eq!(localizer.category_name(Category::Audio), "Archivos de audio");
    }

    #[test]
    fn unsupported_locale_falls_back_to_english() {
        let localizer = I18nLocalizer::new("de_DE");
        assert_eq!(localizer.locale(), "en");
        assert_eq!(localizer.category_name(Category::Image), "Image files");
    }

    #[test]
    fn file_count_interpolates() {
        let localizer = I18nLocalizer::default();
        assert_eq!(localizer.file_count(7), "7 file(s)");
    }
}
