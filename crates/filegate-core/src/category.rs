//! File-type categories an instructor can toggle.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A coarse file-type group offered as a checkbox in assignment settings.
///
/// Variant order is the fixed evaluation order: accepted lists and labels are
/// always produced Word, Pdf, Image, Video, Audio, Other. `Ord` follows the
/// same order so a `BTreeSet<Category>` iterates in it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Word-processor documents (registry group `document`)
    #[serde(alias = "worddocs")]
    Word,
    /// PDF files (registry MIME type `application/pdf`)
    #[serde(alias = "pdfdocs")]
    Pdf,
    /// Images (registry group `image`)
    #[serde(alias = "imagedocs")]
    Image,
    /// Video (registry group `video`)
    #[serde(alias = "videodocs")]
    Video,
    /// Audio (registry group `audio`)
    #[serde(alias = "audiodocs")]
    Audio,
    /// Instructor-supplied extensions
    #[serde(alias = "otherdocs")]
    Other,
}

impl Category {
    /// Every category in evaluation order.
    pub const ALL: [Category; 6] = [
        Category::Word,
        Category::Pdf,
        Category::Image,
        Category::Video,
        Category::Audio,
        Category::Other,
    ];

    /// Type-registry key this category resolves through.
    ///
    /// Categories without a dedicated group pass their flag name through.
    #[must_use]
    pub fn group_key(self) -> &'static str {
        match self {
            Category::Word => "document",
            Category::Pdf => "application/pdf",
            Category::Image => "image",
            Category::Video => "video",
            Category::Audio => "audio",
            Category::Other => "other",
        }
    }

    /// Name of the persisted settings flag for this category.
    #[must_use]
    pub fn settings_key(self) -> &'static str {
        match self {
            Category::Word => "worddocs",
            Category::Pdf => "pdfdocs",
            Category::Image => "imagedocs",
            Category::Video => "videodocs",
            Category::Audio => "audiodocs",
            Category::Other => "otherdocs",
        }
    }

    /// Returns `true` for the category whose extensions come from free text
    /// rather than the type registry.
    #[must_use]
    pub fn is_free_text(self) -> bool {
        matches!(self, Category::Other)
    }

    /// Look a category up by its flag name or settings key, ignoring case.
    pub fn from_name(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| {
            c.to_string().eq_ignore_ascii_case(name) || c.settings_key().eq_ignore_ascii_case(name)
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Word => "word",
            Category::Pdf => "pdf",
            Category::Image => "image",
            Category::Video => "video",
            Category::Audio => "audio",
            Category::Other => "other",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_keys_follow_mapping_table() {
        let expected = [
            (Category::Word, "document"),
            (Category::Pdf, "application/pdf"),
            (Category::Image, "image"),
            (Category::Video, "video"),
            (Category::Audio, "audio"),
            (Category::Other, "other"),
        ];

        for (category, key) in &expected {
            assert_eq!(category.group_key(), *key, "{category}");
        }
    }

    #[test]
    fn all_is_in_evaluation_order() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
        assert_eq!(Category::ALL[0], Category::Word);
        assert_eq!(Category::ALL[5], Category::Other);
    }

    #[test]
    fn from_name_accepts_flag_and_settings_key() {
        assert_eq!(Category::from_name("PDF"), Some(Category::Pdf));
        assert_eq!(Category::from_name("imagedocs"), Some(Category::Image));
        assert_eq!(Category::from_name("spreadsheet"), None);
    }

    #[test]
    fn only_other_is_free_text() {
        let free: Vec<_> = Category::ALL.into_iter().filter(|c| c.is_free_text()).collect();
        assert_eq!(free, vec![Category::Other]);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Category::Audio).expect("serialize");
        assert_eq!(json, "\"audio\"");
        let back: Category = serde_json::from_str("\"video\"").expect("deserialize");
        assert_eq!(back, Category::Video);
        let aliased: Category = serde_json::from_str("\"worddocs\"").expect("deserialize");
        assert_eq!(aliased, Category::Word);
    }
}
