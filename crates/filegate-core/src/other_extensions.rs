//! Instructor-entered "other" extension lists.
//!
//! The settings form accepts free text such as `*.xlsx, *.pptx`. Three
//! distinct readings of that text exist and are kept separate:
//!
//! - [`is_valid_other_extensions`] -- the form-level format check;
//! - [`parse_other_extensions`] -- the tokens added to the accepted list;
//! - [`picker_tokens`] -- the `.ext` keys used to build the upload widget's
//!   MIME filter.
//!
//! The first two are not guaranteed to agree: text rejected by the format
//! check may still parse into tokens.

use regex::Regex;
use std::sync::OnceLock;

static OTHER_EXTENSIONS_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Format the settings form requires for the other-extensions text.
pub const OTHER_EXTENSIONS_REGEX: &str = r"(?i)^\*\.[a-z0-9]+(,\s*\*\.[a-z0-9]+)*$";

/// Placeholder shown in the empty settings field.
pub const OTHER_EXTENSIONS_PLACEHOLDER: &str = "*.xlsx, *.pptx";

fn other_extensions_pattern() -> &'static Regex {
    OTHER_EXTENSIONS_PATTERN.get_or_init(|| {
        Regex::new(OTHER_EXTENSIONS_REGEX).expect("other-extensions pattern is a valid regex")
    })
}

/// Check that `raw` is a comma-separated list of `*.ext` patterns.
///
/// Whitespace is allowed only after commas. Nothing checks that the
/// extensions are known file types.
pub fn is_valid_other_extensions(raw: &str) -> bool {
    other_extensions_pattern().is_match(raw)
}

/// Extension tokens contributed by the other-extensions text.
///
/// All whitespace is removed, the text is split on `*`, commas are removed
/// from every segment and the segment before the first `*` is dropped. The
/// leading dot of each token is removed so tokens compare equal to registry
/// extensions. Blank tokens are never produced, so empty text yields an empty
/// list. Case is preserved.
pub fn parse_other_extensions(raw: &str) -> Vec<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .split('*')
        .skip(1)
        .map(|segment| segment.replace(',', ""))
        .map(|token| token.strip_prefix('.').unwrap_or(&token).to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Registry keys used for the upload widget's MIME filter.
///
/// Spaces and `*` are removed and the text is split on commas, which leaves
/// `.ext` keys for well-formed input. Empty pieces are dropped.
pub fn picker_tokens(raw: &str) -> Vec<String> {
    raw.replace([' ', '*'], "")
        .split(',')
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prepare other-extensions text for storage.
///
/// Double quotes would break the rendered form attribute, so they are stored
/// as single quotes.
pub fn sanitize_for_storage(raw: &str) -> String {
    raw.replace('"', "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_accepts_well_formed_lists() {
        for input in [
            "*.png",
            "*.png,*.jpg",
            "*.xlsx, *.pptx",
            "*.XLSX,   *.Pptx",
            "*.mp3,*.7z",
        ] {
            assert!(is_valid_other_extensions(input), "{input:?} should be valid");
        }
    }

    #[test]
    fn validation_rejects_malformed_lists() {
        for input in [
            "",
            "png,jpg",
            "*.png;*.jpg",
            "*.",
            "*.png,",
            " *.png",
            "*.png ,*.jpg",
            "*.tar.gz",
            "*.pn g",
            "*png",
        ] {
            assert!(!is_valid_other_extensions(input), "{input:?} should be invalid");
        }
    }

    #[test]
    fn parse_empty_is_empty() {
        assert!(parse_other_extensions("").is_empty());
        assert!(parse_other_extensions("   ").is_empty());
    }

    #[test]
    fn parse_strips_whitespace_commas_and_dots() {
        assert_eq!(parse_other_extensions("*.docx, *.pptx"), vec!["docx", "pptx"]);
        assert_eq!(parse_other_extensions("*.png,,*.jpg"), vec!["png", "jpg"]);
    }

    #[test]
    fn parse_keeps_case_and_drops_prefix_text() {
        assert_eq!(parse_other_extensions("junk*.XLSX"), vec!["XLSX"]);
        assert!(parse_other_extensions("png,jpg").is_empty());
    }

    #[test]
    fn parse_drops_blank_tokens() {
        assert!(parse_other_extensions("*").is_empty());
        assert!(parse_other_extensions("*.,*").is_empty());
    }

    #[test]
    fn parse_and_validation_can_disagree() {
        let input = "*.png;*.jpg";
        assert!(!is_valid_other_extensions(input));
        assert_eq!(parse_other_extensions(input), vec!["png;", "jpg"]);
    }

    #[test]
    fn picker_tokens_keep_leading_dot() {
        assert_eq!(picker_tokens("*.xlsx, *.pptx"), vec![".xlsx", ".pptx"]);
        assert!(picker_tokens("").is_empty());
        assert!(picker_tokens(" , ").is_empty());
    }

    #[test]
    fn sanitize_replaces_double_quotes() {
        assert_eq!(sanitize_for_storage("*.\"csv\""), "*.'csv'");
        assert_eq!(sanitize_for_storage("*.csv"), "*.csv");
    }
}
