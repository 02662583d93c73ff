//! Locale detection and initialization for the filegate CLI.
//!
//! Locale resolution order:
//! 1. `--locale` CLI flag (highest priority)
//! 2. `locale` field of the settings file
//! 3. `FILEGATE_LOCALE` environment variable
//! 4. `LC_ALL` / `LANG` environment variable
//! 5. System locale detection via `sys-locale`
//! 6. Fallback to "en" (English)

use filegate_core::i18n::{DEFAULT_LOCALE, is_supported, normalize_locale};
use rust_i18n::{set_locale, t};

/// Supported locales with their display names.
pub const LOCALE_NAMES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish / Espanol"),
    ("zh-CN", "Chinese Simplified / Zhongwen"),
];

/// Detect the best locale from the environment.
pub fn detect_locale() -> String {
    let candidates = [
        std::env::var("FILEGATE_LOCALE").ok(),
        std::env::var("LC_ALL")
            .or_else(|_| std::env::var("LANG"))
            .ok(),
        sys_locale::get_locale(),
    ];

    candidates
        .into_iter()
        .flatten()
        .map(|locale| normalize_locale(&locale))
        .find(|locale| is_supported(locale))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Initialize the process locale and return it.
///
/// An explicit but unsupported locale falls back to English with a warning
/// on stderr.
pub fn init(cli_locale: Option<&str>, config_locale: Option<&str>) -> String {
    let locale = match cli_locale.or(config_locale) {
        Some(requested) => {
            let normalized = normalize_locale(requested);
            if is_supported(&normalized) {
                normalized
            } else {
                eprintln!("{}", t!("cli.unsupported_locale", locale = requested));
                DEFAULT_LOCALE.to_string()
            }
        }
        None => detect_locale(),
    };

    set_locale(&locale);
    tracing::debug!(locale = %locale, "locale initialized");
    locale
}

/// Print the list of supported locales.
pub fn print_supported_locales() {
    println!("{}", t!("cli.supported_locales"));
    for &(code, name) in LOCALE_NAMES {
        println!("  {:<8} {}", code, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_names_match_core() {
        let codes: Vec<_> = LOCALE_NAMES.iter().map(|&(code, _)| code).collect();
        assert_eq!(codes, filegate_core::i18n::SUPPORTED_LOCALES);
    }

    #[test]
    fn test_explicit_locale_wins() {
        assert_eq!(init(Some("es_MX.UTF-8"), Some("zh-CN")), "es");
        assert_eq!(init(None, Some("zh_CN")), "zh-CN");
    }

    #[test]
    fn test_unsupported_locale_falls_back() {
        assert_eq!(init(Some("fr_FR"), None), "en");
    }

    #[test]
    fn test_detected_locale_is_supported() {
        assert!(is_supported(&detect_locale()));
    }
}
