//! Locale normalization shared by the library and the CLI.

/// Locales with bundled translations.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "es", "zh-CN"];

/// Locale used when nothing better is available.
pub const DEFAULT_LOCALE: &str = "en";

/// Normalize a locale string to match supported locale codes.
///
/// Examples:
/// - "en_US.UTF-8" -> "en"
/// - "es_MX" -> "es"
/// - "zh_CN.UTF-8" -> "zh-CN"
/// - "zh-Hans" -> "zh-CN"
/// - " en " -> "en"
pub fn normalize_locale(locale: &str) -> String {
    let locale = locale.trim();

    // Strip encoding suffix (e.g., ".UTF-8") and modifiers (e.g., "@euro")
    let base = locale.split(['.', '@']).next().unwrap_or(locale);

    let lower = base.to_lowercase();
    if lower.starts_with("zh")
        && (lower.contains("cn") || lower.contains("hans") || lower.contains("simplified"))
    {
        return "zh-CN".to_string();
    }

    if let Some(&code) = SUPPORTED_LOCALES
        .iter()
        .find(|code| base.eq_ignore_ascii_case(code))
    {
        return code.to_string();
    }

    // Language-only match (e.g., "es_ES" -> "es")
    let lang = base.split(['_', '-']).next().unwrap_or(base);
    for &code in SUPPORTED_LOCALES {
        let code_lang = code.split('-').next().unwrap_or(code);
        if lang.eq_ignore_ascii_case(code_lang) {
            return code.to_string();
        }
    }

    lang.to_lowercase()
}

/// Check if a locale code is supported.
pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// Normalize `locale` and fall back to [`DEFAULT_LOCALE`] when unsupported.
pub fn resolve_locale(locale: &str) -> String {
    let normalized = normalize_locale(locale);
    if is_supported(&normalized) {
        normalized
    } else {
        tracing::debug!(requested = locale, "unsupported locale, using default");
        DEFAULT_LOCALE.to_string()
    }
}
