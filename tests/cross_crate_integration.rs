//! Cross-crate integration tests verifying contracts between workspace crates.
//!
//! These tests simulate how the CLI drives filegate-core: it loads a settings
//! file, builds an evaluator over the settings registry and renders the
//! results. Only the public API is used.

use std::path::PathBuf;

use filegate_core::{
    AcceptedTypes, Category, Evaluator, FilegateError, PluginSettings, SubmissionSummary,
};

// ============================================================================
// Settings loading
// ============================================================================

#[test]
fn cli_default_settings_accept_everything() {
    let (settings, warning) = PluginSettings::load_or_default(None);
    assert!(warning.is_none());

    let evaluator = Evaluator::for_settings(&settings);
    assert_eq!(
        evaluator.compute_accepted_types(settings.acceptance()),
        AcceptedTypes::Any
    );
    assert_eq!(
        evaluator.accepted_mime_types(settings.acceptance()),
        AcceptedTypes::Any
    );
    assert!(settings.validate().is_empty());
}

#[test]
fn cli_settings_file_drives_evaluation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".filegate.toml");
    std::fs::write(
        &path,
        r#"
[acceptance]
restrictfiletypes = true
categories = ["pdf", "other"]
otherdocstext = "*.xlsx"
"#,
    )
    .unwrap();

    let (settings, warning) = PluginSettings::load_or_default(Some(&path));
    assert!(warning.is_none());

    let evaluator = Evaluator::for_settings(&settings);
    let accepted = evaluator.compute_accepted_types(settings.acceptance());
    assert_eq!(
        accepted,
        AcceptedTypes::Only(vec!["pdf".to_string(), "xlsx".to_string()])
    );
    assert!(accepted.accepts("budget.XLSX"));
    assert!(!accepted.accepts("notes.txt"));

    // Free function and evaluator agree for the built-in registry.
    assert_eq!(
        filegate_core::compute_accepted_types(settings.acceptance()),
        accepted
    );
}

#[test]
fn cli_broken_settings_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[acceptance\nrestrictfiletypes = ").unwrap();

    let (settings, warning) = PluginSettings::load_or_default(Some(&path));
    assert_eq!(settings, PluginSettings::default());
    assert!(warning.unwrap().contains("broken.toml"));
}

// ============================================================================
// Labels and localization
// ============================================================================

#[test]
fn cli_locale_override_reaches_labels() {
    let settings = PluginSettings::builder()
        .restrict_file_types(true)
        .category(Category::Pdf)
        .build()
        .unwrap()
        .with_locale(Some("es".to_string()));

    let evaluator = Evaluator::for_settings(&settings);
    let labels = evaluator.describe_accepted_types(settings.acceptance(), &settings.localizer());
    assert_eq!(labels, vec!["Documentos PDF (pdf)".to_string()]);
}

#[test]
fn cli_describe_all_covers_every_category() {
    let settings = PluginSettings::default();
    let evaluator = Evaluator::for_settings(&settings);

    let rows = evaluator.describe_all_categories(&settings.localizer());
    let categories: Vec<Category> = rows.iter().map(|(category, _)| *category).collect();
    assert_eq!(categories, Category::ALL.to_vec());
    assert!(rows.iter().all(|(_, label)| !label.is_empty()));
}

// ============================================================================
// Submission checks
// ============================================================================

#[test]
fn cli_check_paths_report_shape() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("essay.pdf"), b"pdf").unwrap();
    std::fs::write(dir.path().join("tool.exe"), b"exe").unwrap();

    let settings = PluginSettings::builder()
        .restrict_file_types(true)
        .category(Category::Pdf)
        .build()
        .unwrap();
    let evaluator = Evaluator::for_settings(&settings);

    let report = evaluator
        .check_paths(&settings, &[dir.path().to_path_buf()])
        .unwrap();
    assert_eq!(report.files_checked, 2);
    assert_eq!(report.error_count(), 1);
    assert!(report.diagnostics[0].file.ends_with("tool.exe"));
    assert_eq!(
        report.summary,
        SubmissionSummary::Files(vec!["essay.pdf".to_string(), "tool.exe".to_string()])
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["diagnostics"][0]["rule"], "FG-001");
}

#[test]
fn cli_missing_path_is_not_found() {
    let settings = PluginSettings::default();
    let evaluator = Evaluator::for_settings(&settings);
    let missing = PathBuf::from("/nonexistent/submission");

    let err = evaluator.check_paths(&settings, &[missing]).unwrap_err();
    assert!(matches!(err, FilegateError::NotFound { .. }));
}
