//! Checking concrete submitted files against the upload settings.

use std::path::PathBuf;
#[cfg(feature = "filesystem")]
use std::path::Path;

use rust_i18n::t;
use serde::Serialize;

use crate::config::PluginSettings;
use crate::diagnostics::{
    Diagnostic, RULE_FILE_TOO_LARGE, RULE_SUBMISSIONS_DISABLED, RULE_TOO_MANY_FILES,
    RULE_TYPE_NOT_ACCEPTED,
};
#[cfg(feature = "filesystem")]
use crate::diagnostics::{FilegateError, FilegateResult};
use crate::evaluator::AcceptedTypes;
use crate::localization::Localizer;

/// Submissions with more files than this are summarized by count.
pub const MAX_SUMMARY_FILES: usize = 5;

/// One file of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedFile {
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
}

impl SubmittedFile {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// Final path component, or the whole path when there is none.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or(self.path.as_os_str())
            .to_string_lossy()
            .into_owned()
    }
}

/// Outcome of checking one submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    pub files_checked: usize,
    pub summary: SubmissionSummary,
    pub diagnostics: Vec<Diagnostic>,
}

impl SubmissionReport {
    /// Whether any finding blocks the submission.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

/// Short listing of a submission for summary views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionSummary {
    /// File names, for submissions of at most [`MAX_SUMMARY_FILES`] files
    Files(Vec<String>),
    /// Number of files, for larger submissions
    Count(usize),
}

impl SubmissionSummary {
    pub fn from_files(files: &[SubmittedFile]) -> Self {
        if files.len() <= MAX_SUMMARY_FILES {
            SubmissionSummary::Files(files.iter().map(SubmittedFile::name).collect())
        } else {
            SubmissionSummary::Count(files.len())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SubmissionSummary::Files(names) => names.is_empty(),
            SubmissionSummary::Count(count) => *count == 0,
        }
    }

    /// One-line rendering; counts come with a "view all" hint.
    pub fn render(&self, localizer: &dyn Localizer) -> String {
        match self {
            SubmissionSummary::Files(names) => names.join(", "),
            SubmissionSummary::Count(count) => format!(
                "{} ({})",
                localizer.file_count(*count),
                localizer.view_all(*count)
            ),
        }
    }
}

/// Collect the files of a submission rooted at `root`.
///
/// A file yields itself. A directory is walked recursively with hidden files
/// included, no ignore files applied and symbolic links followed, so a linked
/// file is checked under its link name just like a linked root.
/// Results are sorted by path.
#[cfg(feature = "filesystem")]
pub fn collect_submission(root: &Path) -> FilegateResult<Vec<SubmittedFile>> {
    use ignore::WalkBuilder;

    if !root.exists() {
        return Err(FilegateError::NotFound {
            path: root.to_path_buf(),
        });
    }

    if root.is_file() {
        return Ok(vec![read_file(root)?]);
    }

    let mut files = Vec::new();
    for entry in WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .follow_links(true)
        .build()
    {
        let entry = entry.map_err(|e| FilegateError::Walk {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;
        if entry.file_type().is_some_and(|ft| ft.is_file()) {
            files.push(read_file(entry.path())?);
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(root = %root.display(), files = files.len(), "collected submission");
    Ok(files)
}

#[cfg(feature = "filesystem")]
fn read_file(path: &Path) -> FilegateResult<SubmittedFile> {
    let metadata = std::fs::metadata(path).map_err(|source| FilegateError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SubmittedFile::new(path, metadata.len()))
}

/// Check submitted files against the settings' limits and the accepted types.
///
/// When file submissions are disabled a single FG-004 error is reported and
/// nothing else is checked. Otherwise FG-002 is reported once for too many
/// files, then FG-003 and FG-001 per offending file.
pub fn check_submission(
    files: &[SubmittedFile],
    settings: &PluginSettings,
    accepted: &AcceptedTypes,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let Some(first) = files.first() else {
        return diagnostics;
    };

    let localizer = settings.localizer();
    let locale = localizer.locale();
    let limits = settings.limits();

    if !limits.submissions_enabled() {
        diagnostics.push(Diagnostic::error(
            first.path.clone(),
            RULE_SUBMISSIONS_DISABLED,
            t!("check.submissions_disabled", locale = locale),
        ));
        return diagnostics;
    }

    let max_files = limits.max_files as usize;
    if files.len() > max_files {
        diagnostics.push(Diagnostic::error(
            files[max_files].path.clone(),
            RULE_TOO_MANY_FILES,
            t!(
                "check.too_many_files",
                locale = locale,
                count = files.len(),
                limit = max_files
            ),
        ));
    }

    let accepted_list = accepted.values().filter(|v| !v.is_empty()).map(|v| v.join(", "));

    for file in files {
        let name = file.name();

        if let Some(limit) = limits.size_limit()
            && file.size > limit
        {
            diagnostics.push(Diagnostic::error(
                file.path.clone(),
                RULE_FILE_TOO_LARGE,
                t!(
                    "check.file_too_large",
                    locale = locale,
                    name = name.as_str(),
                    size = file.size,
                    limit = limit
                ),
            ));
        }

        if !accepted.accepts(&name) {
            let mut diagnostic = Diagnostic::error(
                file.path.clone(),
                RULE_TYPE_NOT_ACCEPTED,
                t!("check.type_not_accepted", locale = locale, name = name.as_str()),
            );
            if let Some(list) = &accepted_list {
                diagnostic = diagnostic.with_suggestion(t!(
                    "check.type_not_accepted_suggestion",
                    locale = locale,
                    accepted = list.as_str()
                ));
            }
            diagnostics.push(diagnostic);
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::localization::I18nLocalizer;

    fn pdf_only(max_files: u32, max_bytes: u64) -> PluginSettings {
        PluginSettings::builder()
            .max_files(max_files)
            .max_submission_bytes(max_bytes)
            .restrict_file_types(true)
            .category(Category::Pdf)
            .build()
            .expect("valid settings")
    }

    fn pdf() -> AcceptedTypes {
        AcceptedTypes::Only(vec!["pdf".to_string()])
    }

    fn rules(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.rule.as_str()).collect()
    }

    #[test]
    fn empty_submission_has_no_findings() {
        assert!(check_submission(&[], &pdf_only(0, 0), &pdf()).is_empty());
    }

    #[test]
    fn accepted_files_pass() {
        let files = [
            SubmittedFile::new("essay.pdf", 10),
            SubmittedFile::new("appendix.PDF", 10),
        ];
        assert!(check_submission(&files, &pdf_only(5, 0), &pdf()).is_empty());
    }

    #[test]
    fn rejected_type_reports_fg001_with_suggestion() {
        let files = [SubmittedFile::new("dir/tool.exe", 10)];
        let diagnostics = check_submission(&files, &pdf_only(5, 0), &pdf());
        assert_eq!(rules(&diagnostics), vec![RULE_TYPE_NOT_ACCEPTED]);
        assert_eq!(diagnostics[0].file, PathBuf::from("dir/tool.exe"));
        assert!(diagnostics[0].message.contains("tool.exe"));
        assert!(
            diagnostics[0]
                .suggestion
                .as_deref()
                .is_some_and(|s| s.contains("pdf"))
        );
    }

    #[test]
    fn empty_accepted_list_has_no_suggestion() {
        let files = [SubmittedFile::new("notes.txt", 1)];
        let diagnostics = check_submission(&files, &pdf_only(5, 0), &AcceptedTypes::Only(vec![]));
        assert_eq!(rules(&diagnostics), vec![RULE_TYPE_NOT_ACCEPTED]);
        assert!(diagnostics[0].suggestion.is_none());
    }

    #[test]
    fn too_many_files_reported_once() {
        let files: Vec<_> = (0..4)
            .map(|i| SubmittedFile::new(format!("part{i}.pdf"), 1))
            .collect();
        let diagnostics = check_submission(&files, &pdf_only(2, 0), &pdf());
        assert_eq!(rules(&diagnostics), vec![RULE_TOO_MANY_FILES]);
        assert_eq!(diagnostics[0].file, PathBuf::from("part2.pdf"));
        assert!(diagnostics[0].message.contains('4'));
    }

    #[test]
    fn oversized_file_reported() {
        let files = [
            SubmittedFile::new("small.pdf", 100),
            SubmittedFile::new("big.pdf", 101),
        ];
        let diagnostics = check_submission(&files, &pdf_only(5, 100), &pdf());
        assert_eq!(rules(&diagnostics), vec![RULE_FILE_TOO_LARGE]);
        assert_eq!(diagnostics[0].file, PathBuf::from("big.pdf"));
    }

    #[test]
    fn zero_size_limit_means_no_cap() {
        let files = [SubmittedFile::new("huge.pdf", u64::MAX)];
        assert!(check_submission(&files, &pdf_only(5, 0), &pdf()).is_empty());
    }

    #[test]
    fn disabled_submissions_short_circuit() {
        let files = [
            SubmittedFile::new("a.exe", 1_000),
            SubmittedFile::new("b.exe", 1_000),
        ];
        let diagnostics = check_submission(&files, &pdf_only(0, 10), &pdf());
        assert_eq!(rules(&diagnostics), vec![RULE_SUBMISSIONS_DISABLED]);
    }

    #[test]
    fn unrestricted_accepts_every_name() {
        let settings = PluginSettings::default();
        let files = [SubmittedFile::new("anything.bin", 5)];
        assert!(check_submission(&files, &settings, &AcceptedTypes::Any).is_empty());
    }

    #[test]
    fn messages_follow_settings_locale() {
        let settings = PluginSettings::builder()
            .max_files(0)
            .locale(Some("es".to_string()))
            .build()
            .expect("valid settings");
        let files = [SubmittedFile::new("a.pdf", 1)];
        let diagnostics = check_submission(&files, &settings, &AcceptedTypes::Any);
        assert!(diagnostics[0].message.contains("desactivado"));
    }

    #[test]
    fn summary_lists_up_to_five_names() {
        let files: Vec<_> = (0..MAX_SUMMARY_FILES)
            .map(|i| SubmittedFile::new(format!("sub/f{i}.pdf"), 1))
            .collect();
        let summary = SubmissionSummary::from_files(&files);
        assert_eq!(
            summary,
            SubmissionSummary::Files(vec![
                "f0.pdf".into(),
                "f1.pdf".into(),
                "f2.pdf".into(),
                "f3.pdf".into(),
                "f4.pdf".into(),
            ])
        );
        assert_eq!(
            summary.render(&I18nLocalizer::default()),
            "f0.pdf, f1.pdf, f2.pdf, f3.pdf, f4.pdf"
        );
    }

    #[test]
    fn summary_counts_larger_submissions() {
        let files: Vec<_> = (0..6)
            .map(|i| SubmittedFile::new(format!("f{i}.pdf"), 1))
            .collect();
        let summary = SubmissionSummary::from_files(&files);
        assert_eq!(summary, SubmissionSummary::Count(6));
        assert_eq!(
            summary.render(&I18nLocalizer::default()),
            "6 file(s) (View all 6 files)"
        );
    }

    #[test]
    fn summary_of_nothing_is_empty() {
        assert!(SubmissionSummary::from_files(&[]).is_empty());
        assert!(!SubmissionSummary::Count(1).is_empty());
    }

    #[cfg(feature = "filesystem")]
    mod filesystem {
        use super::*;

        #[test]
        fn collects_nested_and_hidden_files_sorted() {
            let temp = tempfile::TempDir::new().unwrap();
            std::fs::create_dir(temp.path().join("sub")).unwrap();
            std::fs::write(temp.path().join("b.pdf"), b"12345").unwrap();
            std::fs::write(temp.path().join("sub").join("a.png"), b"1").unwrap();
            std::fs::write(temp.path().join(".hidden.txt"), b"").unwrap();
            std::fs::write(temp.path().join(".gitignore"), b"*.pdf\n").unwrap();

            let files = collect_submission(temp.path()).unwrap();
            let names: Vec<_> = files.iter().map(SubmittedFile::name).collect();
            assert_eq!(names, vec![".gitignore", ".hidden.txt", "b.pdf", "a.png"]);
            assert_eq!(files[2].size, 5);
        }

        #[test]
        fn single_file_yields_itself() {
            let temp = tempfile::TempDir::new().unwrap();
            let path = temp.path().join("essay.docx");
            std::fs::write(&path, b"abc").unwrap();

            let files = collect_submission(&path).unwrap();
            assert_eq!(files, vec![SubmittedFile::new(path, 3)]);
        }

        #[cfg(unix)]
        #[test]
        fn symlinked_files_are_collected_under_link_name() {
            let outside = tempfile::TempDir::new().unwrap();
            let target = outside.path().join("payload.bin");
            std::fs::write(&target, b"1234").unwrap();

            let temp = tempfile::TempDir::new().unwrap();
            let link = temp.path().join("malware.exe");
            std::os::unix::fs::symlink(&target, &link).unwrap();

            let files = collect_submission(temp.path()).unwrap();
            assert_eq!(files, vec![SubmittedFile::new(link.clone(), 4)]);

            // Same result when the link itself is the root.
            assert_eq!(collect_submission(&link).unwrap(), files);

            let diagnostics = check_submission(&files, &pdf_only(5, 0), &pdf());
            assert_eq!(rules(&diagnostics), vec![RULE_TYPE_NOT_ACCEPTED]);
        }

        #[test]
        fn missing_path_is_not_found() {
            let temp = tempfile::TempDir::new().unwrap();
            let err = collect_submission(&temp.path().join("missing")).unwrap_err();
            assert!(matches!(err, FilegateError::NotFound { .. }));
        }
    }
}
