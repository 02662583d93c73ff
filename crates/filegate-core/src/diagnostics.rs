//! Diagnostic types and error reporting

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

pub type FilegateResult<T> = Result<T, FilegateError>;

/// Rule id: file extension is not in the accepted list.
pub const RULE_TYPE_NOT_ACCEPTED: &str = "FG-001";
/// Rule id: the submission holds more files than allowed.
pub const RULE_TOO_MANY_FILES: &str = "FG-002";
/// Rule id: a file is larger than the per-file size cap.
pub const RULE_FILE_TOO_LARGE: &str = "FG-003";
/// Rule id: files were submitted although file submissions are disabled.
pub const RULE_SUBMISSIONS_DISABLED: &str = "FG-004";

/// A finding produced while checking a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub file: PathBuf,
    pub rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

impl Diagnostic {
    pub fn error(file: PathBuf, rule: &str, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            message: message.into(),
            file,
            rule: rule.to_string(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Check if this diagnostic blocks the submission
    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

/// Library errors
#[derive(Error, Debug)]
pub enum FilegateError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk submission directory: {path} ({message})")]
    Walk { path: PathBuf, message: String },

    #[error("Submission path does not exist: {path}")]
    NotFound { path: PathBuf },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
