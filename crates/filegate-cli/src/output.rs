//! Text and JSON rendering for command results.

use clap::ValueEnum;
use colored::Colorize;
use filegate_core::{
    AcceptedTypes, Category, ConfigWarning, Diagnostic, DiagnosticLevel, Localizer,
    SubmissionReport,
};
use rust_i18n::t;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// One row of `describe --all`.
#[derive(Debug, Serialize)]
pub struct CategoryRow {
    pub category: Category,
    pub label: String,
    pub enabled: bool,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a list of labels, one per line. `empty_hint` goes to stderr when
/// there is nothing to print.
pub fn print_labels(
    format: OutputFormat,
    labels: &[String],
    empty_hint: &str,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(labels),
        OutputFormat::Text => {
            if labels.is_empty() {
                eprintln!("{}", empty_hint.dimmed());
            }
            for label in labels {
                println!("{label}");
            }
            Ok(())
        }
    }
}

pub fn print_category_rows(format: OutputFormat, rows: &[CategoryRow]) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(rows),
        OutputFormat::Text => {
            for row in rows {
                let mark = if row.enabled { "[x]".green() } else { "[ ]".dimmed() };
                println!("{mark} {}", row.label);
            }
            Ok(())
        }
    }
}

/// Print accepted extensions or MIME types. `*` stands for anything.
pub fn print_accepted(format: OutputFormat, accepted: &AcceptedTypes) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(accepted),
        OutputFormat::Text => {
            match accepted {
                AcceptedTypes::Any => {
                    println!("*");
                    eprintln!("{}", t!("cli.accept_any").dimmed());
                }
                AcceptedTypes::Only(values) if values.is_empty() => {
                    eprintln!("{}", t!("cli.accept_none").yellow());
                }
                AcceptedTypes::Only(values) => {
                    for value in values {
                        println!("{value}");
                    }
                }
            }
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct OtherCheck<'a> {
    text: &'a str,
    valid: bool,
    extensions: Vec<String>,
}

pub fn print_other_check(
    format: OutputFormat,
    text: &str,
    valid: bool,
    extensions: Vec<String>,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(&OtherCheck {
            text,
            valid,
            extensions,
        }),
        OutputFormat::Text => {
            if valid {
                println!("{}", t!("cli.other_valid", text = text).green());
            } else {
                println!(
                    "{}",
                    t!(
                        "cli.other_invalid",
                        text = text,
                        placeholder = filegate_core::other_extensions::OTHER_EXTENSIONS_PLACEHOLDER
                    )
                    .red()
                );
            }
            Ok(())
        }
    }
}

/// Print settings warnings to stderr.
pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        eprintln!(
            "{}",
            t!(
                "cli.config_warning",
                field = warning.field.as_str(),
                message = warning.message.as_str()
            )
            .yellow()
        );
        if let Some(suggestion) = &warning.suggestion {
            eprintln!("  {}", t!("cli.help", suggestion = suggestion.as_str()).dimmed());
        }
    }
}

fn level_label(level: DiagnosticLevel) -> colored::ColoredString {
    match level {
        DiagnosticLevel::Error => "error".red().bold(),
        DiagnosticLevel::Warning => "warning".yellow().bold(),
        DiagnosticLevel::Info => "info".cyan(),
    }
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    println!(
        "{}: {}[{}] {}",
        diagnostic.file.display().to_string().bold(),
        level_label(diagnostic.level),
        diagnostic.rule,
        diagnostic.message
    );
    if let Some(suggestion) = &diagnostic.suggestion {
        println!("  {}", t!("cli.help", suggestion = suggestion.as_str()).dimmed());
    }
}

pub fn print_report(
    format: OutputFormat,
    report: &SubmissionReport,
    localizer: &dyn Localizer,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Text => {
            for diagnostic in &report.diagnostics {
                print_diagnostic(diagnostic);
            }

            if report.summary.is_empty() {
                println!("{}", t!("cli.no_files").dimmed());
            } else {
                println!(
                    "{}",
                    t!("cli.submission", summary = report.summary.render(localizer)).dimmed()
                );
            }

            let errors = report.error_count();
            if errors == 0 {
                println!(
                    "{}",
                    t!("cli.check_passed", count = report.files_checked).green()
                );
            } else {
                println!(
                    "{}",
                    t!(
                        "cli.check_failed",
                        count = report.files_checked,
                        errors = errors
                    )
                    .red()
                    .bold()
                );
            }
            Ok(())
        }
    }
}
