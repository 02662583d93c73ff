//! filegate CLI - file-type acceptance rules for assignment uploads

rust_i18n::i18n!("locales", fallback = "en");

mod locale;
mod output;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use filegate_core::config::DEFAULT_CONFIG_FILE;
use filegate_core::{Evaluator, PluginSettings};
use output::{CategoryRow, OutputFormat};
use rust_i18n::t;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "filegate")]
#[command(version, about = "Evaluate file-type acceptance rules for assignment uploads")]
struct Cli {
    /// Settings file [default: .filegate.toml when present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Locale for labels and messages (e.g. en, es, zh-CN)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show labels for the enabled file type categories
    Describe {
        /// List every category with its enabled state
        #[arg(long)]
        all: bool,
    },
    /// Print the accepted file extensions
    Accepted,
    /// Print the MIME types for an upload widget's accept filter
    MimeTypes,
    /// Print the file types listed to students
    Permitted,
    /// Check submitted files against the settings
    Check {
        /// Files or directories making up one submission
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Check an "other file types" text such as "*.xlsx, *.pptx"
    ValidateOther {
        /// Text to check
        text: String,
    },
    /// Print the JSON schema of the settings file
    Schema,
    /// List supported locales
    Locales,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn settings_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.is_file().then_some(default)
    })
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let format = cli.format;

    match cli.command {
        Commands::Schema => {
            let schema = filegate_core::generate_schema();
            println!(
                "{}",
                serde_json::to_string_pretty(&schema).context("failed to serialize schema")?
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Locales => {
            locale::init(cli.locale.as_deref(), None);
            locale::print_supported_locales();
            Ok(ExitCode::SUCCESS)
        }
        Commands::ValidateOther { text } => {
            locale::init(cli.locale.as_deref(), None);
            let valid = filegate_core::is_valid_other_extensions(&text);
            let extensions = filegate_core::parse_other_extensions(&text);
            output::print_other_check(format, &text, valid, extensions)?;
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        command => {
            let path = settings_path(cli.config);
            let (settings, load_warning) = PluginSettings::load_or_default(path.as_ref());
            let locale = locale::init(cli.locale.as_deref(), settings.locale());
            if let Some(warning) = load_warning {
                eprintln!("{}", warning.yellow());
            }
            tracing::debug!(settings = ?path, locale = %locale, "settings loaded");

            let settings = settings.with_locale(Some(locale));
            output::print_config_warnings(&settings.validate());
            evaluate(command, &settings, format)
        }
    }
}

fn evaluate(
    command: Commands,
    settings: &PluginSettings,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let localizer = settings.localizer();
    let evaluator = Evaluator::for_settings(settings);
    let acceptance = settings.acceptance();

    match command {
        Commands::Describe { all: false } => {
            let labels = evaluator.describe_accepted_types(acceptance, &localizer);
            output::print_labels(format, &labels, &t!("cli.no_categories"))?;
        }
        Commands::Describe { all: true } => {
            let rows: Vec<CategoryRow> = evaluator
                .describe_all_categories(&localizer)
                .into_iter()
                .map(|(category, label)| CategoryRow {
                    category,
                    label,
                    enabled: acceptance.is_enabled(category),
                })
                .collect();
            output::print_category_rows(format, &rows)?;
        }
        Commands::Accepted => {
            output::print_accepted(format, &evaluator.compute_accepted_types(acceptance))?;
        }
        Commands::MimeTypes => {
            output::print_accepted(format, &evaluator.accepted_mime_types(acceptance))?;
        }
        Commands::Permitted => {
            let permitted = evaluator.permitted_file_types(acceptance, &localizer);
            let hint = if acceptance.restrict_enabled() {
                t!("cli.accept_none")
            } else {
                t!("cli.accept_any")
            };
            output::print_labels(format, &permitted, &hint)?;
        }
        Commands::Check { paths } => {
            let report = evaluator
                .check_paths(settings, &paths)
                .context("failed to check submission")?;
            output::print_report(format, &report, &localizer)?;
            if report.has_errors() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::ValidateOther { .. } | Commands::Schema | Commands::Locales => {}
    }

    Ok(ExitCode::SUCCESS)
}
