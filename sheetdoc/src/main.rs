use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use sheetdoc_core::{FormulaReport, FormulaReporter, ReportConfig, ReportOutcome};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

mod formatter;

#[derive(Parser)]
#[command(name = "sheetdoc")]
#[command(about = "Document the formulas of Excel/ODS workbooks with readable column names", long_about = None)]
#[command(version)]
struct Cli {
    /// Paths to the Excel/ODS files to document
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    format: OutputFormat,

    /// Write one report per input into this directory instead of stdout
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Do not print the per-file summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Markdown document grouped by sheet
    Markdown,
    /// One CSV row per formula
    Csv,
    /// JSON document grouped by sheet
    Json,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = if let Some(config_path) = &cli.config {
        ReportConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("sheetdoc.toml");
        if default_config_path.exists() {
            ReportConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            ReportConfig::default()
        }
    };

    config.validate().context("Invalid configuration")?;

    if let Some(dir) = &cli.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }

    let reporter = FormulaReporter::with_config(config);

    // Workbooks are independent; collect keeps argument order
    let outcomes: Vec<Result<ReportOutcome>> = cli
        .files
        .par_iter()
        .map(|path| {
            reporter
                .report_file(path)
                .with_context(|| format!("Failed to process file: {}", path.display()))
        })
        .collect();

    let failed = emit_reports(&cli, reporter.config(), outcomes, &mut io::stdout().lock());

    std::process::exit(if failed { 1 } else { 0 });
}

/// Deliver every outcome in argument order and report whether any file failed.
///
/// A failed file is printed and does not stop the remaining files.
fn emit_reports<W: Write>(
    cli: &Cli,
    config: &ReportConfig,
    outcomes: Vec<Result<ReportOutcome>>,
    out: &mut W,
) -> bool {
    let mut failed = false;
    for (path, outcome) in cli.files.iter().zip(outcomes) {
        let delivered = outcome.and_then(|outcome| {
            emit_report(&outcome, path, cli, config, out)?;
            Ok(outcome)
        });

        match delivered {
            Ok(outcome) => {
                if !cli.quiet {
                    formatter::print_summary(path, &outcome);
                }
            }
            Err(e) => {
                formatter::print_failure(path, &e);
                failed = true;
            }
        }
    }
    failed
}

/// Write one report to the output directory, or to `out` without one.
/// An empty outcome writes nothing.
fn emit_report<W: Write>(
    outcome: &ReportOutcome,
    path: &Path,
    cli: &Cli,
    config: &ReportConfig,
    out: &mut W,
) -> Result<()> {
    let ReportOutcome::Report(report) = outcome else {
        return Ok(());
    };

    let rendered = render(report, cli.format, config, path)?;
    match &cli.output_dir {
        Some(dir) => {
            let target = output_path(dir, path, cli.format);
            fs::write(&target, rendered)
                .with_context(|| format!("Failed to write {}", target.display()))?;
            debug!(output = %target.display(), "report written");
        }
        None => out
            .write_all(rendered.as_bytes())
            .context("Failed to write report to stdout")?,
    }
    Ok(())
}

fn render(
    report: &FormulaReport,
    format: OutputFormat,
    config: &ReportConfig,
    path: &Path,
) -> Result<String> {
    let rendered = match format {
        OutputFormat::Markdown => report.to_markdown(config),
        OutputFormat::Csv => report
            .to_csv(config)
            .context("Failed to render CSV report")?,
        OutputFormat::Json => formatter::to_json(path, report)?,
    };
    Ok(rendered)
}

/// `<dir>/<file stem>.<ext>`
fn output_path(dir: &Path, input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    dir.join(format!("{}.{}", stem, format.extension()))
}
