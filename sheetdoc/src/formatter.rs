//! Console summaries and JSON output

use anyhow::Result;
use colored::*;
use sheetdoc_core::{FormulaReport, ReportOutcome};
use std::path::Path;

/// Print a one-line summary of a processed file to stderr
pub fn print_summary(file_path: &Path, outcome: &ReportOutcome) {
    match outcome {
        ReportOutcome::Empty => {
            eprintln!(
                "{} {}",
                "No formulas found in".yellow().bold(),
                file_path.display()
            );
        }
        ReportOutcome::Report(report) => {
            let grouped = report.grouped();
            eprintln!(
                "{} {}: {} formulas in {} sheets",
                "✓".green().bold(),
                file_path.display().to_string().bold(),
                grouped.record_count(),
                grouped.sheet_count()
            );
            for (sheet, records) in grouped.iter() {
                eprintln!("  {} {}", sheet.cyan(), records.len().to_string().bright_black());
            }
        }
    }
}

/// Print a processing failure with its cause chain to stderr
pub fn print_failure(file_path: &Path, error: &anyhow::Error) {
    eprintln!(
        "{} {}: {:#}",
        "ERROR".red().bold(),
        file_path.display(),
        error
    );
}

/// Serialize a report as JSON, grouped by sheet
pub fn to_json(file_path: &Path, report: &FormulaReport) -> Result<String> {
    let grouped = report.grouped();
    let sheets: Vec<_> = grouped
        .iter()
        .map(|(name, records)| {
            serde_json::json!({
                "name": name,
                "formulas": records,
            })
        })
        .collect();

    let output = serde_json::json!({
        "file": file_path.display().to_string(),
        "sheets": sheets,
        "total": report.records().len(),
    });

    Ok(serde_json::to_string_pretty(&output)? + "\n")
}
