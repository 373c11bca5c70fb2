//! sheetdoc-core: formula documentation for Excel/ODS workbooks
//!
//! Every formula cell of a workbook is extracted, its cell references are
//! rewritten into the column names found in header row 1, and the result is
//! grouped by sheet and rendered as Markdown or CSV.

pub mod address;
pub mod config;
pub mod error;
pub mod extract;
pub mod headers;
pub mod reader;
pub mod report;
pub mod substitute;

use anyhow::Result;
use std::path::Path;
use tracing::warn;

pub use address::CellAddress;
pub use config::ReportConfig;
pub use error::ExtractError;
pub use extract::FormulaRecord;
pub use headers::HeaderMap;
pub use reader::Workbook;
pub use report::{FormulaReport, GroupedReport, ReportOutcome};

/// Main reporting interface
pub struct FormulaReporter {
    config: ReportConfig,
}

impl FormulaReporter {
    /// Create a reporter with default configuration
    pub fn new() -> Self {
        Self::with_config(ReportConfig::default())
    }

    /// Create a reporter with custom configuration
    pub fn with_config(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Read a spreadsheet file and extract its formulas
    pub fn report_file<P: AsRef<Path>>(&self, path: P) -> Result<ReportOutcome> {
        let workbook = reader::read_workbook(path)?;
        Ok(self.report_workbook(&workbook)?)
    }

    /// Extract the formulas of an already parsed workbook
    pub fn report_workbook(&self, workbook: &Workbook) -> Result<ReportOutcome, ExtractError> {
        for name in self.config.unknown_sheets(&workbook.sheet_names()) {
            warn!(sheet = name, "configured sheet not found in workbook");
        }

        let records = extract::extract_workbook(workbook, &self.config)?;
        Ok(ReportOutcome::from_records(records))
    }
}

impl Default for FormulaReporter {
    fn default() -> Self {
        Self::new()
    }
}
