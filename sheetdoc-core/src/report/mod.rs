//! Report assembly: grouping extracted formulas and rendering them

pub mod markdown;
pub mod tabular;

use crate::config::ReportConfig;
use crate::extract::FormulaRecord;
use indexmap::IndexMap;

/// Formula records partitioned by sheet, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedReport {
    groups: IndexMap<String, Vec<FormulaRecord>>,
}

impl GroupedReport {
    /// Group records by sheet.
    ///
    /// A sheet key is inserted the first time one of its records is seen;
    /// later records are appended in input order.
    pub fn from_records(records: &[FormulaRecord]) -> Self {
        let mut groups: IndexMap<String, Vec<FormulaRecord>> = IndexMap::new();
        for record in records {
            groups
                .entry(record.sheet.clone())
                .or_default()
                .push(record.clone());
        }
        Self { groups }
    }

    /// Sheet names in report order
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Iterate `(sheet, records)` in report order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FormulaRecord])> {
        self.groups
            .iter()
            .map(|(sheet, records)| (sheet.as_str(), records.as_slice()))
    }

    pub fn get(&self, sheet: &str) -> Option<&[FormulaRecord]> {
        self.groups.get(sheet).map(Vec::as_slice)
    }

    /// Number of sheets with at least one formula
    pub fn sheet_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of records across all sheets
    pub fn record_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Result of processing a workbook
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// The workbook contains no formulas; nothing should be rendered
    Empty,
    Report(FormulaReport),
}

impl ReportOutcome {
    pub fn from_records(records: Vec<FormulaRecord>) -> Self {
        if records.is_empty() {
            ReportOutcome::Empty
        } else {
            ReportOutcome::Report(FormulaReport { records })
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ReportOutcome::Empty)
    }

    pub fn report(&self) -> Option<&FormulaReport> {
        match self {
            ReportOutcome::Empty => None,
            ReportOutcome::Report(report) => Some(report),
        }
    }
}

/// A non-empty set of extracted formulas, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaReport {
    records: Vec<FormulaRecord>,
}

impl FormulaReport {
    /// Records in extraction order
    pub fn records(&self) -> &[FormulaRecord] {
        &self.records
    }

    pub fn grouped(&self) -> GroupedReport {
        GroupedReport::from_records(&self.records)
    }

    pub fn to_markdown(&self, config: &ReportConfig) -> String {
        markdown::render(
            &self.grouped(),
            &config.global.title,
            &config.global.formula_label,
        )
    }

    /// Render as CSV, rejecting a delimiter that is not a single ASCII byte
    pub fn to_csv(&self, config: &ReportConfig) -> anyhow::Result<String> {
        let delimiter = config.delimiter_byte()?;
        Ok(tabular::render(&self.records, delimiter)?)
    }
}
