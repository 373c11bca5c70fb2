//! Formula extraction over the cell grid of a workbook

use crate::address::CellAddress;
use crate::config::ReportConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::headers::HeaderMap;
use crate::reader::{CellRange, Sheet, Workbook};
use crate::substitute::{ReferenceScanner, ReferenceSubstitutor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// One extracted formula with its location metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaRecord {
    /// Name of the sheet holding the cell
    pub sheet: String,
    /// Cell address in A1 notation
    pub address: String,
    /// Display name of the cell's column, empty when no header applies
    pub column: String,
    /// Formula text with references replaced by column names
    pub formula: String,
}

/// Extract the formulas of one sheet in row-major order.
pub fn extract_sheet<S: ReferenceScanner>(
    sheet: &Sheet,
    headers: &HeaderMap,
    substitutor: &ReferenceSubstitutor<S>,
) -> ExtractResult<Vec<FormulaRecord>> {
    let Some(range) = validate_sheet(sheet)? else {
        return Ok(Vec::new());
    };

    let mut records = Vec::new();
    for row in range.rows() {
        for col in range.cols() {
            let Some(cell) = sheet.get_cell(row, col) else {
                continue;
            };
            let Some(formula) = &cell.formula else {
                continue;
            };

            records.push(FormulaRecord {
                sheet: sheet.name.clone(),
                address: CellAddress::new(row, col).to_excel_ref(),
                column: headers.get(col).unwrap_or_default().to_string(),
                formula: substitutor.substitute(formula, headers),
            });
        }
    }

    Ok(records)
}

/// Extract the formulas of every sheet, in workbook order.
///
/// Sheets marked `skip` in the configuration are left out. Any malformed
/// sheet aborts the whole extraction.
pub fn extract_workbook(
    workbook: &Workbook,
    config: &ReportConfig,
) -> ExtractResult<Vec<FormulaRecord>> {
    let substitutor = ReferenceSubstitutor::new();
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for sheet in &workbook.sheets {
        if !seen.insert(sheet.name.as_str()) {
            return Err(ExtractError::malformed(
                &sheet.name,
                "sheet name appears more than once in the workbook",
            ));
        }
        if config.is_sheet_skipped(&sheet.name) {
            debug!(sheet = %sheet.name, "skipping sheet by configuration");
            continue;
        }

        let headers = HeaderMap::resolve(sheet);
        let sheet_records = extract_sheet(sheet, &headers, &substitutor)?;
        debug!(
            sheet = %sheet.name,
            columns = headers.len(),
            formulas = sheet_records.len(),
            "extracted sheet"
        );
        records.extend(sheet_records);
    }

    info!(
        path = %workbook.path.display(),
        sheets = workbook.sheets.len(),
        formulas = records.len(),
        "extraction finished"
    );
    Ok(records)
}

/// Check the sheet's declared range against its cells.
///
/// Returns `None` for a sheet without cells.
fn validate_sheet(sheet: &Sheet) -> ExtractResult<Option<CellRange>> {
    let Some(range) = sheet.used_range else {
        if sheet.cells.is_empty() {
            return Ok(None);
        }
        return Err(ExtractError::malformed(
            &sheet.name,
            "sheet has cells but no declared range",
        ));
    };

    if !range.is_well_formed() {
        return Err(ExtractError::malformed(
            &sheet.name,
            format!(
                "declared range {}:{} is inverted",
                CellAddress::new(range.start.0, range.start.1),
                CellAddress::new(range.end.0, range.end.1)
            ),
        ));
    }

    for (&(row, col), cell) in &sheet.cells {
        if (cell.row, cell.col) != (row, col) {
            return Err(ExtractError::malformed(
                &sheet.name,
                format!(
                    "cell stored at {} reports position {}",
                    CellAddress::new(row, col),
                    CellAddress::new(cell.row, cell.col)
                ),
            ));
        }
        if !range.contains(row, col) {
            return Err(ExtractError::malformed(
                &sheet.name,
                format!(
                    "cell {} lies outside the declared range",
                    CellAddress::new(row, col)
                ),
            ));
        }
    }

    Ok(Some(range))
}
