//! Excel/ODS file reader using calamine

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::path::Path;
use tracing::debug;

pub mod ods;
pub mod workbook;

pub use workbook::{Cell, CellRange, CellValue, Sheet, Workbook};

/// Read a workbook from a file path
pub fn read_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let path = path.as_ref();
    let mut excel: Sheets<_> = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let sheet_names = excel.sheet_names();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for sheet_name in &sheet_names {
        // Get both values and formulas
        let range = excel
            .worksheet_range(sheet_name)
            .with_context(|| format!("Failed to read values of sheet '{}'", sheet_name))?;
        let formula_range = excel
            .worksheet_formula(sheet_name)
            .with_context(|| format!("Failed to read formulas of sheet '{}'", sheet_name))?;

        let sheet = parse_sheet(sheet_name, &range, &formula_range);
        debug!(
            sheet = %sheet.name,
            cells = sheet.cells.len(),
            formulas = sheet.formula_cells().count(),
            "read sheet"
        );
        sheets.push(sheet);
    }

    Ok(Workbook {
        path: path.to_path_buf(),
        sheets,
    })
}

/// Merge the value grid and the formula grid of one sheet into cells.
///
/// Calamine reports both grids with their own origin, so positions are
/// shifted back to absolute coordinates before merging.
fn parse_sheet(name: &str, range: &Range<Data>, formula_range: &Range<String>) -> Sheet {
    let mut sheet = Sheet::new(name);

    if let Some((row0, col0)) = range.start() {
        for (rel_row, rel_col, data) in range.cells() {
            if let Some(value) = parse_cell_value(data) {
                let cell = Cell::value(row0 + rel_row as u32, col0 + rel_col as u32, value);
                sheet.insert_cell(cell);
            }
        }
    }

    if let Some((row0, col0)) = formula_range.start() {
        for (rel_row, rel_col, formula) in formula_range.cells() {
            if formula.is_empty() {
                continue;
            }
            let (row, col) = (row0 + rel_row as u32, col0 + rel_col as u32);
            let formula = ods::normalize_formula(formula);
            match sheet.cells.get_mut(&(row, col)) {
                Some(cell) => cell.formula = Some(formula),
                None => sheet.insert_cell(Cell::formula(row, col, formula)),
            }
        }
    }

    sheet
}

fn parse_cell_value(data: &Data) -> Option<CellValue> {
    let value = match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Empty => return None,
    };
    Some(value)
}
