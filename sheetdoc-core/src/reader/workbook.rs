//! Workbook data structures

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Represents a complete workbook
#[derive(Debug, Clone)]
pub struct Workbook {
    pub path: PathBuf,
    /// Sheets in workbook order
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Get all sheet names
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Inclusive rectangular bound of a sheet's occupied cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    /// Top-left corner (row, col), zero-based
    pub start: (u32, u32),
    /// Bottom-right corner (row, col), zero-based and inclusive
    pub end: (u32, u32),
}

impl CellRange {
    pub fn new(start: (u32, u32), end: (u32, u32)) -> Self {
        Self { start, end }
    }

    pub fn rows(&self) -> std::ops::RangeInclusive<u32> {
        self.start.0..=self.end.0
    }

    pub fn cols(&self) -> std::ops::RangeInclusive<u32> {
        self.start.1..=self.end.1
    }

    /// Whether the start corner does not exceed the end corner
    pub fn is_well_formed(&self) -> bool {
        self.start.0 <= self.end.0 && self.start.1 <= self.end.1
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        self.rows().contains(&row) && self.cols().contains(&col)
    }
}

/// Represents a worksheet
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub cells: HashMap<(u32, u32), Cell>,
    /// Occupied range; `None` only when the sheet holds no cells
    pub used_range: Option<CellRange>,
}

impl Sheet {
    /// Create an empty sheet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: HashMap::new(),
            used_range: None,
        }
    }

    /// Get a cell at the given position
    pub fn get_cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Insert a cell, growing the occupied range to cover it
    pub fn insert_cell(&mut self, cell: Cell) {
        let (row, col) = (cell.row, cell.col);
        self.used_range = Some(match self.used_range {
            None => CellRange::new((row, col), (row, col)),
            Some(r) => CellRange::new(
                (r.start.0.min(row), r.start.1.min(col)),
                (r.end.0.max(row), r.end.1.max(col)),
            ),
        });
        self.cells.insert((row, col), cell);
    }

    /// Get all cells carrying a formula
    pub fn formula_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values().filter(|c| c.formula.is_some())
    }
}

/// Represents a single cell
///
/// The literal value and the authored formula are independent: a formula
/// cell usually also carries its last computed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub value: Option<CellValue>,
    /// Raw formula text as stored, possibly with a leading `=`
    pub formula: Option<String>,
}

impl Cell {
    /// A cell holding only a literal value
    pub fn value(row: u32, col: u32, value: CellValue) -> Self {
        Self {
            row,
            col,
            value: Some(value),
            formula: None,
        }
    }

    /// A cell holding only a formula
    pub fn formula(row: u32, col: u32, formula: impl Into<String>) -> Self {
        Self {
            row,
            col,
            value: None,
            formula: Some(formula.into()),
        }
    }

    pub fn has_formula(&self) -> bool {
        self.formula.is_some()
    }
}

/// Cell value types
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Boolean(bool),
    Error(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 Display already prints integral values without a fraction
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(t) => f.write_str(t),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Error(e) => f.write_str(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_cell_grows_range() {
        let mut sheet = Sheet::new("Sheet1");
        assert!(sheet.used_range.is_none());

        sheet.insert_cell(Cell::value(2, 3, CellValue::Number(1.0)));
        assert_eq!(sheet.used_range, Some(CellRange::new((2, 3), (2, 3))));

        sheet.insert_cell(Cell::formula(0, 5, "=A1"));
        assert_eq!(sheet.used_range, Some(CellRange::new((0, 3), (2, 5))));
        assert_eq!(sheet.formula_cells().count(), 1);
    }

    #[test]
    fn test_value_text_form() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Boolean(true).to_string(), "true");
        assert_eq!(CellValue::Error("#DIV/0!".into()).to_string(), "#DIV/0!");
        assert_eq!(CellValue::Text("Qty".into()).to_string(), "Qty");
    }

    #[test]
    fn test_range_bounds() {
        let range = CellRange::new((1, 1), (3, 2));
        assert!(range.is_well_formed());
        assert!(range.contains(2, 2));
        assert!(!range.contains(0, 1));
        assert!(!CellRange::new((4, 0), (3, 0)).is_well_formed());
    }
}
