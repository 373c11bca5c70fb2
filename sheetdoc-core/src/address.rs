//! Spreadsheet cell addresses and column letters

use crate::error::ExtractError;
use std::fmt;
use std::str::FromStr;

/// Cell address (e.g., A1, B2), zero-based internally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Convert to Excel-style reference (e.g., "A1")
    pub fn to_excel_ref(&self) -> String {
        format!("{}{}", col_to_letters(self.col), self.row + 1)
    }

    /// Parse A1 notation, ignoring absolute markers (`$B$12`).
    pub fn parse(input: &str) -> Result<Self, ExtractError> {
        let invalid = || ExtractError::InvalidAddress(input.to_string());

        let cleaned: String = input.trim().chars().filter(|&c| c != '$').collect();
        let split = cleaned
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (letters, digits) = cleaned.split_at(split);

        let col = letters_to_col(letters).ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let row_num: u32 = digits.parse().map_err(|_| invalid())?;
        if row_num == 0 {
            return Err(invalid());
        }

        Ok(Self::new(row_num - 1, col))
    }
}

impl FromStr for CellAddress {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_excel_ref())
    }
}

/// Convert column number to letters (0 -> A, 25 -> Z, 26 -> AA)
pub fn col_to_letters(mut col: u32) -> String {
    let mut result = String::new();
    loop {
        result.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    result
}

/// Convert column letters to a zero-based index (A -> 0, AA -> 26).
///
/// Accepts upper or lower case; returns `None` for empty input, non-letters
/// or a column past `u32` range.
pub fn letters_to_col(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
        col = col.checked_mul(26)?.checked_add(digit)?;
    }
    Some(col - 1)
}
