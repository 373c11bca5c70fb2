//! Errors raised while extracting formulas from a workbook

use thiserror::Error;

pub type ExtractResult<T> = Result<T, ExtractError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The workbook model is inconsistent; the whole extraction is abandoned.
    #[error("Malformed input in sheet '{sheet}': {reason}")]
    InputMalformed { sheet: String, reason: String },

    #[error("Invalid cell address: '{0}'")]
    InvalidAddress(String),
}

impl ExtractError {
    pub fn malformed(sheet: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InputMalformed {
            sheet: sheet.into(),
            reason: reason.into(),
        }
    }
}
