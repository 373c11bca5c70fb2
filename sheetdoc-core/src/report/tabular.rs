//! Flat CSV rendering of formula records
//!
//! One row per record with a header row. Fields holding the delimiter, a
//! double quote or a line break are wrapped in double quotes and embedded
//! quotes are doubled (RFC 4180). Records end with `\n`.

use crate::extract::FormulaRecord;
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const HEADER: [&str; 4] = ["Sheet", "Address", "Column", "Formula"];

/// Render records in extraction order with the given field delimiter.
pub fn render(records: &[FormulaRecord], delimiter: u8) -> csv::Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for record in records {
        writer.write_record([
            record.sheet.as_str(),
            record.address.as_str(),
            record.column.as_str(),
            record.formula.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    // Every field came from a String, so the buffer is valid UTF-8
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
