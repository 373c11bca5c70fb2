//! Column display names derived from header row 1

use crate::reader::Sheet;
use std::collections::BTreeMap;

/// Mapping from column index to display name for one sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    names: BTreeMap<u32, String>,
}

impl HeaderMap {
    /// Resolve the header names of every column in the sheet's range.
    ///
    /// The header row is always absolute row 0, even when the occupied
    /// range starts further down. Only a header cell without a value gets
    /// the `Col_<i>` placeholder; a blank text header stays empty.
    pub fn resolve(sheet: &Sheet) -> Self {
        let Some(range) = sheet.used_range else {
            return Self::default();
        };

        let names = range
            .cols()
            .map(|col| {
                let name = sheet
                    .get_cell(0, col)
                    .and_then(|cell| cell.value.as_ref())
                    .map(|value| normalize_header(&value.to_string()))
                    .unwrap_or_else(|| placeholder(col));
                (col, name)
            })
            .collect();

        Self { names }
    }

    pub fn get(&self, col: u32) -> Option<&str> {
        self.names.get(&col).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate `(column, name)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.names.iter().map(|(col, name)| (*col, name.as_str()))
    }
}

impl FromIterator<(u32, String)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// Collapse embedded newlines to spaces and trim
fn normalize_header(text: &str) -> String {
    text.replace('\n', " ").trim().to_string()
}

fn placeholder(col: u32) -> String {
    format!("Col_{}", col)
}
