//! OpenFormula (ODS) formula normalization
//!
//! Calamine hands back ODS formulas as stored in `content.xml`, e.g.
//! `of:=SUM([.A1:.B2])*[$Data.C3]`. The rest of the crate expects the
//! A1 syntax Excel uses, so the namespace prefix is dropped and every
//! bracketed reference is rewritten.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Rewrite an ODS formula into A1 syntax.
///
/// Formulas without the `of:` namespace are returned unchanged.
///
/// - `of:=[.A2]*2` -> `A2*2`
/// - `of:=SUM([.A1:.B2])` -> `SUM(A1:B2)`
/// - `of:=[$Data.$C$3]` -> `Data!$C$3`
/// - `of:=['My Sheet'.A1:.A4]` -> `'My Sheet'!A1:A4`
pub fn normalize_formula(formula: &str) -> String {
    static ODS_BRACKET_REF: OnceLock<Regex> = OnceLock::new();

    let Some(body) = formula
        .strip_prefix("of:")
        .or_else(|| formula.strip_prefix("msoxl:"))
    else {
        return formula.to_string();
    };
    let body = body.strip_prefix('=').unwrap_or(body);

    let bracket_ref = ODS_BRACKET_REF.get_or_init(|| Regex::new(r"\[([^\[\]]+)\]").unwrap());
    bracket_ref
        .replace_all(body, |caps: &Captures| {
            rewrite_reference(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// `$Sheet.A1:.B2` -> `Sheet!A1:B2`; `None` when the text is not a reference
fn rewrite_reference(inner: &str) -> Option<String> {
    let parts = inner
        .split(':')
        .map(rewrite_part)
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join(":"))
}

fn rewrite_part(part: &str) -> Option<String> {
    // Sheet names may contain dots only inside quotes; the cell part never does
    let (sheet, cell) = part.rsplit_once('.')?;
    if cell.is_empty() || !cell.chars().all(|c| c == '$' || c.is_ascii_alphanumeric()) {
        return None;
    }
    let sheet = sheet.strip_prefix('$').unwrap_or(sheet);
    if sheet.is_empty() {
        Some(cell.to_string())
    } else {
        Some(format!("{}!{}", sheet, cell))
    }
}
