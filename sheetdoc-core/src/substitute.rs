//! Rewriting of cell references into column display names
//!
//! Formula text is scanned for reference-shaped tokens (`A1`, `$B$12`,
//! `AA100`) and each token is replaced by the header name of its column.
//! The scan is textual: it does not know about string literals or defined
//! names, so `"A1"` inside quotes or a name such as `AB12` is rewritten too.
//! Scanning sits behind [`ReferenceScanner`] so a real formula tokenizer can
//! take its place.

use crate::address::letters_to_col;
use crate::headers::HeaderMap;
use regex::Regex;

/// A reference-shaped token found in formula text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceToken<'a> {
    /// Byte offset of the first character of the token
    pub start: usize,
    /// Byte offset one past the last character of the token
    pub end: usize,
    /// Column letters without absolute markers
    pub letters: &'a str,
}

/// Finds cell-reference tokens in formula text
pub trait ReferenceScanner {
    /// Return non-overlapping tokens ordered left to right
    fn scan<'a>(&self, text: &'a str) -> Vec<ReferenceToken<'a>>;
}

/// Scanner for the pattern `$?[A-Z]{1,3}$?[0-9]+`
pub struct RegexScanner {
    pattern: Regex,
}

impl RegexScanner {
    pub fn new() -> Self {
        // Optional `$`, 1-3 uppercase letters, optional `$`, row digits
        let pattern = Regex::new(r"\$?([A-Z]{1,3})\$?[0-9]+").unwrap();
        Self { pattern }
    }
}

impl Default for RegexScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceScanner for RegexScanner {
    fn scan<'a>(&self, text: &'a str) -> Vec<ReferenceToken<'a>> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let letters = caps.get(1)?;
                Some(ReferenceToken {
                    start: whole.start(),
                    end: whole.end(),
                    letters: letters.as_str(),
                })
            })
            .collect()
    }
}

/// Replaces cell references in formulas by column display names
pub struct ReferenceSubstitutor<S = RegexScanner> {
    scanner: S,
}

impl ReferenceSubstitutor<RegexScanner> {
    pub fn new() -> Self {
        Self::with_scanner(RegexScanner::new())
    }
}

impl Default for ReferenceSubstitutor<RegexScanner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ReferenceScanner> ReferenceSubstitutor<S> {
    pub fn with_scanner(scanner: S) -> Self {
        Self { scanner }
    }

    /// Strip one leading `=` and rewrite every reference token.
    ///
    /// A token whose column has a non-empty header becomes that header;
    /// otherwise it collapses to its bare column letters.
    pub fn substitute(&self, formula: &str, headers: &HeaderMap) -> String {
        let body = formula.strip_prefix('=').unwrap_or(formula);

        let mut result = String::with_capacity(body.len());
        let mut last = 0;
        for token in self.scanner.scan(body) {
            result.push_str(&body[last..token.start]);
            let name = letters_to_col(token.letters)
                .and_then(|col| headers.get(col))
                .filter(|name| !name.is_empty());
            result.push_str(name.unwrap_or(token.letters));
            last = token.end;
        }
        result.push_str(&body[last..]);

        result
    }
}
