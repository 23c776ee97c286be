//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and zero-indexed row/column coordinates.
//!
//! # Examples
//!
//! ```
//! use sheetmind_engine::engine::{CellRef, parse_cell_address};
//!
//! let cell = parse_cell_address("B3").unwrap();
//! assert_eq!(cell, CellRef::new(2, 1));
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::error::AddressError;

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn new(row: u32, col: u32) -> CellRef {
        CellRef { row, col }
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = u64::from(col) + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }

    /// Decode uppercase column letters (A -> 0, Z -> 25, AA -> 26).
    /// Returns None for non-letters or when the index does not fit in a `u32`.
    pub fn letters_to_col(letters: &str) -> Option<u32> {
        if letters.is_empty() {
            return None;
        }
        let mut acc = 0u64;
        for c in letters.bytes() {
            if !c.is_ascii_uppercase() {
                return None;
            }
            let digit = u64::from(c - b'A') + 1;
            acc = acc.checked_mul(26)?.checked_add(digit)?;
        }
        u32::try_from(acc.checked_sub(1)?).ok()
    }
}

fn address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Z]+)(?<numbers>[0-9]+)$")
            .expect("cell address regex must compile")
    })
}

/// Parse a cell address in A1 notation (uppercase letters, then a 1-based row).
pub fn parse_cell_address(text: &str) -> Result<CellRef, AddressError> {
    let malformed = || AddressError::Malformed(text.to_string());

    let caps = address_re().captures(text).ok_or_else(malformed)?;
    let col = CellRef::letters_to_col(&caps["letters"]).ok_or_else(malformed)?;
    let row = caps["numbers"]
        .parse::<u32>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(malformed)?;

    Ok(CellRef::new(row, col))
}

fn embedded_ref_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Z]+[0-9]+\b").expect("cell reference regex must compile")
    })
}

/// Cell references embedded in formula text, left to right.
///
/// A letters-then-digits run directly after a digit or `.` is the exponent of
/// a number such as `2.E5`, not a reference, and is skipped.
pub(crate) fn embedded_refs(text: &str) -> impl Iterator<Item = Captures<'_>> {
    embedded_ref_re().captures_iter(text).filter(move |caps| {
        caps.get(0).is_some_and(|m| {
            !text[..m.start()].ends_with(|c: char| c.is_ascii_digit() || c == '.')
        })
    })
}

impl std::str::FromStr for CellRef {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cell_address(s)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            CellRef::col_to_letters(self.col),
            u64::from(self.row) + 1
        )
    }
}
