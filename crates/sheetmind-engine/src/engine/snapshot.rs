//! Read-only sheet snapshots handed to the evaluator.
//!
//! A [`SheetSnapshot`] maps cells to their raw content text. Absent cells read
//! as the empty string. The evaluator only ever borrows a snapshot, so one
//! snapshot can be shared across threads and evaluation calls.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::cell_ref::{CellRef, parse_cell_address};
use super::error::AddressError;

/// Grid dimensions. Cells with `row < rows` and `col < cols` are in bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SheetBounds {
    pub rows: u32,
    pub cols: u32,
}

impl SheetBounds {
    pub fn new(rows: u32, cols: u32) -> SheetBounds {
        SheetBounds { rows, cols }
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }
}

/// Immutable point-in-time view of a sheet's raw cell contents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SheetSnapshot {
    cells: HashMap<CellRef, String>,
    bounds: Option<SheetBounds>,
}

impl SheetSnapshot {
    pub fn new() -> SheetSnapshot {
        SheetSnapshot::default()
    }

    /// Build a snapshot from `(address, content)` pairs in A1 notation.
    pub fn from_a1<'a, I>(entries: I) -> Result<SheetSnapshot, AddressError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        entries
            .into_iter()
            .map(|(address, content)| {
                parse_cell_address(address).map(|cell| (cell, content.to_string()))
            })
            .collect()
    }

    /// Restrict valid references to a `rows` x `cols` grid.
    pub fn with_bounds(mut self, rows: u32, cols: u32) -> SheetSnapshot {
        self.bounds = Some(SheetBounds::new(rows, cols));
        self
    }

    pub fn with_cell(mut self, cell: CellRef, content: impl Into<String>) -> SheetSnapshot {
        self.cells.insert(cell, content.into());
        self
    }

    pub fn bounds(&self) -> Option<SheetBounds> {
        self.bounds
    }

    /// Whether `cell` may be referenced. Unbounded snapshots accept everything.
    pub fn in_bounds(&self, cell: &CellRef) -> bool {
        self.bounds.is_none_or(|b| b.contains(cell))
    }

    /// Raw content of a cell; empty when absent.
    pub fn get(&self, cell: &CellRef) -> &str {
        self.cells.get(cell).map(String::as_str).unwrap_or("")
    }

    /// Number of populated entries.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellRef, &str)> {
        self.cells.iter().map(|(cell, content)| (cell, content.as_str()))
    }

    /// The number a cell contributes when another formula reads it.
    ///
    /// Formula cells are never evaluated here: they contribute `None`, exactly
    /// like text that is not a number. Callers substitute `0` for `None`.
    pub fn numeric_value(&self, cell: &CellRef) -> Option<f64> {
        let content = self.get(cell);
        if is_formula(content) {
            return None;
        }
        coerce_number(content)
    }
}

impl FromIterator<(CellRef, String)> for SheetSnapshot {
    fn from_iter<T: IntoIterator<Item = (CellRef, String)>>(iter: T) -> Self {
        SheetSnapshot {
            cells: iter.into_iter().collect(),
            bounds: None,
        }
    }
}

/// Whether raw cell content is a formula.
pub fn is_formula(content: &str) -> bool {
    content.starts_with('=')
}

/// Coerce raw cell text to a number.
///
/// Accepts an optionally signed decimal literal with optional fraction and
/// exponent, surrounded by optional whitespace. Words such as `inf` or `NaN`
/// are not numbers.
pub fn coerce_number(content: &str) -> Option<f64> {
    let text = content.trim();
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    let starts_like_number = digits
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_digit() || b == b'.');
    if !starts_like_number {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number_accepts_decimal_literals() {
        assert_eq!(coerce_number("42"), Some(42.0));
        assert_eq!(coerce_number(" -3.5 "), Some(-3.5));
        assert_eq!(coerce_number("+.5"), Some(0.5));
        assert_eq!(coerce_number("1e3"), Some(1000.0));
        assert_eq!(coerce_number("2."), Some(2.0));
    }

    #[test]
    fn test_coerce_number_rejects_words() {
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("   "), None);
        assert_eq!(coerce_number("x"), None);
        assert_eq!(coerce_number("inf"), None);
        assert_eq!(coerce_number("-infinity"), None);
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("12abc"), None);
        assert_eq!(coerce_number("1e999"), None);
    }

    #[test]
    fn test_absent_cells_read_empty() {
        let snapshot = SheetSnapshot::from_a1([("A1", "5")]).unwrap();
        assert_eq!(snapshot.get(&CellRef::new(0, 0)), "5");
        assert_eq!(snapshot.get(&CellRef::new(9, 9)), "");
    }

    #[test]
    fn test_numeric_value_ignores_formulas() {
        let snapshot = SheetSnapshot::from_a1([("A1", "=1+1"), ("A2", "7"), ("A3", "hi")]).unwrap();
        assert_eq!(snapshot.numeric_value(&CellRef::new(0, 0)), None);
        assert_eq!(snapshot.numeric_value(&CellRef::new(1, 0)), Some(7.0));
        assert_eq!(snapshot.numeric_value(&CellRef::new(2, 0)), None);
    }

    #[test]
    fn test_bounds() {
        let snapshot = SheetSnapshot::new().with_bounds(2, 3);
        assert!(snapshot.in_bounds(&CellRef::new(1, 2)));
        assert!(!snapshot.in_bounds(&CellRef::new(2, 0)));
        assert!(!snapshot.in_bounds(&CellRef::new(0, 3)));
        assert!(SheetSnapshot::new().in_bounds(&CellRef::new(u32::MAX, u32::MAX)));
    }

    #[test]
    fn test_from_a1_rejects_bad_address() {
        assert!(SheetSnapshot::from_a1([("1A", "5")]).is_err());
    }
}
