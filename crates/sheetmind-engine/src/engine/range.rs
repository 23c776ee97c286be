//! Rectangular cell ranges (`A1:B5`).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cell_ref::{CellRef, parse_cell_address};
use super::error::AddressError;

/// A rectangle of cells. `start` is always the top-left corner and `end` the
/// bottom-right one, whatever order the corners were written in.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    /// Build a range from two opposite corners, normalizing their order.
    pub fn new(a: CellRef, b: CellRef) -> CellRange {
        CellRange {
            start: CellRef::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellRef::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn height(&self) -> u64 {
        u64::from(self.end.row - self.start.row) + 1
    }

    pub fn width(&self) -> u64 {
        u64::from(self.end.col - self.start.col) + 1
    }

    /// Number of cells covered. Saturates instead of overflowing.
    pub fn cell_count(&self) -> u64 {
        self.height().saturating_mul(self.width())
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        (self.start.row..=self.end.row).contains(&cell.row)
            && (self.start.col..=self.end.col).contains(&cell.col)
    }

    /// Iterate the covered cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellRef> + use<> {
        let CellRange { start, end } = *self;
        (start.row..=end.row)
            .flat_map(move |row| (start.col..=end.col).map(move |col| CellRef::new(row, col)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl std::str::FromStr for CellRange {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_range(s)
    }
}

/// Parse a range like "A1:B5". Both corners must be valid cell addresses
/// separated by a single `:`.
pub fn parse_range(text: &str) -> Result<CellRange, AddressError> {
    let mut parts = text.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Ok(CellRange::new(
            parse_cell_address(first)?,
            parse_cell_address(second)?,
        )),
        _ => Err(AddressError::Malformed(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_normalizes_corners() {
        let forward = parse_range("A1:B2").unwrap();
        assert_eq!(parse_range("B2:A1").unwrap(), forward);
        assert_eq!(parse_range("A2:B1").unwrap(), forward);
        assert_eq!(forward.start, CellRef::new(0, 0));
        assert_eq!(forward.end, CellRef::new(1, 1));
    }

    #[test]
    fn test_parse_range_rejects_bad_shapes() {
        assert!(parse_range("A1").is_err());
        assert!(parse_range("A1:").is_err());
        assert!(parse_range(":B2").is_err());
        assert!(parse_range("A1:B2:C3").is_err());
        assert!(parse_range("A0:B2").is_err());
        assert!(parse_range("A1 : B2").is_err());
    }

    #[test]
    fn test_cells_row_major() {
        let range = parse_range("B1:A2").unwrap();
        let cells: Vec<String> = range.cells().map(|c| c.to_string()).collect();
        assert_eq!(cells, vec!["A1", "B1", "A2", "B2"]);
        assert_eq!(range.cell_count(), 4);
    }

    #[test]
    fn test_contains() {
        let range = parse_range("B2:C4").unwrap();
        assert!(range.contains(&CellRef::new(1, 1)));
        assert!(range.contains(&CellRef::new(3, 2)));
        assert!(!range.contains(&CellRef::new(0, 1)));
        assert!(!range.contains(&CellRef::new(1, 3)));
    }

    #[test]
    fn test_display() {
        assert_eq!(parse_range("C3:A1").unwrap().to_string(), "A1:C3");
    }
}
