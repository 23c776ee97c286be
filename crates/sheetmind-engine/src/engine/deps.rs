//! Reference extraction from formula strings.
//!
//! Finds the cells a formula reads directly (e.g. `A1`, or every cell of
//! `SUM(B2:C5)`). Callers use this to work out which displayed cells change
//! when a cell is edited. Because formula cells never evaluate other formulas,
//! direct references are the complete set: there are no transitive ones.

use std::collections::HashSet;

use super::cell_ref::{CellRef, embedded_refs, parse_cell_address};
use super::range::CellRange;
use super::snapshot::is_formula;

const MAX_DEPENDENCY_RANGE_CELLS: u64 = 1_000_000;

/// Extract all cell references from raw cell content.
///
/// Range-function cells come first (row-major per range), then bare
/// references, each cell once. Non-formula content references nothing, and
/// malformed addresses are skipped.
pub fn references(content: &str) -> Vec<CellRef> {
    let Some(body) = content.strip_prefix('=') else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut deps = Vec::new();
    let mut push = |cell: CellRef| {
        if seen.insert(cell) {
            deps.push(cell);
        }
    };

    // Match range functions like SUM(A1:B5)
    let range_re = crate::builtins::range_fn_re();
    for caps in range_re.captures_iter(body) {
        let (Ok(start), Ok(end)) = (parse_cell_address(&caps[2]), parse_cell_address(&caps[3]))
        else {
            continue;
        };
        let range = CellRange::new(start, end);
        if range.cell_count() > MAX_DEPENDENCY_RANGE_CELLS {
            continue;
        }
        range.cells().for_each(&mut push);
    }

    // Remove range calls so their corners are not counted again as bare refs.
    let without_ranges = range_re.replace_all(body, " ");
    for caps in embedded_refs(&without_ranges) {
        if let Ok(cell) = parse_cell_address(&caps[0]) {
            push(cell);
        }
    }

    deps
}

/// Whether `content` reads `cell` directly.
pub fn references_cell(content: &str, cell: &CellRef) -> bool {
    is_formula(content) && references(content).contains(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(names: &[&str]) -> Vec<CellRef> {
        names.iter().map(|n| parse_cell_address(n).unwrap()).collect()
    }

    #[test]
    fn test_references_ranges_then_cells() {
        let deps = references("=B3 + SUM(A1:A2) + B3 + A1");
        assert_eq!(deps, cells(&["A1", "A2", "B3"]));
    }

    #[test]
    fn test_references_non_formula() {
        assert!(references("A1+B2").is_empty());
        assert!(references("").is_empty());
    }

    #[test]
    fn test_references_skips_malformed_and_oversized() {
        let deps = references("=SUM(A1:A1000001)+A0+B2");
        assert_eq!(deps, cells(&["B2"]));
    }

    #[test]
    fn test_exponent_is_not_a_reference() {
        assert_eq!(references("=2.E5+E6"), cells(&["E6"]));
    }

    #[test]
    fn test_references_cell() {
        let target = parse_cell_address("C2").unwrap();
        assert!(references_cell("=AVERAGE(B1:D4)", &target));
        assert!(references_cell("=C2*2", &target));
        assert!(!references_cell("C2", &target));
        assert!(!references_cell("=C3", &target));
    }
}
