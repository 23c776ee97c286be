//! Built-in range functions and their metadata.
//!
//! Conventions:
//! - Spreadsheet-facing built-in names are ALL CAPS (e.g. `SUM`, `AVERAGE`).
//! - Every built-in takes exactly one `<cell>:<cell>` range argument.
//! - If you add a new built-in range function, add it to `RANGE_BUILTINS`;
//!   the call regex is generated from that table.

use regex::Regex;
use std::sync::OnceLock;

use crate::engine::{CellRange, SheetSnapshot};

/// Numeric summary of the cells in a range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RangeStats {
    /// Sum of every numeric cell.
    pub sum: f64,
    /// How many cells held a number.
    pub count: usize,
}

pub struct RangeBuiltin {
    pub sheet_name: &'static str,
    pub description: &'static str,
    pub apply: fn(&RangeStats) -> f64,
}

pub const RANGE_BUILTINS: &[RangeBuiltin] = &[
    RangeBuiltin {
        sheet_name: "SUM",
        description: "Sum of numeric values in a cell range",
        apply: sum,
    },
    RangeBuiltin {
        sheet_name: "AVERAGE",
        description: "Average of numeric values in a cell range (0 when there are none)",
        apply: average,
    },
];

fn sum(stats: &RangeStats) -> f64 {
    stats.sum
}

fn average(stats: &RangeStats) -> f64 {
    if stats.count == 0 {
        0.0
    } else {
        stats.sum / stats.count as f64
    }
}

/// Regex that matches built-in range calls like `SUM(A1:B5)`.
///
/// Captures:
/// - group 1: function name (e.g. `SUM`)
/// - group 2: first corner (e.g. `A1`)
/// - group 3: second corner (e.g. `B5`)
pub fn range_fn_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let names = RANGE_BUILTINS
            .iter()
            .map(|b| b.sheet_name)
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(
            r"\b({})\(\s*([A-Z]+[0-9]+):([A-Z]+[0-9]+)\s*\)",
            names
        ))
        .expect("built-in range regex must compile")
    })
}

pub fn range_builtin(sheet_name: &str) -> Option<&'static RangeBuiltin> {
    RANGE_BUILTINS.iter().find(|b| b.sheet_name == sheet_name)
}

/// Summarize the numeric cells of `range`.
///
/// Formula cells and non-numeric text are skipped. Whichever of the rectangle
/// and the populated snapshot is smaller gets scanned, and values are always
/// added in row-major order so the result does not depend on map ordering.
pub fn range_stats(range: &CellRange, snapshot: &SheetSnapshot) -> RangeStats {
    let mut stats = RangeStats::default();
    let mut add = |value: Option<f64>| {
        if let Some(n) = value {
            stats.sum += n;
            stats.count += 1;
        }
    };

    if range.cell_count() <= snapshot.len() as u64 {
        for cell in range.cells() {
            add(snapshot.numeric_value(&cell));
        }
    } else {
        let mut cells: Vec<_> = snapshot
            .iter()
            .map(|(cell, _)| *cell)
            .filter(|cell| range.contains(cell))
            .collect();
        cells.sort_unstable();
        for cell in cells {
            add(snapshot.numeric_value(&cell));
        }
    }

    stats
}
