//! Formula engine API.
//!
//! This module provides the computation engine for the spreadsheet:
//!
//! - [`CellRef`], [`parse_cell_address`] - Cell addresses (A1 notation ↔ row/col indices)
//! - [`CellRange`], [`parse_range`] - Normalized rectangular ranges
//! - [`SheetSnapshot`] - Read-only sheet contents handed to the evaluator
//! - [`evaluate`], [`render`] - Turn cell content into a display value
//! - [`evaluate_expression`] - Safe arithmetic over substituted formulas
//! - [`references`] - Cells a formula reads
//! - [`format_number`] - Format values for display

mod arith;
mod cell_ref;
mod deps;
mod error;
mod eval;
mod format;
mod range;
mod snapshot;

pub use arith::evaluate_expression;
pub use cell_ref::{CellRef, parse_cell_address};
pub use deps::{references, references_cell};
pub use error::{AddressError, ArithError, EvalError, FormulaFault};
pub use eval::{DisplayValue, ERROR_MARKER, evaluate, render};
pub use format::format_number;
pub use range::{CellRange, parse_range};
pub use snapshot::{SheetBounds, SheetSnapshot, coerce_number, is_formula};

pub use crate::builtins::{RANGE_BUILTINS, RangeBuiltin, RangeStats};
