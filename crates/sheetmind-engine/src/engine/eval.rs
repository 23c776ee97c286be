//! Formula evaluation.
//!
//! A formula is evaluated in three passes over its text:
//!
//! 1. Range functions such as `SUM(A1:B5)` are replaced by their value.
//! 2. Remaining cell references such as `B2` are replaced by the number the
//!    referenced cell holds.
//! 3. The resulting plain arithmetic is computed by [`evaluate_expression`].
//!
//! # Formula cells contribute zero
//!
//! A referenced cell whose content is itself a formula is never evaluated: it
//! contributes `0`, both as a bare reference and inside a range. Evaluation is
//! therefore non-recursive, needs no dependency ordering, and always
//! terminates, even for circular references such as `A1 = "=B1"`,
//! `B1 = "=A1"`. The price is that formulas cannot build on the results of
//! other formulas.

use log::debug;
use regex::Captures;
use std::fmt;

use super::arith::evaluate_expression;
use super::cell_ref::{CellRef, embedded_refs, parse_cell_address};
use super::error::{ArithError, EvalError, FormulaFault};
use super::format::{format_number, format_operand};
use super::range::CellRange;
use super::snapshot::{SheetSnapshot, is_formula};
use crate::builtins::{range_builtin, range_fn_re, range_stats};

/// Display text for a cell whose formula failed to evaluate.
pub const ERROR_MARKER: &str = "#ERROR";

/// The value shown for a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayValue {
    /// Literal (non-formula) content, shown as written.
    Text(String),
    /// Result of a formula.
    Number(f64),
}

impl DisplayValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DisplayValue::Number(n) => Some(*n),
            DisplayValue::Text(_) => None,
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Text(s) => f.write_str(s),
            DisplayValue::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

/// Evaluate raw cell content against a snapshot of the sheet.
///
/// Content that does not start with `=` is returned unchanged as
/// [`DisplayValue::Text`].
pub fn evaluate(formula: &str, snapshot: &SheetSnapshot) -> Result<DisplayValue, EvalError> {
    let Some(body) = formula.strip_prefix('=') else {
        return Ok(DisplayValue::Text(formula.to_string()));
    };

    evaluate_body(body.trim(), snapshot)
        .map(DisplayValue::Number)
        .map_err(|cause| {
            debug!("Formula {:?} failed: {}", formula, cause);
            EvalError::Formula {
                formula: formula.to_string(),
                cause,
            }
        })
}

/// Evaluate and render for display, using [`ERROR_MARKER`] for any failure.
pub fn render(formula: &str, snapshot: &SheetSnapshot) -> String {
    match evaluate(formula, snapshot) {
        Ok(value) => value.to_string(),
        Err(_) => ERROR_MARKER.to_string(),
    }
}

fn evaluate_body(expr: &str, snapshot: &SheetSnapshot) -> Result<f64, FormulaFault> {
    let with_ranges = substitute_range_calls(expr, snapshot)?;
    let arithmetic = substitute_cell_refs(&with_ranges, snapshot)?;
    debug!("Substituted {:?} -> {:?}", expr, arithmetic);
    Ok(evaluate_expression(&arithmetic)?)
}

fn checked_ref(text: &str, snapshot: &SheetSnapshot) -> Result<CellRef, FormulaFault> {
    let cell = parse_cell_address(text)?;
    if !snapshot.in_bounds(&cell) {
        return Err(FormulaFault::OutOfBounds(cell));
    }
    Ok(cell)
}

/// Replace every match in `text` with the output of `replace`, stopping at the
/// first error.
fn try_replace_all<'t, I, F>(
    text: &'t str,
    matches: I,
    mut replace: F,
) -> Result<String, FormulaFault>
where
    I: IntoIterator<Item = Captures<'t>>,
    F: FnMut(&Captures) -> Result<String, FormulaFault>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in matches {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&replace(&caps)?);
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(out)
}

fn substitute_range_calls(expr: &str, snapshot: &SheetSnapshot) -> Result<String, FormulaFault> {
    try_replace_all(expr, range_fn_re().captures_iter(expr), |caps| {
        let Some(builtin) = range_builtin(&caps[1]) else {
            return Ok(caps[0].to_string());
        };
        let range = CellRange::new(
            checked_ref(&caps[2], snapshot)?,
            checked_ref(&caps[3], snapshot)?,
        );

        let value = (builtin.apply)(&range_stats(&range, snapshot));
        if !value.is_finite() {
            return Err(ArithError::Overflow.into());
        }
        Ok(format_operand(value))
    })
}

fn substitute_cell_refs(expr: &str, snapshot: &SheetSnapshot) -> Result<String, FormulaFault> {
    try_replace_all(expr, embedded_refs(expr), |caps| {
        let cell = checked_ref(&caps[0], snapshot)?;
        if is_formula(snapshot.get(&cell)) {
            debug!("{} holds a formula; substituting 0", cell);
        }
        Ok(format_operand(snapshot.numeric_value(&cell).unwrap_or(0.0)))
    })
}
