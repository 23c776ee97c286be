//! Error types for the formula engine.

use thiserror::Error;

use super::cell_ref::CellRef;

/// A cell or range address that does not decode to coordinates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Malformed address: {0}")]
    Malformed(String),
}

/// Failures of the arithmetic evaluator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArithError {
    #[error("Malformed expression: {0}")]
    Malformed(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    Overflow,
}

/// What went wrong inside a formula.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaFault {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("Reference {0} is outside the sheet")]
    OutOfBounds(CellRef),

    #[error(transparent)]
    Arithmetic(#[from] ArithError),
}

/// Errors produced by [`evaluate`](super::evaluate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Cannot evaluate {formula}: {cause}")]
    Formula {
        formula: String,
        #[source]
        cause: FormulaFault,
    },
}

impl EvalError {
    /// The formula text that failed.
    pub fn formula(&self) -> &str {
        match self {
            EvalError::Formula { formula, .. } => formula,
        }
    }

    pub fn cause(&self) -> &FormulaFault {
        match self {
            EvalError::Formula { cause, .. } => cause,
        }
    }
}
