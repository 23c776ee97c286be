//! Error types for the command-line front end

use thiserror::Error;

/// Errors in the command-line arguments
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("Invalid assignment '{0}' (expected CELL=CONTENT, e.g. A1=42)")]
    InvalidAssignment(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("Nothing to do: pass --command, --render or --list-functions")]
    NothingToDo,
}
