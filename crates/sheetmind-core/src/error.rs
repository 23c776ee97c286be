//! Error types for Sheetmind core.

use std::path::PathBuf;
use thiserror::Error;

use sheetmind_engine::engine::{AddressError, CellRef};

/// Errors that can occur while editing or configuring a sheet
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings in {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("Cell {0} is outside the sheet")]
    OutOfBounds(CellRef),

    #[error("No pending edit for {0}")]
    NoPendingEdit(CellRef),
}

pub type Result<T> = std::result::Result<T, SheetError>;
