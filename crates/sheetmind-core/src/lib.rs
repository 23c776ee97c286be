//! sheetmind-core - UI-agnostic sheet store, pending edits and settings.

pub mod config;
pub mod document;
pub mod error;

pub use config::Settings;
pub use document::{Document, Grid, PendingEdit};
pub use error::{Result, SheetError};

pub use sheetmind_engine::engine::{CellRange, CellRef};
