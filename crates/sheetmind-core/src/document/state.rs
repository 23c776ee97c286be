use dashmap::DashMap;
use std::sync::Arc;

use super::PendingEdit;
use crate::config::Settings;
use sheetmind_engine::engine::{CellRef, SheetBounds};

/// Thread-safe sparse storage of raw cell content.
/// DashMap is internally sharded; the Arc makes clones cheap and shared.
pub type Grid = Arc<DashMap<CellRef, String>>;

/// UI-agnostic document state for one sheet.
pub struct Document {
    /// Raw cell content; absent cells are empty
    pub grid: Grid,
    /// Grid size and editing limits
    pub settings: Settings,
    /// Whether the grid has been modified
    pub modified: bool,
    /// Assistant-proposed edits awaiting review, oldest first
    pub(crate) pending: Vec<PendingEdit>,
}

impl Document {
    /// Create an empty document with default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Document {
            grid: Arc::new(DashMap::new()),
            settings,
            modified: false,
            pending: Vec::new(),
        }
    }

    pub fn bounds(&self) -> SheetBounds {
        SheetBounds::new(self.settings.rows, self.settings.cols)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
