//! Assistant-proposed edits awaiting review.
//!
//! The assistant never writes to the grid directly. Its proposals are staged
//! here, can be previewed as if applied, and are then accepted or rejected
//! cell by cell.

use log::{debug, warn};
use std::collections::HashMap;

use super::Document;
use super::ops::render_rows;
use crate::error::{Result, SheetError};
use sheetmind_engine::engine::{CellRange, CellRef, SheetSnapshot, parse_cell_address, render};

/// One staged change: the cell's content when first proposed, and the
/// proposed replacement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingEdit {
    pub cell: CellRef,
    pub before: String,
    pub after: String,
}

impl PendingEdit {
    /// Whether applying the edit would leave the cell unchanged.
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

impl Document {
    /// Stage an edit. A newer proposal for the same cell replaces the older
    /// one but keeps its `before`. When the queue is full the oldest edit is
    /// dropped.
    pub fn propose(&mut self, cell: CellRef, content: &str) -> Result<()> {
        self.check_bounds(&cell)?;

        if let Some(existing) = self.pending.iter_mut().find(|e| e.cell == cell) {
            existing.after = content.to_string();
            debug!("Updated pending edit for {}", cell);
            return Ok(());
        }

        let before = self.get_cell(&cell);
        self.pending.push(PendingEdit {
            cell,
            before,
            after: content.to_string(),
        });
        if self.pending.len() > self.settings.max_pending_edits {
            let dropped = self.pending.remove(0);
            warn!(
                "Pending edit limit ({}) reached; dropped edit for {}",
                self.settings.max_pending_edits, dropped.cell
            );
        }
        Ok(())
    }

    pub fn propose_a1(&mut self, address: &str, content: &str) -> Result<()> {
        let cell = parse_cell_address(address)?;
        self.propose(cell, content)
    }

    /// Staged edits, oldest first.
    pub fn pending(&self) -> &[PendingEdit] {
        &self.pending
    }

    pub fn is_pending(&self, cell: &CellRef) -> bool {
        self.pending.iter().any(|e| e.cell == *cell)
    }

    /// Snapshot of the sheet as it would be with every pending edit applied.
    pub fn preview_snapshot(&self) -> SheetSnapshot {
        let mut cells: HashMap<CellRef, String> = self
            .grid
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        for edit in &self.pending {
            if edit.after.is_empty() {
                cells.remove(&edit.cell);
            } else {
                cells.insert(edit.cell, edit.after.clone());
            }
        }
        self.bound(cells.into_iter().collect())
    }

    /// Display string for one cell with pending edits applied.
    pub fn preview(&self, cell: &CellRef) -> String {
        let snapshot = self.preview_snapshot();
        render(snapshot.get(cell), &snapshot)
    }

    /// Display strings for a range with pending edits applied.
    pub fn preview_range(&self, range: &CellRange) -> Result<Vec<Vec<String>>> {
        self.check_range(range)?;
        Ok(render_rows(range, &self.preview_snapshot()))
    }

    fn pending_index(&self, cell: &CellRef) -> Result<usize> {
        self.pending
            .iter()
            .position(|e| e.cell == *cell)
            .ok_or(SheetError::NoPendingEdit(*cell))
    }

    /// Apply the pending edit for `cell`. The edit stays pending if it cannot
    /// be written.
    pub fn accept(&mut self, cell: &CellRef) -> Result<()> {
        let index = self.pending_index(cell)?;
        let after = self.pending[index].after.clone();
        self.set_cell(*cell, &after)?;
        self.pending.remove(index);
        Ok(())
    }

    /// Apply every pending edit in proposal order. Returns how many were applied.
    ///
    /// Every edit is checked before any is written, so on error the grid and
    /// the pending queue are both left untouched.
    pub fn accept_all(&mut self) -> Result<usize> {
        for edit in &self.pending {
            self.check_bounds(&edit.cell)?;
        }
        let edits = std::mem::take(&mut self.pending);
        for edit in &edits {
            self.set_cell(edit.cell, &edit.after)?;
        }
        Ok(edits.len())
    }

    /// Discard the pending edit for `cell`.
    pub fn reject(&mut self, cell: &CellRef) -> Result<PendingEdit> {
        let index = self.pending_index(cell)?;
        Ok(self.pending.remove(index))
    }

    /// Discard every pending edit. Returns how many were discarded.
    pub fn reject_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }
}
