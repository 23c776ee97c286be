use log::{debug, warn};

use super::Document;
use crate::error::{Result, SheetError};
use sheetmind_engine::engine::{
    CellRange, CellRef, SheetSnapshot, parse_cell_address, references_cell, render,
};

impl Document {
    pub(crate) fn check_bounds(&self, cell_ref: &CellRef) -> Result<()> {
        if self.settings.enforce_bounds && !self.bounds().contains(cell_ref) {
            warn!("Rejected edit outside the sheet at {}", cell_ref);
            return Err(SheetError::OutOfBounds(*cell_ref));
        }
        Ok(())
    }

    /// Reject a range that reaches past the sheet edge. Checking the
    /// bottom-right corner is enough because ranges are normalized.
    pub(crate) fn check_range(&self, range: &CellRange) -> Result<()> {
        if self.settings.enforce_bounds && !self.bounds().contains(&range.end) {
            warn!("Rejected range {} outside the sheet", range);
            return Err(SheetError::OutOfBounds(range.end));
        }
        Ok(())
    }

    /// Store raw content for a cell. Empty content clears the cell.
    /// Returns the previous content, if any.
    pub fn set_cell(&mut self, cell_ref: CellRef, content: &str) -> Result<Option<String>> {
        self.check_bounds(&cell_ref)?;
        let previous = if content.is_empty() {
            self.grid.remove(&cell_ref).map(|(_, old)| old)
        } else {
            self.grid.insert(cell_ref, content.to_string())
        };
        debug!("Set {} to {:?}", cell_ref, content);
        self.modified = true;
        Ok(previous)
    }

    /// Like [`Document::set_cell`], with the cell given in A1 notation.
    pub fn set_cell_a1(&mut self, address: &str, content: &str) -> Result<Option<String>> {
        let cell_ref = parse_cell_address(address)?;
        self.set_cell(cell_ref, content)
    }

    /// Raw content of a cell (empty when unset).
    pub fn get_cell(&self, cell_ref: &CellRef) -> String {
        self.grid
            .get(cell_ref)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Clear the specified cell
    pub fn clear_cell(&mut self, cell_ref: &CellRef) -> Option<String> {
        let previous = self.grid.remove(cell_ref).map(|(_, old)| old);
        if previous.is_some() {
            self.modified = true;
        }
        previous
    }

    /// Remove every cell and discard pending edits.
    pub fn clear(&mut self) {
        if !self.grid.is_empty() {
            self.modified = true;
        }
        self.grid.clear();
        self.pending.clear();
    }

    /// Number of non-empty cells.
    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    /// Point-in-time copy of the grid for evaluation.
    pub fn snapshot(&self) -> SheetSnapshot {
        let snapshot: SheetSnapshot = self
            .grid
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        self.bound(snapshot)
    }

    pub(crate) fn bound(&self, snapshot: SheetSnapshot) -> SheetSnapshot {
        if self.settings.enforce_bounds {
            snapshot.with_bounds(self.settings.rows, self.settings.cols)
        } else {
            snapshot
        }
    }

    /// Display string for one cell.
    pub fn display_value(&self, cell_ref: &CellRef) -> String {
        let snapshot = self.snapshot();
        render(snapshot.get(cell_ref), &snapshot)
    }

    /// Display strings for every cell of `range`, row by row, all evaluated
    /// against the same snapshot.
    pub fn render(&self, range: &CellRange) -> Result<Vec<Vec<String>>> {
        self.check_range(range)?;
        Ok(render_rows(range, &self.snapshot()))
    }

    /// Formula cells that read `cell_ref` directly, in row-major order.
    pub fn dependents_of(&self, cell_ref: &CellRef) -> Vec<CellRef> {
        let mut dependents: Vec<CellRef> = self
            .grid
            .iter()
            .filter(|entry| references_cell(entry.value(), cell_ref))
            .map(|entry| *entry.key())
            .collect();
        dependents.sort_unstable();
        dependents
    }
}

pub(crate) fn render_rows(range: &CellRange, snapshot: &SheetSnapshot) -> Vec<Vec<String>> {
    (range.start.row..=range.end.row)
        .map(|row| {
            (range.start.col..=range.end.col)
                .map(|col| {
                    let cell_ref = CellRef::new(row, col);
                    render(snapshot.get(&cell_ref), snapshot)
                })
                .collect()
        })
        .collect()
}
