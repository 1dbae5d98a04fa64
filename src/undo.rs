// undo.rs

use tracing::debug;

use crate::error::{CalcError, Result};
use crate::history::HistoryLedger;
use crate::record::CalculationRecord;

impl HistoryLedger {
    /// Move the newest active record onto the redo stack and return it.
    /// Records already evicted by the size bound are out of reach.
    pub fn undo(&mut self) -> Result<CalculationRecord> {
        let record = self.active.pop_back().ok_or(CalcError::EmptyHistory)?;
        debug!(record = %record, "undo");
        self.redo.push(record.clone());
        Ok(record)
    }

    /// Restore the most recently undone record as the newest active one.
    pub fn redo(&mut self) -> Result<CalculationRecord> {
        let record = self.redo.pop().ok_or(CalcError::NothingToRedo)?;
        // redo only holds records undone since the last append, so they fit
        debug_assert!(self.active.len() < self.max_size());
        debug!(record = %record, "redo");
        self.active.push_back(record.clone());
        Ok(record)
    }
}
