// history.rs

use std::collections::VecDeque;
use tracing::debug;

use crate::record::CalculationRecord;

/// Bounded log of active calculations plus the records parked by `undo`.
///
/// `active` is oldest-first and never longer than `max_size`; when it is full
/// the oldest record is evicted for good. `redo` holds undone records with the
/// most recently undone one on top, and every `append` empties it.
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    pub(crate) active: VecDeque<CalculationRecord>,
    pub(crate) redo: Vec<CalculationRecord>,
    max_size: usize,
}

impl HistoryLedger {
    /// `max_size` of zero is treated as one.
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            active: VecDeque::with_capacity(max_size.min(1024)),
            redo: Vec::new(),
            max_size,
        }
    }

    /// Append a fresh calculation. Returns the record evicted to stay within
    /// `max_size`, if any.
    pub fn append(&mut self, record: CalculationRecord) -> Option<CalculationRecord> {
        let evicted = if self.active.len() >= self.max_size {
            self.active.pop_front()
        } else {
            None
        };
        if let Some(old) = &evicted {
            debug!(evicted = %old, "history full, evicted oldest record");
        }
        self.active.push_back(record);
        self.redo.clear();
        evicted
    }

    pub fn get_all(&self) -> Vec<CalculationRecord> {
        self.active.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&CalculationRecord> {
        self.active.back()
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.redo.clear();
    }

    /// Install a loaded history. Redo state is dropped. When `records` is
    /// longer than `max_size` only the newest records are kept; the number
    /// dropped is returned.
    pub fn replace_all(&mut self, records: Vec<CalculationRecord>) -> usize {
        let dropped = records.len().saturating_sub(self.max_size);
        self.active = records.into_iter().skip(dropped).collect();
        self.redo.clear();
        dropped
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}
