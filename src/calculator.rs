// calculator.rs

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::config::CalculatorConfig;
use crate::error::{CalcError, PersistenceError, Result};
use crate::history::HistoryLedger;
use crate::operations::OperationRegistry;
use crate::persistence::HistoryStore;
use crate::record::CalculationRecord;
use crate::util::round_to_precision;

/// Notified after every successful calculation.
pub trait CalculationObserver {
    fn on_calculation(&self, record: &CalculationRecord);
}

pub struct LoggingObserver;

/// Handle returned by [`Calculator::add_observer`], used to detach it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(usize);

impl CalculationObserver for LoggingObserver {
    fn on_calculation(&self, record: &CalculationRecord) {
        info!(
            "Calculation performed: {} ({}, {}) = {}",
            record.operation(),
            record.operand_a(),
            record.operand_b(),
            record.result()
        );
    }
}

/// Outcome of a calculation that made it into the history. `save_error` is
/// set when auto-save ran and failed; the record stays in history either way.
#[derive(Debug)]
pub struct Evaluation {
    pub record: CalculationRecord,
    pub save_error: Option<PersistenceError>,
}

/// Owns the history and everything that feeds it. One instance per session.
pub struct Calculator {
    config: CalculatorConfig,
    registry: OperationRegistry,
    ledger: HistoryLedger,
    store: Box<dyn HistoryStore>,
    observers: Vec<(ObserverId, Box<dyn CalculationObserver>)>,
    next_observer: usize,
}

impl Calculator {
    pub fn new(config: CalculatorConfig, store: Box<dyn HistoryStore>) -> Self {
        let ledger = HistoryLedger::new(config.max_history_size);
        Self {
            config,
            registry: OperationRegistry::default(),
            ledger,
            store,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn CalculationObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns false when `id` was already removed.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        match self.observers.iter().position(|(other, _)| *other == id) {
            Some(i) => {
                self.observers.remove(i);
                debug!(observer = id.0, "observer removed");
                true
            }
            None => false,
        }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut OperationRegistry {
        &mut self.registry
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn store_location(&self) -> String {
        self.store.location()
    }

    /// Check that `operation` exists before the caller asks for operands.
    pub fn ensure_operation(&self, operation: &str) -> Result<()> {
        if self.registry.contains(operation) {
            Ok(())
        } else {
            Err(CalcError::UnknownOperation(operation.to_string()))
        }
    }

    pub fn parse_operand(&self, text: &str) -> Result<f64> {
        let text = text.trim();
        let value: f64 = text
            .parse()
            .map_err(|_| CalcError::validation(format!("Invalid number format: {}", text)))?;
        if !value.is_finite() {
            return Err(CalcError::validation(format!("Invalid number format: {}", text)));
        }
        if value.abs() > self.config.max_input_value {
            return Err(CalcError::validation(format!(
                "Value exceeds maximum allowed: {}",
                self.config.max_input_value
            )));
        }
        Ok(value)
    }

    /// Validate, compute, round and record one operation. Nothing is
    /// recorded unless the computation succeeds.
    pub fn calculate(&mut self, operation: &str, a: &str, b: &str) -> Result<Evaluation> {
        self.ensure_operation(operation)?;
        let a = self.parse_operand(a)?;
        let b = self.parse_operand(b)?;
        let raw = self.registry.compute(operation, a, b).map_err(|e| {
            error!(operation, a, b, error = %e, "operation failed");
            e
        })?;
        let result = round_to_precision(raw, self.config.precision);

        let mut timestamp = Utc::now();
        if let Some(latest) = self.ledger.latest() {
            timestamp = timestamp.max(latest.timestamp());
        }
        let record = CalculationRecord::with_timestamp(operation.to_lowercase(), a, b, result, timestamp);
        self.ledger.append(record.clone());
        for (_, observer) in &self.observers {
            observer.on_calculation(&record);
        }

        let save_error = if self.config.auto_save {
            self.save().err()
        } else {
            None
        };
        if let Some(e) = &save_error {
            warn!(error = %e, "auto-save failed");
        }
        Ok(Evaluation { record, save_error })
    }

    pub fn history(&self) -> Vec<CalculationRecord> {
        self.ledger.get_all()
    }

    pub fn clear_history(&mut self) {
        self.ledger.clear();
        info!("History cleared");
    }

    pub fn undo(&mut self) -> Result<CalculationRecord> {
        self.ledger.undo()
    }

    pub fn redo(&mut self) -> Result<CalculationRecord> {
        self.ledger.redo()
    }

    pub fn save(&self) -> Result<(), PersistenceError> {
        self.store.save(&self.ledger.get_all())
    }

    /// Replace the history with the stored one. On any failure the current
    /// history is left exactly as it was.
    pub fn load(&mut self) -> Result<usize> {
        let records = self.store.load()?;
        if let Some(unknown) = records.iter().find(|r| !self.registry.contains(r.operation())) {
            return Err(PersistenceError::malformed(
                self.store.location(),
                format!("unknown operation '{}'", unknown.operation()),
            )
            .into());
        }
        let dropped = self.ledger.replace_all(records);
        if dropped > 0 {
            warn!(dropped, max = self.ledger.max_size(), "stored history longer than limit, oldest dropped");
        }
        Ok(self.ledger.len())
    }

    /// Startup load: a missing or unreadable history leaves an empty ledger.
    pub fn load_on_startup(&mut self) {
        match self.load() {
            Ok(n) => info!(records = n, "Calculator initialized"),
            Err(e) => warn!(error = %e, "Could not load existing history"),
        }
    }
}
