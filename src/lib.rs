//! Interactive two-operand calculator with a bounded, undoable history that
//! can be saved to and loaded from a JSON file.

pub mod calculator;
pub mod commands;
pub mod completion;
pub mod config;
pub mod error;
pub mod history;
pub mod operations;
pub mod parser;
pub mod persistence;
pub mod record;
pub mod repl;
pub mod util;

mod undo;

pub use calculator::{CalculationObserver, Calculator, Evaluation, LoggingObserver, ObserverId};
pub use config::{CalculatorConfig, ConfigError};
pub use error::{CalcError, PersistenceError};
pub use history::HistoryLedger;
pub use operations::{OperationFn, OperationRegistry};
pub use persistence::{HistoryStore, JsonFileStore, MemoryStore};
pub use record::CalculationRecord;
