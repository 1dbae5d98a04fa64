// record.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::util::format_number;

/// One completed calculation. Fields are private so a record cannot change
/// after it has been created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    operation: String,
    operand_a: f64,
    operand_b: f64,
    result: f64,
    timestamp: DateTime<Utc>,
}

impl CalculationRecord {
    pub fn new(operation: impl Into<String>, operand_a: f64, operand_b: f64, result: f64) -> Self {
        Self::with_timestamp(operation, operand_a, operand_b, result, Utc::now())
    }

    pub fn with_timestamp(
        operation: impl Into<String>,
        operand_a: f64,
        operand_b: f64,
        result: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            operation: operation.into(),
            operand_a,
            operand_b,
            result,
            timestamp,
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn operand_a(&self) -> f64 {
        self.operand_a
    }

    pub fn operand_b(&self) -> f64 {
        self.operand_b
    }

    pub fn result(&self) -> f64 {
        self.result
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}) = {}",
            self.operation,
            format_number(self.operand_a),
            format_number(self.operand_b),
            format_number(self.result)
        )
    }
}
