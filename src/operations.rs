// operations.rs

use itertools::Itertools;
use std::collections::HashMap;

use crate::error::{CalcError, Result};

/// A pure binary operation. Invalid operand combinations are `CalcError::Domain`.
pub type OperationFn = fn(f64, f64) -> Result<f64>;

/// Keyword -> function table. Adding an operation is one `register` call;
/// nothing else dispatches on operation names.
#[derive(Clone)]
pub struct OperationRegistry {
    table: HashMap<String, OperationFn>,
}

impl OperationRegistry {
    pub fn empty() -> Self {
        Self { table: HashMap::new() }
    }

    pub fn register(&mut self, name: &str, op: OperationFn) {
        self.table.insert(name.to_lowercase(), op);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(&name.to_lowercase())
    }

    pub fn names(&self) -> Vec<&str> {
        self.table.keys().map(String::as_str).sorted().collect()
    }

    pub fn compute(&self, name: &str, a: f64, b: f64) -> Result<f64> {
        let op = self
            .table
            .get(&name.to_lowercase())
            .ok_or_else(|| CalcError::UnknownOperation(name.to_string()))?;
        let value = op(a, b)?;
        if !value.is_finite() {
            return Err(CalcError::domain(format!("{}({}, {}) has no finite result", name, a, b)));
        }
        Ok(value)
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("add", add);
        registry.register("subtract", subtract);
        registry.register("multiply", multiply);
        registry.register("divide", divide);
        registry.register("power", power);
        registry.register("root", root);
        registry.register("modulus", modulus);
        registry.register("int_divide", int_divide);
        registry.register("percent", percent);
        registry.register("abs_diff", abs_diff);
        registry
    }
}

impl std::fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationRegistry").field("operations", &self.names()).finish()
    }
}

fn add(a: f64, b: f64) -> Result<f64> {
    Ok(a + b)
}

fn subtract(a: f64, b: f64) -> Result<f64> {
    Ok(a - b)
}

fn multiply(a: f64, b: f64) -> Result<f64> {
    Ok(a * b)
}

fn divide(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(CalcError::domain("Division by zero is not allowed"));
    }
    Ok(a / b)
}

fn power(a: f64, b: f64) -> Result<f64> {
    if b < 0.0 {
        return Err(CalcError::domain("Negative exponents not supported"));
    }
    Ok(a.powf(b))
}

fn root(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(CalcError::domain("Zero root is undefined"));
    }
    if a < 0.0 {
        let odd_degree = b.fract() == 0.0 && b % 2.0 != 0.0;
        if !odd_degree {
            return Err(CalcError::domain("Cannot calculate an even or fractional root of a negative number"));
        }
        return Ok(-(-a).powf(1.0 / b));
    }
    Ok(a.powf(1.0 / b))
}

fn modulus(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(CalcError::domain("Modulus by zero is not allowed"));
    }
    if a < 0.0 {
        return Err(CalcError::domain("Negative dividend not allowed for modulus"));
    }
    Ok(a % b)
}

fn int_divide(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(CalcError::domain("Integer division by zero is not allowed"));
    }
    if a < 0.0 {
        return Err(CalcError::domain("Negative dividend not allowed for integer division"));
    }
    Ok((a / b).floor())
}

fn percent(a: f64, b: f64) -> Result<f64> {
    if b == 0.0 {
        return Err(CalcError::domain("Percentage calculation with zero as whole value is not allowed"));
    }
    Ok(a / b * 100.0)
}

fn abs_diff(a: f64, b: f64) -> Result<f64> {
    Ok((a - b).abs())
}
