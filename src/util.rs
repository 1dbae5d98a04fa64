// util.rs

use std::io::Write;

// Above this magnitude an f64 has no fractional digits left to round.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

pub fn writeln_ignore_broken_pipe<W: Write + ?Sized, S: AsRef<str>>(w: &mut W, s: S) -> std::io::Result<()> {
    match writeln!(w, "{}", s.as_ref()) {
        Err(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Round `value` half away from zero to `precision` decimal places.
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    normalize_zero(scaled.round() / factor)
}

/// Shortest decimal form without exponent or trailing zeros.
pub fn format_number(value: f64) -> String {
    format!("{}", normalize_zero(value))
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
