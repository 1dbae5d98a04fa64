// commands.rs

use itertools::Itertools;
use std::io::{self, Write};
use tracing::warn;

use crate::calculator::Calculator;
use crate::error::CalcError;
use crate::parser::{Command, BUILTINS};
use crate::util::{format_number, writeln_ignore_broken_pipe};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Execute one command and write what the user should see. Calculator
/// errors are reported on `out`; only a failing writer is returned as `Err`.
pub fn run_command<W: Write + ?Sized>(calc: &mut Calculator, command: Command, out: &mut W) -> io::Result<Flow> {
    match command {
        Command::Help => {
            writeln_ignore_broken_pipe(out, format!("Commands: {}", BUILTINS.iter().join(", ")))?;
            writeln_ignore_broken_pipe(out, format!("Operations: {}", calc.registry().names().iter().join(", ")))?;
            writeln_ignore_broken_pipe(out, "Usage: <operation> [a b]; without operands you are prompted, 'cancel' aborts")?;
        }
        Command::Exit => {
            match calc.save() {
                Ok(()) => writeln_ignore_broken_pipe(out, "History saved successfully.")?,
                Err(e) => {
                    warn!(error = %e, "save on exit failed");
                    writeln_ignore_broken_pipe(out, format!("Warning: Could not save history: {}", e))?;
                }
            }
            writeln_ignore_broken_pipe(out, "Goodbye!")?;
            return Ok(Flow::Exit);
        }
        Command::History => {
            let history = calc.history();
            if history.is_empty() {
                writeln_ignore_broken_pipe(out, "No calculations in history")?;
            } else {
                writeln_ignore_broken_pipe(out, "Calculation History:")?;
                for (i, record) in history.iter().enumerate() {
                    writeln_ignore_broken_pipe(out, format!("{:>5}. {}", i + 1, record))?;
                }
            }
        }
        Command::Clear => {
            calc.clear_history();
            writeln_ignore_broken_pipe(out, "History cleared")?;
        }
        Command::Undo => match calc.undo() {
            Ok(record) => writeln_ignore_broken_pipe(out, format!("Undone: {}", record))?,
            Err(e) => report(out, &e)?,
        },
        Command::Redo => match calc.redo() {
            Ok(record) => writeln_ignore_broken_pipe(out, format!("Redone: {}", record))?,
            Err(e) => report(out, &e)?,
        },
        Command::Save => match calc.save() {
            Ok(()) => writeln_ignore_broken_pipe(out, format!("History saved to {}", calc.store_location()))?,
            Err(e) => report(out, &CalcError::from(e))?,
        },
        Command::Load => match calc.load() {
            Ok(n) => writeln_ignore_broken_pipe(
                out,
                format!("Loaded {} calculations from {}", n, calc.store_location()),
            )?,
            Err(e) => report(out, &e)?,
        },
        Command::Calculate { operation, operands } => {
            let evaluated = match operands.as_slice() {
                [a, b] => calc.calculate(&operation, a, b),
                _ => Err(CalcError::validation(format!("'{}' expects two operands", operation))),
            };
            match evaluated {
                Ok(eval) => {
                    writeln_ignore_broken_pipe(out, format!("Result: {}", format_number(eval.record.result())))?;
                    if let Some(e) = eval.save_error {
                        writeln_ignore_broken_pipe(out, format!("Warning: auto-save failed: {}", e))?;
                    }
                }
                Err(e) => report(out, &e)?,
            }
        }
    }
    Ok(Flow::Continue)
}

/// Empty-history and nothing-to-redo are plain notices, everything else is
/// an error line.
pub fn report<W: Write + ?Sized>(out: &mut W, err: &CalcError) -> io::Result<()> {
    match err {
        CalcError::EmptyHistory | CalcError::NothingToRedo => writeln_ignore_broken_pipe(out, err.to_string()),
        CalcError::UnknownOperation(name) => writeln_ignore_broken_pipe(
            out,
            format!("Unknown command: '{}'. Type 'help' for available commands.", name),
        ),
        _ => writeln_ignore_broken_pipe(out, format!("Error: {}", err)),
    }
}
