// parser.rs

use crate::error::{CalcError, Result};

pub const BUILTINS: [&str; 8] = ["help", "exit", "history", "clear", "undo", "redo", "save", "load"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    History,
    Clear,
    Undo,
    Redo,
    Save,
    Load,
    /// Any non-builtin keyword. `operands` is empty when the user should be
    /// prompted for them, otherwise exactly two.
    Calculate { operation: String, operands: Vec<String> },
}

/// Parse one input line. Keywords are case-insensitive. Returns `None` for
/// a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut tokens = line.split_whitespace();
    let keyword = match tokens.next() {
        Some(k) => k.to_lowercase(),
        None => return Ok(None),
    };
    let rest: Vec<String> = tokens.map(str::to_string).collect();

    let builtin = match keyword.as_str() {
        "help" => Some(Command::Help),
        "exit" | "quit" => Some(Command::Exit),
        "history" => Some(Command::History),
        "clear" => Some(Command::Clear),
        "undo" => Some(Command::Undo),
        "redo" => Some(Command::Redo),
        "save" => Some(Command::Save),
        "load" => Some(Command::Load),
        _ => None,
    };
    if let Some(command) = builtin {
        if !rest.is_empty() {
            return Err(CalcError::validation(format!("'{}' takes no arguments", keyword)));
        }
        return Ok(Some(command));
    }

    match rest.len() {
        0 | 2 => Ok(Some(Command::Calculate {
            operation: keyword,
            operands: rest,
        })),
        n => Err(CalcError::validation(format!(
            "'{}' expects two operands, got {}",
            keyword, n
        ))),
    }
}

/// `cancel` at an operand prompt aborts the calculation.
pub fn is_cancel(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("cancel")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_case_insensitive() {
        assert_eq!(parse_command("UNDO").unwrap(), Some(Command::Undo));
        assert_eq!(parse_command("  history ").unwrap(), Some(Command::History));
        assert_eq!(parse_command("quit").unwrap(), Some(Command::Exit));
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn inline_operands() {
        assert_eq!(
            parse_command("Add 2 3.5").unwrap(),
            Some(Command::Calculate {
                operation: "add".into(),
                operands: vec!["2".into(), "3.5".into()],
            })
        );
    }

    #[test]
    fn bare_operation_prompts() {
        assert_eq!(
            parse_command("power").unwrap(),
            Some(Command::Calculate {
                operation: "power".into(),
                operands: vec![],
            })
        );
    }

    #[test]
    fn wrong_operand_count() {
        assert!(matches!(parse_command("add 1"), Err(CalcError::Validation(_))));
        assert!(matches!(parse_command("add 1 2 3"), Err(CalcError::Validation(_))));
        assert!(matches!(parse_command("undo 2"), Err(CalcError::Validation(_))));
    }

    #[test]
    fn cancel_detection() {
        assert!(is_cancel(" Cancel "));
        assert!(!is_cancel("5"));
    }
}
