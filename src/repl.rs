// repl.rs

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};
use std::io::Write;
use tracing::{debug, error};

use crate::calculator::Calculator;
use crate::commands::{report, run_command, Flow};
use crate::completion::KeywordCompleter;
use crate::parser::{is_cancel, parse_command, Command, BUILTINS};

type CalcEditor = Editor<KeywordCompleter, DefaultHistory>;

pub fn start_repl(calc: &mut Calculator) -> Result<()> {
    let config = Config::builder().completion_type(CompletionType::List).build();
    let mut rl: CalcEditor = Editor::with_config(config).context("failed to create line editor")?;
    let keywords = BUILTINS
        .iter()
        .copied()
        .chain(calc.registry().names())
        .map(str::to_string)
        .collect::<Vec<_>>();
    rl.set_helper(Some(KeywordCompleter::new(keywords)));

    let mut stdout = std::io::stdout();
    println!("Calculator started. Type 'help' for commands.");
    loop {
        let command = match rl.readline("calc> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                match parse_command(&line) {
                    Ok(Some(command)) => command,
                    Ok(None) => continue,
                    Err(e) => {
                        report(&mut stdout, &e)?;
                        continue;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Operation cancelled");
                continue;
            }
            Err(ReadlineError::Eof) => Command::Exit,
            Err(err) => {
                error!(error = %err, "readline failed");
                return Err(err).context("reading input");
            }
        };

        let command = match command {
            Command::Calculate { operation, operands } if operands.is_empty() => {
                if let Err(e) = calc.ensure_operation(&operation) {
                    report(&mut stdout, &e)?;
                    continue;
                }
                match read_operands(&mut rl)? {
                    Some(operands) => Command::Calculate { operation, operands },
                    None => {
                        println!("Operation cancelled");
                        continue;
                    }
                }
            }
            other => other,
        };

        debug!(?command, "running command");
        let flow = run_command(calc, command, &mut stdout)?;
        stdout.flush()?;
        if flow == Flow::Exit {
            break;
        }
    }
    Ok(())
}

/// Prompt for both operands. `None` when the user cancels.
fn read_operands(rl: &mut CalcEditor) -> Result<Option<Vec<String>>> {
    println!("Enter numbers (or 'cancel' to abort):");
    let mut operands = Vec::with_capacity(2);
    for label in ["First number: ", "Second number: "] {
        match rl.readline(label) {
            Ok(input) if is_cancel(&input) => return Ok(None),
            Ok(input) => operands.push(input.trim().to_string()),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err).context("reading operand"),
        }
    }
    Ok(Some(operands))
}
