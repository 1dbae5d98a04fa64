// completion.rs

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

/// Tab-completes the keyword at the start of the line: builtin commands and
/// registered operation names.
pub struct KeywordCompleter {
    keywords: Vec<String>,
}

impl KeywordCompleter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
        keywords.sort();
        keywords.dedup();
        Self { keywords }
    }

    pub fn candidates(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| k.starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }
}

impl Completer for KeywordCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let head = &line[..pos];
        let start = head.len() - head.trim_start().len();
        let prefix = &head[start..];
        // operands are not completed
        if prefix.contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let completions = self
            .candidates(prefix)
            .into_iter()
            .map(|k| Pair {
                display: k.to_string(),
                replacement: format!("{} ", k),
            })
            .collect();
        Ok((start, completions))
    }
}

impl Hinter for KeywordCompleter {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for KeywordCompleter {}

impl Validator for KeywordCompleter {
    fn validate(&self, _ctx: &mut ValidationContext) -> Result<ValidationResult, ReadlineError> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Helper for KeywordCompleter {}
