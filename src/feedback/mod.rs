//! Structured Feedback Module
//!
//! Machine-readable error reports, printed with `--json`:
//! - stable error codes
//! - the offending span and snippet of the input line
//! - fix suggestions ranked by confidence

use serde::{Deserialize, Serialize};

use crate::stdlib::builtins::BUILTINS;
use crate::utils::{Error, EvalError, LexError};

/// A structured error report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Error code (e.g., "E0101")
    pub code: String,

    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    pub location: Location,

    /// Suggested fixes, most likely first
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
}

/// Where in the input line the error was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// The text at that span
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Description of the fix
    pub message: String,

    /// The replacement text
    pub replacement: Option<String>,

    /// Confidence in this suggestion (0.0 - 1.0)
    pub confidence: f64,
}

impl Suggestion {
    fn new(message: impl Into<String>, replacement: Option<String>, confidence: f64) -> Self {
        Self {
            message: message.into(),
            replacement,
            confidence,
        }
    }
}

impl ErrorReport {
    /// Create an error report for an error raised while evaluating `line`
    pub fn from_error(error: &Error, line: &str) -> Self {
        let span = error.span();
        let mut report = Self {
            code: error_code(error).to_string(),
            severity: Severity::Error,
            message: error.to_string(),
            location: Location {
                start: span.start,
                end: span.end,
                snippet: span.text(line).to_string(),
            },
            suggestions: suggestions_for(error),
        };
        report.sort_suggestions();
        report
    }

    /// Sort suggestions by confidence (highest first)
    pub fn sort_suggestions(&mut self) {
        self.suggestions.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Output as compact JSON, one report per line
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

fn error_code(error: &Error) -> &'static str {
    match error {
        Error::Lex(LexError::UnterminatedString { .. }) => "E0001",
        Error::Lex(LexError::MalformedNumber { .. }) => "E0002",
        Error::Eval(EvalError::UnknownCommand { .. }) => "E0101",
        Error::Eval(EvalError::TypeMismatch { .. }) => "E0102",
        Error::Eval(EvalError::IncompleteExpression { .. }) => "E0103",
        Error::Eval(EvalError::UnbalancedParen { .. }) => "E0104",
        Error::Eval(EvalError::MissingArgument { .. }) => "E0105",
        Error::Eval(EvalError::InvalidCodePoint { .. }) => "E0106",
    }
}

fn suggestions_for(error: &Error) -> Vec<Suggestion> {
    match error {
        Error::Lex(LexError::UnterminatedString { quote, .. }) => vec![Suggestion::new(
            format!("Close the string with {quote}"),
            Some(quote.to_string()),
            0.9,
        )],
        Error::Lex(LexError::MalformedNumber { text, .. }) => {
            let hint = if text.contains("0x") {
                "Hexadecimal literals use the digits 0-9 and A-F"
            } else if text.contains("0b") {
                "Binary literals use the digits 0 and 1"
            } else {
                "Numbers may contain at most one decimal point"
            };
            vec![Suggestion::new(hint, None, 0.6)]
        }
        Error::Eval(EvalError::UnknownCommand { name, .. }) => {
            let mut suggestions: Vec<Suggestion> = similar_commands(name)
                .into_iter()
                .map(|(candidate, distance)| {
                    Suggestion::new(
                        format!("Did you mean '{candidate}'?"),
                        Some(candidate.to_string()),
                        1.0 / (1.0 + distance as f64),
                    )
                })
                .collect();
            suggestions.push(Suggestion::new("Type help(1) to list every command", None, 0.1));
            suggestions
        }
        Error::Eval(EvalError::TypeMismatch { .. }) => vec![Suggestion::new(
            "Only + is defined for strings, and strings cannot be mixed with numbers",
            None,
            0.5,
        )],
        Error::Eval(EvalError::IncompleteExpression { .. }) => vec![Suggestion::new(
            "Check that every operator has an operand on each side",
            None,
            0.5,
        )],
        Error::Eval(EvalError::UnbalancedParen { .. }) => vec![Suggestion::new(
            "Match every ( with a )",
            None,
            0.8,
        )],
        Error::Eval(EvalError::MissingArgument { command, .. }) => vec![Suggestion::new(
            format!("Give {command} a value, e.g. {command}(1)"),
            Some(format!("{command}(1)")),
            0.7,
        )],
        Error::Eval(EvalError::InvalidCodePoint { .. }) => vec![Suggestion::new(
            "Use a whole number between 0 and 0x10FFFF, excluding surrogates",
            None,
            0.6,
        )],
    }
}

/// Builtin names within two edits of `name`, closest first
fn similar_commands(name: &str) -> Vec<(&'static str, usize)> {
    let mut found: Vec<(&'static str, usize)> = BUILTINS
        .iter()
        .map(|info| (info.name, edit_distance(name, info.name)))
        .filter(|&(_, distance)| distance <= 2)
        .collect();
    found.sort_by_key(|&(candidate, distance)| (distance, candidate));
    found
}

/// Levenshtein distance over characters
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}
