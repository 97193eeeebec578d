//! Error handling for Shunt

use crate::utils::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while splitting a line into tokens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("Unterminated string: missing closing {quote}")]
    UnterminatedString { quote: char, span: Span },

    #[error("Malformed number: {text}")]
    MalformedNumber { text: String, span: Span },
}

/// Errors raised while reordering or executing a token sequence
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Unknown function or command: {name}")]
    UnknownCommand { name: String, span: Span },

    #[error("Type mismatch: {operation} cannot be applied to {found}")]
    TypeMismatch {
        operation: String,
        found: String,
        span: Span,
    },

    #[error("Incomplete expression: {reason}")]
    IncompleteExpression { reason: String, span: Span },

    #[error("Unbalanced parenthesis")]
    UnbalancedParen { span: Span },

    #[error("{command} expects an argument")]
    MissingArgument { command: String, span: Span },

    #[error("Invalid code point: {value}")]
    InvalidCodePoint { value: f64, span: Span },
}

/// Any error produced by one evaluation cycle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            Self::UnterminatedString { span, .. } | Self::MalformedNumber { span, .. } => *span,
        }
    }
}

impl EvalError {
    pub fn span(&self) -> Span {
        match self {
            Self::UnknownCommand { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::IncompleteExpression { span, .. }
            | Self::UnbalancedParen { span }
            | Self::MissingArgument { span, .. }
            | Self::InvalidCodePoint { span, .. } => *span,
        }
    }
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Span {
        match self {
            Self::Lex(e) => e.span(),
            Self::Eval(e) => e.span(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::from(LexError::UnterminatedString {
            quote: '"',
            span: Span::new(0, 3),
        });
        assert_eq!(err.to_string(), "Unterminated string: missing closing \"");

        let err = Error::from(EvalError::TypeMismatch {
            operation: "+".to_string(),
            found: "string and number".to_string(),
            span: Span::new(5, 6),
        });
        assert_eq!(
            err.to_string(),
            "Type mismatch: + cannot be applied to string and number"
        );
        assert_eq!(err.span(), Span::new(5, 6));
    }
}
