//! Token definitions for Shunt

use std::fmt;

use crate::utils::Span;

/// A token produced by the lexer.
///
/// The text of a token is never copied: `span` points back into the input
/// line, and excludes the quote characters of a string literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Parsed value, only meaningful for `TokenKind::Number`
    pub value: f64,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span, value: 0.0 }
    }

    pub fn number(value: f64, span: Span) -> Self {
        Self { kind: TokenKind::Number, span, value }
    }

    /// The slice of `src` this token was read from
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        self.span.text(src)
    }

    pub fn precedence(&self) -> i8 {
        self.kind.precedence()
    }

    /// One-line description used by the debug dumps
    pub fn describe(&self, src: &str) -> String {
        match self.kind {
            TokenKind::Number => format!("{:<10} {:<12} {:.2}", self.kind, self.text(src), self.value),
            _ => format!("{:<10} {}", self.kind, self.text(src)),
        }
    }
}

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Numeric literal, including `0x`/`0b` forms and the named constants
    Number,
    /// Quoted string literal
    String,
    /// Identifier applied as a one-argument builtin
    Command,
    Operator(Operator),
    /// (
    LParen,
    /// )
    RParen,
    /// { } [ ] are read but never evaluated
    Bracket,
}

/// Operators, one glyph each except the shifts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// +
    Add,
    /// - (binary)
    Sub,
    /// - (prefix)
    Neg,
    /// *
    Mul,
    /// /
    Div,
    /// ^
    Pow,
    /// %
    Rem,
    /// << or <
    ShiftLeft,
    /// >> or >
    ShiftRight,
    /// |
    BitOr,
    /// &
    BitAnd,
    /// ~
    BitNot,
    /// #
    BitXor,
    /// !
    LogicalNot,
    /// =
    Equals,
}

impl Operator {
    /// Map a single operator glyph to its operator.
    ///
    /// `-` always maps to `Sub` here; the lexer decides when it is a negation.
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            '%' => Some(Operator::Rem),
            '<' => Some(Operator::ShiftLeft),
            '>' => Some(Operator::ShiftRight),
            '|' => Some(Operator::BitOr),
            '&' => Some(Operator::BitAnd),
            '~' => Some(Operator::BitNot),
            '#' => Some(Operator::BitXor),
            '!' => Some(Operator::LogicalNot),
            '=' => Some(Operator::Equals),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub | Operator::Neg => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
            Operator::Rem => "%",
            Operator::ShiftLeft => "<<",
            Operator::ShiftRight => ">>",
            Operator::BitOr => "|",
            Operator::BitAnd => "&",
            Operator::BitNot => "~",
            Operator::BitXor => "#",
            Operator::LogicalNot => "!",
            Operator::Equals => "=",
        }
    }

    /// Prefix operators take a single operand to their right
    pub fn is_unary(&self) -> bool {
        matches!(self, Operator::Neg | Operator::LogicalNot | Operator::BitNot)
    }

    pub fn precedence(&self) -> i8 {
        match self {
            Operator::Equals => 0,
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div | Operator::Rem => 2,
            Operator::Pow => 3,
            Operator::ShiftLeft
            | Operator::ShiftRight
            | Operator::BitOr
            | Operator::BitAnd
            | Operator::BitNot
            | Operator::BitXor
            | Operator::Neg
            | Operator::LogicalNot => 4,
        }
    }
}

impl TokenKind {
    /// Binding strength used by the reorderer; -1 for anything that is not an operator
    pub fn precedence(&self) -> i8 {
        match self {
            TokenKind::Operator(op) => op.precedence(),
            TokenKind::Command => 5,
            TokenKind::LParen | TokenKind::RParen => 6,
            TokenKind::Number | TokenKind::String | TokenKind::Bracket => -1,
        }
    }

    /// Whether a `-` following this token is a binary subtraction
    pub fn produces_value(&self) -> bool {
        matches!(self, TokenKind::Number | TokenKind::String | TokenKind::RParen)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "NUM".to_string(),
            TokenKind::String => "STR".to_string(),
            TokenKind::Command => "COMMAND".to_string(),
            TokenKind::Operator(op) => format!("OP({})", op.symbol()),
            TokenKind::LParen => "LPAREN".to_string(),
            TokenKind::RParen => "RPAREN".to_string(),
            TokenKind::Bracket => "BRACKET".to_string(),
        };
        // pad() so width specifiers in the debug dumps apply
        f.pad(&name)
    }
}
