//! Frontend module - Lexer and tokens

pub mod token;
pub mod lexer;

pub use lexer::tokenize;
pub use token::{Operator, Token, TokenKind};
