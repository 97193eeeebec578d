//! Shunting-yard reordering
//!
//! Turns the infix token sequence into a postfix queue. The queue borrows
//! the tokens; nothing is copied.

use crate::frontend::{Token, TokenKind};
use crate::utils::EvalError;

/// Reorder `tokens` into postfix order.
///
/// Binary operators pop every stacked operator that binds at least as tightly,
/// so equal precedence groups left to right. Prefix operators and commands
/// have no left operand and are pushed without popping.
pub fn reorder(tokens: &[Token]) -> Result<Vec<&Token>, EvalError> {
    let mut output: Vec<&Token> = Vec::with_capacity(tokens.len());
    let mut operators: Vec<&Token> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Number | TokenKind::String => output.push(token),
            TokenKind::Command | TokenKind::LParen => operators.push(token),
            TokenKind::Operator(op) if op.is_unary() => operators.push(token),
            TokenKind::Operator(_) => {
                while let Some(&top) = operators.last() {
                    if top.kind == TokenKind::LParen || top.precedence() < token.precedence() {
                        break;
                    }
                    operators.pop();
                    output.push(top);
                }
                operators.push(token);
            }
            TokenKind::RParen => loop {
                match operators.pop() {
                    Some(top) if top.kind == TokenKind::LParen => break,
                    Some(top) => output.push(top),
                    None => return Err(EvalError::UnbalancedParen { span: token.span }),
                }
            },
            TokenKind::Bracket => {
                log::debug!("skipping bracket at {}..{}", token.span.start, token.span.end);
            }
        }
    }

    while let Some(top) = operators.pop() {
        if top.kind == TokenKind::LParen {
            return Err(EvalError::UnbalancedParen { span: top.span });
        }
        output.push(top);
    }

    Ok(output)
}
