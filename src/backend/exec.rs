//! Postfix execution
//!
//! Walks the queue produced by the reorderer, keeping a stack of values.

use std::borrow::Cow;

use crate::backend::{OutputMode, Value};
use crate::frontend::{Operator, Token, TokenKind};
use crate::session::Config;
use crate::stdlib::builtins::{help_text, Builtin};
use crate::utils::{EvalError, Span};

/// What a finished evaluation produced
#[derive(Debug, Clone, PartialEq)]
pub struct Completion<'src> {
    pub value: Value<'src>,
    pub mode: OutputMode,
    /// Extra text printed by commands such as `help`
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'src> {
    Finished(Completion<'src>),
    /// `exit` ran; the rest of the queue was abandoned
    Exit(i32),
}

/// Truncate to a signed 32-bit integer, as the bitwise, shift and remainder
/// operators do. Out-of-range values saturate and NaN becomes 0.
pub fn truncate(x: f64) -> i32 {
    x as i32
}

/// Apply a binary operator to two numbers
pub fn binary(op: Operator, a: f64, b: f64) -> f64 {
    match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => a / b,
        Operator::Pow => a.powf(b),
        Operator::Rem => match truncate(b) {
            0 => f64::NAN,
            b => f64::from(truncate(a).wrapping_rem(b)),
        },
        // shift counts are taken modulo 32
        Operator::ShiftLeft => f64::from(truncate(a).wrapping_shl(truncate(b) as u32)),
        Operator::ShiftRight => f64::from(truncate(a).wrapping_shr(truncate(b) as u32)),
        Operator::BitOr => f64::from(truncate(a) | truncate(b)),
        Operator::BitAnd => f64::from(truncate(a) & truncate(b)),
        Operator::BitXor => f64::from(truncate(a) ^ truncate(b)),
        Operator::Equals => bool_value(a == b),
        Operator::Neg | Operator::LogicalNot | Operator::BitNot => {
            unreachable!("prefix operator {} used as binary", op.symbol())
        }
    }
}

/// Apply a prefix operator to a number
pub fn unary(op: Operator, x: f64) -> f64 {
    match op {
        Operator::Neg => -x,
        Operator::LogicalNot => bool_value(x == 0.0),
        Operator::BitNot => f64::from(!truncate(x)),
        _ => unreachable!("binary operator {} used as prefix", op.symbol()),
    }
}

fn bool_value(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Evaluation state for one line
pub struct Executor<'c, 'src> {
    source: &'src str,
    config: &'c mut Config,
    mode: OutputMode,
    stack: Vec<Value<'src>>,
    notes: Vec<String>,
}

impl<'c, 'src> Executor<'c, 'src> {
    pub fn new(source: &'src str, config: &'c mut Config) -> Self {
        Self {
            source,
            config,
            mode: OutputMode::default(),
            stack: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Execute a postfix queue
    pub fn run(mut self, queue: &[&Token]) -> Result<Outcome<'src>, EvalError> {
        self.stack.reserve(queue.len());

        for token in queue {
            match token.kind {
                TokenKind::Number => self.stack.push(Value::Number(token.value)),
                TokenKind::String => self.stack.push(Value::text(token.text(self.source))),
                TokenKind::Command => {
                    if let Some(code) = self.apply_command(token)? {
                        return Ok(Outcome::Exit(code));
                    }
                }
                TokenKind::Operator(op) if op.is_unary() => self.apply_unary(op, token.span)?,
                TokenKind::Operator(op) => self.apply_binary(op, token.span)?,
                TokenKind::LParen | TokenKind::RParen => {
                    return Err(EvalError::UnbalancedParen { span: token.span })
                }
                TokenKind::Bracket => {}
            }
        }

        let whole = Span::whole(self.source);
        let value = match (self.stack.pop(), self.stack.len()) {
            (Some(value), 0) => value,
            (None, _) => {
                return Err(EvalError::IncompleteExpression {
                    reason: "nothing to evaluate".to_string(),
                    span: whole,
                })
            }
            (Some(_), rest) => {
                return Err(EvalError::IncompleteExpression {
                    reason: format!("{} values left without an operator", rest + 1),
                    span: whole,
                })
            }
        };

        Ok(Outcome::Finished(Completion {
            value,
            mode: self.mode,
            notes: self.notes,
        }))
    }

    fn apply_unary(&mut self, op: Operator, span: Span) -> Result<(), EvalError> {
        let operand = self.stack.pop().ok_or_else(|| EvalError::IncompleteExpression {
            reason: format!("{} expects an operand", op.symbol()),
            span,
        })?;

        let x = match operand {
            Value::Number(x) => x,
            other => {
                return Err(EvalError::TypeMismatch {
                    operation: op.symbol().to_string(),
                    found: other.type_name().to_string(),
                    span,
                })
            }
        };

        let result = unary(op, x);
        log::trace!("{}{x} = {result}", op.symbol());
        self.stack.push(Value::Number(result));
        Ok(())
    }

    fn apply_binary(&mut self, op: Operator, span: Span) -> Result<(), EvalError> {
        // right operand is on top
        let (Some(b), Some(a)) = (self.stack.pop(), self.stack.pop()) else {
            return Err(EvalError::IncompleteExpression {
                reason: format!("{} expects a left and a right operand", op.symbol()),
                span,
            });
        };

        let result = match (a, b) {
            (Value::Number(a), Value::Number(b)) => {
                let result = binary(op, a, b);
                log::trace!("{a} {} {b} = {result}", op.symbol());
                Value::Number(result)
            }
            (Value::Text(a), Value::Text(b)) if op == Operator::Add => Value::concat(a, b),
            (a, b) => {
                return Err(EvalError::TypeMismatch {
                    operation: op.symbol().to_string(),
                    found: format!("{} and {}", a.type_name(), b.type_name()),
                    span,
                })
            }
        };

        self.stack.push(result);
        Ok(())
    }

    /// Run a command on the top of the stack. Returns an exit code if the
    /// command was `exit`.
    fn apply_command(&mut self, token: &Token) -> Result<Option<i32>, EvalError> {
        let name = token.text(self.source);
        let span = token.span;
        let builtin = Builtin::lookup(name).ok_or_else(|| EvalError::UnknownCommand {
            name: name.to_string(),
            span,
        })?;
        let arg = self.stack.pop();
        log::trace!("{name}({arg:?})");

        let result = match builtin {
            Builtin::Exit => {
                let code = match arg {
                    Some(v) => truncate(number_arg(name, v, span)?),
                    None => 0,
                };
                return Ok(Some(code));
            }
            Builtin::Help => {
                let advanced = match arg {
                    Some(v) => number_arg(name, v, span)? == 1.0,
                    None => false,
                };
                self.notes.push(help_text(advanced));
                Value::Number(0.0)
            }
            Builtin::Debug => {
                self.config.debug = match arg {
                    Some(v) => number_arg(name, v, span)? >= 1.0,
                    None => !self.config.debug,
                };
                Value::Number(bool_value(self.config.debug))
            }
            Builtin::Mode(mode) => {
                self.mode = mode;
                let value = match required(name, arg, span)? {
                    Value::Number(n) => n,
                    Value::Text(s) => s.chars().next().map_or(0.0, |c| f64::from(u32::from(c))),
                };
                Value::Number(value)
            }
            Builtin::Len => match required(name, arg, span)? {
                Value::Text(s) => Value::Number(s.chars().count() as f64),
                other => return Err(mismatch(name, &other, span)),
            },
            Builtin::Chr => {
                let code = number_arg(name, required(name, arg, span)?, span)?;
                let c = (code >= 0.0 && code.fract() == 0.0)
                    .then(|| char::from_u32(code as u32))
                    .flatten()
                    .ok_or(EvalError::InvalidCodePoint { value: code, span })?;
                Value::Text(Cow::Owned(c.to_string()))
            }
            Builtin::Math(f) => {
                let x = number_arg(name, required(name, arg, span)?, span)?;
                Value::Number(f.apply(x))
            }
        };

        self.stack.push(result);
        Ok(None)
    }
}

fn required<'src>(
    command: &str,
    arg: Option<Value<'src>>,
    span: Span,
) -> Result<Value<'src>, EvalError> {
    arg.ok_or_else(|| EvalError::MissingArgument {
        command: command.to_string(),
        span,
    })
}

fn number_arg(command: &str, arg: Value<'_>, span: Span) -> Result<f64, EvalError> {
    match arg {
        Value::Number(n) => Ok(n),
        other => Err(mismatch(command, &other, span)),
    }
}

fn mismatch(command: &str, arg: &Value<'_>, span: Span) -> EvalError {
    EvalError::TypeMismatch {
        operation: command.to_string(),
        found: arg.type_name().to_string(),
        span,
    }
}
