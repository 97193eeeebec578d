//! Result rendering

use std::fmt;

use crate::backend::value::Value;

/// Base used to print a numeric result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Decimal,
    Hex,
    Binary,
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Decimal => write!(f, "dec"),
            OutputMode::Hex => write!(f, "hex"),
            OutputMode::Binary => write!(f, "bin"),
        }
    }
}

/// Render a value for display.
///
/// Strings ignore the mode. NaN prints as `nan` or `-nan`. Hex and binary
/// print the number truncated to `i32`, so negative values show their two's
/// complement bits.
pub fn render(value: &Value<'_>, mode: OutputMode) -> String {
    match value {
        Value::Text(s) => s.to_string(),
        Value::Number(n) => match mode {
            OutputMode::Decimal if n.is_nan() => {
                let text = if n.is_sign_negative() { "-nan" } else { "nan" };
                text.to_string()
            }
            OutputMode::Decimal => format!("{n:.3}"),
            OutputMode::Hex => format!("0x{:X}", *n as i32),
            OutputMode::Binary => format!("0b{:b}", *n as i32),
        },
    }
}
