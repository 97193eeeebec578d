//! Runtime values

use std::borrow::Cow;

/// A value on the evaluation stack.
///
/// Text borrowed from the input line stays borrowed; text built during
/// evaluation (concatenation, `chr`) is owned.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'src> {
    Number(f64),
    Text(Cow<'src, str>),
}

impl<'src> Value<'src> {
    pub fn text(s: impl Into<Cow<'src, str>>) -> Self {
        Value::Text(s.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Text(_) => "string",
        }
    }

    /// Join two strings into a new owned string
    pub fn concat(a: Cow<'src, str>, b: Cow<'src, str>) -> Self {
        let mut joined = a.into_owned();
        joined.push_str(&b);
        Value::Text(Cow::Owned(joined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_owns_result() {
        let line = String::from("ab cd");
        let joined = Value::concat(Cow::Borrowed(&line[..2]), Cow::Borrowed(&line[3..]));
        assert!(matches!(joined, Value::Text(Cow::Owned(ref s)) if s == "abcd"));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::text("x").type_name(), "string");
    }
}
