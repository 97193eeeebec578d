//! Lexer for Shunt
//!
//! Converts one input line into a sequence of tokens. Token boundaries fall
//! wherever the character class changes, except inside quotes, across a
//! `<<`/`>>` pair, and after the `0x`/`0b` prefix of a radix literal.

use std::f64::consts::PI;

use crate::frontend::{Operator, Token, TokenKind};
use crate::utils::{LexError, Span};

/// Character classes that drive token boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Quote,
    /// Digits and `.`
    Numeric,
    Operator(Operator),
    Bracket,
    /// Everything else, letters included
    Ident,
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        return CharClass::Space;
    }
    if let Some(op) = Operator::from_char(c) {
        return CharClass::Operator(op);
    }
    match c {
        '"' | '\'' => CharClass::Quote,
        '0'..='9' | '.' => CharClass::Numeric,
        '(' | ')' | '[' | ']' | '{' | '}' => CharClass::Bracket,
        _ => CharClass::Ident,
    }
}

/// The lexer state
pub struct Lexer<'a> {
    /// Input line, which every emitted span points into
    source: &'a str,
    /// Characters with their byte offsets
    chars: Vec<(usize, char)>,
    /// Current position in `chars`
    pos: usize,
    /// Start position of current token
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for one input line
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
            start: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn peek_class(&self) -> Option<CharClass> {
        self.peek().map(classify)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    /// Byte offset of a character position
    fn offset(&self, pos: usize) -> usize {
        self.chars.get(pos).map_or(self.source.len(), |&(i, _)| i)
    }

    /// Create a span from start to current position
    fn make_span(&self) -> Span {
        Span::new(self.offset(self.start), self.offset(self.pos))
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn current_text(&self) -> &'a str {
        self.make_span().text(self.source)
    }

    fn malformed(&self) -> LexError {
        LexError::MalformedNumber {
            text: self.current_text().to_string(),
            span: self.make_span(),
        }
    }

    /// Tokenize the whole line
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::with_capacity(self.chars.len());

        while let Some(token) = self.next_token(tokens.last().map(|t: &Token| t.kind))? {
            log::trace!("token {}", token.describe(self.source));
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Get the next token, or `None` at the end of the line.
    ///
    /// `previous` is the kind of the last emitted token; it decides whether a
    /// `-` subtracts or negates.
    fn next_token(&mut self, previous: Option<TokenKind>) -> Result<Option<Token>, LexError> {
        loop {
            self.start = self.pos;
            let Some(c) = self.peek() else {
                return Ok(None);
            };

            let token = match classify(c) {
                CharClass::Space => {
                    self.advance();
                    continue;
                }
                CharClass::Quote => self.read_string(c)?,
                CharClass::Numeric => self.read_number()?,
                CharClass::Operator(op) => self.read_operator(c, op, previous)?,
                CharClass::Bracket => self.read_bracket(c),
                CharClass::Ident => self.read_identifier(),
            };
            return Ok(Some(token));
        }
    }

    /// Read a string literal; the span covers only the text between the quotes
    fn read_string(&mut self, quote: char) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let content_start = self.pos;

        loop {
            match self.advance() {
                Some(c) if c == quote => break,
                Some(_) => {}
                None => {
                    return Err(LexError::UnterminatedString {
                        quote,
                        span: Span::new(self.offset(self.start), self.source.len()),
                    })
                }
            }
        }

        let span = Span::new(self.offset(content_start), self.offset(self.pos - 1));
        Ok(Token::new(TokenKind::String, span))
    }

    /// Read a numeric literal. A folded `-` may already have been consumed.
    fn read_number(&mut self) -> Result<Token, LexError> {
        while self.peek_class() == Some(CharClass::Numeric) {
            self.advance();
        }

        let text = self.current_text();
        let negative = text.starts_with('-');
        let digits = text.trim_start_matches('-');
        if digits.starts_with('0') && !digits.contains('.') {
            match self.peek() {
                Some('x') => return self.read_radix(16, negative),
                Some('b') => return self.read_radix(2, negative),
                _ => {}
            }
        }

        let value = text.parse::<f64>().map_err(|_| self.malformed())?;
        Ok(Token::number(value, self.make_span()))
    }

    /// Read the digits of a `0x`/`0b` literal after the leading zero
    fn read_radix(&mut self, radix: u32, negative: bool) -> Result<Token, LexError> {
        self.advance(); // x or b
        let digits_start = self.pos;

        while matches!(self.peek_class(), Some(CharClass::Numeric | CharClass::Ident)) {
            self.advance();
        }

        if self.pos == digits_start {
            return Err(self.malformed());
        }

        let mut value = 0.0;
        for &(_, c) in &self.chars[digits_start..self.pos] {
            let digit = c.to_digit(radix).ok_or_else(|| self.malformed())?;
            value = value * f64::from(radix) + f64::from(digit);
        }

        let value = if negative { -value } else { value };
        Ok(Token::number(value, self.make_span()))
    }

    fn read_operator(
        &mut self,
        c: char,
        op: Operator,
        previous: Option<TokenKind>,
    ) -> Result<Token, LexError> {
        self.advance();

        let op = match op {
            Operator::Sub if !previous.is_some_and(|kind| kind.produces_value()) => {
                if self.peek_class() == Some(CharClass::Numeric) {
                    return self.read_number();
                }
                Operator::Neg
            }
            Operator::ShiftLeft | Operator::ShiftRight => {
                if self.peek() == Some(c) {
                    self.advance();
                }
                op
            }
            _ => op,
        };

        Ok(self.make_token(TokenKind::Operator(op)))
    }

    fn read_bracket(&mut self, c: char) -> Token {
        self.advance();
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            _ => TokenKind::Bracket,
        };
        self.make_token(kind)
    }

    /// Read a command name, rewriting the named constants to numbers
    fn read_identifier(&mut self) -> Token {
        while self.peek_class() == Some(CharClass::Ident) {
            self.advance();
        }

        let span = self.make_span();
        match self.current_text() {
            "true" => Token::number(1.0, span),
            "false" => Token::number(0.0, span),
            "PI" | "pi" => Token::number(PI, span),
            _ => Token::new(TokenKind::Command, span),
        }
    }
}

/// Tokenize one input line
pub fn tokenize(line: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(line).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Kinds and texts, for compact comparisons
    fn lex(src: &str) -> Vec<(TokenKind, &str)> {
        tokenize(src)
            .unwrap()
            .iter()
            .map(|t| (t.kind, t.text(src)))
            .collect()
    }

    fn values(src: &str) -> Vec<f64> {
        tokenize(src)
            .unwrap()
            .iter()
            .filter(|t| t.kind == TokenKind::Number)
            .map(|t| t.value)
            .collect()
    }

    const ADD: TokenKind = TokenKind::Operator(Operator::Add);
    const SUB: TokenKind = TokenKind::Operator(Operator::Sub);
    const NEG: TokenKind = TokenKind::Operator(Operator::Neg);
    const MUL: TokenKind = TokenKind::Operator(Operator::Mul);

    #[test]
    fn test_leading_minus_folds_into_number() {
        assert_eq!(
            lex("-3+2"),
            vec![(TokenKind::Number, "-3"), (ADD, "+"), (TokenKind::Number, "2")]
        );
        assert_eq!(values("-3+2"), vec![-3.0, 2.0]);
    }

    #[test]
    fn test_minus_after_number_subtracts() {
        assert_eq!(
            lex("3-2"),
            vec![(TokenKind::Number, "3"), (SUB, "-"), (TokenKind::Number, "2")]
        );
        assert_eq!(lex("3 - -2")[1..], [(SUB, "-"), (TokenKind::Number, "-2")]);
    }

    #[test]
    fn test_minus_after_operator_or_paren_negates() {
        assert_eq!(
            lex("3*-2"),
            vec![(TokenKind::Number, "3"), (MUL, "*"), (TokenKind::Number, "-2")]
        );
        assert_eq!(
            lex("(-2)"),
            vec![
                (TokenKind::LParen, "("),
                (TokenKind::Number, "-2"),
                (TokenKind::RParen, ")"),
            ]
        );
    }

    #[test]
    fn test_minus_after_closing_paren_subtracts() {
        assert_eq!(lex("(5)-1")[3], (SUB, "-"));
    }

    #[test]
    fn test_minus_before_non_number_is_negation() {
        assert_eq!(lex("-(2)")[0], (NEG, "-"));
        assert_eq!(lex("- 3")[0], (NEG, "-"));
        assert_eq!(lex("-pi"), vec![(NEG, "-"), (TokenKind::Number, "pi")]);
    }

    #[test]
    fn test_shift_operators_are_one_token() {
        assert_eq!(
            lex("1<<3"),
            vec![
                (TokenKind::Number, "1"),
                (TokenKind::Operator(Operator::ShiftLeft), "<<"),
                (TokenKind::Number, "3"),
            ]
        );
        assert_eq!(lex("8>>1")[1], (TokenKind::Operator(Operator::ShiftRight), ">>"));
        assert_eq!(lex("8>1")[1], (TokenKind::Operator(Operator::ShiftRight), ">"));
    }

    #[test]
    fn test_other_operators_are_single_glyphs() {
        let kinds: Vec<TokenKind> = lex("!~").into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Operator(Operator::LogicalNot),
                TokenKind::Operator(Operator::BitNot),
            ]
        );
    }

    #[test]
    fn test_radix_literals() {
        assert_eq!(values("0xFF"), vec![255.0]);
        assert_eq!(values("0xff"), vec![255.0]);
        assert_eq!(values("0b101"), vec![5.0]);
        assert_eq!(values("0x1b"), vec![27.0]);
        assert_eq!(values("-0x10"), vec![-16.0]);
        assert_eq!(lex("0xFF+1")[0], (TokenKind::Number, "0xFF"));
        assert_eq!(values("00x5"), vec![5.0]);
        assert_eq!(values("-00b11"), vec![-3.0]);
        assert_eq!(lex("0.5x1")[1], (TokenKind::Command, "x1"));
    }

    #[test]
    fn test_bad_radix_literals() {
        assert!(matches!(
            tokenize("0b102"),
            Err(LexError::MalformedNumber { ref text, .. }) if text == "0b102"
        ));
        assert!(matches!(tokenize("0x"), Err(LexError::MalformedNumber { .. })));
        assert!(matches!(tokenize("0xG"), Err(LexError::MalformedNumber { .. })));
    }

    #[test]
    fn test_decimal_numbers() {
        assert_eq!(values("3.25 .5 7."), vec![3.25, 0.5, 7.0]);
        assert!(matches!(
            tokenize("1.2.3"),
            Err(LexError::MalformedNumber { span, .. }) if span == Span::new(0, 5)
        ));
    }

    #[test]
    fn test_named_literals() {
        assert_eq!(values("true false"), vec![1.0, 0.0]);
        assert_eq!(values("PI"), vec![PI]);
        assert_eq!(values("pi"), vec![PI]);
        assert_eq!(lex("Pi"), vec![(TokenKind::Command, "Pi")]);
    }

    #[test]
    fn test_strings_keep_everything_between_quotes() {
        assert_eq!(lex("\"a b+c\""), vec![(TokenKind::String, "a b+c")]);
        assert_eq!(lex("'say \"hi\"'"), vec![(TokenKind::String, "say \"hi\"")]);
        assert_eq!(lex("\"\""), vec![(TokenKind::String, "")]);
        assert_eq!(
            lex("\"ab\" + 'cd'"),
            vec![(TokenKind::String, "ab"), (ADD, "+"), (TokenKind::String, "cd")]
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            tokenize("1 + \"abc"),
            Err(LexError::UnterminatedString {
                quote: '"',
                span: Span::new(4, 8),
            })
        );
    }

    #[test]
    fn test_commands_and_brackets() {
        assert_eq!(
            lex("hex(255)"),
            vec![
                (TokenKind::Command, "hex"),
                (TokenKind::LParen, "("),
                (TokenKind::Number, "255"),
                (TokenKind::RParen, ")"),
            ]
        );
        assert_eq!(lex("[1]")[0], (TokenKind::Bracket, "["));
    }

    #[test]
    fn test_class_change_closes_token() {
        assert_eq!(
            lex("2pi"),
            vec![(TokenKind::Number, "2"), (TokenKind::Number, "pi")]
        );
        assert_eq!(lex("atan2")[0], (TokenKind::Command, "atan"));
    }

    #[test]
    fn test_empty_and_blank_lines() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   \t").unwrap().is_empty());
    }

    #[test]
    fn test_spans_use_byte_offsets() {
        let src = "é + 1";
        let tokens = tokenize(src).unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 2));
        assert_eq!(tokens[2].text(src), "1");
    }
}
