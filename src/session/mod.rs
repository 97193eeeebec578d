//! Evaluation session
//!
//! Runs one input line through tokenize, reorder, execute and render. The
//! only state kept between lines is the session configuration.

use crate::backend::{render, Executor, Outcome};
use crate::frontend::tokenize;
use crate::middle::reorder;
use crate::utils::Result;

/// Session settings, shared by every line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Dump tokens, the postfix queue and the result of each line
    pub debug: bool,
}

/// What the caller should do after a line
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Print `notes`, then `text`
    Output { text: String, notes: Vec<String> },
    /// Terminate the process with this code
    Exit(i32),
}

pub struct Session {
    config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Evaluate one line
    pub fn evaluate(&mut self, line: &str) -> Result<Reply> {
        let tokens = tokenize(line)?;
        if self.config.debug {
            log::info!("TOKENISER");
            for token in &tokens {
                log::info!("  {}", token.describe(line));
            }
        }

        let queue = reorder(&tokens)?;
        if self.config.debug {
            log::info!("PARSER");
            for token in &queue {
                log::info!("  {}", token.describe(line));
            }
        }

        let outcome = Executor::new(line, &mut self.config).run(&queue)?;
        let done = match outcome {
            Outcome::Exit(code) => return Ok(Reply::Exit(code)),
            Outcome::Finished(done) => done,
        };

        if self.config.debug {
            log::info!("EVALUATION {:?} ({})", done.value, done.mode);
        }

        Ok(Reply::Output {
            text: render(&done.value, done.mode),
            notes: done.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{Error, EvalError, LexError};

    fn output(session: &mut Session, line: &str) -> String {
        match session.evaluate(line) {
            Ok(Reply::Output { text, .. }) => text,
            other => panic!("{line}: expected output, got {other:?}"),
        }
    }

    fn eval(line: &str) -> String {
        output(&mut Session::new(Config::default()), line)
    }

    #[test]
    fn test_decimal_results() {
        assert_eq!(eval("(2+3)*3/3-3^2"), "-6.000");
        assert_eq!(eval("0xFF"), "255.000");
        assert_eq!(eval("0b101"), "5.000");
        assert_eq!(eval("5 % 2"), "1.000");
        assert_eq!(eval("1<<3"), "8.000");
        assert_eq!(eval("PI"), "3.142");
    }

    #[test]
    fn test_radix_output() {
        assert_eq!(eval("hex(255)"), "0xFF");
        assert_eq!(eval("bin(5)"), "0b101");
        assert_eq!(eval("dec(0xFF)"), "255.000");
    }

    #[test]
    fn test_mode_resets_each_line() {
        let mut session = Session::new(Config::default());
        assert_eq!(output(&mut session, "hex(255)"), "0xFF");
        assert_eq!(output(&mut session, "255"), "255.000");
    }

    #[test]
    fn test_strings() {
        assert_eq!(eval("\"ab\" + \"cd\""), "abcd");
        assert_eq!(eval("chr(72) + 'i'"), "Hi");
    }

    #[test]
    fn test_errors_leave_session_usable() {
        let mut session = Session::new(Config::default());

        assert!(matches!(
            session.evaluate("\"ab\" + 3"),
            Err(Error::Eval(EvalError::TypeMismatch { .. }))
        ));
        assert!(matches!(
            session.evaluate("(2+3"),
            Err(Error::Eval(EvalError::UnbalancedParen { .. }))
        ));
        assert!(matches!(
            session.evaluate("'open"),
            Err(Error::Lex(LexError::UnterminatedString { .. }))
        ));
        assert!(matches!(
            session.evaluate("2 +"),
            Err(Error::Eval(EvalError::IncompleteExpression { .. }))
        ));

        assert_eq!(output(&mut session, "1+1"), "2.000");
    }

    #[test]
    fn test_debug_persists_across_lines() {
        let mut session = Session::new(Config::default());
        assert_eq!(output(&mut session, "debug 1"), "1.000");
        assert!(session.config.debug);
        assert_eq!(output(&mut session, "2*2"), "4.000");
        assert!(session.config.debug);
        assert_eq!(output(&mut session, "debug"), "0.000");
        assert!(!session.config.debug);
    }

    #[test]
    fn test_exit_reply() {
        let mut session = Session::new(Config::default());
        assert_eq!(session.evaluate("exit").unwrap(), Reply::Exit(0));
        assert_eq!(session.evaluate("exit 4").unwrap(), Reply::Exit(4));
    }

    #[test]
    fn test_help_reply_carries_notes() {
        let mut session = Session::new(Config::default());
        match session.evaluate("help").unwrap() {
            Reply::Output { text, notes } => {
                assert_eq!(text, "0.000");
                assert!(notes[0].starts_with("Arithmetic expression solver"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
