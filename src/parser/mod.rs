pub mod snapshot;

use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum ParserError {
    EmptyInput,
    UnterminatedQuote,
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::EmptyInput => write!(f, "Empty input"),
            ParserError::UnterminatedQuote => write!(f, "Unterminated quote"),
        }
    }
}

impl std::error::Error for ParserError {}

pub type ParserResult = Result<Vec<String>, ParserError>;

/// Splits shell command lines into words.
pub struct Parser {}

impl Parser {
    /// Words follow POSIX shell quoting, so `"red apple"` and `'red apple'`
    /// are both a single word.
    pub fn parse(line: &str) -> ParserResult {
        let words = shlex::split(line).ok_or(ParserError::UnterminatedQuote)?;
        if words.is_empty() {
            return Err(ParserError::EmptyInput);
        }
        Ok(words)
    }
}
