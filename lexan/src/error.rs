use std::convert::From;
use std::fmt;

/// Errors raised while *constructing* a [`crate::LexicalAnalyzer`] (bad
/// patterns, duplicate handles). Distinct from [`crate::Error`], which is
/// raised while *scanning* text with an already-built analyzer.
#[derive(Debug)]
pub enum LexanError<T> {
    DuplicateHandle(T),
    DuplicatePattern(String),
    EmptyPattern,
    RegexError(regex::Error),
}

impl<T> From<regex::Error> for LexanError<T> {
    fn from(error: regex::Error) -> Self {
        LexanError::RegexError(error)
    }
}

impl<T: fmt::Debug> fmt::Display for LexanError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LexanError::DuplicateHandle(t) => write!(f, "duplicate token handle: {:?}", t),
            LexanError::DuplicatePattern(p) => write!(f, "duplicate pattern: {:?}", p),
            LexanError::EmptyPattern => write!(f, "empty pattern"),
            LexanError::RegexError(e) => write!(f, "regex error: {}", e),
        }
    }
}
