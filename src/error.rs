//! The crate's single user-facing error type.
//!
//! `InvariantViolation` (an impossible parser/table state) is deliberately
//! not a variant here: per the driver contract it is a grammar or
//! table-builder bug, not a caller-handleable failure, and surfaces as a
//! panic rather than a `Result`. `ParseError` is the only failure this
//! crate's public functions return.

use std::fmt;

use crate::ast::Span;
use crate::symbol::Terminal;
use crate::tokenizer;

/// A user-facing parse failure: an unexpected token, a lexical error, or a
/// post-parse semantic check (missing/non-proto3 syntax declaration,
/// unresolved import).
#[derive(Debug, Clone)]
pub struct ParseError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl ParseError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        ParseError { span, message: message.into(), hint: None }
    }

    pub fn with_hint(span: Span, message: impl Into<String>, hint: impl Into<String>) -> Self {
        ParseError { span, message: message.into(), hint: Some(hint.into()) }
    }

    pub(crate) fn from_driver_error(error: lalr1::DriverError<Terminal>, source: &str) -> Self {
        match &error {
            lalr1::DriverError::Lexical(lex_error) => {
                let location = error.location();
                let message = tokenizer::describe_lex_error(lex_error, source);
                let span = Span::new(
                    location.file().to_string(),
                    location.offset(),
                    location.offset(),
                    location.line(),
                    location.column(),
                );
                ParseError::new(span, message)
            }
            lalr1::DriverError::UnexpectedToken { found, found_text, .. } => {
                let location = error.location();
                let hint = error.hint();
                let span = Span::new(
                    location.file().to_string(),
                    location.offset(),
                    location.offset() + found_text.len(),
                    location.line(),
                    location.column(),
                );
                let message = format!("unexpected {}", found.symbol_name());
                match hint {
                    Some(h) => ParseError::with_hint(span, message, h),
                    None => ParseError::new(span, message),
                }
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {}", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
