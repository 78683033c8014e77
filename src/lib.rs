//! An LALR(1) parser and canonical formatter for proto3 source files.
//!
//! The core — symbols, grammar, table builder, tokenizer, and driver — is
//! a direct instantiation of the `lalr1`/`lexan` machinery over proto3's
//! grammar. This crate's own modules are the proto3-specific parts: the
//! [`ast`] node types, the grammar's semantic actions (`grammar`), the
//! lexical rules (`tokenizer`), and [`format`]/[`resolver`], the thin
//! front-end collaborators that make the core usable end to end.

pub mod ast;
pub mod error;
pub mod format;
mod grammar;
mod literal;
pub mod resolver;
mod symbol;
mod tokenizer;
mod value;

pub use error::ParseError;
pub use resolver::{parse_files, ParsedFiles};

use value::Value;

/// Parses a single proto3 source file, already read into memory.
///
/// Runs the LALR(1) driver over `text`, then validates the one invariant
/// the grammar itself cannot express: `syntax = "proto3";` must be the
/// first top-level statement.
pub fn parse_source(text: &str, file: &str) -> Result<ast::File, ParseError> {
    let value = lalr1::parse(&grammar::GRAMMAR, &grammar::TABLE, &tokenizer::LEXER, text, file)
        .map_err(|e| ParseError::from_driver_error(e, text))?;
    let file_ast = expect_file(value);
    validate_syntax(file_ast, file)
}

fn expect_file(value: Value) -> ast::File {
    value.expect_file()
}

fn validate_syntax(file_ast: ast::File, file_name: &str) -> Result<ast::File, ParseError> {
    if file_ast.syntax.is_empty() {
        let span = ast::Span::new(file_name.to_string(), 0, 0, 1, 1);
        return Err(ParseError::new(span, "missing syntax"));
    }
    if file_ast.syntax != "proto3" {
        let message = format!("only proto3 is supported, found \"{}\"", file_ast.syntax);
        return Err(ParseError::new(file_ast.span.clone(), message));
    }
    Ok(file_ast)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_syntax_statement() {
        let err = parse_source("package foo; message A {}", "x.proto").unwrap_err();
        assert!(err.message.contains("missing syntax"));
        assert_eq!(err.span.file, "x.proto");
    }

    #[test]
    fn empty_file_is_missing_syntax() {
        let err = parse_source("", "x.proto").unwrap_err();
        assert!(err.message.contains("missing syntax"));
    }

    #[test]
    fn rejects_proto2() {
        let err = parse_source(r#"syntax = "proto2";"#, "x.proto").unwrap_err();
        assert!(err.message.contains("only proto3"));
    }

    #[test]
    fn parses_minimal_proto3_file() {
        let ast = parse_source(r#"syntax = "proto3"; message A {}"#, "x.proto").unwrap();
        assert_eq!(ast.syntax, "proto3");
        assert_eq!(ast.messages.len(), 1);
        assert_eq!(ast.messages[0].name, "A");
    }

    #[test]
    fn unexpected_token_hints_syntax() {
        let err = parse_source(";", "x.proto").unwrap_err();
        let hint = err.hint.expect("expected-set hint");
        assert!(hint.contains("syntax"));
    }

    #[test]
    fn keyword_named_field_parses() {
        let ast = parse_source(r#"syntax = "proto3"; message A { int32 stream = 1; }"#, "x.proto").unwrap();
        assert_eq!(ast.messages[0].fields[0].name, "stream");
    }

    #[test]
    fn keyword_named_declarations_parse() {
        let source = r#"
            syntax = "proto3";
            message message {
              bool service = 1;
            }
            enum enum {
              weak = 0;
              map = 1;
            }
            service service {
              rpc rpc(message) returns (message);
            }
        "#;
        let ast = parse_source(source, "x.proto").unwrap();
        assert_eq!(ast.messages[0].name, "message");
        assert_eq!(ast.messages[0].fields[0].name, "service");
        assert_eq!(ast.enums[0].name, "enum");
        assert_eq!(ast.enums[0].values[0].name, "weak");
        assert_eq!(ast.enums[0].values[1].name, "map");
        assert_eq!(ast.services[0].name, "service");
        assert_eq!(ast.services[0].rpcs[0].name, "rpc");
    }
}
