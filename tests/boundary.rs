//! End-to-end boundary behaviors from the parser's public entry point.

#[test]
fn empty_file_is_missing_syntax() {
    let err = protolalr::parse_source("", "x.proto").unwrap_err();
    assert!(err.message.contains("missing syntax"));
}

#[test]
fn package_before_syntax_is_missing_syntax() {
    let err = protolalr::parse_source("package foo; message A {}", "x.proto").unwrap_err();
    assert!(err.message.contains("missing syntax"), "{}", err.message);
    assert_eq!(err.span.file, "x.proto");
}

#[test]
fn proto2_is_rejected() {
    let err = protolalr::parse_source(r#"syntax = "proto2";"#, "x.proto").unwrap_err();
    assert!(err.message.contains("only proto3"), "{}", err.message);
}

#[test]
fn unterminated_string_literal_reports_lex_error() {
    let source = "syntax = \"proto3\";\noption foo = \"abc;\n";
    let err = protolalr::parse_source(source, "x.proto").unwrap_err();
    assert!(err.message.to_lowercase().contains("string"), "{}", err.message);
}

#[test]
fn unexpected_token_before_syntax_hints_syntax() {
    let err = protolalr::parse_source(";", "x.proto").unwrap_err();
    assert!(err.message.contains("unexpected"), "{}", err.message);
    let hint = err.hint.expect("hint present");
    assert!(hint.contains("syntax"), "{}", hint);
}
