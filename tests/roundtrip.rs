//! The literal multi-declaration sample from the round-trip scenario:
//! syntax/package/import/option, a message with reserved ranges, fields,
//! a oneof, and a nested enum with `allow_alias`, plus a service with
//! four rpcs including one carrying per-method options.

const SAMPLE: &str = r#"
syntax = "proto3";
package foo.bar;
import "dep.proto";
option java_package = "com.example.foobar";

message A {
  reserved 2, 5 to 10, 15 to max;
  reserved "old_field";

  string name = 1;
  repeated int32 tags = 2 [packed = true];

  oneof payload {
    string text = 3;
    int32 number = 4;
  }

  enum E {
    option allow_alias = true;
    UNKNOWN = 0;
    KNOWN = 1;
    ALIAS = 1;
  }
}

service S {
  rpc Get(A) returns (A);
  rpc List(A) returns (stream A);
  rpc Upload(stream A) returns (A);
  rpc Chat(stream A) returns (stream A) {
    option idempotency_level = "IDEMPOTENT";
  }
}
"#;

#[test]
fn sample_parses_and_round_trips() {
    let ast = protolalr::parse_source(SAMPLE, "sample.proto").expect("sample parses");
    assert_eq!(ast.syntax, "proto3");
    assert_eq!(ast.package.as_deref(), Some("foo.bar"));
    assert_eq!(ast.imports.len(), 1);
    assert_eq!(ast.messages.len(), 1);
    assert_eq!(ast.messages[0].nested_enums.len(), 1);
    assert_eq!(ast.services.len(), 1);
    assert_eq!(ast.services[0].rpcs.len(), 4);

    let first = protolalr::format::format_file(&ast);
    let reparsed = protolalr::parse_source(&first, "sample.proto").expect("formatted output reparses");
    let second = protolalr::format::format_file(&reparsed);
    assert_eq!(first, second, "formatting must be idempotent under re-parse");
}
