//! Canonical proto3 source formatting.
//!
//! The formatter never looks at source spans; it walks the typed AST and
//! re-derives layout from scratch, which is what makes the round-trip
//! property (`format(parse(format(parse(s)))) == format(parse(s))`) hold
//! regardless of how the original file was laid out.

use crate::ast;
use crate::literal::quote_string;

const INDENT: &str = "  ";

/// Formats a whole file as canonical proto3 source.
pub fn format_file(file: &ast::File) -> String {
    let mut out = String::new();
    out.push_str(&format!("syntax = {};\n", quote_string(&file.syntax)));

    if let Some(package) = &file.package {
        out.push('\n');
        out.push_str(&format!("package {};\n", package));
    }

    if !file.imports.is_empty() {
        out.push('\n');
        for import in &file.imports {
            let kind = match import.kind {
                ast::ImportKind::Default => "",
                ast::ImportKind::Public => "public ",
                ast::ImportKind::Weak => "weak ",
            };
            out.push_str(&format!("import {}{};\n", kind, quote_string(&import.path)));
        }
    }

    if !file.options.is_empty() {
        out.push('\n');
        for option in &file.options {
            out.push_str(&format_option_stmt(option, 0));
        }
    }

    for extension_group in &file.extensions {
        out.push('\n');
        out.push_str(&format_reserved_items("extensions", extension_group, 0));
    }

    for message in &file.messages {
        out.push('\n');
        out.push_str(&format_message(message, 0));
    }

    for en in &file.enums {
        out.push('\n');
        out.push_str(&format_enum(en, 0));
    }

    for service in &file.services {
        out.push('\n');
        out.push_str(&format_service(service, 0));
    }

    out
}

fn indent(level: usize) -> String {
    INDENT.repeat(level)
}

fn format_option_path(path: &[ast::OptionPathComponent]) -> String {
    path.iter()
        .map(|c| if c.is_extension { format!("({})", c.name) } else { c.name.clone() })
        .collect::<Vec<_>>()
        .join(".")
}

fn format_option_value(value: &ast::OptionValue) -> String {
    match value {
        ast::OptionValue::StringValue(s) => quote_string(s),
        ast::OptionValue::NumberValue(text) => text.clone(),
        ast::OptionValue::BoolValue(b) => b.to_string(),
        ast::OptionValue::Identifier(name) => name.clone(),
        ast::OptionValue::Message(fields) => {
            let body = fields
                .iter()
                .map(|(k, v)| format!("{}: {}", k, format_option_value(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{ {} }}", body)
        }
        ast::OptionValue::List(items) => {
            let body = items.iter().map(format_option_value).collect::<Vec<_>>().join(", ");
            format!("[{}]", body)
        }
    }
}

fn format_option_stmt(opt: &ast::OptionStmt, level: usize) -> String {
    format!(
        "{}option {} = {};\n",
        indent(level),
        format_option_path(&opt.path),
        format_option_value(&opt.value)
    )
}

fn format_inline_options(options: &[ast::OptionStmt]) -> String {
    if options.is_empty() {
        return String::new();
    }
    let body = options
        .iter()
        .map(|o| format!("{} = {}", format_option_path(&o.path), format_option_value(&o.value)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(" [{}]", body)
}

fn format_reserved_item(item: &ast::ReservedItem) -> String {
    match item {
        ast::ReservedItem::Name(name) => quote_string(name),
        ast::ReservedItem::Range { start, end: None } => start.to_string(),
        ast::ReservedItem::Range { start, end: Some(end) } if *end == i64::MAX => {
            format!("{} to max", start)
        }
        ast::ReservedItem::Range { start, end: Some(end) } => format!("{} to {}", start, end),
    }
}

fn format_reserved_items(keyword: &str, items: &[ast::ReservedItem], level: usize) -> String {
    let body = items.iter().map(format_reserved_item).collect::<Vec<_>>().join(", ");
    format!("{}{} {};\n", indent(level), keyword, body)
}

fn format_field_type(field_type: &ast::FieldType) -> String {
    match field_type {
        ast::FieldType::Named(name) => name.clone(),
        ast::FieldType::Map { key, value } => format!("map<{}, {}>", key, format_field_type(value)),
    }
}

fn format_field(field: &ast::Field, level: usize) -> String {
    let label = match field.label {
        Some(ast::FieldLabel::Optional) => "optional ",
        Some(ast::FieldLabel::Repeated) => "repeated ",
        None => "",
    };
    format!(
        "{}{}{} {} = {}{};\n",
        indent(level),
        label,
        format_field_type(&field.field_type),
        field.name,
        field.number,
        format_inline_options(&field.options),
    )
}

fn format_oneof(oneof: &ast::Oneof, level: usize) -> String {
    let mut out = format!("{}oneof {} {{\n", indent(level), oneof.name);
    for option in &oneof.options {
        out.push_str(&format_option_stmt(option, level + 1));
    }
    for field in &oneof.fields {
        out.push_str(&format_field(field, level + 1));
    }
    out.push_str(&format!("{}}}\n", indent(level)));
    out
}

/// Message-body declarations are grouped by kind, in this fixed order,
/// with one blank line between non-empty groups; source order within a
/// message is not preserved.
fn format_message(message: &ast::Message, level: usize) -> String {
    let mut out = format!("{}message {} {{\n", indent(level), message.name);
    let mut groups: Vec<String> = Vec::new();

    if !message.options.is_empty() {
        let mut g = String::new();
        for option in &message.options {
            g.push_str(&format_option_stmt(option, level + 1));
        }
        groups.push(g);
    }
    if !message.reserveds.is_empty() {
        let mut g = String::new();
        for reserved in &message.reserveds {
            g.push_str(&format_reserved_items("reserved", &reserved.items, level + 1));
        }
        groups.push(g);
    }
    if !message.fields.is_empty() {
        let mut g = String::new();
        for field in &message.fields {
            g.push_str(&format_field(field, level + 1));
        }
        groups.push(g);
    }
    if !message.oneofs.is_empty() {
        let mut g = String::new();
        for oneof in &message.oneofs {
            g.push_str(&format_oneof(oneof, level + 1));
        }
        groups.push(g);
    }
    if !message.nested_enums.is_empty() {
        let mut g = String::new();
        for nested in &message.nested_enums {
            g.push_str(&format_enum(nested, level + 1));
        }
        groups.push(g);
    }
    if !message.nested_messages.is_empty() {
        let mut g = String::new();
        for nested in &message.nested_messages {
            g.push_str(&format_message(nested, level + 1));
        }
        groups.push(g);
    }

    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(group);
    }
    out.push_str(&format!("{}}}\n", indent(level)));
    out
}

fn format_enum_value(value: &ast::EnumValue, level: usize) -> String {
    format!(
        "{}{} = {}{};\n",
        indent(level),
        value.name,
        value.number,
        format_inline_options(&value.options),
    )
}

fn format_enum(en: &ast::Enum, level: usize) -> String {
    let mut out = format!("{}enum {} {{\n", indent(level), en.name);
    let mut groups: Vec<String> = Vec::new();

    if !en.options.is_empty() {
        let mut g = String::new();
        for option in &en.options {
            g.push_str(&format_option_stmt(option, level + 1));
        }
        groups.push(g);
    }
    if !en.reserveds.is_empty() {
        let mut g = String::new();
        for reserved in &en.reserveds {
            g.push_str(&format_reserved_items("reserved", &reserved.items, level + 1));
        }
        groups.push(g);
    }
    if !en.values.is_empty() {
        let mut g = String::new();
        for value in &en.values {
            g.push_str(&format_enum_value(value, level + 1));
        }
        groups.push(g);
    }

    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(group);
    }
    out.push_str(&format!("{}}}\n", indent(level)));
    out
}

fn format_rpc_type(name: &str, streaming: bool) -> String {
    if streaming {
        format!("stream {}", name)
    } else {
        name.to_string()
    }
}

fn format_rpc(rpc: &ast::Rpc, level: usize) -> String {
    let header = format!(
        "{}rpc {}({}) returns ({})",
        indent(level),
        rpc.name,
        format_rpc_type(&rpc.input_type, rpc.input_stream),
        format_rpc_type(&rpc.output_type, rpc.output_stream),
    );
    if rpc.options.is_empty() {
        format!("{};\n", header)
    } else {
        let mut out = format!("{} {{\n", header);
        for option in &rpc.options {
            out.push_str(&format_option_stmt(option, level + 1));
        }
        out.push_str(&format!("{}}}\n", indent(level)));
        out
    }
}

fn format_service(service: &ast::Service, level: usize) -> String {
    let mut out = format!("{}service {} {{\n", indent(level), service.name);
    let mut groups: Vec<String> = Vec::new();

    if !service.options.is_empty() {
        let mut g = String::new();
        for option in &service.options {
            g.push_str(&format_option_stmt(option, level + 1));
        }
        groups.push(g);
    }
    if !service.rpcs.is_empty() {
        let mut g = String::new();
        for rpc in &service.rpcs {
            g.push_str(&format_rpc(rpc, level + 1));
        }
        groups.push(g);
    }

    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(group);
    }
    out.push_str(&format!("{}}}\n", indent(level)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_source;

    fn roundtrip(source: &str) -> String {
        let ast = parse_source(source, "t.proto").expect("parses");
        format_file(&ast)
    }

    #[test]
    fn formats_minimal_file() {
        let out = roundtrip(r#"syntax = "proto3"; message A {}"#);
        assert_eq!(out, "syntax = \"proto3\";\n\nmessage A {\n}\n");
    }

    #[test]
    fn idempotent_under_reparse() {
        let source = r#"
            syntax = "proto3";
            package foo.bar;
            message A {
              reserved 2, 5 to 10, 15 to max;
              string name = 1 [deprecated = true];
              repeated int32 values = 2;
              oneof choice {
                string text = 3;
                int32 number = 4;
              }
              enum E {
                option allow_alias = true;
                UNKNOWN = 0;
                KNOWN = 1;
              }
            }
            service S {
              rpc Get(A) returns (A);
              rpc Stream(stream A) returns (stream A) {
                option idempotency_level = "NO_SIDE_EFFECTS";
              }
            }
        "#;
        let first = roundtrip(source);
        let second = roundtrip(&first);
        assert_eq!(first, second);
    }

    #[test]
    fn formats_field_options_inline() {
        let out = roundtrip(r#"syntax = "proto3"; message A { int32 x = 1 [deprecated = true]; }"#);
        assert!(out.contains("int32 x = 1 [deprecated = true];"));
    }
}
