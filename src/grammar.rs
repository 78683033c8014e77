//! The proto3 grammar: productions plus their semantic actions, and the
//! `lazy_static` table built from them once per process.
//!
//! Every action is a plain `fn(Vec<Value>) -> Value`, never a closure: the
//! values arrive in right-hand-side order and are consumed with
//! `v.into_iter()` rather than indexing, since each is moved out exactly
//! once. A handful of repeated shapes (empty/singleton/list-append,
//! variant-wrapping) are generated by small local macros mirroring the
//! `expect!` macro in `value.rs`.

use lazy_static::lazy_static;

use lalr1::{Grammar, ParseTable, Production, Symbol};

use crate::ast;
use crate::literal::{parse_int_literal, unquote_string};
use crate::symbol::{NonTerminal, Terminal};
use crate::value::{EnumItem, MessageItem, OneofItem, ServiceItem, TopItem, Value};

fn t(terminal: Terminal) -> Symbol<Terminal, NonTerminal> {
    Symbol::Terminal(terminal)
}

fn n(nonterminal: NonTerminal) -> Symbol<Terminal, NonTerminal> {
    Symbol::NonTerminal(nonterminal)
}

fn tok_span(token: &lexan::Token<Terminal>) -> ast::Span {
    let loc = token.location();
    ast::Span::new(
        loc.file().to_string(),
        loc.offset(),
        loc.offset() + token.text().len(),
        loc.line(),
        loc.column(),
    )
}

/// Forwards a single reduced value unchanged; used for productions that
/// exist only to give a shape in the grammar a name (`reserved_item ->
/// range`, `key_type -> full_ident`, ...).
fn passthrough(v: Vec<Value>) -> Value {
    v.into_iter().next().unwrap()
}

macro_rules! list_empty {
    ($name:ident, $variant:ident) => {
        fn $name(_v: Vec<Value>) -> Value {
            Value::$variant(Vec::new())
        }
    };
}

macro_rules! list_single {
    ($name:ident, $variant:ident, $item_expect:ident) => {
        fn $name(v: Vec<Value>) -> Value {
            let item = v.into_iter().next().unwrap().$item_expect();
            Value::$variant(vec![item])
        }
    };
}

macro_rules! list_append2 {
    ($name:ident, $variant:ident, $list_expect:ident, $item_expect:ident) => {
        fn $name(v: Vec<Value>) -> Value {
            let mut it = v.into_iter();
            let mut list = it.next().unwrap().$list_expect();
            let item = it.next().unwrap().$item_expect();
            list.push(item);
            Value::$variant(list)
        }
    };
}

macro_rules! list_append3 {
    ($name:ident, $variant:ident, $list_expect:ident, $item_expect:ident) => {
        fn $name(v: Vec<Value>) -> Value {
            let mut it = v.into_iter();
            let mut list = it.next().unwrap().$list_expect();
            let _sep = it.next().unwrap();
            let item = it.next().unwrap().$item_expect();
            list.push(item);
            Value::$variant(list)
        }
    };
}

macro_rules! wrap1 {
    ($name:ident, $inner_expect:ident, $outer:ident, $outer_variant:ident, $wrapper:ident) => {
        fn $name(v: Vec<Value>) -> Value {
            Value::$outer(($outer_variant::$wrapper(v.into_iter().next().unwrap().$inner_expect())))
        }
    };
}

// ---------------------------------------------------------------------
// file / syntax_decl
// ---------------------------------------------------------------------

/// Builds the [`ast::File`] from the raw top-level item list. Whether a
/// `syntax` statement was present, was first, and said `proto3` is *not*
/// checked here: that is a post-parse validation performed by
/// `parse_source`, not a grammar-level concern. Absence is represented as
/// an empty `syntax` string and a zero span, which the caller recognizes
/// as "missing".
fn file_action(v: Vec<Value>) -> Value {
    let top_items = v.into_iter().next().unwrap().expect_top_item_list();
    let mut file = ast::File {
        syntax: String::new(),
        package: None,
        imports: Vec::new(),
        options: Vec::new(),
        messages: Vec::new(),
        enums: Vec::new(),
        services: Vec::new(),
        extensions: Vec::new(),
        span: ast::Span::new(String::new(), 0, 0, 1, 1),
    };
    for (index, item) in top_items.into_iter().enumerate() {
        match item {
            TopItem::Syntax(span, text) => {
                if index == 0 {
                    file.syntax = text;
                    file.span = span;
                }
            }
            TopItem::Package(name) => file.package = Some(name),
            TopItem::Import(import) => file.imports.push(import),
            TopItem::Option(opt) => file.options.push(opt),
            TopItem::Message(m) => file.messages.push(m),
            TopItem::Enum(e) => file.enums.push(e),
            TopItem::Service(s) => file.services.push(s),
            TopItem::Extensions(items) => file.extensions.push(items),
        }
    }
    Value::File(file)
}

fn syntax_decl_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let kw = it.next().unwrap().expect_token();
    let _eq = it.next().unwrap();
    let str_tok = it.next().unwrap().expect_token();
    let semi = it.next().unwrap().expect_token();
    let value = unquote_string(str_tok.text());
    let span = ast::Span::join(&tok_span(&kw), &tok_span(&semi));
    Value::Syntax(span, value)
}

list_empty!(top_item_list_empty, TopItemList);
list_append2!(top_item_list_append, TopItemList, expect_top_item_list, expect_top_item);

fn top_item_from_syntax(v: Vec<Value>) -> Value {
    let (span, text) = v.into_iter().next().unwrap().expect_syntax();
    Value::TopItem(TopItem::Syntax(span, text))
}
fn top_item_from_package(v: Vec<Value>) -> Value {
    Value::TopItem(TopItem::Package(v.into_iter().next().unwrap().expect_str()))
}
fn top_item_from_import(v: Vec<Value>) -> Value {
    Value::TopItem(TopItem::Import(v.into_iter().next().unwrap().expect_import()))
}
fn top_item_from_option(v: Vec<Value>) -> Value {
    Value::TopItem(TopItem::Option(v.into_iter().next().unwrap().expect_option_stmt()))
}
fn top_item_from_message(v: Vec<Value>) -> Value {
    Value::TopItem(TopItem::Message(v.into_iter().next().unwrap().expect_message()))
}
fn top_item_from_enum(v: Vec<Value>) -> Value {
    Value::TopItem(TopItem::Enum(v.into_iter().next().unwrap().expect_enum()))
}
fn top_item_from_service(v: Vec<Value>) -> Value {
    Value::TopItem(TopItem::Service(v.into_iter().next().unwrap().expect_service()))
}
fn top_item_from_extensions(v: Vec<Value>) -> Value {
    Value::TopItem(TopItem::Extensions(v.into_iter().next().unwrap().expect_reserved_item_list()))
}

// ---------------------------------------------------------------------
// package / import
// ---------------------------------------------------------------------

fn package_decl_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let _kw = it.next().unwrap();
    let name = it.next().unwrap().expect_str();
    let _semi = it.next().unwrap();
    Value::Str(name)
}

fn import_kind_default(_v: Vec<Value>) -> Value {
    Value::ImportKind(ast::ImportKind::Default)
}
fn import_kind_public(v: Vec<Value>) -> Value {
    let _ = v.into_iter().next().unwrap().expect_token();
    Value::ImportKind(ast::ImportKind::Public)
}
fn import_kind_weak(v: Vec<Value>) -> Value {
    let _ = v.into_iter().next().unwrap().expect_token();
    Value::ImportKind(ast::ImportKind::Weak)
}

fn import_decl_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let kw = it.next().unwrap().expect_token();
    let kind = it.next().unwrap().expect_import_kind();
    let str_tok = it.next().unwrap().expect_token();
    let semi = it.next().unwrap().expect_token();
    let path = unquote_string(str_tok.text());
    let span = ast::Span::join(&tok_span(&kw), &tok_span(&semi));
    Value::Import(ast::Import { path, kind, span })
}

// ---------------------------------------------------------------------
// options
// ---------------------------------------------------------------------

fn option_decl_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let kw = it.next().unwrap().expect_token();
    let path = it.next().unwrap().expect_option_path();
    let _eq = it.next().unwrap();
    let value = it.next().unwrap().expect_option_value();
    let semi = it.next().unwrap().expect_token();
    let span = ast::Span::join(&tok_span(&kw), &tok_span(&semi));
    Value::OptionStmt(ast::OptionStmt { path, value, span })
}

list_single!(option_path_single, OptionPath, expect_option_path_component);
list_append3!(option_path_append, OptionPath, expect_option_path, expect_option_path_component);

fn option_path_component_from_ident(v: Vec<Value>) -> Value {
    let tok = v.into_iter().next().unwrap().expect_token();
    Value::OptionPathComponent(ast::OptionPathComponent { name: tok.text().to_string(), is_extension: false })
}
fn option_path_component_from_extension(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let _lp = it.next().unwrap();
    let name = it.next().unwrap().expect_str();
    let _rp = it.next().unwrap();
    Value::OptionPathComponent(ast::OptionPathComponent { name, is_extension: true })
}

fn option_value_string(v: Vec<Value>) -> Value {
    let s = v.into_iter().next().unwrap().expect_str();
    Value::OptionValue(ast::OptionValue::StringValue(s))
}
fn option_value_int(v: Vec<Value>) -> Value {
    let (text, _n) = v.into_iter().next().unwrap().expect_signed_int();
    Value::OptionValue(ast::OptionValue::NumberValue(text))
}
fn option_value_float(v: Vec<Value>) -> Value {
    let tok = v.into_iter().next().unwrap().expect_token();
    Value::OptionValue(ast::OptionValue::NumberValue(tok.text().to_string()))
}
fn option_value_neg_float(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let _minus = it.next().unwrap();
    let tok = it.next().unwrap().expect_token();
    Value::OptionValue(ast::OptionValue::NumberValue(format!("-{}", tok.text())))
}
fn option_value_true(v: Vec<Value>) -> Value {
    let _ = v.into_iter().next().unwrap().expect_token();
    Value::OptionValue(ast::OptionValue::BoolValue(true))
}
fn option_value_false(v: Vec<Value>) -> Value {
    let _ = v.into_iter().next().unwrap().expect_token();
    Value::OptionValue(ast::OptionValue::BoolValue(false))
}
fn option_value_ident(v: Vec<Value>) -> Value {
    let name = v.into_iter().next().unwrap().expect_str();
    Value::OptionValue(ast::OptionValue::Identifier(name))
}
fn option_value_message(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let _lb = it.next().unwrap();
    let fields = it.next().unwrap().expect_option_field_list();
    let _rb = it.next().unwrap();
    Value::OptionValue(ast::OptionValue::Message(fields))
}
fn option_value_list_wrap(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let _lb = it.next().unwrap();
    let values = it.next().unwrap().expect_option_value_list();
    let _rb = it.next().unwrap();
    Value::OptionValue(ast::OptionValue::List(values))
}

list_empty!(option_value_list_empty, OptionValueList);
list_single!(option_value_list_single, OptionValueList, expect_option_value);
list_append3!(option_value_list_append, OptionValueList, expect_option_value_list, expect_option_value);

list_empty!(option_field_list_empty, OptionFieldList);
list_single!(option_field_list_single, OptionFieldList, expect_option_field);
list_append2!(option_field_list_append2, OptionFieldList, expect_option_field_list, expect_option_field);
list_append3!(option_field_list_append_comma, OptionFieldList, expect_option_field_list, expect_option_field);
list_append3!(option_field_list_append_semi, OptionFieldList, expect_option_field_list, expect_option_field);

fn option_field_from_ident(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let tok = it.next().unwrap().expect_token();
    let _colon = it.next().unwrap();
    let value = it.next().unwrap().expect_option_value();
    Value::OptionField(tok.text().to_string(), value)
}
fn option_field_from_extension(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let _lp = it.next().unwrap();
    let name = it.next().unwrap().expect_str();
    let _rp = it.next().unwrap();
    let _colon = it.next().unwrap();
    let value = it.next().unwrap().expect_option_value();
    Value::OptionField(format!("({})", name), value)
}

fn string_lit_single(v: Vec<Value>) -> Value {
    let tok = v.into_iter().next().unwrap().expect_token();
    Value::Str(unquote_string(tok.text()))
}
fn string_lit_append(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let prefix = it.next().unwrap().expect_str();
    let tok = it.next().unwrap().expect_token();
    Value::Str(format!("{}{}", prefix, unquote_string(tok.text())))
}

fn signed_int_plain(v: Vec<Value>) -> Value {
    let tok = v.into_iter().next().unwrap().expect_token();
    let n = parse_int_literal(tok.text());
    Value::SignedInt(tok.text().to_string(), n)
}
fn signed_int_neg(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let _minus = it.next().unwrap();
    let tok = it.next().unwrap().expect_token();
    let n = -parse_int_literal(tok.text());
    Value::SignedInt(format!("-{}", tok.text()), n)
}

// ---------------------------------------------------------------------
// message
// ---------------------------------------------------------------------

fn message_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let kw = it.next().unwrap().expect_token();
    let (_, name) = it.next().unwrap().expect_decl_name();
    let _lb = it.next().unwrap();
    let items = it.next().unwrap().expect_message_item_list();
    let rb = it.next().unwrap().expect_token();
    let span = ast::Span::join(&tok_span(&kw), &tok_span(&rb));
    let mut message = ast::Message::new(name, span);
    for item in items {
        match item {
            MessageItem::Field(f) => message.fields.push(f),
            MessageItem::Message(m) => message.nested_messages.push(m),
            MessageItem::Enum(e) => message.nested_enums.push(e),
            MessageItem::Oneof(o) => message.oneofs.push(o),
            MessageItem::Reserved(r) => message.reserveds.push(r),
            MessageItem::Option(o) => message.options.push(o),
        }
    }
    Value::Message(message)
}

list_empty!(message_item_list_empty, MessageItemList);
list_append2!(message_item_list_append, MessageItemList, expect_message_item_list, expect_message_item);

wrap1!(message_item_from_field, expect_field, MessageItem, MessageItem, Field);
wrap1!(message_item_from_message, expect_message, MessageItem, MessageItem, Message);
wrap1!(message_item_from_enum, expect_enum, MessageItem, MessageItem, Enum);
wrap1!(message_item_from_oneof, expect_oneof, MessageItem, MessageItem, Oneof);
wrap1!(message_item_from_reserved, expect_reserved, MessageItem, MessageItem, Reserved);
wrap1!(message_item_from_option, expect_option_stmt, MessageItem, MessageItem, Option);

// ---------------------------------------------------------------------
// field
// ---------------------------------------------------------------------

fn field_label_none(_v: Vec<Value>) -> Value {
    Value::FieldLabel(None)
}
fn field_label_optional(v: Vec<Value>) -> Value {
    let _ = v.into_iter().next().unwrap().expect_token();
    Value::FieldLabel(Some(ast::FieldLabel::Optional))
}
fn field_label_repeated(v: Vec<Value>) -> Value {
    let _ = v.into_iter().next().unwrap().expect_token();
    Value::FieldLabel(Some(ast::FieldLabel::Repeated))
}

fn field_type_named(v: Vec<Value>) -> Value {
    let name = v.into_iter().next().unwrap().expect_str();
    Value::FieldType(ast::FieldType::Named(name))
}

fn field_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let label = it.next().unwrap().expect_field_label();
    let field_type = it.next().unwrap().expect_field_type();
    let (name_span, name) = it.next().unwrap().expect_decl_name();
    let _eq = it.next().unwrap();
    let num_tok = it.next().unwrap().expect_token();
    let options = it.next().unwrap().expect_option_stmt_list();
    let semi = it.next().unwrap().expect_token();
    let number = parse_int_literal(num_tok.text());
    let span = ast::Span::join(&name_span, &tok_span(&semi));
    Value::Field(ast::Field { label, field_type, name, number, options, span })
}

fn field_options_wrap_empty(_v: Vec<Value>) -> Value {
    Value::OptionStmtList(Vec::new())
}
fn field_options_wrap_present(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let _lb = it.next().unwrap();
    let list = it.next().unwrap().expect_option_stmt_list();
    let _rb = it.next().unwrap();
    Value::OptionStmtList(list)
}

list_single!(field_option_list_single, OptionStmtList, expect_option_stmt);
list_append3!(field_option_list_append, OptionStmtList, expect_option_stmt_list, expect_option_stmt);

fn field_option_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let path = it.next().unwrap().expect_option_path();
    let eq = it.next().unwrap().expect_token();
    let value = it.next().unwrap().expect_option_value();
    let span = tok_span(&eq);
    Value::OptionStmt(ast::OptionStmt { path, value, span })
}

// ---------------------------------------------------------------------
// oneof
// ---------------------------------------------------------------------

fn oneof_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let kw = it.next().unwrap().expect_token();
    let (_, name) = it.next().unwrap().expect_decl_name();
    let _lb = it.next().unwrap();
    let items = it.next().unwrap().expect_oneof_item_list();
    let rb = it.next().unwrap().expect_token();
    let span = ast::Span::join(&tok_span(&kw), &tok_span(&rb));
    let mut fields = Vec::new();
    let mut options = Vec::new();
    for item in items {
        match item {
            OneofItem::Field(f) => fields.push(f),
            OneofItem::Option(o) => options.push(o),
        }
    }
    Value::Oneof(ast::Oneof { name, fields, options, span })
}

list_empty!(oneof_item_list_empty, OneofItemList);
list_append2!(oneof_item_list_append, OneofItemList, expect_oneof_item_list, expect_oneof_item);

wrap1!(oneof_item_from_field, expect_field, OneofItem, OneofItem, Field);
wrap1!(oneof_item_from_option, expect_option_stmt, OneofItem, OneofItem, Option);

// ---------------------------------------------------------------------
// map_field
// ---------------------------------------------------------------------

fn key_type_action(v: Vec<Value>) -> Value {
    Value::Str(v.into_iter().next().unwrap().expect_str())
}

fn map_field_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let kw = it.next().unwrap().expect_token();
    let _langle = it.next().unwrap();
    let key = it.next().unwrap().expect_str();
    let _comma = it.next().unwrap();
    let value_type = it.next().unwrap().expect_field_type();
    let _rangle = it.next().unwrap();
    let (_, name) = it.next().unwrap().expect_decl_name();
    let _eq = it.next().unwrap();
    let num_tok = it.next().unwrap().expect_token();
    let options = it.next().unwrap().expect_option_stmt_list();
    let semi = it.next().unwrap().expect_token();
    let number = parse_int_literal(num_tok.text());
    let span = ast::Span::join(&tok_span(&kw), &tok_span(&semi));
    let field_type = ast::FieldType::Map { key, value: Box::new(value_type) };
    Value::Field(ast::Field { label: None, field_type, name, number, options, span })
}

// ---------------------------------------------------------------------
// reserved / extensions
// ---------------------------------------------------------------------

fn reserved_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let kw = it.next().unwrap().expect_token();
    let items = it.next().unwrap().expect_reserved_item_list();
    let semi = it.next().unwrap().expect_token();
    let span = ast::Span::join(&tok_span(&kw), &tok_span(&semi));
    Value::Reserved(ast::Reserved { items, span })
}

list_single!(reserved_item_list_single, ReservedItemList, expect_reserved_item);
list_append3!(reserved_item_list_append, ReservedItemList, expect_reserved_item_list, expect_reserved_item);

fn reserved_item_from_name(v: Vec<Value>) -> Value {
    let tok = v.into_iter().next().unwrap().expect_token();
    Value::ReservedItem(ast::ReservedItem::Name(unquote_string(tok.text())))
}

fn range_single(v: Vec<Value>) -> Value {
    let tok = v.into_iter().next().unwrap().expect_token();
    let start = parse_int_literal(tok.text());
    Value::ReservedItem(ast::ReservedItem::Range { start, end: None })
}
fn range_to(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let start_tok = it.next().unwrap().expect_token();
    let _to = it.next().unwrap();
    let end_tok = it.next().unwrap().expect_token();
    let start = parse_int_literal(start_tok.text());
    let end = parse_int_literal(end_tok.text());
    Value::ReservedItem(ast::ReservedItem::Range { start, end: Some(end) })
}
fn range_to_max(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let start_tok = it.next().unwrap().expect_token();
    let _to = it.next().unwrap();
    let _max = it.next().unwrap();
    let start = parse_int_literal(start_tok.text());
    Value::ReservedItem(ast::ReservedItem::Range { start, end: Some(i64::MAX) })
}

fn extensions_stmt_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let _kw = it.next().unwrap();
    let items = it.next().unwrap().expect_reserved_item_list();
    let _semi = it.next().unwrap();
    Value::ReservedItemList(items)
}

// ---------------------------------------------------------------------
// enum
// ---------------------------------------------------------------------

fn enum_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let kw = it.next().unwrap().expect_token();
    let (_, name) = it.next().unwrap().expect_decl_name();
    let _lb = it.next().unwrap();
    let items = it.next().unwrap().expect_enum_item_list();
    let rb = it.next().unwrap().expect_token();
    let span = ast::Span::join(&tok_span(&kw), &tok_span(&rb));
    let mut e = ast::Enum {
        name,
        values: Vec::new(),
        options: Vec::new(),
        reserveds: Vec::new(),
        span,
    };
    for item in items {
        match item {
            EnumItem::Value(val) => e.values.push(val),
            EnumItem::Option(o) => e.options.push(o),
            EnumItem::Reserved(r) => e.reserveds.push(r),
        }
    }
    Value::Enum(e)
}

list_empty!(enum_item_list_empty, EnumItemList);
list_append2!(enum_item_list_append, EnumItemList, expect_enum_item_list, expect_enum_item);

wrap1!(enum_item_from_value, expect_enum_value, EnumItem, EnumItem, Value);
wrap1!(enum_item_from_option, expect_option_stmt, EnumItem, EnumItem, Option);
wrap1!(enum_item_from_reserved, expect_reserved, EnumItem, EnumItem, Reserved);

fn enum_value_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let (name_span, name) = it.next().unwrap().expect_decl_name();
    let _eq = it.next().unwrap();
    let (_, number) = it.next().unwrap().expect_signed_int();
    let options = it.next().unwrap().expect_option_stmt_list();
    let semi = it.next().unwrap().expect_token();
    let span = ast::Span::join(&name_span, &tok_span(&semi));
    Value::EnumValue(ast::EnumValue { name, number, options, span })
}

// ---------------------------------------------------------------------
// service / rpc
// ---------------------------------------------------------------------

fn service_action(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let kw = it.next().unwrap().expect_token();
    let (_, name) = it.next().unwrap().expect_decl_name();
    let _lb = it.next().unwrap();
    let items = it.next().unwrap().expect_service_item_list();
    let rb = it.next().unwrap().expect_token();
    let span = ast::Span::join(&tok_span(&kw), &tok_span(&rb));
    let mut rpcs = Vec::new();
    let mut options = Vec::new();
    for item in items {
        match item {
            ServiceItem::Rpc(r) => rpcs.push(r),
            ServiceItem::Option(o) => options.push(o),
        }
    }
    Value::Service(ast::Service { name, rpcs, options, span })
}

list_empty!(service_item_list_empty, ServiceItemList);
list_append2!(service_item_list_append, ServiceItemList, expect_service_item_list, expect_service_item);

wrap1!(service_item_from_rpc, expect_rpc, ServiceItem, ServiceItem, Rpc);
wrap1!(service_item_from_option, expect_option_stmt, ServiceItem, ServiceItem, Option);

fn rpc_type_stream(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let _kw = it.next().unwrap();
    let name = it.next().unwrap().expect_str();
    Value::RpcType(name, true)
}
fn rpc_type_plain(v: Vec<Value>) -> Value {
    let name = v.into_iter().next().unwrap().expect_str();
    Value::RpcType(name, false)
}

list_empty!(rpc_option_list_empty, OptionStmtList);
list_append2!(rpc_option_list_append, OptionStmtList, expect_option_stmt_list, expect_option_stmt);

fn rpc_action_simple(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let kw = it.next().unwrap().expect_token();
    let (_, name) = it.next().unwrap().expect_decl_name();
    let _lp1 = it.next().unwrap();
    let (input_type, input_stream) = it.next().unwrap().expect_rpc_type();
    let _rp1 = it.next().unwrap();
    let _returns = it.next().unwrap();
    let _lp2 = it.next().unwrap();
    let (output_type, output_stream) = it.next().unwrap().expect_rpc_type();
    let _rp2 = it.next().unwrap();
    let semi = it.next().unwrap().expect_token();
    let span = ast::Span::join(&tok_span(&kw), &tok_span(&semi));
    Value::Rpc(ast::Rpc {
        name,
        input_type,
        input_stream,
        output_type,
        output_stream,
        options: Vec::new(),
        span,
    })
}

fn rpc_action_with_options(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let kw = it.next().unwrap().expect_token();
    let (_, name) = it.next().unwrap().expect_decl_name();
    let _lp1 = it.next().unwrap();
    let (input_type, input_stream) = it.next().unwrap().expect_rpc_type();
    let _rp1 = it.next().unwrap();
    let _returns = it.next().unwrap();
    let _lp2 = it.next().unwrap();
    let (output_type, output_stream) = it.next().unwrap().expect_rpc_type();
    let _rp2 = it.next().unwrap();
    let _lb = it.next().unwrap();
    let options = it.next().unwrap().expect_option_stmt_list();
    let rb = it.next().unwrap().expect_token();
    let span = ast::Span::join(&tok_span(&kw), &tok_span(&rb));
    Value::Rpc(ast::Rpc {
        name,
        input_type,
        input_stream,
        output_type,
        output_stream,
        options,
        span,
    })
}

// ---------------------------------------------------------------------
// full_ident / ident_or_keyword
// ---------------------------------------------------------------------

fn full_ident_single(v: Vec<Value>) -> Value {
    Value::Str(v.into_iter().next().unwrap().expect_str())
}
fn full_ident_append(v: Vec<Value>) -> Value {
    let mut it = v.into_iter();
    let prefix = it.next().unwrap().expect_str();
    let _dot = it.next().unwrap();
    let suffix = it.next().unwrap().expect_str();
    Value::Str(format!("{}.{}", prefix, suffix))
}

fn ident_text(v: Vec<Value>) -> Value {
    let tok = v.into_iter().next().unwrap().expect_token();
    Value::Str(tok.text().to_string())
}

fn decl_name_action(v: Vec<Value>) -> Value {
    let tok = v.into_iter().next().unwrap().expect_token();
    let span = tok_span(&tok);
    Value::DeclName(span, tok.text().to_string())
}

/// Builds the production list and wraps it in a [`Grammar`]. Kept as a
/// function (rather than inlined in the `lazy_static!`) so the production
/// table reads top-to-bottom like the grammar it encodes.
fn build_grammar() -> Grammar<Terminal, NonTerminal, Value> {
    use NonTerminal::*;
    use Terminal::*;

    let mut productions = vec![
        Production::new(File, vec![n(TopLevelDeclList)], file_action),
        Production::new(SyntaxDecl, vec![t(Syntax), t(Equals), t(StringLit), t(Semi)], syntax_decl_action),
        Production::new(TopLevelDeclList, vec![], top_item_list_empty),
        Production::new(TopLevelDeclList, vec![n(TopLevelDeclList), n(TopLevelDecl)], top_item_list_append),
        Production::new(TopLevelDecl, vec![n(SyntaxDecl)], top_item_from_syntax),
        Production::new(TopLevelDecl, vec![n(PackageDecl)], top_item_from_package),
        Production::new(TopLevelDecl, vec![n(ImportDecl)], top_item_from_import),
        Production::new(TopLevelDecl, vec![n(OptionDecl)], top_item_from_option),
        Production::new(TopLevelDecl, vec![n(NonTerminal::Message)], top_item_from_message),
        Production::new(TopLevelDecl, vec![n(NonTerminal::Enum)], top_item_from_enum),
        Production::new(TopLevelDecl, vec![n(NonTerminal::Service)], top_item_from_service),
        Production::new(TopLevelDecl, vec![n(NonTerminal::Extensions)], top_item_from_extensions),
        Production::new(PackageDecl, vec![t(Package), n(FullIdent), t(Semi)], package_decl_action),
        Production::new(ImportDecl, vec![t(Import), n(ImportKind), t(StringLit), t(Semi)], import_decl_action),
        Production::new(ImportKind, vec![], import_kind_default),
        Production::new(ImportKind, vec![t(Public)], import_kind_public),
        Production::new(ImportKind, vec![t(Weak)], import_kind_weak),
        Production::new(NonTerminal::Extensions, vec![t(Terminal::Extensions), n(ReservedItemList), t(Semi)], extensions_stmt_action),
        // options
        Production::new(OptionDecl, vec![t(Option), n(OptionPath), t(Equals), n(OptionValue), t(Semi)], option_decl_action),
        Production::new(OptionPath, vec![n(OptionPathComponent)], option_path_single),
        Production::new(OptionPath, vec![n(OptionPath), t(Dot), n(OptionPathComponent)], option_path_append),
        Production::new(OptionPathComponent, vec![t(Ident)], option_path_component_from_ident),
        Production::new(OptionPathComponent, vec![t(LParen), n(FullIdent), t(RParen)], option_path_component_from_extension),
        Production::new(OptionValue, vec![n(StringLitList)], option_value_string),
        Production::new(OptionValue, vec![n(SignedInt)], option_value_int),
        Production::new(OptionValue, vec![t(FloatLit)], option_value_float),
        Production::new(OptionValue, vec![t(Terminal::Minus), t(FloatLit)], option_value_neg_float),
        Production::new(OptionValue, vec![t(True)], option_value_true),
        Production::new(OptionValue, vec![t(False)], option_value_false),
        Production::new(OptionValue, vec![n(FullIdent)], option_value_ident),
        Production::new(OptionValue, vec![t(LBrace), n(OptionFieldList), t(RBrace)], option_value_message),
        Production::new(OptionValue, vec![t(LBracket), n(OptionValueList), t(RBracket)], option_value_list_wrap),
        Production::new(OptionValueList, vec![], option_value_list_empty),
        Production::new(OptionValueList, vec![n(OptionValue)], option_value_list_single),
        Production::new(OptionValueList, vec![n(OptionValueList), t(Comma), n(OptionValue)], option_value_list_append),
        Production::new(OptionFieldList, vec![], option_field_list_empty),
        Production::new(OptionFieldList, vec![n(OptionField)], option_field_list_single),
        Production::new(OptionFieldList, vec![n(OptionFieldList), n(OptionField)], option_field_list_append2),
        Production::new(OptionFieldList, vec![n(OptionFieldList), t(Comma), n(OptionField)], option_field_list_append_comma),
        Production::new(OptionFieldList, vec![n(OptionFieldList), t(Semi), n(OptionField)], option_field_list_append_semi),
        Production::new(OptionField, vec![t(Ident), t(Colon), n(OptionValue)], option_field_from_ident),
        Production::new(OptionField, vec![t(LParen), n(FullIdent), t(RParen), t(Colon), n(OptionValue)], option_field_from_extension),
        Production::new(StringLitList, vec![t(StringLit)], string_lit_single),
        Production::new(StringLitList, vec![n(StringLitList), t(StringLit)], string_lit_append),
        Production::new(SignedInt, vec![t(IntLit)], signed_int_plain),
        Production::new(SignedInt, vec![t(Terminal::Minus), t(IntLit)], signed_int_neg),
        // message
        Production::new(NonTerminal::Message, vec![t(Terminal::Message), n(DeclName), t(LBrace), n(MessageBodyList), t(RBrace)], message_action),
        Production::new(MessageBodyList, vec![], message_item_list_empty),
        Production::new(MessageBodyList, vec![n(MessageBodyList), n(MessageBodyItem)], message_item_list_append),
        Production::new(MessageBodyItem, vec![n(Field)], message_item_from_field),
        Production::new(MessageBodyItem, vec![n(MapField)], message_item_from_field),
        Production::new(MessageBodyItem, vec![n(NonTerminal::Message)], message_item_from_message),
        Production::new(MessageBodyItem, vec![n(NonTerminal::Enum)], message_item_from_enum),
        Production::new(MessageBodyItem, vec![n(NonTerminal::Oneof)], message_item_from_oneof),
        Production::new(MessageBodyItem, vec![n(NonTerminal::Reserved)], message_item_from_reserved),
        Production::new(MessageBodyItem, vec![n(OptionDecl)], message_item_from_option),
        // field
        Production::new(FieldLabel, vec![], field_label_none),
        Production::new(FieldLabel, vec![t(Optional)], field_label_optional),
        Production::new(FieldLabel, vec![t(Repeated)], field_label_repeated),
        Production::new(FieldType, vec![n(FullIdent)], field_type_named),
        Production::new(
            Field,
            vec![n(FieldLabel), n(FieldType), n(DeclName), t(Equals), t(IntLit), n(FieldOptionsWrap), t(Semi)],
            field_action,
        ),
        Production::new(FieldOptionsWrap, vec![], field_options_wrap_empty),
        Production::new(FieldOptionsWrap, vec![t(LBracket), n(FieldOptionList), t(RBracket)], field_options_wrap_present),
        Production::new(FieldOptionList, vec![n(FieldOption)], field_option_list_single),
        Production::new(FieldOptionList, vec![n(FieldOptionList), t(Comma), n(FieldOption)], field_option_list_append),
        Production::new(FieldOption, vec![n(OptionPath), t(Equals), n(OptionValue)], field_option_action),
        // oneof
        Production::new(NonTerminal::Oneof, vec![t(Terminal::Oneof), n(DeclName), t(LBrace), n(OneofBodyList), t(RBrace)], oneof_action),
        Production::new(OneofBodyList, vec![], oneof_item_list_empty),
        Production::new(OneofBodyList, vec![n(OneofBodyList), n(OneofBodyItem)], oneof_item_list_append),
        Production::new(OneofBodyItem, vec![n(Field)], oneof_item_from_field),
        Production::new(OneofBodyItem, vec![n(OptionDecl)], oneof_item_from_option),
        // map_field
        Production::new(KeyType, vec![n(FullIdent)], key_type_action),
        Production::new(
            MapField,
            vec![
                t(Terminal::Map),
                t(LAngle),
                n(KeyType),
                t(Comma),
                n(FieldType),
                t(RAngle),
                n(DeclName),
                t(Equals),
                t(IntLit),
                n(FieldOptionsWrap),
                t(Semi),
            ],
            map_field_action,
        ),
        // reserved
        Production::new(NonTerminal::Reserved, vec![t(Terminal::Reserved), n(ReservedItemList), t(Semi)], reserved_action),
        Production::new(ReservedItemList, vec![n(ReservedItem)], reserved_item_list_single),
        Production::new(ReservedItemList, vec![n(ReservedItemList), t(Comma), n(ReservedItem)], reserved_item_list_append),
        Production::new(ReservedItem, vec![n(Range)], passthrough),
        Production::new(ReservedItem, vec![t(StringLit)], reserved_item_from_name),
        Production::new(Range, vec![t(IntLit)], range_single),
        Production::new(Range, vec![t(IntLit), t(Terminal::To), t(IntLit)], range_to),
        Production::new(Range, vec![t(IntLit), t(Terminal::To), t(Terminal::Max)], range_to_max),
        // enum
        Production::new(NonTerminal::Enum, vec![t(Terminal::Enum), n(DeclName), t(LBrace), n(EnumBodyList), t(RBrace)], enum_action),
        Production::new(EnumBodyList, vec![], enum_item_list_empty),
        Production::new(EnumBodyList, vec![n(EnumBodyList), n(EnumBodyItem)], enum_item_list_append),
        Production::new(EnumBodyItem, vec![n(EnumValue)], enum_item_from_value),
        Production::new(EnumBodyItem, vec![n(OptionDecl)], enum_item_from_option),
        Production::new(EnumBodyItem, vec![n(NonTerminal::Reserved)], enum_item_from_reserved),
        Production::new(EnumValue, vec![n(DeclName), t(Equals), n(SignedInt), n(FieldOptionsWrap), t(Semi)], enum_value_action),
        // service / rpc
        Production::new(NonTerminal::Service, vec![t(Terminal::Service), n(DeclName), t(LBrace), n(ServiceBodyList), t(RBrace)], service_action),
        Production::new(ServiceBodyList, vec![], service_item_list_empty),
        Production::new(ServiceBodyList, vec![n(ServiceBodyList), n(ServiceBodyItem)], service_item_list_append),
        Production::new(ServiceBodyItem, vec![n(NonTerminal::Rpc)], service_item_from_rpc),
        Production::new(ServiceBodyItem, vec![n(OptionDecl)], service_item_from_option),
        Production::new(RpcType, vec![t(Terminal::Stream), n(FullIdent)], rpc_type_stream),
        Production::new(RpcType, vec![n(FullIdent)], rpc_type_plain),
        Production::new(RpcOptionList, vec![], rpc_option_list_empty),
        Production::new(RpcOptionList, vec![n(RpcOptionList), n(OptionDecl)], rpc_option_list_append),
        Production::new(
            NonTerminal::Rpc,
            vec![
                t(Terminal::Rpc),
                n(DeclName),
                t(LParen),
                n(RpcType),
                t(RParen),
                t(Returns),
                t(LParen),
                n(RpcType),
                t(RParen),
                t(Semi),
            ],
            rpc_action_simple,
        ),
        Production::new(
            NonTerminal::Rpc,
            vec![
                t(Terminal::Rpc),
                n(DeclName),
                t(LParen),
                n(RpcType),
                t(RParen),
                t(Returns),
                t(LParen),
                n(RpcType),
                t(RParen),
                t(LBrace),
                n(RpcOptionList),
                t(RBrace),
            ],
            rpc_action_with_options,
        ),
        // full_ident / ident_or_keyword
        Production::new(FullIdent, vec![n(IdentOrKeyword)], full_ident_single),
        Production::new(FullIdent, vec![n(FullIdent), t(Dot), n(IdentOrKeyword)], full_ident_append),
        Production::new(IdentOrKeyword, vec![t(Ident)], ident_text),
        Production::new(NonTerminal::DeclName, vec![t(Ident)], decl_name_action),
    ];

    for keyword in Terminal::CONTEXTUAL_KEYWORDS {
        productions.push(Production::new(IdentOrKeyword, vec![t(*keyword)], ident_text));
    }
    for keyword in Terminal::DECL_NAME_KEYWORDS {
        productions.push(Production::new(NonTerminal::DeclName, vec![t(*keyword)], decl_name_action));
    }

    Grammar::new(
        NonTerminal::AugmentedStart,
        NonTerminal::File,
        Terminal::Eof,
        Terminal::all(),
        vec![
            NonTerminal::File,
            NonTerminal::SyntaxDecl,
            NonTerminal::TopLevelDeclList,
            NonTerminal::TopLevelDecl,
            NonTerminal::PackageDecl,
            NonTerminal::ImportDecl,
            NonTerminal::ImportKind,
            NonTerminal::OptionDecl,
            NonTerminal::OptionPath,
            NonTerminal::OptionPathComponent,
            NonTerminal::OptionValue,
            NonTerminal::OptionValueList,
            NonTerminal::OptionFieldList,
            NonTerminal::OptionField,
            NonTerminal::Message,
            NonTerminal::MessageBodyList,
            NonTerminal::MessageBodyItem,
            NonTerminal::Field,
            NonTerminal::FieldLabel,
            NonTerminal::FieldType,
            NonTerminal::FieldOptionsWrap,
            NonTerminal::FieldOptionList,
            NonTerminal::FieldOption,
            NonTerminal::Oneof,
            NonTerminal::OneofBodyList,
            NonTerminal::OneofBodyItem,
            NonTerminal::MapField,
            NonTerminal::KeyType,
            NonTerminal::Reserved,
            NonTerminal::ReservedItemList,
            NonTerminal::ReservedItem,
            NonTerminal::Range,
            NonTerminal::Enum,
            NonTerminal::EnumBodyList,
            NonTerminal::EnumBodyItem,
            NonTerminal::EnumValue,
            NonTerminal::Service,
            NonTerminal::ServiceBodyList,
            NonTerminal::ServiceBodyItem,
            NonTerminal::Rpc,
            NonTerminal::RpcType,
            NonTerminal::Extensions,
            NonTerminal::RpcOptionList,
            NonTerminal::SignedInt,
            NonTerminal::IdentOrKeyword,
            NonTerminal::FullIdent,
            NonTerminal::StringLitList,
            NonTerminal::DeclName,
        ],
        productions,
    )
}

lazy_static! {
    pub static ref GRAMMAR: Grammar<Terminal, NonTerminal, Value> = build_grammar();
    pub static ref TABLE: ParseTable<Terminal, NonTerminal> =
        lalr1::build(&GRAMMAR).expect("proto3 grammar is LALR(1)");
}
