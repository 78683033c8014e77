//! The semantic value stack's element type.
//!
//! Every production's action receives and returns a [`Value`]: either the
//! raw [`lexan::Token`] from a shifted terminal, or the AST fragment built
//! by a prior reduction. Grammar actions downcast with the `expect_*`
//! helpers; a mismatch is an [`lalr1`] invariant violation (a grammar bug),
//! so these helpers panic rather than return `Result`.

use lalr1::SemanticValue;

use crate::ast;
use crate::symbol::Terminal;

/// One raw declaration inside a `message { ... }` body, before folding into
/// the final [`ast::Message`].
#[derive(Debug, Clone)]
pub enum MessageItem {
    Field(ast::Field),
    Message(ast::Message),
    Enum(ast::Enum),
    Oneof(ast::Oneof),
    Reserved(ast::Reserved),
    Option(ast::OptionStmt),
}

/// One raw declaration inside an `enum { ... }` body.
#[derive(Debug, Clone)]
pub enum EnumItem {
    Value(ast::EnumValue),
    Option(ast::OptionStmt),
    Reserved(ast::Reserved),
}

/// One raw declaration inside a `service { ... }` body.
#[derive(Debug, Clone)]
pub enum ServiceItem {
    Rpc(ast::Rpc),
    Option(ast::OptionStmt),
}

/// One raw declaration inside a `oneof { ... }` body.
#[derive(Debug, Clone)]
pub enum OneofItem {
    Field(ast::Field),
    Option(ast::OptionStmt),
}

/// One raw top-level declaration in a `.proto` file.
#[derive(Debug, Clone)]
pub enum TopItem {
    /// A `syntax = "...";` statement; validated for presence and value
    /// after the whole file has been reduced, not by the grammar itself.
    Syntax(ast::Span, String),
    Package(String),
    Import(ast::Import),
    Message(ast::Message),
    Enum(ast::Enum),
    Service(ast::Service),
    Option(ast::OptionStmt),
    Extensions(Vec<ast::ReservedItem>),
}

#[derive(Debug, Clone)]
pub enum Value {
    Token(lexan::Token<Terminal>),
    Str(String),
    Int(i64),
    Bool(bool),

    /// The decoded `syntax = "...";` declaration plus its source span, kept
    /// separate from `Str` so [`File`]'s span can be seeded from it.
    Syntax(ast::Span, String),
    ImportKind(ast::ImportKind),
    /// An integer literal's raw text (with any leading `-` re-applied) and
    /// its decoded value; callers pick whichever they need.
    SignedInt(String, i64),
    /// A declaration name (message/field/oneof/enum/enum value/service/rpc),
    /// which may be a plain identifier or one of the keywords `decl_name`
    /// also accepts there; kept with its span since every caller builds a
    /// node span from it.
    DeclName(ast::Span, String),

    File(ast::File),
    Import(ast::Import),
    Message(ast::Message),
    OptionStmt(ast::OptionStmt),
    OptionStmtList(Vec<ast::OptionStmt>),
    OptionPathComponent(ast::OptionPathComponent),
    OptionPath(Vec<ast::OptionPathComponent>),
    OptionValue(ast::OptionValue),
    OptionValueList(Vec<ast::OptionValue>),
    OptionField(String, ast::OptionValue),
    OptionFieldList(Vec<(String, ast::OptionValue)>),

    Field(ast::Field),
    /// `None` when the field carries no `optional`/`repeated` label.
    FieldLabel(Option<ast::FieldLabel>),
    FieldType(ast::FieldType),

    Oneof(ast::Oneof),
    OneofItem(OneofItem),
    OneofItemList(Vec<OneofItem>),
    Reserved(ast::Reserved),
    ReservedItem(ast::ReservedItem),
    ReservedItemList(Vec<ast::ReservedItem>),
    StringList(Vec<String>),

    Enum(ast::Enum),
    EnumValue(ast::EnumValue),

    Service(ast::Service),
    Rpc(ast::Rpc),
    RpcType(String, bool),

    MessageItem(MessageItem),
    MessageItemList(Vec<MessageItem>),
    EnumItem(EnumItem),
    EnumItemList(Vec<EnumItem>),
    ServiceItem(ServiceItem),
    ServiceItemList(Vec<ServiceItem>),
    TopItem(TopItem),
    TopItemList(Vec<TopItem>),
}

impl SemanticValue<Terminal> for Value {
    fn from_token(token: lexan::Token<Terminal>) -> Self {
        Value::Token(token)
    }
}

macro_rules! expect {
    ($name:ident, $variant:ident, $ty:ty) => {
        pub fn $name(self) -> $ty {
            match self {
                Value::$variant(v) => v,
                other => panic!(
                    concat!("expected Value::", stringify!($variant), ", found {:?}"),
                    other
                ),
            }
        }
    };
}

impl Value {
    pub fn expect_token(self) -> lexan::Token<Terminal> {
        match self {
            Value::Token(t) => t,
            other => panic!("expected Value::Token, found {:?}", other),
        }
    }

    expect!(expect_str, Str, String);
    expect!(expect_int, Int, i64);
    expect!(expect_bool, Bool, bool);
    expect!(expect_import_kind, ImportKind, ast::ImportKind);
    expect!(expect_file, File, ast::File);
    expect!(expect_import, Import, ast::Import);
    expect!(expect_message, Message, ast::Message);
    expect!(expect_option_stmt, OptionStmt, ast::OptionStmt);
    expect!(expect_option_stmt_list, OptionStmtList, Vec<ast::OptionStmt>);
    expect!(expect_option_path_component, OptionPathComponent, ast::OptionPathComponent);
    expect!(expect_option_path, OptionPath, Vec<ast::OptionPathComponent>);
    expect!(expect_option_value, OptionValue, ast::OptionValue);
    expect!(expect_option_value_list, OptionValueList, Vec<ast::OptionValue>);
    expect!(expect_field, Field, ast::Field);
    expect!(expect_field_label, FieldLabel, Option<ast::FieldLabel>);
    expect!(expect_field_type, FieldType, ast::FieldType);
    expect!(expect_oneof, Oneof, ast::Oneof);
    expect!(expect_oneof_item, OneofItem, OneofItem);
    expect!(expect_oneof_item_list, OneofItemList, Vec<OneofItem>);
    expect!(expect_reserved, Reserved, ast::Reserved);
    expect!(expect_reserved_item, ReservedItem, ast::ReservedItem);
    expect!(expect_reserved_item_list, ReservedItemList, Vec<ast::ReservedItem>);
    expect!(expect_string_list, StringList, Vec<String>);
    expect!(expect_enum, Enum, ast::Enum);
    expect!(expect_enum_value, EnumValue, ast::EnumValue);
    expect!(expect_service, Service, ast::Service);
    expect!(expect_rpc, Rpc, ast::Rpc);
    expect!(expect_message_item, MessageItem, MessageItem);
    expect!(expect_message_item_list, MessageItemList, Vec<MessageItem>);
    expect!(expect_enum_item, EnumItem, EnumItem);
    expect!(expect_enum_item_list, EnumItemList, Vec<EnumItem>);
    expect!(expect_service_item, ServiceItem, ServiceItem);
    expect!(expect_service_item_list, ServiceItemList, Vec<ServiceItem>);
    expect!(expect_top_item, TopItem, TopItem);
    expect!(expect_top_item_list, TopItemList, Vec<TopItem>);

    pub fn expect_option_field(self) -> (String, ast::OptionValue) {
        match self {
            Value::OptionField(key, value) => (key, value),
            other => panic!("expected Value::OptionField, found {:?}", other),
        }
    }

    pub fn expect_option_field_list(self) -> Vec<(String, ast::OptionValue)> {
        match self {
            Value::OptionFieldList(v) => v,
            other => panic!("expected Value::OptionFieldList, found {:?}", other),
        }
    }

    pub fn expect_rpc_type(self) -> (String, bool) {
        match self {
            Value::RpcType(name, streaming) => (name, streaming),
            other => panic!("expected Value::RpcType, found {:?}", other),
        }
    }

    pub fn expect_syntax(self) -> (ast::Span, String) {
        match self {
            Value::Syntax(span, text) => (span, text),
            other => panic!("expected Value::Syntax, found {:?}", other),
        }
    }

    pub fn expect_signed_int(self) -> (String, i64) {
        match self {
            Value::SignedInt(text, n) => (text, n),
            other => panic!("expected Value::SignedInt, found {:?}", other),
        }
    }

    pub fn expect_decl_name(self) -> (ast::Span, String) {
        match self {
            Value::DeclName(span, text) => (span, text),
            other => panic!("expected Value::DeclName, found {:?}", other),
        }
    }
}
