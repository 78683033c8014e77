//! Terminal and non-terminal identities for the proto3 grammar.

use lalr1::{NonTerminalId, TerminalId};

/// Lexical categories produced by the tokenizer and consumed by the
/// grammar. Keyword terminals are matched by the tokenizer's keyword table;
/// everything else that looks like an identifier falls back to `Ident`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terminal {
    // Punctuation
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    LAngle,
    RAngle,
    Comma,
    Dot,
    Semi,
    Equals,
    Colon,
    Minus,
    // Keywords
    Syntax,
    Package,
    Import,
    Public,
    Weak,
    Option,
    Message,
    Enum,
    Service,
    Rpc,
    Returns,
    Stream,
    Oneof,
    Map,
    Repeated,
    Optional,
    Required,
    Reserved,
    To,
    Max,
    Extensions,
    Extend,
    True,
    False,
    // Literals
    IntLit,
    FloatLit,
    StringLit,
    Ident,
    // Special
    Eof,
}

impl Terminal {
    pub const PUNCTUATION: &'static [(Terminal, &'static str)] = &[
        (Terminal::LBrace, "{"),
        (Terminal::RBrace, "}"),
        (Terminal::LBracket, "["),
        (Terminal::RBracket, "]"),
        (Terminal::LParen, "("),
        (Terminal::RParen, ")"),
        (Terminal::LAngle, "<"),
        (Terminal::RAngle, ">"),
        (Terminal::Comma, ","),
        (Terminal::Dot, "."),
        (Terminal::Semi, ";"),
        (Terminal::Equals, "="),
        (Terminal::Colon, ":"),
        (Terminal::Minus, "-"),
    ];

    pub const KEYWORDS: &'static [(Terminal, &'static str)] = &[
        (Terminal::Syntax, "syntax"),
        (Terminal::Package, "package"),
        (Terminal::Import, "import"),
        (Terminal::Public, "public"),
        (Terminal::Weak, "weak"),
        (Terminal::Option, "option"),
        (Terminal::Message, "message"),
        (Terminal::Enum, "enum"),
        (Terminal::Service, "service"),
        (Terminal::Rpc, "rpc"),
        (Terminal::Returns, "returns"),
        (Terminal::Stream, "stream"),
        (Terminal::Oneof, "oneof"),
        (Terminal::Map, "map"),
        (Terminal::Repeated, "repeated"),
        (Terminal::Optional, "optional"),
        (Terminal::Required, "required"),
        (Terminal::Reserved, "reserved"),
        (Terminal::To, "to"),
        (Terminal::Max, "max"),
        (Terminal::Extensions, "extensions"),
        (Terminal::Extend, "extend"),
        (Terminal::True, "true"),
        (Terminal::False, "false"),
    ];

    /// Keywords that the grammar also accepts where an identifier is
    /// expected, via `ident_or_keyword`.
    ///
    /// Deliberately small: a keyword can only go here if no production
    /// shifts it to *start* a construct that can also appear where an
    /// identifier is expected (field type, rpc type, option value, ...),
    /// otherwise the two readings collide in the LALR tables. `required`
    /// and `extend` are never shifted by any production, so they are free;
    /// `to` and `max` only ever appear following an already-shifted
    /// integer literal inside a reserved/extensions range, a position
    /// `full_ident` never reaches.
    pub const CONTEXTUAL_KEYWORDS: &'static [Terminal] = &[
        Terminal::Required,
        Terminal::Extend,
        Terminal::To,
        Terminal::Max,
    ];

    /// Keywords the grammar also accepts in declaration-name positions
    /// (message, field, oneof, map field, enum, enum value, service, and rpc
    /// names), via `decl_name`.
    ///
    /// Broader than `CONTEXTUAL_KEYWORDS`: every one of those name slots is
    /// reached only after a preceding token (`message`, a reduced field
    /// type, `oneof`, ...) has already committed the parser to that
    /// production, so there's no sibling alternative left to collide with
    /// — with one exception. An enum value's name starts the same state as
    /// `option` and `reserved` declarations inside an enum body, so `option`
    /// and `reserved` are left out here; every other keyword is safe to use
    /// as a name everywhere `decl_name` appears.
    pub const DECL_NAME_KEYWORDS: &'static [Terminal] = &[
        Terminal::Syntax,
        Terminal::Package,
        Terminal::Import,
        Terminal::Public,
        Terminal::Weak,
        Terminal::Message,
        Terminal::Enum,
        Terminal::Service,
        Terminal::Rpc,
        Terminal::Returns,
        Terminal::Stream,
        Terminal::Oneof,
        Terminal::Map,
        Terminal::Repeated,
        Terminal::Optional,
        Terminal::Required,
        Terminal::To,
        Terminal::Max,
        Terminal::Extensions,
        Terminal::Extend,
        Terminal::True,
        Terminal::False,
    ];

    pub fn all() -> Vec<Terminal> {
        let mut v: Vec<Terminal> = Self::PUNCTUATION.iter().map(|(t, _)| *t).collect();
        v.extend(Self::KEYWORDS.iter().map(|(t, _)| *t));
        v.extend([Terminal::IntLit, Terminal::FloatLit, Terminal::StringLit, Terminal::Ident, Terminal::Eof]);
        v
    }
}

impl TerminalId for Terminal {
    fn symbol_name(&self) -> &'static str {
        match self {
            Terminal::LBrace => "{",
            Terminal::RBrace => "}",
            Terminal::LBracket => "[",
            Terminal::RBracket => "]",
            Terminal::LParen => "(",
            Terminal::RParen => ")",
            Terminal::LAngle => "<",
            Terminal::RAngle => ">",
            Terminal::Comma => ",",
            Terminal::Dot => ".",
            Terminal::Semi => ";",
            Terminal::Equals => "=",
            Terminal::Colon => ":",
            Terminal::Minus => "-",
            Terminal::Syntax => "syntax",
            Terminal::Package => "package",
            Terminal::Import => "import",
            Terminal::Public => "public",
            Terminal::Weak => "weak",
            Terminal::Option => "option",
            Terminal::Message => "message",
            Terminal::Enum => "enum",
            Terminal::Service => "service",
            Terminal::Rpc => "rpc",
            Terminal::Returns => "returns",
            Terminal::Stream => "stream",
            Terminal::Oneof => "oneof",
            Terminal::Map => "map",
            Terminal::Repeated => "repeated",
            Terminal::Optional => "optional",
            Terminal::Required => "required",
            Terminal::Reserved => "reserved",
            Terminal::To => "to",
            Terminal::Max => "max",
            Terminal::Extensions => "extensions",
            Terminal::Extend => "extend",
            Terminal::True => "true",
            Terminal::False => "false",
            Terminal::IntLit => "INT_LIT",
            Terminal::FloatLit => "FLOAT_LIT",
            Terminal::StringLit => "STRING_LIT",
            Terminal::Ident => "IDENT",
            Terminal::Eof => "EOF",
        }
    }

    fn display(&self) -> String {
        let name = self.symbol_name();
        if name.len() == 1 && "{}[]()<>,.;=:".contains(name) {
            name.to_string()
        } else {
            name.to_string()
        }
    }
}

/// Grammar non-terminals. `AugmentedStart` exists only to host the
/// synthesized `start' -> file EOF` production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NonTerminal {
    AugmentedStart,
    File,
    SyntaxDecl,
    TopLevelDeclList,
    TopLevelDecl,
    PackageDecl,
    ImportDecl,
    ImportKind,
    OptionDecl,
    OptionPath,
    OptionPathComponent,
    OptionValue,
    OptionValueList,
    OptionFieldList,
    OptionField,
    Message,
    MessageBodyList,
    MessageBodyItem,
    Field,
    FieldLabel,
    FieldType,
    FieldOptionsWrap,
    FieldOptionList,
    FieldOption,
    Oneof,
    OneofBodyList,
    OneofBodyItem,
    MapField,
    KeyType,
    Reserved,
    ReservedItemList,
    ReservedItem,
    Range,
    Enum,
    EnumBodyList,
    EnumBodyItem,
    EnumValue,
    Service,
    ServiceBodyList,
    ServiceBodyItem,
    Rpc,
    RpcType,
    Extensions,
    RpcOptionList,
    SignedInt,
    IdentOrKeyword,
    FullIdent,
    StringLitList,
    DeclName,
}

impl NonTerminalId for NonTerminal {
    fn symbol_name(&self) -> &'static str {
        match self {
            NonTerminal::AugmentedStart => "start'",
            NonTerminal::File => "file",
            NonTerminal::SyntaxDecl => "syntax_decl",
            NonTerminal::TopLevelDeclList => "top_level_decl_list",
            NonTerminal::TopLevelDecl => "top_level_decl",
            NonTerminal::PackageDecl => "package_decl",
            NonTerminal::ImportDecl => "import_decl",
            NonTerminal::ImportKind => "import_kind",
            NonTerminal::OptionDecl => "option_decl",
            NonTerminal::OptionPath => "option_path",
            NonTerminal::OptionPathComponent => "option_path_component",
            NonTerminal::OptionValue => "option_value",
            NonTerminal::OptionValueList => "option_value_list",
            NonTerminal::OptionFieldList => "option_field_list",
            NonTerminal::OptionField => "option_field",
            NonTerminal::Message => "message",
            NonTerminal::MessageBodyList => "message_body_list",
            NonTerminal::MessageBodyItem => "message_body_item",
            NonTerminal::Field => "field",
            NonTerminal::FieldLabel => "field_label",
            NonTerminal::FieldType => "field_type",
            NonTerminal::FieldOptionsWrap => "field_options_wrap",
            NonTerminal::FieldOptionList => "field_option_list",
            NonTerminal::FieldOption => "field_option",
            NonTerminal::Oneof => "oneof",
            NonTerminal::OneofBodyList => "oneof_body_list",
            NonTerminal::OneofBodyItem => "oneof_body_item",
            NonTerminal::MapField => "map_field",
            NonTerminal::KeyType => "key_type",
            NonTerminal::Reserved => "reserved",
            NonTerminal::ReservedItemList => "reserved_item_list",
            NonTerminal::ReservedItem => "reserved_item",
            NonTerminal::Range => "range",
            NonTerminal::Enum => "enum",
            NonTerminal::EnumBodyList => "enum_body_list",
            NonTerminal::EnumBodyItem => "enum_body_item",
            NonTerminal::EnumValue => "enum_value",
            NonTerminal::Service => "service",
            NonTerminal::ServiceBodyList => "service_body_list",
            NonTerminal::ServiceBodyItem => "service_body_item",
            NonTerminal::Rpc => "rpc",
            NonTerminal::RpcType => "rpc_type",
            NonTerminal::Extensions => "extensions",
            NonTerminal::RpcOptionList => "rpc_option_list",
            NonTerminal::SignedInt => "signed_int",
            NonTerminal::IdentOrKeyword => "ident_or_keyword",
            NonTerminal::FullIdent => "full_ident",
            NonTerminal::StringLitList => "string_lit_list",
            NonTerminal::DeclName => "decl_name",
        }
    }
}
