//! Typed AST produced by the parser and consumed by the formatter.
//!
//! Every node carries a [`Span`] so diagnostics and formatting can point
//! back at source text. Once a parse completes, these trees are read-only.

use std::fmt;

/// A source range: a file label plus byte offsets and a starting
/// line/column, suitable for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub file: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub start_line: usize,
    pub start_column: usize,
}

impl Span {
    pub fn new(
        file: impl Into<String>,
        start_offset: usize,
        end_offset: usize,
        start_line: usize,
        start_column: usize,
    ) -> Self {
        Span { file: file.into(), start_offset, end_offset, start_line, start_column }
    }

    /// A zero-width span used to join two spans that must cover a range
    /// (e.g. a whole declaration built up from several tokens).
    pub fn join(a: &Span, b: &Span) -> Span {
        Span {
            file: a.file.clone(),
            start_offset: a.start_offset,
            end_offset: b.end_offset,
            start_line: a.start_line,
            start_column: a.start_column,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.start_line, self.start_column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Default,
    Public,
    Weak,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub path: String,
    pub kind: ImportKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionPathComponent {
    pub name: String,
    /// `true` for a parenthesized (extension) component: `(foo.bar)`.
    pub is_extension: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionStmt {
    pub path: Vec<OptionPathComponent>,
    pub value: OptionValue,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Fully decoded and concatenated; re-quoted canonically on output.
    StringValue(String),
    /// Kept as source text: integer radix and float precision are not
    /// reinterpreted, only ever copied through.
    NumberValue(String),
    BoolValue(bool),
    /// A bare identifier value, e.g. an enum constant reference or the
    /// special `inf`/`nan` float tokens.
    Identifier(String),
    Message(Vec<(String, OptionValue)>),
    List(Vec<OptionValue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLabel {
    Optional,
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Named(String),
    Map { key: String, value: Box<FieldType> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: Option<FieldLabel>,
    pub field_type: FieldType,
    pub name: String,
    pub number: i64,
    pub options: Vec<OptionStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Oneof {
    pub name: String,
    pub fields: Vec<Field>,
    pub options: Vec<OptionStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservedItem {
    Range { start: i64, end: Option<i64> },
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reserved {
    pub items: Vec<ReservedItem>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub number: i64,
    pub options: Vec<OptionStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
    pub options: Vec<OptionStmt>,
    pub reserveds: Vec<Reserved>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub name: String,
    pub fields: Vec<Field>,
    pub nested_messages: Vec<Message>,
    pub nested_enums: Vec<Enum>,
    pub oneofs: Vec<Oneof>,
    pub reserveds: Vec<Reserved>,
    pub options: Vec<OptionStmt>,
    pub span: Span,
}

impl Message {
    pub fn new(name: String, span: Span) -> Self {
        Message {
            name,
            fields: Vec::new(),
            nested_messages: Vec::new(),
            nested_enums: Vec::new(),
            oneofs: Vec::new(),
            reserveds: Vec::new(),
            options: Vec::new(),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rpc {
    pub name: String,
    pub input_type: String,
    pub input_stream: bool,
    pub output_type: String,
    pub output_stream: bool,
    pub options: Vec<OptionStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub rpcs: Vec<Rpc>,
    pub options: Vec<OptionStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub syntax: String,
    pub package: Option<String>,
    pub imports: Vec<Import>,
    pub options: Vec<OptionStmt>,
    pub messages: Vec<Message>,
    pub enums: Vec<Enum>,
    pub services: Vec<Service>,
    pub extensions: Vec<Vec<ReservedItem>>,
    pub span: Span,
}
