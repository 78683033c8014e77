//! LALR(1) table construction and a generic shift/reduce parser driver.
//!
//! This crate knows nothing about any particular grammar. A caller defines
//! its terminals and non-terminals (implementing [`grammar::TerminalId`] /
//! [`grammar::NonTerminalId`]), assembles a [`grammar::Grammar`], builds a
//! [`table::ParseTable`] with [`table::build`] once (typically behind a
//! `lazy_static`), and then drives individual parses with [`parser::parse`].

pub mod grammar;
pub mod parser;
pub mod table;

pub use grammar::{Grammar, NonTerminalId, Production, Symbol, TerminalId};
pub use parser::{parse, DriverError, SemanticValue};
pub use table::{build, Action, ConflictReport, ParseTable};
