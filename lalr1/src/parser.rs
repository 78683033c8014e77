//! The generic shift/reduce driver.
//!
//! Mirrors the table-driven loop of a classic LALR(1) driver: two parallel
//! stacks (`states`, `values`) with the invariant `states.len() ==
//! values.len() + 1`, advancing by consulting a [`ParseTable`] built by
//! [`crate::table::build`]. Unlike a parser with error recovery, a syntax or
//! lexical error here terminates the parse immediately and is handed back
//! to the caller; there is no resynchronization.

use std::fmt;

use lexan::Location;

use crate::grammar::{Grammar, NonTerminalId, TerminalId};
use crate::table::{Action, ParseTable};

/// Semantic values on the parser's value stack are either a raw token (for
/// a shifted terminal) or an already-reduced value (for a non-terminal).
/// `V` is supplied by the grammar: it must be able to hold both.
pub trait SemanticValue<T: TerminalId>: Sized {
    fn from_token(token: lexan::Token<T>) -> Self;
}

/// A user-facing parse failure: an unexpected token or a lexical error.
/// Always carries a source location; `hint` is rendered on a continuation
/// line when present.
#[derive(Debug, Clone)]
pub enum DriverError<T: TerminalId> {
    Lexical(lexan::Error<T>),
    UnexpectedToken {
        location: Location,
        found: T,
        found_text: String,
        expected: Vec<T>,
    },
}

impl<T: TerminalId> fmt::Display for DriverError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DriverError::Lexical(error) => write!(f, "{}: {}", self.location(), error),
            DriverError::UnexpectedToken { location, found, .. } => {
                write!(f, "{}: unexpected {}", location, found.display())
            }
        }
    }
}

impl<T: TerminalId> DriverError<T> {
    /// Up to the first 12 expected terminals, sorted by `symbol_name`, each
    /// rendered with the punctuation-preferring display rule; `None` for
    /// lexical errors, which have no expected-set hint of their own.
    pub fn hint(&self) -> Option<String> {
        match self {
            DriverError::Lexical(_) => None,
            DriverError::UnexpectedToken { expected, .. } => {
                let mut sorted: Vec<&T> = expected.iter().collect();
                sorted.sort_by_key(|t| t.symbol_name());
                let shown: Vec<String> = sorted.into_iter().take(12).map(|t| t.display()).collect();
                Some(format!("expected one of: {}", shown.join(", ")))
            }
        }
    }

    pub fn location(&self) -> Location {
        match self {
            DriverError::Lexical(error) => lex_error_location(error),
            DriverError::UnexpectedToken { location, .. } => location.clone(),
        }
    }
}

/// An impossible table/stack state: a bug in the grammar or table builder,
/// never raised by malformed input. Aborts the process; callers are not
/// expected to catch this.
fn invariant_violation(message: impl fmt::Display) -> ! {
    panic!("parser invariant violation: {}", message);
}

struct ParseStack<V> {
    states: Vec<usize>,
    values: Vec<V>,
}

impl<V> ParseStack<V> {
    fn new(start_state: usize) -> Self {
        ParseStack { states: vec![start_state], values: Vec::new() }
    }

    fn top_state(&self) -> usize {
        *self.states.last().unwrap()
    }

    fn pop_n(&mut self, n: usize) -> Vec<V> {
        if n > self.values.len() || n > self.states.len() - 1 {
            invariant_violation(format!(
                "cannot pop {} values/states (have {} values, {} states)",
                n,
                self.values.len(),
                self.states.len()
            ));
        }
        let new_len = self.states.len() - n;
        self.states.truncate(new_len);
        let split_at = self.values.len() - n;
        self.values.split_off(split_at)
    }

    fn push(&mut self, state: usize, value: V) {
        self.states.push(state);
        self.values.push(value);
    }
}

/// Run the shift/reduce loop over `text` using `grammar` and `table`,
/// producing the value left behind by [`Action::Accept`].
pub fn parse<T, N, V>(
    grammar: &Grammar<T, N, V>,
    table: &ParseTable<T, N>,
    lexer: &lexan::LexicalAnalyzer<T>,
    text: &str,
    file_name: &str,
) -> Result<V, DriverError<T>>
where
    T: TerminalId,
    N: NonTerminalId,
    V: SemanticValue<T>,
{
    let mut tokens = lexer.token_stream(text, file_name);
    let mut stack: ParseStack<V> = ParseStack::new(table.start_state());

    loop {
        let token = match tokens.front() {
            Ok(token) => token,
            Err(lex_error) => return Err(DriverError::Lexical(lex_error)),
        };

        match table.action(stack.top_state(), token.tag()) {
            None => {
                let expected = table.expected_terminals(stack.top_state()).to_vec();
                return Err(DriverError::UnexpectedToken {
                    location: token.location().clone(),
                    found: token.tag(),
                    found_text: token.text().to_string(),
                    expected,
                });
            }
            Some(Action::Shift(next_state)) => {
                stack.push(next_state, V::from_token(token));
                tokens
                    .advance()
                    .unwrap_or_else(|e| invariant_violation(format!("advance after shift: {}", e)));
            }
            Some(Action::Reduce(production_id)) => {
                let production = &grammar.productions[production_id];
                let arity = production.body.len();
                let args = stack.pop_n(arity);
                let value = (production.action)(args);
                let goto_state = table.goto(stack.top_state(), production.head).unwrap_or_else(|| {
                    invariant_violation(format!(
                        "no goto for non-terminal {:?} from state {}",
                        production.head,
                        stack.top_state()
                    ))
                });
                stack.push(goto_state, value);
            }
            Some(Action::Accept) => {
                if stack.values.is_empty() {
                    invariant_violation("accept with empty value stack");
                }
                return Ok(stack.values.pop().unwrap());
            }
        }
    }
}

fn lex_error_location<T: TerminalId>(error: &lexan::Error<T>) -> Location {
    match error {
        lexan::Error::UnexpectedText(_, loc) => loc.clone(),
        lexan::Error::AmbiguousMatches(_, _, loc) => loc.clone(),
        lexan::Error::AdvancedWhenEmpty(loc) => loc.clone(),
    }
}
