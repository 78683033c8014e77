//! Generic longest-match tokenizer.
//!
//! A [`LexicalAnalyzer`] is built once from a set of literal patterns, regex
//! patterns and "skip" regexes (whitespace, comments) and then used to carve
//! a [`TokenStream`] out of source text. At each position it finds the
//! longest match among all literal and regex patterns; a tie between two
//! *different* token kinds is reported as [`Error::AmbiguousMatches`] rather
//! than resolved arbitrarily.
//!
//! Word-like literals (e.g. keyword punctuation such as `"message"`) only
//! match when not immediately followed by another identifier character, so
//! that `"messages"` lexes as a single identifier rather than as the keyword
//! `message` followed by the identifier `s`.

mod error;

use std::fmt;
use std::rc::Rc;

use regex::Regex;

pub use error::LexanError;

/// A location within a named source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    file: Rc<str>,
    offset: usize,
    line: usize,
    column: usize,
}

impl Location {
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A matched token: its handle, the matched text and where it started.
#[derive(Debug, Clone)]
pub struct Token<T: Copy> {
    tag: T,
    text: String,
    location: Location,
}

impl<T: Copy> Token<T> {
    pub fn tag(&self) -> T {
        self.tag
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Errors raised while scanning text.
#[derive(Debug)]
pub enum Error<T: Copy> {
    /// No pattern matched at this location.
    UnexpectedText(String, Location),
    /// More than one distinct token kind matched the same longest span.
    AmbiguousMatches(Vec<T>, String, Location),
    /// [`TokenStream::advance`] was called with nothing left to advance past.
    AdvancedWhenEmpty(Location),
}

impl<T: Copy + fmt::Debug> fmt::Display for Error<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnexpectedText(text, loc) => {
                write!(f, "unexpected text {:?} at {}", text, loc)
            }
            Error::AmbiguousMatches(tags, text, loc) => {
                write!(f, "ambiguous match {:?} for {:?} at {}", tags, text, loc)
            }
            Error::AdvancedWhenEmpty(loc) => write!(f, "advanced past end of input at {}", loc),
        }
    }
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_literal(text: &str) -> bool {
    text.chars()
        .next()
        .map(|c| c.is_alphabetic() || c == '_')
        .unwrap_or(false)
}

/// A compiled set of literal and regex token patterns.
pub struct LexicalAnalyzer<T: Copy + Ord> {
    literals: Vec<(String, T)>,
    regexes: Vec<(T, Regex)>,
    skip: Vec<Regex>,
    end_token: T,
}

impl<T: Copy + Ord + fmt::Debug> LexicalAnalyzer<T> {
    /// `literal_pairs` and `regex_pairs` are `(tag, pattern)` pairs; longer
    /// literals take precedence over shorter ones when both match, but a
    /// literal and a regex (or two regexes) of equal length and differing
    /// tags are ambiguous. `skip_regexes` match text that is discarded
    /// between tokens (whitespace, comments). `end_token` is the tag
    /// returned once for the end of input.
    pub fn new(
        literal_pairs: &[(T, &str)],
        regex_pairs: &[(T, &str)],
        skip_regexes: &[&str],
        end_token: T,
    ) -> Result<Self, LexanError<T>> {
        let mut literals: Vec<(String, T)> = Vec::with_capacity(literal_pairs.len());
        for (tag, pattern) in literal_pairs {
            if pattern.is_empty() {
                return Err(LexanError::EmptyPattern);
            }
            if literals.iter().any(|(p, _)| p == pattern) {
                return Err(LexanError::DuplicatePattern(pattern.to_string()));
            }
            literals.push((pattern.to_string(), *tag));
        }
        // Longest literal first so the scanner can stop at the first match.
        literals.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let mut regexes = Vec::with_capacity(regex_pairs.len());
        for (tag, pattern) in regex_pairs {
            let anchored = format!("\\A(?:{})", pattern);
            regexes.push((*tag, Regex::new(&anchored)?));
        }

        let mut skip = Vec::with_capacity(skip_regexes.len());
        for pattern in skip_regexes {
            let anchored = format!("\\A(?:{})", pattern);
            skip.push(Regex::new(&anchored)?);
        }

        Ok(LexicalAnalyzer {
            literals,
            regexes,
            skip,
            end_token,
        })
    }

    /// Begin tokenizing `text`, attributing locations to `file_name`.
    pub fn token_stream<'a>(&'a self, text: &'a str, file_name: &str) -> TokenStream<'a, T> {
        TokenStream {
            lexer: self,
            text,
            file: Rc::from(file_name),
            offset: 0,
            line: 1,
            column: 1,
            cache: None,
            exhausted: false,
        }
    }

    fn skip_len(&self, input: &str) -> usize {
        let mut total = 0;
        loop {
            let rest = &input[total..];
            if rest.is_empty() {
                break;
            }
            match self.skip.iter().filter_map(|re| re.find(rest)).map(|m| m.end()).max() {
                Some(0) | None => break,
                Some(n) => total += n,
            }
        }
        total
    }

    /// A literal that matches is preferred over a regex match of the same
    /// length (so a keyword literal wins over the identifier regex on a
    /// tie); ambiguity is only possible among candidates of the same kind.
    fn candidates_at_best(&self, input: &str) -> (usize, Vec<T>) {
        let mut literal_best: Option<(usize, T)> = None;
        for (pattern, tag) in &self.literals {
            if !input.starts_with(pattern.as_str()) {
                continue;
            }
            if is_word_literal(pattern) {
                let next = input[pattern.len()..].chars().next();
                if next.map(is_ident_continue).unwrap_or(false) {
                    continue;
                }
            }
            let len = pattern.len();
            if literal_best.map(|(best, _)| len > best).unwrap_or(true) {
                literal_best = Some((len, *tag));
            }
        }

        let mut regex_best_len = 0usize;
        let mut regex_tags: Vec<T> = Vec::new();
        for (tag, re) in &self.regexes {
            if let Some(m) = re.find(input) {
                let len = m.end();
                if len == 0 {
                    continue;
                }
                match len.cmp(&regex_best_len) {
                    std::cmp::Ordering::Greater => {
                        regex_best_len = len;
                        regex_tags.clear();
                        regex_tags.push(*tag);
                    }
                    std::cmp::Ordering::Equal => {
                        if !regex_tags.contains(tag) {
                            regex_tags.push(*tag);
                        }
                    }
                    std::cmp::Ordering::Less => {}
                }
            }
        }

        match literal_best {
            Some((len, tag)) if len >= regex_best_len => (len, vec![tag]),
            _ => (regex_best_len, regex_tags),
        }
    }
}

/// A cursor over the tokens of one source text, produced by
/// [`LexicalAnalyzer::token_stream`].
pub struct TokenStream<'a, T: Copy + Ord> {
    lexer: &'a LexicalAnalyzer<T>,
    text: &'a str,
    file: Rc<str>,
    offset: usize,
    line: usize,
    column: usize,
    cache: Option<Result<(Token<T>, usize), Error<T>>>,
    exhausted: bool,
}

impl<'a, T: Copy + Ord + fmt::Debug> TokenStream<'a, T> {
    fn current_location(&self) -> Location {
        Location {
            file: self.file.clone(),
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    fn scan(&self) -> Result<(Token<T>, usize), Error<T>> {
        let skipped = self.lexer.skip_len(&self.text[self.offset..]);
        let scan_offset = self.offset + skipped;
        let (scan_line, scan_column) = advance_position(
            &self.text[self.offset..scan_offset],
            self.line,
            self.column,
        );
        let loc = Location {
            file: self.file.clone(),
            offset: scan_offset,
            line: scan_line,
            column: scan_column,
        };

        if scan_offset >= self.text.len() {
            let token = Token {
                tag: self.lexer.end_token,
                text: String::new(),
                location: loc,
            };
            return Ok((token, skipped));
        }

        let rest = &self.text[scan_offset..];
        let (best_len, tags) = self.lexer.candidates_at_best(rest);
        if tags.is_empty() {
            let bad_text = rest.chars().next().map(|c| c.to_string()).unwrap_or_default();
            return Err(Error::UnexpectedText(bad_text, loc));
        }
        if tags.len() > 1 {
            return Err(Error::AmbiguousMatches(tags, rest[..best_len].to_string(), loc));
        }
        let token = Token {
            tag: tags[0],
            text: rest[..best_len].to_string(),
            location: loc,
        };
        Ok((token, skipped))
    }

    /// The next token without consuming it. Repeated calls without an
    /// intervening [`TokenStream::advance`] return the same result.
    pub fn front(&mut self) -> Result<Token<T>, Error<T>> {
        if self.cache.is_none() {
            self.cache = Some(self.scan());
        }
        match self.cache.as_ref().unwrap() {
            Ok((tok, _)) => Ok(tok.clone()),
            Err(e) => Err(clone_error(e)),
        }
    }

    /// Consume the token last returned by [`TokenStream::front`].
    pub fn advance(&mut self) -> Result<(), Error<T>> {
        if self.exhausted {
            return Err(Error::AdvancedWhenEmpty(self.current_location()));
        }
        let (token, skipped) = match self.cache.take() {
            Some(result) => result?,
            None => self.scan()?,
        };
        let consumed = &self.text[self.offset..self.offset + skipped + token.len()];
        let (new_line, new_column) = advance_position(consumed, self.line, self.column);
        self.offset += skipped + token.len();
        self.line = new_line;
        self.column = new_column;
        if token.len() == 0 && self.offset >= self.text.len() {
            self.exhausted = true;
        }
        Ok(())
    }

    /// True once the end-of-input token has been consumed.
    pub fn is_empty(&self) -> bool {
        self.exhausted
    }
}

fn clone_error<T: Copy>(e: &Error<T>) -> Error<T> {
    match e {
        Error::UnexpectedText(s, l) => Error::UnexpectedText(s.clone(), l.clone()),
        Error::AmbiguousMatches(tags, s, l) => {
            Error::AmbiguousMatches(tags.clone(), s.clone(), l.clone())
        }
        Error::AdvancedWhenEmpty(l) => Error::AdvancedWhenEmpty(l.clone()),
    }
}

fn advance_position(consumed: &str, mut line: usize, mut column: usize) -> (usize, usize) {
    for c in consumed.chars() {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}
