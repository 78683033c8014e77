//! Builds the proto3 [`lexan::LexicalAnalyzer`] and translates its generic
//! lexical errors into proto3-specific diagnostics.

use lazy_static::lazy_static;

use crate::symbol::Terminal;

const IDENT_PATTERN: &str = r"[A-Za-z_][A-Za-z0-9_]*";
const INT_LIT_PATTERN: &str = r"0[xX][0-9A-Fa-f]+|0[0-7]*|[1-9][0-9]*";
const FLOAT_LIT_PATTERN: &str =
    r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?|\.[0-9]+([eE][+-]?[0-9]+)?|[0-9]+[eE][+-]?[0-9]+";
const STRING_LIT_PATTERN: &str = r#""(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'"#;

const LINE_COMMENT: &str = r"//[^\n]*";
const BLOCK_COMMENT: &str = r"/\*([^*]|\*[^/])*\*/";
const WHITESPACE: &str = r"[ \t\r\n]+";

lazy_static! {
    pub static ref LEXER: lexan::LexicalAnalyzer<Terminal> = {
        let mut literals: Vec<(Terminal, &str)> = Terminal::PUNCTUATION.to_vec();
        literals.extend(Terminal::KEYWORDS.iter().copied());
        lexan::LexicalAnalyzer::new(
            &literals,
            &[
                (Terminal::FloatLit, FLOAT_LIT_PATTERN),
                (Terminal::IntLit, INT_LIT_PATTERN),
                (Terminal::StringLit, STRING_LIT_PATTERN),
                (Terminal::Ident, IDENT_PATTERN),
            ],
            &[WHITESPACE, LINE_COMMENT, BLOCK_COMMENT],
            Terminal::Eof,
        )
        .expect("proto3 lexical analyzer tables are well-formed")
    };
}

/// Translate a generic scan failure into the proto3-specific wording the
/// external interface promises ("unterminated string", "unterminated block
/// comment", "unknown character"), using the source text to distinguish
/// them from an opening delimiter.
pub fn describe_lex_error(error: &lexan::Error<Terminal>, source: &str) -> String {
    match error {
        lexan::Error::UnexpectedText(bad, location) => {
            let rest = &source[location.offset().min(source.len())..];
            if rest.starts_with('"') || rest.starts_with('\'') {
                "unterminated string literal".to_string()
            } else if rest.starts_with("/*") {
                "unterminated block comment".to_string()
            } else {
                format!("unknown character {:?}", bad)
            }
        }
        lexan::Error::AmbiguousMatches(tags, text, _) => {
            format!("ambiguous match {:?} for {:?}", tags, text)
        }
        lexan::Error::AdvancedWhenEmpty(_) => "advanced past end of input".to_string(),
    }
}
