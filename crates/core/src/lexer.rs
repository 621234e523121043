//! Lexical scanner for the chart description language.
//!
//! The scanner works on the whole buffer at once and never stops at the
//! first malformed token: every error is recorded and scanning resumes with
//! the next code point, so one run reports everything wrong in a file.
//! Positions are counted in code points, never bytes.

use crate::charclass::is_letter;
use crate::error::{LexError, LexErrorKind};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    /// Quoted string literal (content without quotes)
    StringLiteral,
    /// Any word that is not a keyword
    Identifier,
    // Keywords
    Statechart,
    State,
    Transition,
    Trigger,
    // End of input
    Eof,
}

impl TokenKind {
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Statechart | TokenKind::State | TokenKind::Transition | TokenKind::Trigger
        )
    }

    /// Stable name used in token dumps and fixtures.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::LeftBracket => "LeftBracket",
            TokenKind::RightBracket => "RightBracket",
            TokenKind::StringLiteral => "StringLiteral",
            TokenKind::Identifier => "Identifier",
            TokenKind::Statechart => "Statechart",
            TokenKind::State => "State",
            TokenKind::Transition => "Transition",
            TokenKind::Trigger => "Trigger",
            TokenKind::Eof => "Eof",
        }
    }
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("statechart", TokenKind::Statechart),
    ("state", TokenKind::State),
    ("transition", TokenKind::Transition),
    ("trigger", TokenKind::Trigger),
];

/// Look up the exact text of a word in the keyword table.
pub fn keyword(word: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(text, _)| *text == word)
        .map(|(_, kind)| *kind)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text for identifiers and keywords, literal content for
    /// strings, empty for punctuation and end of input.
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "column": self.column,
            "kind":   self.kind.name(),
            "lexeme": self.lexeme,
            "line":   self.line,
        })
    }
}

/// Output of [`scan`]: the token stream (always terminated by exactly one
/// [`TokenKind::Eof`]) and every lexical error found along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scanned {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl Scanned {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// `{"tokens": [...], "errors": [...]}`, the shape of token fixtures.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "tokens": self.tokens.iter().map(Token::to_json_value).collect::<Vec<_>>(),
            "errors": self.errors.iter().map(LexError::to_json_value).collect::<Vec<_>>(),
        })
    }
}

pub fn scan(src: &str) -> Scanned {
    Scanner::new(src).run()
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    /// Code points consumed on the current line.
    column: u32,
    out: Scanned,
}

impl Scanner {
    fn new(src: &str) -> Self {
        Scanner {
            chars: src.chars().collect(),
            pos: 0,
            line: 1,
            column: 0,
            out: Scanned::default(),
        }
    }

    fn run(mut self) -> Scanned {
        while let Some(c) = self.peek() {
            let (line, column) = (self.line, self.column + 1);
            self.bump();

            match c {
                ' ' | '\t' | '\r' => {}
                '\n' => self.newline(),
                '/' => self.comment(line, column),
                '"' => self.string(line, column),
                '(' => self.push(TokenKind::LeftParen, String::new(), line, column),
                ')' => self.push(TokenKind::RightParen, String::new(), line, column),
                '{' => self.push(TokenKind::LeftBrace, String::new(), line, column),
                '}' => self.push(TokenKind::RightBrace, String::new(), line, column),
                '[' => self.push(TokenKind::LeftBracket, String::new(), line, column),
                ']' => self.push(TokenKind::RightBracket, String::new(), line, column),
                c if is_letter(c) => self.identifier(c, line, column),
                other => self.error(LexErrorKind::UnsupportedRune(other), line, column),
            }
        }

        let (line, column) = (self.line, self.column + 1);
        self.push(TokenKind::Eof, String::new(), line, column);

        debug!(
            tokens = self.out.tokens.len(),
            errors = self.out.errors.len(),
            "scan finished"
        );
        self.out
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
        self.column += 1;
    }

    fn newline(&mut self) {
        self.line += 1;
        self.column = 0;
    }

    fn push(&mut self, kind: TokenKind, lexeme: String, line: u32, column: u32) {
        trace!(kind = kind.name(), %lexeme, line, column, "token");
        self.out.tokens.push(Token {
            kind,
            lexeme,
            line,
            column,
        });
    }

    fn error(&mut self, kind: LexErrorKind, line: u32, column: u32) {
        trace!(%kind, line, column, "lex error");
        self.out.errors.push(LexError { kind, line, column });
    }

    // The leading '/' has already been consumed.
    fn comment(&mut self, line: u32, column: u32) {
        if self.peek() != Some('/') {
            self.error(LexErrorKind::SingleSlash, line, column);
            return;
        }
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    // The opening '"' has already been consumed.
    fn string(&mut self, line: u32, column: u32) {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            self.bump();
            if c == '"' {
                self.push(TokenKind::StringLiteral, text, line, column);
                return;
            }
            if c == '\n' {
                self.newline();
            }
            text.push(c);
        }
        self.error(LexErrorKind::UnterminatedString, line, column);
    }

    fn identifier(&mut self, first: char, line: u32, column: u32) {
        let mut word = String::from(first);
        while let Some(c) = self.peek() {
            if !(is_letter(c) || c.is_numeric() || c == '_') {
                break;
            }
            self.bump();
            word.push(c);
        }
        let kind = keyword(&word).unwrap_or(TokenKind::Identifier);
        self.push(kind, word, line, column);
    }
}
