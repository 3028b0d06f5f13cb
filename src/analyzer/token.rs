//! Token types shared by the scanner and the parser
//!
//! A [`Token`] is a classified lexeme. Its text is stored already escaped for
//! the markup output, so `<` arrives at the parser as `&lt;`.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use std::fmt;

/// The five lexical categories of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Symbol,
    IntegerConstant,
    StringConstant,
    Identifier,
}

impl TokenKind {
    /// Element name used for a leaf of this kind in the markup output.
    pub fn tag(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant => "stringConstant",
            TokenKind::Identifier => "identifier",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single classified lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    text: String,
    line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The lexeme, escaped for markup output.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// 1-based source line the token was read from.
    pub fn line(&self) -> usize {
        self.line
    }

    /// True if this is a keyword or symbol spelled exactly `text`.
    pub fn is(&self, text: &str) -> bool {
        matches!(self.kind, TokenKind::Keyword | TokenKind::Symbol) && self.text == text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.text)
    }
}

/// Reserved words of the language.
pub static KEYWORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "class",
        "constructor",
        "function",
        "method",
        "field",
        "static",
        "var",
        "int",
        "char",
        "boolean",
        "void",
        "true",
        "false",
        "null",
        "this",
        "let",
        "do",
        "if",
        "else",
        "while",
        "return",
    ]
    .into_iter()
    .collect()
});

/// Single-character symbols. Each one is always a token of its own.
pub static SYMBOLS: Lazy<FxHashSet<char>> = Lazy::new(|| "(){}[].,;+-*/&|<>=~".chars().collect());

/// Binary operators, in the escaped spelling tokens carry.
pub const BINARY_OPERATORS: [&str; 9] = ["+", "-", "*", "/", "&amp;", "|", "&lt;", "&gt;", "="];

pub const UNARY_OPERATORS: [&str; 2] = ["-", "~"];

pub const KEYWORD_CONSTANTS: [&str; 4] = ["true", "false", "null", "this"];

/// Keywords that name a primitive type.
pub const PRIMITIVE_TYPES: [&str; 3] = ["int", "char", "boolean"];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word)
}

pub fn is_symbol(ch: char) -> bool {
    SYMBOLS.contains(&ch)
}

/// Replace the characters that cannot appear verbatim in markup text.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
