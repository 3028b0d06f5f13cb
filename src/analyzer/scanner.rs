//! Scanner (tokenizer) for Jack source code
//!
//! The source is cut into raw fragments once, at construction: comments are
//! stripped line by line, quoted string literals are kept whole (quotes
//! included), and everything else is split on whitespace. Tokens are then
//! produced on demand by [`Scanner::advance`], one per call, from the front of
//! the current fragment. A fragment such as `x)` holds more than one token;
//! whatever is left after the first extraction is kept as a pending remainder.

use super::token::{escape_markup, is_keyword, is_symbol, Token, TokenKind};
use thiserror::Error;
use tracing::{debug, trace};

const QUOTE: char = '"';

/// Scanner error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// `advance` was called with no input left.
    #[error("unexpected end of input after line {line}")]
    ExhaustedInput { line: usize },

    /// The current token was read before the first `advance`.
    #[error("no current token: the scanner has not been advanced")]
    NotStarted,
}

/// A whitespace- or quote-delimited piece of a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fragment {
    text: String,
    line: usize,
}

impl Fragment {
    fn new(text: impl Into<String>, line: usize) -> Self {
        Self {
            text: text.into(),
            line,
        }
    }
}

/// Pull-based token cursor over one compilation unit.
#[derive(Debug)]
pub struct Scanner {
    fragments: Vec<Fragment>,
    index: usize,
    remainder: Option<Fragment>,
    current: Option<Token>,
}

impl Scanner {
    /// Preprocess the whole source into fragments.
    pub fn new(source: &str) -> Self {
        let mut fragments = Vec::new();
        let mut in_block_comment = false;

        for (idx, raw) in source.lines().enumerate() {
            let code = strip_comments(raw, &mut in_block_comment);
            split_fragments(&code, idx + 1, &mut fragments);
        }

        debug!(fragments = fragments.len(), "scanner preprocessed source");

        Self {
            fragments,
            index: 0,
            remainder: None,
            current: None,
        }
    }

    /// True if at least one more token can be produced.
    pub fn has_next(&self) -> bool {
        self.remainder.is_some() || self.index < self.fragments.len()
    }

    /// Extract exactly one token from the front of the unconsumed input and
    /// make it the current token.
    pub fn advance(&mut self) -> Result<&Token, ScanError> {
        let fragment = match self.remainder.take() {
            Some(rest) => rest,
            None => {
                let next = self
                    .fragments
                    .get(self.index)
                    .cloned()
                    .ok_or(ScanError::ExhaustedInput {
                        line: self.last_line(),
                    })?;
                self.index += 1;
                next
            }
        };

        let (token, consumed) = classify(&fragment.text, fragment.line);
        let rest = &fragment.text[consumed..];
        if !rest.is_empty() {
            self.remainder = Some(Fragment::new(rest, fragment.line));
        }

        trace!(kind = %token.kind(), text = token.text(), line = token.line(), "token");
        Ok(self.current.insert(token))
    }

    /// The most recently produced token.
    pub fn current_token(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current.as_ref().map(Token::kind)
    }

    /// Line of the last fragment, used to locate end-of-input errors.
    pub fn last_line(&self) -> usize {
        self.fragments.last().map_or(0, |f| f.line)
    }
}

/// Classify the token at the front of `text`.
///
/// Returns the token and the number of bytes of `text` it consumed.
fn classify(text: &str, line: usize) -> (Token, usize) {
    match text.chars().next() {
        Some(QUOTE) => {
            let body = &text[QUOTE.len_utf8()..];
            let end = body.find(QUOTE).unwrap_or(body.len());
            let token = Token::new(TokenKind::StringConstant, escape_markup(&body[..end]), line);
            (token, text.len())
        }
        Some(ch) if ch.is_ascii_digit() => {
            let end = text
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(text.len());
            (Token::new(TokenKind::IntegerConstant, &text[..end], line), end)
        }
        Some(ch) if is_symbol(ch) => {
            let end = ch.len_utf8();
            let token = Token::new(TokenKind::Symbol, escape_markup(&text[..end]), line);
            (token, end)
        }
        _ => {
            // A keyword only counts when it spans the whole run, so `classy`
            // stays one identifier.
            let end = text
                .find(|c: char| c.is_ascii_digit() || is_symbol(c))
                .unwrap_or(text.len());
            let word = &text[..end];
            let kind = if is_keyword(word) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            (Token::new(kind, word, line), end)
        }
    }
}

/// Drop `//` and `/* ... */` comments from one line.
///
/// `in_block_comment` carries an unterminated block comment over to the
/// following lines. Comment markers inside a string literal are kept.
fn strip_comments(line: &str, in_block_comment: &mut bool) -> String {
    let mut kept = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut in_quote = false;

    while let Some(ch) = chars.next() {
        if *in_block_comment {
            if ch == '*' && chars.peek() == Some(&'/') {
                chars.next();
                *in_block_comment = false;
                kept.push(' ');
            }
            continue;
        }

        if in_quote {
            in_quote = ch != QUOTE;
            kept.push(ch);
            continue;
        }

        match (ch, chars.peek()) {
            ('/', Some('/')) => break,
            ('/', Some('*')) => {
                chars.next();
                *in_block_comment = true;
            }
            (QUOTE, _) => {
                in_quote = true;
                kept.push(ch);
            }
            _ => kept.push(ch),
        }
    }

    kept
}

/// Split comment-free code into fragments, keeping quoted literals whole.
fn split_fragments(code: &str, line: usize, out: &mut Vec<Fragment>) {
    if !code.contains(QUOTE) {
        out.extend(code.split_whitespace().map(|w| Fragment::new(w, line)));
        return;
    }

    let segments: Vec<&str> = code.split(QUOTE).collect();
    let last = segments.len() - 1;
    for (i, segment) in segments.into_iter().enumerate() {
        if i % 2 == 1 {
            // An opening quote at the very end of the line opens nothing.
            if i == last && segment.is_empty() {
                continue;
            }
            out.push(Fragment::new(format!("{QUOTE}{segment}{QUOTE}"), line));
        } else {
            out.extend(segment.split_whitespace().map(|w| Fragment::new(w, line)));
        }
    }
}
