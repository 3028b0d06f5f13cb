//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, its error type and the cursor
//! helpers every production relies on.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser with one method per grammar
//! production, spread over several files:
//! - This module: Parser struct, helper methods, and the `class` entry point
//! - `declarations`: class variables, subroutines, parameters, local variables
//! - `statements`: `let`, `if`, `while`, `do`, `return`
//! - `expressions`: expressions, terms and expression lists
//!
//! # Cursor Contract
//!
//! The parser does not buffer tokens. It holds the scanner by `&mut` and pulls
//! one token at a time, so the scanner's current token is the only lookahead.
//! Every production documents where the cursor must be on entry and where it
//! leaves it on exit. Callers rely on those exit positions instead of
//! re-checking, so they are part of each method's contract.
//!
//! Each production wraps its output in a begin/end tag pair. Open productions
//! are kept on a stack: the end tag is always the name popped from it, which
//! keeps the emitted tree balanced by construction.

use crate::analyzer::scanner::{ScanError, Scanner};
use crate::analyzer::token::{Token, TokenKind, PRIMITIVE_TYPES};
use crate::markup::MarkupSink;
use std::io;
use thiserror::Error;
use tracing::{trace, warn};

/// Parser error type
///
/// Every variant is fatal: the parse stops at the first one and whatever was
/// already written to the sink stays written.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The current token is of the wrong kind.
    #[error("Parse error at line {line} in {production}: expected {expected}, found {found} '{text}'")]
    UnexpectedTokenKind {
        expected: TokenKind,
        found: TokenKind,
        text: String,
        line: usize,
        production: &'static str,
    },

    /// The current token does not have the required fixed spelling.
    #[error("Parse error at line {line} in {production}: expected {expected}, found '{found}'")]
    UnexpectedTokenValue {
        expected: String,
        found: String,
        line: usize,
        production: &'static str,
    },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("failed to write markup: {0}")]
    Sink(#[from] io::Error),
}

impl ParseError {
    /// Source line of the offending token, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedTokenKind { line, .. }
            | ParseError::UnexpectedTokenValue { line, .. }
            | ParseError::Scan(ScanError::ExhaustedInput { line }) => Some(*line),
            ParseError::Scan(ScanError::NotStarted) | ParseError::Sink(_) => None,
        }
    }

    /// The production that was being parsed when the error was raised.
    pub fn production(&self) -> Option<&'static str> {
        match self {
            ParseError::UnexpectedTokenKind { production, .. }
            | ParseError::UnexpectedTokenValue { production, .. } => Some(*production),
            ParseError::Scan(_) | ParseError::Sink(_) => None,
        }
    }
}

/// Recursive descent parser writing a tagged parse tree
pub struct Parser<'a, S: MarkupSink> {
    pub(crate) scanner: &'a mut Scanner,
    pub(crate) sink: &'a mut S,
    productions: Vec<&'static str>,
}

impl<'a, S: MarkupSink> Parser<'a, S> {
    pub fn new(scanner: &'a mut Scanner, sink: &'a mut S) -> Self {
        Self {
            scanner,
            sink,
            productions: Vec::new(),
        }
    }

    /// Parse one compilation unit: `class Name { classVarDec* subroutineDec* }`.
    ///
    /// Entry: the scanner has not produced any token yet.
    /// Exit: on the closing `}` of the class.
    pub fn compile_class(&mut self) -> Result<(), ParseError> {
        self.open("class")?;
        self.advance()?;
        self.write_keyword("class")?;
        self.next_identifier()?;
        self.next_symbol("{")?;

        self.advance()?;
        while self.check_any(&["static", "field"]) {
            self.compile_class_var_dec()?;
            self.advance()?;
        }

        while self.check_any(&["constructor", "function", "method"]) {
            self.compile_subroutine_dec()?;
            self.advance()?;
        }

        self.write_symbol("}")?;
        self.close()?;

        if self.scanner.has_next() {
            warn!(line = self.scanner.last_line(), "ignoring input after the end of the class");
        }
        Ok(())
    }

    // ===== Helper methods =====

    /// Name of the innermost open production.
    pub(crate) fn production(&self) -> &'static str {
        self.productions.last().copied().unwrap_or_default()
    }

    /// Begin a production: write its begin tag and push it.
    pub(crate) fn open(&mut self, name: &'static str) -> Result<(), ParseError> {
        trace!(production = name, depth = self.productions.len(), "enter");
        self.sink.begin_tag(name)?;
        self.productions.push(name);
        Ok(())
    }

    /// End the innermost production.
    pub(crate) fn close(&mut self) -> Result<(), ParseError> {
        if let Some(name) = self.productions.pop() {
            self.sink.end_tag(name)?;
        }
        Ok(())
    }

    pub(crate) fn advance(&mut self) -> Result<(), ParseError> {
        self.scanner.advance()?;
        Ok(())
    }

    pub(crate) fn current(&self) -> Result<&Token, ParseError> {
        self.scanner
            .current_token()
            .ok_or(ParseError::Scan(ScanError::NotStarted))
    }

    /// True if the current token is the keyword or symbol `text`.
    pub(crate) fn check(&self, text: &str) -> bool {
        self.scanner
            .current_token()
            .is_some_and(|token| token.is(text))
    }

    pub(crate) fn check_any(&self, texts: &[&str]) -> bool {
        texts.iter().any(|text| self.check(text))
    }

    /// Error for a current token whose spelling is not one of `expected`.
    pub(crate) fn unexpected_value(&self, expected: &str) -> ParseError {
        match self.current() {
            Ok(token) => ParseError::UnexpectedTokenValue {
                expected: expected.to_string(),
                found: token.text().to_string(),
                line: token.line(),
                production: self.production(),
            },
            Err(err) => err,
        }
    }

    /// Verify the current token and write it as a leaf.
    ///
    /// A wrong spelling is reported before a wrong kind, so `let x 1;` fails
    /// on the value of `1` rather than on its kind.
    pub(crate) fn check_and_write(
        &mut self,
        kind: TokenKind,
        expected: Option<&str>,
    ) -> Result<(), ParseError> {
        let token = self
            .scanner
            .current_token()
            .ok_or(ParseError::Scan(ScanError::NotStarted))?;

        if let Some(expected) = expected {
            if token.text() != expected {
                return Err(self.unexpected_value(&format!("'{expected}'")));
            }
        }

        if token.kind() != kind {
            return Err(ParseError::UnexpectedTokenKind {
                expected: kind,
                found: token.kind(),
                text: token.text().to_string(),
                line: token.line(),
                production: self.production(),
            });
        }

        self.sink.leaf(token.kind(), token.text())?;
        Ok(())
    }

    /// Write the current token as-is, for tokens a caller has already matched.
    pub(crate) fn write_current(&mut self) -> Result<(), ParseError> {
        let kind = self.current()?.kind();
        self.check_and_write(kind, None)
    }

    pub(crate) fn write_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        self.check_and_write(TokenKind::Keyword, Some(keyword))
    }

    pub(crate) fn write_symbol(&mut self, symbol: &str) -> Result<(), ParseError> {
        self.check_and_write(TokenKind::Symbol, Some(symbol))
    }

    pub(crate) fn write_identifier(&mut self) -> Result<(), ParseError> {
        self.check_and_write(TokenKind::Identifier, None)
    }

    /// Advance, then require the symbol `symbol`.
    pub(crate) fn next_symbol(&mut self, symbol: &str) -> Result<(), ParseError> {
        self.advance()?;
        self.write_symbol(symbol)
    }

    /// Advance, then require an identifier.
    pub(crate) fn next_identifier(&mut self) -> Result<(), ParseError> {
        self.advance()?;
        self.write_identifier()
    }

    /// Write a type reference: `int`, `char`, `boolean` or a class name.
    pub(crate) fn write_type(&mut self) -> Result<(), ParseError> {
        let token = self.current()?;
        let kind = token.kind();
        let primitive = PRIMITIVE_TYPES.contains(&token.text());

        match kind {
            TokenKind::Keyword if primitive => self.write_current(),
            TokenKind::Keyword => Err(self.unexpected_value("'int', 'char', 'boolean' or a class name")),
            _ => self.write_identifier(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::XmlWriter;
    use pretty_assertions::assert_eq;

    fn compile(source: &str) -> (Result<(), ParseError>, String) {
        let mut scanner = Scanner::new(source);
        let mut sink = XmlWriter::new(Vec::new());
        let result = Parser::new(&mut scanner, &mut sink).compile_class();
        (result, String::from_utf8(sink.into_inner()).unwrap())
    }

    #[test]
    fn test_parse_empty_class() {
        let (result, output) = compile("class Main { }");
        result.unwrap();
        assert_eq!(
            output,
            "<class>\n\
             <keyword>class</keyword>\n\
             <identifier>Main</identifier>\n\
             <symbol>{</symbol>\n\
             <symbol>}</symbol>\n\
             </class>\n"
        );
    }

    #[test]
    fn test_parse_class_var_dec() {
        let (result, output) = compile("class P { field int x, y; static Point origin; }");
        result.unwrap();
        assert_eq!(
            output,
            "<class>\n\
             <keyword>class</keyword>\n\
             <identifier>P</identifier>\n\
             <symbol>{</symbol>\n\
             <classVarDec>\n\
             <keyword>field</keyword>\n\
             <keyword>int</keyword>\n\
             <identifier>x</identifier>\n\
             <symbol>,</symbol>\n\
             <identifier>y</identifier>\n\
             <symbol>;</symbol>\n\
             </classVarDec>\n\
             <classVarDec>\n\
             <keyword>static</keyword>\n\
             <identifier>Point</identifier>\n\
             <identifier>origin</identifier>\n\
             <symbol>;</symbol>\n\
             </classVarDec>\n\
             <symbol>}</symbol>\n\
             </class>\n"
        );
    }

    #[test]
    fn test_wrong_keyword_is_value_error() {
        let (result, output) = compile("klass Main { }");
        match result {
            Err(ParseError::UnexpectedTokenValue {
                expected,
                found,
                line,
                production,
            }) => {
                assert_eq!(expected, "'class'");
                assert_eq!(found, "klass");
                assert_eq!(line, 1);
                assert_eq!(production, "class");
            }
            other => panic!("Expected value error, got {:?}", other),
        }
        assert_eq!(output, "<class>\n");
    }

    #[test]
    fn test_class_name_must_be_identifier() {
        let (result, _) = compile("class 42 { }");
        match result {
            Err(err @ ParseError::UnexpectedTokenKind { .. }) => {
                assert_eq!(err.line(), Some(1));
                assert_eq!(err.production(), Some("class"));
                assert!(err.to_string().contains("expected identifier"));
            }
            other => panic!("Expected kind error, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_type_keyword() {
        let (result, _) = compile("class A { field void x; }");
        match result {
            Err(ParseError::UnexpectedTokenValue {
                found, production, ..
            }) => {
                assert_eq!(found, "void");
                assert_eq!(production, "classVarDec");
            }
            other => panic!("Expected value error, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_class() {
        let (result, _) = compile("class Main {\n field int x;");
        assert!(matches!(
            result,
            Err(ParseError::Scan(ScanError::ExhaustedInput { line: 2 }))
        ));
    }

    #[test]
    fn test_empty_source() {
        let (result, output) = compile("");
        assert!(matches!(
            result,
            Err(ParseError::Scan(ScanError::ExhaustedInput { .. }))
        ));
        assert_eq!(output, "<class>\n");
    }
}
