//! Jack syntax analyzer
//!
//! This module turns Jack source text into a tagged parse tree:
//! - [`token`]: token kinds and the fixed keyword/symbol sets
//! - [`scanner`]: Tokenization (source text → tokens, pulled one at a time)
//! - [`parse`]: Parsing (tokens → markup written to a [`MarkupSink`])
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent with one method per grammar production.
//! The parser builds no tree in memory; structure is reported to the sink as
//! it is recognized. No external parser generator dependencies.

pub mod declarations;
pub mod expressions;
pub mod parse;
pub mod scanner;
pub mod statements;
pub mod token;

use crate::markup::MarkupSink;
use parse::{ParseError, Parser};
use scanner::Scanner;

/// Parse a whole compilation unit and write its tree to `sink`.
pub fn compile_source<S: MarkupSink>(source: &str, sink: &mut S) -> Result<(), ParseError> {
    let mut scanner = Scanner::new(source);
    Parser::new(&mut scanner, sink).compile_class()
}

/// Write every token of the remaining input as a leaf of a `tokens` element,
/// without parsing.
pub fn write_token_stream<S: MarkupSink>(
    scanner: &mut Scanner,
    sink: &mut S,
) -> Result<(), ParseError> {
    sink.begin_tag("tokens")?;
    while scanner.has_next() {
        let token = scanner.advance()?;
        sink.leaf(token.kind(), token.text())?;
    }
    sink.end_tag("tokens")?;
    Ok(())
}
