//! Markup output
//!
//! The parser reports structure through the [`MarkupSink`] trait: a begin tag
//! when a production starts, a leaf per terminal token and an end tag when the
//! production is complete. [`XmlWriter`] renders those calls as one XML line
//! each.

use crate::analyzer::token::TokenKind;
use std::io::{self, Write};

/// Append-only receiver of parse-tree markup.
pub trait MarkupSink {
    fn begin_tag(&mut self, name: &str) -> io::Result<()>;

    fn end_tag(&mut self, name: &str) -> io::Result<()>;

    /// Write `<kind>text</kind>`. `text` is expected to be escaped already.
    fn leaf(&mut self, kind: TokenKind, text: &str) -> io::Result<()>;
}

/// Line-oriented XML writer.
///
/// Each call writes exactly one `\n`-terminated line. Nested lines are
/// indented by `indent` spaces per level; the default of 0 writes every line
/// flush left.
#[derive(Debug)]
pub struct XmlWriter<W: Write> {
    out: W,
    indent: usize,
    depth: usize,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            indent: 0,
            depth: 0,
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Number of tags currently open.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, depth: usize, line: std::fmt::Arguments<'_>) -> io::Result<()> {
        write!(self.out, "{:width$}", "", width = depth * self.indent)?;
        self.out.write_fmt(line)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> MarkupSink for XmlWriter<W> {
    fn begin_tag(&mut self, name: &str) -> io::Result<()> {
        self.write_line(self.depth, format_args!("<{name}>"))?;
        self.depth += 1;
        Ok(())
    }

    fn end_tag(&mut self, name: &str) -> io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        self.write_line(self.depth, format_args!("</{name}>"))
    }

    fn leaf(&mut self, kind: TokenKind, text: &str) -> io::Result<()> {
        let tag = kind.tag();
        self.write_line(self.depth, format_args!("<{tag}>{text}</{tag}>"))
    }
}
