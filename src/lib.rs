//! # Introduction
//!
//! jack-analyzer is the syntax-analysis front end of a Jack compiler. It reads
//! a Jack class, recognizes its grammatical structure and writes the parse tree
//! as XML, one tag or token per line.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Parser → MarkupSink → .xml
//! ```
//!
//! 1. [`analyzer`]: the scanner splits the source into tokens on demand and the
//!    recursive-descent parser emits a begin tag, leaves and an end tag for
//!    every production it recognizes.
//! 2. [`markup`]: the [`markup::MarkupSink`] interface and the line-oriented
//!    [`markup::XmlWriter`].
//! 3. [`driver`]: maps `.jack` files (or a directory of them) to `.xml`
//!    outputs, one independent parse per file.
//!
//! The analyzer stops at the first malformed token; there is no error
//! recovery and no semantic checking.

pub mod analyzer;
pub mod driver;
pub mod markup;
