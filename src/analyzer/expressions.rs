//! Expression parsing implementation
//!
//! # Grammar
//!
//! ```text
//! expression     ::= term (op term)*
//! term           ::= integerConstant | stringConstant | keywordConstant
//!                  | identifier | identifier "[" expression "]"
//!                  | subroutineCall | "(" expression ")" | unaryOp term
//! subroutineCall ::= identifier "(" expressionList ")"
//!                  | identifier "." identifier "(" expressionList ")"
//! expressionList ::= (expression ("," expression)*)?
//! op             ::= "+" | "-" | "*" | "/" | "&" | "|" | "<" | ">" | "="
//! unaryOp        ::= "-" | "~"
//! ```
//!
//! Binary operators have no precedence: `1 + 2 * 3` is a single flat
//! expression of three terms, matching the language definition.
//!
//! Expression methods are entered on their first token and return with the
//! cursor on the first token after what they parsed. An identifier term is
//! told apart from an array access or a call by the token that follows it.

use crate::analyzer::parse::{ParseError, Parser};
use crate::analyzer::token::{TokenKind, BINARY_OPERATORS, KEYWORD_CONSTANTS, UNARY_OPERATORS};
use crate::markup::MarkupSink;

impl<S: MarkupSink> Parser<'_, S> {
    pub(crate) fn compile_expression(&mut self) -> Result<(), ParseError> {
        self.open("expression")?;
        self.compile_term()?;

        while self.check_any(&BINARY_OPERATORS) {
            self.write_current()?;
            self.advance()?;
            self.compile_term()?;
        }

        self.close()
    }

    pub(crate) fn compile_term(&mut self) -> Result<(), ParseError> {
        self.open("term")?;

        let kind = self.current()?.kind();
        match kind {
            TokenKind::IntegerConstant | TokenKind::StringConstant => {
                self.write_current()?;
                self.advance()?;
            }
            TokenKind::Keyword => {
                if !self.check_any(&KEYWORD_CONSTANTS) {
                    return Err(self.unexpected_value("'true', 'false', 'null' or 'this'"));
                }
                self.write_current()?;
                self.advance()?;
            }
            TokenKind::Symbol => {
                if self.check("(") {
                    self.write_current()?;
                    self.advance()?;
                    self.compile_expression()?;
                    self.write_symbol(")")?;
                    self.advance()?;
                } else if self.check_any(&UNARY_OPERATORS) {
                    self.write_current()?;
                    self.advance()?;
                    self.compile_term()?;
                } else {
                    return Err(self.unexpected_value("'(', '-' or '~'"));
                }
            }
            TokenKind::Identifier => {
                self.write_current()?;
                self.advance()?;

                if self.check("[") {
                    self.write_current()?;
                    self.advance()?;
                    self.compile_expression()?;
                    self.write_symbol("]")?;
                    self.advance()?;
                } else if self.check_any(&["(", "."]) {
                    self.compile_call_rest()?;
                    self.advance()?;
                }
                // Anything else ends a plain variable reference, and the
                // token already read belongs to the caller.
            }
        }

        self.close()
    }

    /// The part of a subroutine call after its first identifier:
    /// `("." identifier)? "(" expressionList ")"`.
    ///
    /// Entry: on `.` or `(`. Exit: on `)`.
    pub(crate) fn compile_call_rest(&mut self) -> Result<(), ParseError> {
        if self.check(".") {
            self.write_current()?;
            self.next_identifier()?;
            self.advance()?;
        }

        self.write_symbol("(")?;
        self.advance()?;
        self.compile_expression_list()?;
        self.write_symbol(")")
    }

    /// Entry: on the token after `(`. Exit: on the closing `)`, unwritten.
    pub(crate) fn compile_expression_list(&mut self) -> Result<(), ParseError> {
        self.open("expressionList")?;

        if !self.check(")") {
            self.compile_expression()?;
            while self.check(",") {
                self.write_current()?;
                self.advance()?;
                self.compile_expression()?;
            }
        }

        self.close()
    }
}
