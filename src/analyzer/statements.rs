//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Assignment: `let x = e;`, `let a[i] = e;`
//! - Control flow: `if`/`else`, `while`
//! - Calls for effect: `do f(x);`, `do Screen.clear();`
//! - `return`, with or without a value
//!
//! # Grammar
//!
//! ```text
//! statements      ::= (letStatement | ifStatement | whileStatement
//!                     | doStatement | returnStatement)*
//! letStatement    ::= "let" identifier ("[" expression "]")? "=" expression ";"
//! ifStatement     ::= "if" "(" expression ")" "{" statements "}"
//!                     ("else" "{" statements "}")?
//! whileStatement  ::= "while" "(" expression ")" "{" statements "}"
//! doStatement     ::= "do" subroutineCall ";"
//! returnStatement ::= "return" expression? ";"
//! ```
//!
//! Every statement leaves the cursor one token past its own end, so the
//! `statements` loop can re-read the current token to pick the next
//! statement or to stop at the block's `}`.

use crate::analyzer::parse::{ParseError, Parser};
use crate::analyzer::token::{Token, TokenKind};
use crate::markup::MarkupSink;

/// Statement selected by its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Statement {
    Let,
    If,
    While,
    Do,
    Return,
}

impl Statement {
    fn from_token(token: &Token) -> Option<Self> {
        if token.kind() != TokenKind::Keyword {
            return None;
        }
        match token.text() {
            "let" => Some(Statement::Let),
            "if" => Some(Statement::If),
            "while" => Some(Statement::While),
            "do" => Some(Statement::Do),
            "return" => Some(Statement::Return),
            _ => None,
        }
    }
}

impl<S: MarkupSink> Parser<'_, S> {
    /// Entry: on the first statement keyword, or on the `}` of an empty
    /// block. Exit: on the first token that does not start a statement.
    pub(crate) fn compile_statements(&mut self) -> Result<(), ParseError> {
        self.open("statements")?;

        while let Some(statement) = self.scanner.current_token().and_then(Statement::from_token) {
            match statement {
                Statement::Let => self.compile_let()?,
                Statement::If => self.compile_if()?,
                Statement::While => self.compile_while()?,
                Statement::Do => self.compile_do()?,
                Statement::Return => self.compile_return()?,
            }
        }

        self.close()
    }

    /// Entry: on `let`. Exit: one past `;`.
    fn compile_let(&mut self) -> Result<(), ParseError> {
        self.open("letStatement")?;
        self.write_keyword("let")?;
        self.next_identifier()?;

        self.advance()?;
        if self.check("[") {
            self.write_current()?;
            self.advance()?;
            self.compile_expression()?;
            self.write_symbol("]")?;
            self.advance()?;
        }

        self.write_symbol("=")?;
        self.advance()?;
        self.compile_expression()?;
        self.write_symbol(";")?;
        self.close()?;
        self.advance()
    }

    /// Entry: on `if`. Exit: one past the last `}`.
    ///
    /// The token after the first block has to be read to look for `else`, so
    /// unlike `while` the end tag is written after that advance.
    fn compile_if(&mut self) -> Result<(), ParseError> {
        self.open("ifStatement")?;
        self.write_keyword("if")?;
        self.compile_condition()?;
        self.compile_block()?;

        self.advance()?;
        if self.check("else") {
            self.write_current()?;
            self.compile_block()?;
            self.advance()?;
        }

        self.close()
    }

    /// Entry: on `while`. Exit: one past the closing `}`.
    fn compile_while(&mut self) -> Result<(), ParseError> {
        self.open("whileStatement")?;
        self.write_keyword("while")?;
        self.compile_condition()?;
        self.compile_block()?;
        self.close()?;
        self.advance()
    }

    /// Entry: on `do`. Exit: one past `;`.
    fn compile_do(&mut self) -> Result<(), ParseError> {
        self.open("doStatement")?;
        self.write_keyword("do")?;
        self.next_identifier()?;
        self.advance()?;
        self.compile_call_rest()?;
        self.next_symbol(";")?;
        self.close()?;
        self.advance()
    }

    /// Entry: on `return`. Exit: one past `;`.
    fn compile_return(&mut self) -> Result<(), ParseError> {
        self.open("returnStatement")?;
        self.write_keyword("return")?;

        self.advance()?;
        if !self.check(";") {
            self.compile_expression()?;
        }

        self.write_symbol(";")?;
        self.close()?;
        self.advance()
    }

    /// `"(" expression ")"` after `if`/`while`.
    /// Entry: on the keyword. Exit: on `)`.
    fn compile_condition(&mut self) -> Result<(), ParseError> {
        self.next_symbol("(")?;
        self.advance()?;
        self.compile_expression()?;
        self.write_symbol(")")
    }

    /// `"{" statements "}"`. Entry: on the token before `{`. Exit: on `}`.
    fn compile_block(&mut self) -> Result<(), ParseError> {
        self.next_symbol("{")?;
        self.advance()?;
        self.compile_statements()?;
        self.write_symbol("}")
    }
}
