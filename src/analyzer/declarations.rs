//! Declaration parsing implementation
//!
//! This module handles the declarations that make up a class body:
//!
//! - Class variables: `static int count;`, `field Point p, q;`
//! - Subroutines: `constructor`, `function` and `method` declarations
//! - Parameter lists and subroutine bodies
//! - Local variables: `var char c;`
//!
//! # Grammar
//!
//! ```text
//! classVarDec    ::= ("static" | "field") type identifier ("," identifier)* ";"
//! subroutineDec  ::= ("constructor" | "function" | "method") ("void" | type)
//!                    identifier "(" parameterList ")" subroutineBody
//! parameterList  ::= (type identifier ("," type identifier)*)?
//! subroutineBody ::= "{" varDec* statements "}"
//! varDec         ::= "var" type identifier ("," identifier)* ";"
//! type           ::= "int" | "char" | "boolean" | identifier
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::analyzer::parse::{ParseError, Parser};
use crate::markup::MarkupSink;

impl<S: MarkupSink> Parser<'_, S> {
    /// Entry: on `static` or `field`. Exit: on the terminating `;`.
    pub(crate) fn compile_class_var_dec(&mut self) -> Result<(), ParseError> {
        self.open("classVarDec")?;
        self.write_current()?;
        self.compile_variable_names()?;
        self.close()
    }

    /// Entry: on `var`. Exit: on the terminating `;`.
    pub(crate) fn compile_var_dec(&mut self) -> Result<(), ParseError> {
        self.open("varDec")?;
        self.write_keyword("var")?;
        self.compile_variable_names()?;
        self.close()
    }

    /// `type identifier ("," identifier)* ";"`, shared by both variable
    /// declarations. Entry: on the declaring keyword. Exit: on `;`.
    fn compile_variable_names(&mut self) -> Result<(), ParseError> {
        self.advance()?;
        self.write_type()?;
        self.next_identifier()?;

        self.advance()?;
        while self.check(",") {
            self.write_current()?;
            self.next_identifier()?;
            self.advance()?;
        }

        self.write_symbol(";")
    }

    /// Entry: on `constructor`, `function` or `method`.
    /// Exit: on the closing `}` of the body.
    pub(crate) fn compile_subroutine_dec(&mut self) -> Result<(), ParseError> {
        self.open("subroutineDec")?;
        self.write_current()?;

        self.advance()?;
        if self.check("void") {
            self.write_current()?;
        } else {
            self.write_type()?;
        }

        self.next_identifier()?;
        self.next_symbol("(")?;

        self.advance()?;
        self.compile_parameter_list()?;
        self.write_symbol(")")?;

        self.advance()?;
        self.compile_subroutine_body()?;
        self.close()
    }

    /// Entry: on the token after `(`. Exit: on the `)` that ends the list,
    /// which is left for the caller to write.
    ///
    /// The `parameterList` tags are written even when the list is empty.
    pub(crate) fn compile_parameter_list(&mut self) -> Result<(), ParseError> {
        self.open("parameterList")?;

        if !self.check(")") {
            self.write_type()?;
            self.next_identifier()?;
            self.advance()?;

            while self.check(",") {
                self.write_current()?;
                self.advance()?;
                self.write_type()?;
                self.next_identifier()?;
                self.advance()?;
            }
        }

        self.close()
    }

    /// Entry: on `{`. Exit: on the matching `}`.
    pub(crate) fn compile_subroutine_body(&mut self) -> Result<(), ParseError> {
        self.open("subroutineBody")?;
        self.write_symbol("{")?;

        self.advance()?;
        while self.check("var") {
            self.compile_var_dec()?;
            self.advance()?;
        }

        self.compile_statements()?;
        self.write_symbol("}")?;
        self.close()
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzer::parse::{ParseError, Parser};
    use crate::analyzer::scanner::Scanner;
    use crate::markup::XmlWriter;
    use pretty_assertions::assert_eq;

    /// Compile `source` and keep only the lines between the first
    /// `<subroutineDec>` and its end tag.
    fn subroutine_lines(source: &str) -> Vec<String> {
        let mut scanner = Scanner::new(source);
        let mut sink = XmlWriter::new(Vec::new());
        Parser::new(&mut scanner, &mut sink)
            .compile_class()
            .expect("Parsing failed");
        let output = String::from_utf8(sink.into_inner()).unwrap();
        output
            .lines()
            .skip_while(|line| *line != "<subroutineDec>")
            .take_while(|line| *line != "</subroutineDec>")
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_parse_function_with_parameters() {
        let lines = subroutine_lines("class A { function void f(int a, Point b) { return; } }");
        assert_eq!(
            lines[..12],
            [
                "<subroutineDec>",
                "<keyword>function</keyword>",
                "<keyword>void</keyword>",
                "<identifier>f</identifier>",
                "<symbol>(</symbol>",
                "<parameterList>",
                "<keyword>int</keyword>",
                "<identifier>a</identifier>",
                "<symbol>,</symbol>",
                "<identifier>Point</identifier>",
                "<identifier>b</identifier>",
                "</parameterList>",
            ]
        );
        assert_eq!(lines[12], "<symbol>)</symbol>");
    }

    #[test]
    fn test_parse_empty_parameter_list() {
        let lines = subroutine_lines("class A { method int size() { return 0; } }");
        assert_eq!(
            lines[..7],
            [
                "<subroutineDec>",
                "<keyword>method</keyword>",
                "<keyword>int</keyword>",
                "<identifier>size</identifier>",
                "<symbol>(</symbol>",
                "<parameterList>",
                "</parameterList>",
            ]
        );
    }

    #[test]
    fn test_parse_local_variables() {
        let lines = subroutine_lines(
            "class A { constructor A new() { var int i, j; var Array a; return this; } }",
        );
        let body: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .skip_while(|line| *line != "<subroutineBody>")
            .take(18)
            .collect();
        assert_eq!(
            body,
            [
                "<subroutineBody>",
                "<symbol>{</symbol>",
                "<varDec>",
                "<keyword>var</keyword>",
                "<keyword>int</keyword>",
                "<identifier>i</identifier>",
                "<symbol>,</symbol>",
                "<identifier>j</identifier>",
                "<symbol>;</symbol>",
                "</varDec>",
                "<varDec>",
                "<keyword>var</keyword>",
                "<identifier>Array</identifier>",
                "<identifier>a</identifier>",
                "<symbol>;</symbol>",
                "</varDec>",
                "<statements>",
                "<returnStatement>",
            ]
        );
    }

    #[test]
    fn test_missing_parameter_name() {
        let mut scanner = Scanner::new("class A { function void f(int) { return; } }");
        let mut sink = XmlWriter::new(Vec::new());
        let err = Parser::new(&mut scanner, &mut sink)
            .compile_class()
            .unwrap_err();
        match err {
            ParseError::UnexpectedTokenKind {
                found, production, ..
            } => {
                assert_eq!(found.tag(), "symbol");
                assert_eq!(production, "parameterList");
            }
            other => panic!("Expected kind error, got {:?}", other),
        }
    }
}
