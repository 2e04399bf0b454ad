// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The recursive-descent parser.
//!
//! One token of lookahead suffices for the whole grammar:
//!
//! ```text
//! Program    := Test* EOF
//! Test       := 'test' Ident '{' Statement* '}'
//! Statement  := Request | Assertion
//! Request    := Method Str ';'
//! Assertion  := 'expect' AssertionBody ';'
//! ```
//!
//! The first error aborts the parse; there is no recovery pass.

use testlang_ast::token::{Token, TokenKind};
use testlang_ast::{Assertion, AssertionKind, HttpMethod, Program, Request, Span, Test};
use thiserror::Error;

/// A syntax error with position and expected-vs-actual token info.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

/// The kind of syntax error.
#[derive(Debug, Clone, Error)]
pub enum ParseErrorKind {
    #[error("expected {}, found {}", expected_list(expected), found.display_name())]
    Expected {
        expected: Vec<&'static str>,
        found: TokenKind,
    },

    #[error("status code {value} is out of range (100..=599)")]
    StatusCodeOutOfRange { value: i64 },

    #[error("empty status range: {min}..{max}")]
    EmptyStatusRange { min: u16, max: u16 },
}

impl ParseError {
    fn expected_one(expected: &'static str, found: TokenKind, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::Expected {
                expected: vec![expected],
                found,
            },
            span,
        }
    }

    fn expected_any(expected: Vec<&'static str>, found: TokenKind, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::Expected { expected, found },
            span,
        }
    }
}

/// Render an expected set as `'a', 'b', or 'c'`.
fn expected_list(items: &[&'static str]) -> String {
    match items {
        [] => "nothing".to_string(),
        [one] => (*one).to_string(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

/// The parser for TestLang++ token streams.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
}

impl Parser {
    /// Create a parser over a token stream as produced by the lexer.
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map(|t| t.span.end).unwrap_or(0);
        Self {
            tokens,
            pos: 0,
            eof: Token {
                kind: TokenKind::Eof,
                span: Span::new(end, end),
            },
        }
    }

    /// Parse a whole program: `Test* EOF`.
    pub fn parse(mut self) -> Result<Program, ParseError> {
        let mut tests = Vec::new();
        while !self.at_end() {
            tests.push(self.parse_test()?);
        }
        Ok(Program { tests })
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn at_end(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn expect_token(&mut self, kind: TokenKind, name: &'static str) -> Result<Span, ParseError> {
        if self.current().kind == kind {
            Ok(self.advance().span)
        } else {
            let span = self.current().span;
            Err(ParseError::expected_one(
                name,
                self.current().kind.clone(),
                span,
            ))
        }
    }

    fn expect_semi(&mut self) -> Result<Span, ParseError> {
        self.expect_token(TokenKind::Semi, "';'")
    }

    fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        let span = self.current().span;
        match self.current().kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok((name, span))
            }
            found => Err(ParseError::expected_one("a test name", found, span)),
        }
    }

    fn expect_string(&mut self) -> Result<(String, Span), ParseError> {
        let span = self.current().span;
        match self.current().kind.clone() {
            TokenKind::Str(text) => {
                self.advance();
                Ok((text, span))
            }
            found => Err(ParseError::expected_one("a string literal", found, span)),
        }
    }

    /// An integer literal that is a plausible HTTP status code.
    fn expect_status_code(&mut self) -> Result<(u16, Span), ParseError> {
        let span = self.current().span;
        match self.current().kind.clone() {
            TokenKind::Int(value) => {
                self.advance();
                match u16::try_from(value) {
                    Ok(code) if (100..=599).contains(&code) => Ok((code, span)),
                    _ => Err(ParseError {
                        kind: ParseErrorKind::StatusCodeOutOfRange { value },
                        span,
                    }),
                }
            }
            found => Err(ParseError::expected_one("a status code", found, span)),
        }
    }

    // =========================================================================
    // Grammar Productions
    // =========================================================================

    /// `'test' Ident '{' Statement* '}'`
    fn parse_test(&mut self) -> Result<Test, ParseError> {
        self.expect_token(TokenKind::Test, "'test'")?;
        let (name, span) = self.expect_ident()?;
        self.expect_token(TokenKind::LBrace, "'{'")?;

        let mut requests = Vec::new();
        let mut assertions = Vec::new();
        loop {
            let at = self.current().span;
            match self.current().kind.clone() {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                // A method token starts a request, `expect` starts an
                // assertion; anything else is a syntax error here.
                TokenKind::Method(method) => requests.push(self.parse_request(method)?),
                TokenKind::Expect => assertions.push(self.parse_assertion()?),
                found => {
                    return Err(ParseError::expected_any(
                        vec!["'GET'", "'POST'", "'PUT'", "'DELETE'", "'expect'", "'}'"],
                        found,
                        at,
                    ));
                }
            }
        }

        Ok(Test {
            name,
            span,
            requests,
            assertions,
        })
    }

    /// `Method Str ';'`
    fn parse_request(&mut self, method: HttpMethod) -> Result<Request, ParseError> {
        let start = self.advance().span;
        let (path, path_span) = self.expect_string()?;
        self.expect_semi()?;
        Ok(Request {
            method,
            path,
            span: start.to(path_span),
        })
    }

    /// `'expect' AssertionBody ';'`
    fn parse_assertion(&mut self) -> Result<Assertion, ParseError> {
        let start = self.advance().span;
        let at = self.current().span;
        let kind = match self.current().kind.clone() {
            TokenKind::Status => {
                self.advance();
                self.parse_status_body()?
            }
            TokenKind::Body => {
                self.advance();
                self.expect_token(TokenKind::Contains, "'contains'")?;
                let (text, _) = self.expect_string()?;
                AssertionKind::BodyContains(text)
            }
            TokenKind::Header => {
                self.advance();
                let (name, _) = self.expect_string()?;
                self.expect_token(TokenKind::Eq, "'='")?;
                let (value, _) = self.expect_string()?;
                AssertionKind::HeaderEquals { name, value }
            }
            found => {
                return Err(ParseError::expected_any(
                    vec!["'status'", "'body'", "'header'"],
                    found,
                    at,
                ));
            }
        };
        let end = self.expect_semi()?;
        Ok(Assertion {
            kind,
            span: start.to(end),
        })
    }

    /// `'=' Int | 'in' Int '..' Int`
    fn parse_status_body(&mut self) -> Result<AssertionKind, ParseError> {
        let at = self.current().span;
        match self.current().kind.clone() {
            TokenKind::Eq => {
                self.advance();
                let (code, _) = self.expect_status_code()?;
                Ok(AssertionKind::StatusEquals(code))
            }
            TokenKind::In => {
                self.advance();
                let (min, min_span) = self.expect_status_code()?;
                self.expect_token(TokenKind::DotDot, "'..'")?;
                let (max, max_span) = self.expect_status_code()?;
                if min > max {
                    return Err(ParseError {
                        kind: ParseErrorKind::EmptyStatusRange { min, max },
                        span: min_span.to(max_span),
                    });
                }
                Ok(AssertionKind::StatusInRange { min, max })
            }
            found => Err(ParseError::expected_any(vec!["'='", "'in'"], found, at)),
        }
    }
}
