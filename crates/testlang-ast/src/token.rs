//! Token definitions for the lexer.

use crate::program::HttpMethod;
use crate::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// The kind of token. The set is closed: every character of a valid
/// document lexes into exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    Test,
    Expect,
    Status,
    Body,
    Contains,
    Header,
    In,

    // HTTP methods
    Method(HttpMethod),

    // Literals
    Ident(String),
    Str(String),
    Int(i64),

    // Punctuation
    LBrace,
    RBrace,
    Semi,
    Eq,
    DotDot,

    Eof,
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Test => "'test'",
            TokenKind::Expect => "'expect'",
            TokenKind::Status => "'status'",
            TokenKind::Body => "'body'",
            TokenKind::Contains => "'contains'",
            TokenKind::Header => "'header'",
            TokenKind::In => "'in'",

            TokenKind::Method(HttpMethod::Get) => "'GET'",
            TokenKind::Method(HttpMethod::Post) => "'POST'",
            TokenKind::Method(HttpMethod::Put) => "'PUT'",
            TokenKind::Method(HttpMethod::Delete) => "'DELETE'",

            TokenKind::Ident(_) => "a name",
            TokenKind::Str(_) => "a string",
            TokenKind::Int(_) => "a number",

            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Semi => "';'",
            TokenKind::Eq => "'='",
            TokenKind::DotDot => "'..'",

            TokenKind::Eof => "end of file",
        }
    }
}
