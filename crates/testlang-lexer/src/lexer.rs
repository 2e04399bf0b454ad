//! The lexer implementation using logos.

use logos::Logos;
use testlang_ast::token::{Token, TokenKind};
use testlang_ast::{HttpMethod, Span};
use thiserror::Error;

/// Raw token type for logos - literal payloads are decoded in a second pass.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")] // Whitespace never reaches the parser
enum RawToken {
    // === Keywords (case-sensitive) ===
    #[token("test")]
    Test,
    #[token("expect")]
    Expect,
    #[token("status")]
    Status,
    #[token("body")]
    Body,
    #[token("contains")]
    Contains,
    #[token("header")]
    Header,
    #[token("in")]
    In,

    // === HTTP methods ===
    #[token("GET")]
    Get,
    #[token("POST")]
    Post,
    #[token("PUT")]
    Put,
    #[token("DELETE")]
    Delete,

    // === Punctuation ===
    // `..` is one token; a lone `.` has no rule and is a lex error.
    #[token("..")]
    DotDot,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semi,
    #[token("=")]
    Eq,

    // === Comments (skip them) ===
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    // === Literals ===
    // Double-quoted, single line, no escape processing.
    #[regex(r#""[^"\n]*""#)]
    Str,

    // Maximal digit run.
    #[regex(r"[0-9]+")]
    Int,

    // === Identifier (must come after keywords) ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// The lexer for TestLang++ source text.
///
/// Iteration yields `Result<Token, LexError>` lazily, ends with a single
/// `Eof` token, and is fused afterwards. The first error also ends the
/// stream; create a fresh `Lexer` to re-scan a document.
pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, RawToken>,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: RawToken::lexer(source),
            done: false,
        }
    }

    /// Scan the whole document, stopping at the first error.
    pub fn tokenize(self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }

    /// Convert a raw logos token to our TokenKind, decoding literals.
    fn convert(&self, raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
        Ok(match raw {
            RawToken::Test => TokenKind::Test,
            RawToken::Expect => TokenKind::Expect,
            RawToken::Status => TokenKind::Status,
            RawToken::Body => TokenKind::Body,
            RawToken::Contains => TokenKind::Contains,
            RawToken::Header => TokenKind::Header,
            RawToken::In => TokenKind::In,

            RawToken::Get => TokenKind::Method(HttpMethod::Get),
            RawToken::Post => TokenKind::Method(HttpMethod::Post),
            RawToken::Put => TokenKind::Method(HttpMethod::Put),
            RawToken::Delete => TokenKind::Method(HttpMethod::Delete),

            RawToken::DotDot => TokenKind::DotDot,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::Semi => TokenKind::Semi,
            RawToken::Eq => TokenKind::Eq,

            // Drop the surrounding quotes; the contents are kept verbatim.
            RawToken::Str => TokenKind::Str(slice[1..slice.len() - 1].to_string()),

            RawToken::Int => {
                let value = slice.parse::<i64>().map_err(|_| LexError {
                    kind: LexErrorKind::IntOutOfRange {
                        text: slice.to_string(),
                    },
                    span,
                })?;
                TokenKind::Int(value)
            }

            RawToken::Ident => TokenKind::Ident(slice.to_string()),

            RawToken::LineComment => unreachable!("comments are skipped"),
        })
    }

    /// Distinguish an unterminated string from a stray character.
    fn error_at(&self, start: usize) -> LexError {
        let rest = &self.source[start..];
        if rest.starts_with('"') {
            let len = rest.find('\n').unwrap_or(rest.len());
            return LexError {
                kind: LexErrorKind::UnterminatedString,
                span: Span::new(start, start + len),
            };
        }
        let ch = rest.chars().next().unwrap_or('\u{FFFD}');
        LexError {
            kind: LexErrorKind::UnexpectedChar { ch },
            span: Span::new(start, start + ch.len_utf8()),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next() {
            Some(Ok(raw)) => {
                let range = self.inner.span();
                let span = Span::new(range.start, range.end);
                match self.convert(raw, self.inner.slice(), span) {
                    Ok(kind) => Some(Ok(Token { kind, span })),
                    Err(e) => {
                        self.done = true;
                        Some(Err(e))
                    }
                }
            }
            Some(Err(())) => {
                self.done = true;
                Some(Err(self.error_at(self.inner.span().start)))
            }
            None => {
                self.done = true;
                let end = self.source.len();
                Some(Ok(Token {
                    kind: TokenKind::Eof,
                    span: Span::new(end, end),
                }))
            }
        }
    }
}

/// A lexical error. The lexer does not recover; the stream ends here.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// The kind of lexical error.
#[derive(Debug, Clone, Error)]
pub enum LexErrorKind {
    #[error("unexpected character '{ch}'")]
    UnexpectedChar { ch: char },

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("integer literal `{text}` is out of range")]
    IntOutOfRange { text: String },
}
