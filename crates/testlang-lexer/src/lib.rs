// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Lexer for TestLang++.
//!
//! Transforms source text into a token stream.

mod lexer;

pub use lexer::{LexError, LexErrorKind, Lexer};
