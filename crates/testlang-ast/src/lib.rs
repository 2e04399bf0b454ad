// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Abstract Syntax Tree types for TestLang++.
//!
//! This crate defines the spans, tokens, and tree nodes shared between the
//! lexer, parser, validator, and code generator.

pub mod program;
pub mod span;
pub mod token;

pub use program::{Assertion, AssertionKind, HttpMethod, Program, Request, Test};
pub use span::{LineMap, Span};
