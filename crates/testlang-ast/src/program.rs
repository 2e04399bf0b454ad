// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Syntax tree for TestLang++ programs.
//!
//! A program is an ordered sequence of test blocks; each block owns its
//! requests and assertions. No stage mutates the tree once built, so nodes
//! carry no back-references.

use crate::Span;

/// The root of the syntax tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub tests: Vec<Test>,
}

/// A named test block.
///
/// The grammar does not require names to be unique; the code generator
/// disambiguates generated unit names when they collide.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Test {
    pub name: String,
    /// Span of the test name, for diagnostics.
    pub span: Span,
    pub requests: Vec<Request>,
    pub assertions: Vec<Assertion>,
}

/// An HTTP request statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    pub method: HttpMethod,
    pub path: String,
    pub span: Span,
}

/// The HTTP methods the language accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// An expectation over the response.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assertion {
    pub kind: AssertionKind,
    pub span: Span,
}

/// The closed set of assertion forms.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssertionKind {
    StatusEquals(u16),
    StatusInRange { min: u16, max: u16 },
    BodyContains(String),
    HeaderEquals { name: String, value: String },
}
