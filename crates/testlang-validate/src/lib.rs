// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Semantic validation for TestLang++ programs.
//!
//! Enforces the structural rules the grammar cannot express. Tests are
//! checked in declaration order and the pass stops at the first violation;
//! nothing is aggregated.

use testlang_ast::{Program, Span};
use thiserror::Error;

/// A semantic rule violation.
#[derive(Debug, Clone, Error)]
pub enum SemanticError {
    #[error("program contains no test blocks")]
    NoTests,

    #[error("test `{name}` contains no requests")]
    EmptyTest { name: String, span: Span },

    #[error("test `{name}` has {count} assertion(s); at least 2 are required")]
    InsufficientAssertions {
        name: String,
        count: usize,
        span: Span,
    },
}

/// Validate a syntactically well-formed program.
///
/// Within a test, an empty request list is reported before an insufficient
/// assertion count.
pub fn validate(program: &Program) -> Result<(), SemanticError> {
    if program.tests.is_empty() {
        return Err(SemanticError::NoTests);
    }

    for test in &program.tests {
        if test.requests.is_empty() {
            return Err(SemanticError::EmptyTest {
                name: test.name.clone(),
                span: test.span,
            });
        }
        if test.assertions.len() < 2 {
            return Err(SemanticError::InsufficientAssertions {
                name: test.name.clone(),
                count: test.assertions.len(),
                span: test.span,
            });
        }
    }

    Ok(())
}
