// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Conversions from stage error types to `Diagnostic`.
//!
//! Both the CLI and the JSON report use these; the pipeline crates stay
//! free of presentation concerns.

use crate::{Diagnostic, Stage, ToDiagnostic};

impl ToDiagnostic for testlang_lexer::LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        use testlang_lexer::LexErrorKind;

        let diag = Diagnostic::error(Stage::Lex, self.to_string()).with_span(self.span);
        match self.kind {
            LexErrorKind::UnterminatedString => {
                diag.with_help("close the string with '\"' before the end of the line")
            }
            _ => diag,
        }
    }
}

impl ToDiagnostic for testlang_parser::ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        use testlang_parser::ParseErrorKind;

        let diag = Diagnostic::error(Stage::Parse, self.to_string()).with_span(self.span);
        match self.kind {
            ParseErrorKind::StatusCodeOutOfRange { .. } => {
                diag.with_help("HTTP status codes lie between 100 and 599")
            }
            _ => diag,
        }
    }
}

impl ToDiagnostic for testlang_validate::SemanticError {
    fn to_diagnostic(&self) -> Diagnostic {
        use testlang_validate::SemanticError::*;

        match self {
            NoTests => Diagnostic::error(Stage::Validate, self.to_string()).with_help(
                "declare at least one block: test Name { GET \"/path\"; expect status = 200; expect body contains \"ok\"; }",
            ),
            EmptyTest { span, .. } => Diagnostic::error(Stage::Validate, self.to_string())
                .with_span(*span)
                .with_help("add at least one request: GET, POST, PUT, or DELETE"),
            InsufficientAssertions { span, .. } => {
                Diagnostic::error(Stage::Validate, self.to_string())
                    .with_span(*span)
                    .with_help(
                        "available assertions: expect status = <code>; expect status in <min>..<max>; expect body contains \"text\"; expect header \"Name\" = \"Value\";",
                    )
            }
        }
    }
}

impl ToDiagnostic for testlang_codegen::CodeGenError {
    fn to_diagnostic(&self) -> Diagnostic {
        use testlang_codegen::CodeGenError;

        match self {
            CodeGenError::WriteFailed { source, .. } => {
                Diagnostic::error(Stage::Codegen, self.to_string()).with_help(source.to_string())
            }
        }
    }
}
