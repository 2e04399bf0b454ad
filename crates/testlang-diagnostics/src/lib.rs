// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! TestLang++ compiler diagnostics.
//!
//! Every pipeline stage has its own error type; each converts to a single
//! stage-tagged `Diagnostic` via the `ToDiagnostic` trait. Diagnostics are
//! plain data — terminal and JSON rendering are layered on top and never
//! leak into the pipeline crates.

pub mod convert;
pub mod formatter;
pub mod json;

pub use formatter::DiagnosticFormatter;

use serde::Serialize;
use testlang_ast::Span;

/// The pipeline stage a diagnostic originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Lex,
    Parse,
    Validate,
    Codegen,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Lex => "lex",
            Stage::Parse => "parse",
            Stage::Validate => "validate",
            Stage::Codegen => "codegen",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A stage-tagged compiler diagnostic.
///
/// A compilation run produces at most one of these — the first failure
/// anywhere aborts the run.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub stage: Stage,
    pub severity: Severity,
    pub message: String,
    /// Primary source span, where the stage has one.
    pub span: Option<Span>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            severity: Severity::Error,
            message: message.into(),
            span: None,
            help: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Convert a stage error into a `Diagnostic`.
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}
