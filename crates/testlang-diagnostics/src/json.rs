// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! JSON diagnostic output for machine consumption.
//!
//! Produces a structured report that editors and tooling can parse:
//! the originating stage, an exact 1-based location, and the help text.
//! Requested with `--format json` on the CLI.

use serde::Serialize;
use testlang_ast::LineMap;

use crate::{Diagnostic, Severity};

/// A complete report for one compilation run.
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// Schema version for forward compatibility.
    pub version: u32,
    /// The file that was compiled.
    pub file: String,
    /// Whether compilation succeeded.
    pub success: bool,
    /// The single diagnostic of a failed run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<JsonDiagnostic>,
}

/// A diagnostic in JSON form, enriched with source context.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    pub stage: String,
    pub severity: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

/// A source position (1-based) with the line's text for context.
#[derive(Debug, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub byte_offset: usize,
    pub source_line: String,
}

impl DiagnosticReport {
    /// A successful run carries no diagnostic.
    pub fn success(file: &str) -> Self {
        Self {
            version: 1,
            file: file.to_string(),
            success: true,
            diagnostic: None,
        }
    }

    /// A failed run with its single diagnostic.
    pub fn failure(file: &str, source: &str, diagnostic: &Diagnostic) -> Self {
        let line_map = LineMap::new(source);
        let location = diagnostic.span.map(|span| {
            let (line, column) = line_map.offset_to_line_col(span.start);
            SourceLocation {
                line,
                column,
                byte_offset: span.start,
                source_line: line_map.line_text(source, line).unwrap_or("").to_string(),
            }
        });

        Self {
            version: 1,
            file: file.to_string(),
            success: false,
            diagnostic: Some(JsonDiagnostic {
                stage: diagnostic.stage.name().to_string(),
                severity: match diagnostic.severity {
                    Severity::Error => "error",
                    Severity::Warning => "warning",
                }
                .to_string(),
                message: diagnostic.message.clone(),
                location,
                help: diagnostic.help.clone(),
            }),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnostic, Stage};
    use testlang_ast::Span;

    #[test]
    fn success_report_shape() {
        let value: serde_json::Value =
            serde_json::from_str(&DiagnosticReport::success("a.test").to_json())
                .expect("invalid JSON");
        assert_eq!(value["success"], true);
        assert_eq!(value["file"], "a.test");
        assert!(value.get("diagnostic").is_none());
    }

    #[test]
    fn failure_report_carries_stage_and_location() {
        let source = "test A {\n@\n}";
        let diag =
            Diagnostic::error(Stage::Lex, "unexpected character '@'").with_span(Span::new(9, 10));
        let report = DiagnosticReport::failure("a.test", source, &diag);
        let value: serde_json::Value =
            serde_json::from_str(&report.to_json()).expect("invalid JSON");

        assert_eq!(value["success"], false);
        assert_eq!(value["diagnostic"]["stage"], "lex");
        assert_eq!(value["diagnostic"]["severity"], "error");
        assert_eq!(value["diagnostic"]["location"]["line"], 2);
        assert_eq!(value["diagnostic"]["location"]["column"], 1);
        assert_eq!(value["diagnostic"]["location"]["source_line"], "@");
    }
}
