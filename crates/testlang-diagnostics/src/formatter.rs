// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal formatter for diagnostics.
//!
//! Produces color-coded output in the familiar compiler shape:
//!
//! ```text
//! error[parse]: expected ';', found 'expect'
//!   --> checkout.test:2:15
//!    |
//!  2 |     GET "/y" expect status = 200;
//!    |              ^^^^^^
//!    |
//!    = help: ...
//! ```

use colored::Colorize;

use testlang_ast::LineMap;

use crate::{Diagnostic, Severity};

/// Formats diagnostics against their source document.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: None,
            line_map: LineMap::new(source),
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();

        let label = format!(
            "{}[{}]",
            match diagnostic.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            },
            diagnostic.stage.name()
        );
        let label = match diagnostic.severity {
            Severity::Error => label.red().bold(),
            Severity::Warning => label.yellow().bold(),
        };
        out.push_str(&format!("{}: {}\n", label, diagnostic.message.bold()));

        if let Some(span) = diagnostic.span {
            let (line, col) = self.line_map.offset_to_line_col(span.start);
            let file = self.file_name.unwrap_or("<source>");
            out.push_str(&format!("  {} {}:{}:{}\n", "-->".blue(), file, line, col));

            if let Some(text) = self.line_map.line_text(self.source, line) {
                let gutter = line.to_string().len().max(2);
                out.push_str(&format!("{} {}\n", " ".repeat(gutter + 1), "|".blue()));
                out.push_str(&format!(
                    "{:>width$} {} {}\n",
                    line.to_string().blue().bold(),
                    "|".blue(),
                    text,
                    width = gutter + 1,
                ));

                // Caret run under the offending text, clamped to the line
                let len = span
                    .end
                    .saturating_sub(span.start)
                    .min(text.len().saturating_sub(col - 1))
                    .max(1);
                out.push_str(&format!(
                    "{} {} {}{}\n",
                    " ".repeat(gutter + 1),
                    "|".blue(),
                    " ".repeat(col - 1),
                    "^".repeat(len).red().bold(),
                ));
            }
        }

        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!("   {} {}: {}\n", "=".blue(), "help".bold(), help));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnostic, Stage};
    use testlang_ast::Span;

    fn plain(s: &str) -> String {
        // Strip ANSI escapes so assertions hold with or without color
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                for d in chars.by_ref() {
                    if d == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn renders_location_and_caret() {
        let source = "test A {\n    GET @\"/x\";\n}";
        let diag = Diagnostic::error(Stage::Lex, "unexpected character '@'")
            .with_span(Span::new(17, 18));
        let rendered = plain(
            &DiagnosticFormatter::new(source)
                .with_file_name("a.test")
                .format(&diag),
        );

        assert!(rendered.contains("error[lex]: unexpected character '@'"));
        assert!(rendered.contains("--> a.test:2:9"));
        assert!(rendered.contains("    GET @\"/x\";"));
        assert!(rendered.contains("^"));
    }

    #[test]
    fn spanless_diagnostic_renders_header_and_help() {
        let diag =
            Diagnostic::error(Stage::Validate, "program contains no test blocks").with_help("add a test block");
        let rendered = plain(&DiagnosticFormatter::new("").format(&diag));
        assert!(rendered.contains("error[validate]: program contains no test blocks"));
        assert!(rendered.contains("= help: add a test block"));
        assert!(!rendered.contains("-->"));
    }
}
