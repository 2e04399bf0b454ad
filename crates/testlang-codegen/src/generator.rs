// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rendering of the syntax tree into Rust test source.

use std::collections::HashMap;

use testlang_ast::{AssertionKind, HttpMethod, Program, Request, Test};

/// Generate the full output document for a validated program.
pub fn generate(program: &Program) -> String {
    Generator::new().generate(program)
}

/// Renders a program as Rust test source.
///
/// Output is deterministic: the same program always renders byte-identical
/// text, one `#[test]` function per test block in declaration order.
pub struct Generator {
    output: String,
    indent: usize,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    pub fn generate(mut self, program: &Program) -> String {
        self.emit_header();

        let mut names = FnNames::new();
        for test in &program.tests {
            let fn_name = names.allocate(&test.name);
            self.emit_line("");
            self.emit_test(test, &fn_name);
        }
        self.output
    }

    // --- Helpers ---

    fn emit_line(&mut self, line: &str) {
        if !line.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str("    ");
            }
            self.output.push_str(line);
        }
        self.output.push('\n');
    }

    // --- Scaffolding ---

    fn emit_header(&mut self) {
        self.emit_line("// Generated by testlangc. Do not edit.");
        self.emit_line("");
        self.emit_line("use reqwest::blocking::Client;");
        self.emit_line("");
        self.emit_line("fn base_url() -> String {");
        self.indent += 1;
        self.emit_line(
            "std::env::var(\"TESTLANG_BASE_URL\").unwrap_or_else(|_| \"http://localhost:8080\".to_string())",
        );
        self.indent -= 1;
        self.emit_line("}");
    }

    // --- Test units ---

    fn emit_test(&mut self, test: &Test, fn_name: &str) {
        self.emit_line(&format!("/// Generated from test block `{}`.", test.name));
        self.emit_line("#[test]");
        self.emit_line(&format!("fn {}() {{", fn_name));
        self.indent += 1;

        self.emit_line("let client = Client::new();");
        for (i, request) in test.requests.iter().enumerate() {
            self.emit_request(request, i + 1 == test.requests.len());
        }
        if !test.requests.is_empty() {
            self.emit_line("let status = response.status().as_u16();");
            self.emit_line("let headers = response.headers().clone();");
            self.emit_line("let body = response.text().expect(\"failed to read response body\");");
        }
        for assertion in &test.assertions {
            self.emit_assertion(&assertion.kind);
        }

        self.indent -= 1;
        self.emit_line("}");
    }

    fn emit_request(&mut self, request: &Request, is_last: bool) {
        let verb = match request.method {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        };
        // Assertions check the last response; earlier ones are discarded.
        let binding = if is_last { "let response = " } else { "let _ = " };
        let path = escape_str(&request.path);
        self.emit_line(&format!(
            "{}client.{}(base_url() + \"{}\").send().expect(\"{} {} failed\");",
            binding,
            verb,
            path,
            request.method.as_str(),
            path,
        ));
    }

    fn emit_assertion(&mut self, kind: &AssertionKind) {
        match kind {
            AssertionKind::StatusEquals(code) => {
                self.emit_line(&format!("assert_eq!(status, {});", code));
            }
            AssertionKind::StatusInRange { min, max } => {
                self.emit_line(&format!(
                    "assert!(({}..={}).contains(&status), \"status was {{}}\", status);",
                    min, max
                ));
            }
            AssertionKind::BodyContains(text) => {
                self.emit_line(&format!("assert!(body.contains(\"{}\"));", escape_str(text)));
            }
            AssertionKind::HeaderEquals { name, value } => {
                self.emit_line(&format!(
                    "assert_eq!(headers.get(\"{}\").and_then(|v| v.to_str().ok()), Some(\"{}\"));",
                    escape_str(name),
                    escape_str(value),
                ));
            }
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocates unique, valid Rust identifiers for generated test functions.
struct FnNames {
    used: HashMap<String, usize>,
}

impl FnNames {
    fn new() -> Self {
        Self {
            used: HashMap::new(),
        }
    }

    fn allocate(&mut self, test_name: &str) -> String {
        let base = sanitize(test_name);
        let n = self.used.entry(base.clone()).or_insert(0);
        *n += 1;
        if *n == 1 {
            base
        } else {
            format!("{}_{}", base, n)
        }
    }
}

/// Lower a test name into a snake_case Rust identifier.
fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if ch.is_ascii_uppercase() {
                if prev_lower {
                    out.push('_');
                }
                out.push(ch.to_ascii_lowercase());
            } else {
                out.push(ch);
            }
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        } else {
            out.push('_');
            prev_lower = false;
        }
    }
    if out.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        out.insert(0, 't');
    }
    out
}

/// Escape text for inclusion in a generated Rust string literal.
fn escape_str(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(src: &str) -> String {
        let tokens = testlang_lexer::Lexer::new(src)
            .tokenize()
            .expect("lex failed");
        let program = testlang_parser::Parser::new(tokens)
            .parse()
            .expect("parse failed");
        generate(&program)
    }

    const SCENARIO: &str = r#"test A {
        GET "/x";
        expect status = 200;
        expect body contains "ok";
    }"#;

    #[test]
    fn one_unit_per_test_block() {
        let out = compile(SCENARIO);
        assert_eq!(out.matches("#[test]").count(), 1);
        assert!(out.contains("fn a() {"));
        assert!(out.contains("let response = client.get(base_url() + \"/x\").send().expect(\"GET /x failed\");"));
        assert!(out.contains("assert_eq!(status, 200);"));
        assert!(out.contains("assert!(body.contains(\"ok\"));"));
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(compile(SCENARIO), compile(SCENARIO));
    }

    #[test]
    fn units_follow_declaration_order() {
        let out = compile(
            r#"
            test Zebra { GET "/z"; expect status = 200; expect status = 200; }
            test Alpha { GET "/a"; expect status = 200; expect status = 200; }
            "#,
        );
        let zebra = out.find("fn zebra()").expect("zebra unit missing");
        let alpha = out.find("fn alpha()").expect("alpha unit missing");
        assert!(zebra < alpha);
    }

    #[test]
    fn checks_follow_declaration_order() {
        let out = compile(
            r#"test A {
                GET "/x";
                expect body contains "first";
                expect status = 200;
                expect body contains "second";
            }"#,
        );
        let first = out.find("\"first\"").expect("first check missing");
        let status = out.find("assert_eq!(status").expect("status check missing");
        let second = out.find("\"second\"").expect("second check missing");
        assert!(first < status && status < second);
    }

    #[test]
    fn only_last_response_is_bound() {
        let out = compile(
            r#"test Multi {
                POST "/setup";
                GET "/check";
                expect status = 200;
                expect body contains "ok";
            }"#,
        );
        assert!(out.contains("let _ = client.post(base_url() + \"/setup\")"));
        assert!(out.contains("let response = client.get(base_url() + \"/check\")"));
    }

    #[test]
    fn status_range_check_is_inclusive() {
        let out = compile(
            r#"test R {
                GET "/x";
                expect status in 200..299;
                expect status = 200;
            }"#,
        );
        assert!(out.contains("assert!((200..=299).contains(&status), \"status was {}\", status);"));
    }

    #[test]
    fn header_check_compares_named_header() {
        let out = compile(
            r#"test H {
                GET "/x";
                expect header "Content-Type" = "application/json";
                expect status = 200;
            }"#,
        );
        assert!(out.contains(
            "assert_eq!(headers.get(\"Content-Type\").and_then(|v| v.to_str().ok()), Some(\"application/json\"));"
        ));
    }

    #[test]
    fn sanitize_produces_valid_identifiers() {
        assert_eq!(sanitize("CheckoutFlow"), "checkout_flow");
        assert_eq!(sanitize("my-test"), "my_test");
        assert_eq!(sanitize("2fast"), "t2fast");
        assert_eq!(sanitize("already_snake"), "already_snake");
    }

    #[test]
    fn duplicate_test_names_are_disambiguated() {
        let out = compile(
            r#"
            test Dup { GET "/1"; expect status = 200; expect status = 200; }
            test Dup { GET "/2"; expect status = 200; expect status = 200; }
            test Dup { GET "/3"; expect status = 200; expect status = 200; }
            "#,
        );
        assert!(out.contains("fn dup() {"));
        assert!(out.contains("fn dup_2() {"));
        assert!(out.contains("fn dup_3() {"));
    }

    #[test]
    fn string_payloads_are_escaped() {
        let out = compile(
            r#"test E {
                GET "/a\b";
                expect body contains "say \hello";
                expect status = 200;
            }"#,
        );
        assert!(out.contains("base_url() + \"/a\\\\b\""));
        assert!(out.contains("assert!(body.contains(\"say \\\\hello\"));"));
    }
}
