// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for TestLang++.
//!
//! Transforms a token stream into a syntax tree.

mod parser;

pub use parser::{ParseError, ParseErrorKind, Parser};

#[cfg(test)]
mod tests {
    use super::*;
    use testlang_ast::{AssertionKind, HttpMethod, LineMap, Program};

    fn parse(src: &str) -> Result<Program, ParseError> {
        let tokens = testlang_lexer::Lexer::new(src)
            .tokenize()
            .expect("lex failed");
        Parser::new(tokens).parse()
    }

    fn parse_ok(src: &str) -> Program {
        parse(src).expect("parse failed")
    }

    #[test]
    fn minimal_program() {
        let program = parse_ok(
            r#"test A {
                GET "/x";
                expect status = 200;
                expect body contains "ok";
            }"#,
        );
        assert_eq!(program.tests.len(), 1);

        let test = &program.tests[0];
        assert_eq!(test.name, "A");
        assert_eq!(test.requests.len(), 1);
        assert_eq!(test.requests[0].method, HttpMethod::Get);
        assert_eq!(test.requests[0].path, "/x");
        assert_eq!(test.assertions.len(), 2);
        assert_eq!(test.assertions[0].kind, AssertionKind::StatusEquals(200));
        assert_eq!(
            test.assertions[1].kind,
            AssertionKind::BodyContains("ok".into())
        );
    }

    #[test]
    fn all_assertion_forms() {
        let program = parse_ok(
            r#"test Forms {
                POST "/submit";
                expect status = 201;
                expect status in 200..299;
                expect body contains "created";
                expect header "Content-Type" = "application/json";
            }"#,
        );
        let kinds: Vec<_> = program.tests[0]
            .assertions
            .iter()
            .map(|a| a.kind.clone())
            .collect();
        assert_eq!(
            kinds,
            vec![
                AssertionKind::StatusEquals(201),
                AssertionKind::StatusInRange { min: 200, max: 299 },
                AssertionKind::BodyContains("created".into()),
                AssertionKind::HeaderEquals {
                    name: "Content-Type".into(),
                    value: "application/json".into(),
                },
            ]
        );
    }

    #[test]
    fn statements_keep_declaration_order() {
        let program = parse_ok(
            r#"test Order {
                GET "/a";
                POST "/b";
                DELETE "/c";
                expect status = 200;
                expect status = 204;
            }"#,
        );
        let paths: Vec<_> = program.tests[0]
            .requests
            .iter()
            .map(|r| r.path.as_str())
            .collect();
        assert_eq!(paths, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn requests_and_assertions_may_interleave() {
        // The grammar allows any statement order inside a block
        let program = parse_ok(
            r#"test Mixed {
                GET "/a";
                expect status = 200;
                PUT "/b";
                expect status = 204;
            }"#,
        );
        assert_eq!(program.tests[0].requests.len(), 2);
        assert_eq!(program.tests[0].assertions.len(), 2);
    }

    #[test]
    fn multiple_tests_keep_source_order() {
        let program = parse_ok(
            r#"
            test First { GET "/1"; expect status = 200; expect status = 200; }
            test Second { GET "/2"; expect status = 200; expect status = 200; }
            test Third { GET "/3"; expect status = 200; expect status = 200; }
            "#,
        );
        let names: Vec<_> = program.tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn empty_program_parses() {
        // Zero tests is a validation failure, not a syntax error
        let program = parse_ok("");
        assert!(program.tests.is_empty());
    }

    #[test]
    fn empty_test_body_parses() {
        let program = parse_ok("test Empty { }");
        assert!(program.tests[0].requests.is_empty());
        assert!(program.tests[0].assertions.is_empty());
    }

    #[test]
    fn missing_semicolon_points_at_next_token() {
        let src = r#"test D { GET "/y" expect status = 200; }"#;
        let err = parse(src).expect_err("expected a syntax error");
        match &err.kind {
            ParseErrorKind::Expected { expected, found } => {
                assert_eq!(expected, &vec!["';'"]);
                assert_eq!(found.display_name(), "'expect'");
            }
            other => panic!("unexpected error kind: {:?}", other),
        }
        // Positioned at the `expect` that follows the missing separator
        let lm = LineMap::new(src);
        assert_eq!(lm.offset_to_line_col(err.span.start), (1, 19));
    }

    #[test]
    fn missing_closing_brace_fails_at_eof() {
        let src = "test A {\n    GET \"/x\";\n";
        let err = parse(src).expect_err("expected a syntax error");
        match &err.kind {
            ParseErrorKind::Expected { found, .. } => {
                assert_eq!(found.display_name(), "end of file");
            }
            other => panic!("unexpected error kind: {:?}", other),
        }
        assert_eq!(err.span.start, src.len());
    }

    #[test]
    fn unknown_statement_keyword_is_rejected() {
        // `PATCH` lexes as an identifier, which cannot start a statement
        let err = parse(r#"test A { PATCH "/x"; }"#).expect_err("expected a syntax error");
        match &err.kind {
            ParseErrorKind::Expected { expected, .. } => {
                assert!(expected.contains(&"'expect'"));
                assert!(expected.contains(&"'GET'"));
            }
            other => panic!("unexpected error kind: {:?}", other),
        }
    }

    #[test]
    fn keyword_is_not_a_test_name() {
        let err = parse("test test { }").expect_err("expected a syntax error");
        assert!(matches!(err.kind, ParseErrorKind::Expected { .. }));
    }

    #[test]
    fn status_code_must_be_plausible() {
        let err = parse(r#"test A { GET "/x"; expect status = 9000; }"#)
            .expect_err("expected a syntax error");
        assert!(matches!(
            err.kind,
            ParseErrorKind::StatusCodeOutOfRange { value: 9000 }
        ));
    }

    #[test]
    fn status_range_must_be_nonempty() {
        let err = parse(r#"test A { GET "/x"; expect status in 300..200; }"#)
            .expect_err("expected a syntax error");
        assert!(matches!(
            err.kind,
            ParseErrorKind::EmptyStatusRange { min: 300, max: 200 }
        ));
    }

    #[test]
    fn assertion_requires_known_subject() {
        let err = parse(r#"test A { expect cookie "x"; }"#).expect_err("expected a syntax error");
        match &err.kind {
            ParseErrorKind::Expected { expected, .. } => {
                assert_eq!(expected, &vec!["'status'", "'body'", "'header'"]);
            }
            other => panic!("unexpected error kind: {:?}", other),
        }
    }

    #[test]
    fn request_path_must_be_a_string() {
        let err = parse("test A { GET 42; }").expect_err("expected a syntax error");
        match &err.kind {
            ParseErrorKind::Expected { expected, found } => {
                assert_eq!(expected, &vec!["a string literal"]);
                assert_eq!(found.display_name(), "a number");
            }
            other => panic!("unexpected error kind: {:?}", other),
        }
    }
}
