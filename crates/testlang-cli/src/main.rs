//! TestLang++ CLI - compiles .test files into Rust test source.

mod output;

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use testlang_diagnostics::json::DiagnosticReport;
use testlang_diagnostics::{Diagnostic, DiagnosticFormatter, ToDiagnostic};

fn main() {
    output::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let json = take_json_flag(&mut args);

    match args.first().map(String::as_str) {
        None => {
            print_usage();
        }
        Some("help" | "--help" | "-h") => {
            print_usage();
        }
        Some("version" | "--version" | "-V") => {
            println!("testlangc 0.1.0");
        }
        Some("lex") => match args.get(1) {
            Some(path) => cmd_lex(path),
            None => {
                eprintln!("Usage: testlangc lex <file.test>");
                process::exit(1);
            }
        },
        Some("parse") => match args.get(1) {
            Some(path) => cmd_parse(path),
            None => {
                eprintln!("Usage: testlangc parse <file.test>");
                process::exit(1);
            }
        },
        Some(_) if args.len() == 2 => cmd_compile(&args[0], &args[1], json),
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("TestLang++ compiler 0.1.0");
    println!();
    println!("Usage: testlangc <input.test> <output.rs> [--format json]");
    println!();
    println!("Commands:");
    println!("  <input> <output>  Compile a test description into Rust test source");
    println!("  lex <file>        Tokenize a file and print tokens");
    println!("  parse <file>      Parse a file and print the syntax tree");
    println!("  help              Show this help");
    println!("  version           Show version");
}

/// Pull `--format json` out of the argument list.
fn take_json_flag(args: &mut Vec<String>) -> bool {
    if let Some(i) = args.iter().position(|a| a == "--format") {
        if args.get(i + 1).map(String::as_str) == Some("json") {
            args.drain(i..=i + 1);
            return true;
        }
    }
    false
}

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("{}: could not read {}: {}", output::error_label(), path, e);
            process::exit(1);
        }
    }
}

fn show_diagnostic(source: &str, path: &str, diagnostic: &Diagnostic) {
    let formatter = DiagnosticFormatter::new(source).with_file_name(path);
    eprint!("{}", formatter.format(diagnostic));
}

fn cmd_compile(input: &str, output_path: &str, json: bool) {
    let source = read_source(input);

    match testlang_compiler::compile_to_file(&source, Path::new(output_path)) {
        Ok(()) => {
            if json {
                println!("{}", DiagnosticReport::success(input).to_json());
            } else {
                println!(
                    "{} {} -> {}",
                    output::status_pass(),
                    input,
                    output_path
                );
                println!("{}", output::banner_ok("Compile"));
            }
        }
        Err(diagnostic) => {
            if json {
                println!(
                    "{}",
                    DiagnosticReport::failure(input, &source, &diagnostic).to_json()
                );
            } else {
                show_diagnostic(&source, input, &diagnostic);
                eprintln!("{}", output::banner_fail(diagnostic.stage.name()));
            }
            process::exit(1);
        }
    }
}

fn cmd_lex(path: &str) {
    let source = read_source(path);

    match testlang_lexer::Lexer::new(&source).tokenize() {
        Ok(tokens) => {
            for token in &tokens {
                println!(
                    "{:4}..{:<4} {:?}",
                    token.span.start, token.span.end, token.kind
                );
            }
            println!("\n{}", output::banner_ok("Lex"));
        }
        Err(e) => {
            show_diagnostic(&source, path, &e.to_diagnostic());
            eprintln!("{}", output::banner_fail("Lex"));
            process::exit(1);
        }
    }
}

fn cmd_parse(path: &str) {
    let source = read_source(path);

    let tokens = match testlang_lexer::Lexer::new(&source).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            show_diagnostic(&source, path, &e.to_diagnostic());
            eprintln!("{}", output::banner_fail("Lex"));
            process::exit(1);
        }
    };

    match testlang_parser::Parser::new(tokens).parse() {
        Ok(program) => {
            println!("{:#?}", program);
            println!("\n{}", output::banner_ok("Parse"));
        }
        Err(e) => {
            show_diagnostic(&source, path, &e.to_diagnostic());
            eprintln!("{}", output::banner_fail("Parse"));
            process::exit(1);
        }
    }
}
