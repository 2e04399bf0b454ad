// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The TestLang++ compilation pipeline.
//!
//! Runs lex → parse → validate → codegen over one source document. Each
//! stage produces a fresh structure consumed by the next; the first failure
//! anywhere aborts the run with a single stage-tagged diagnostic. The
//! pipeline holds no state across invocations.

use std::path::Path;

use testlang_diagnostics::{Diagnostic, ToDiagnostic};

/// Compile a source document to generated Rust test source.
pub fn compile_source(source: &str) -> Result<String, Diagnostic> {
    let tokens = testlang_lexer::Lexer::new(source)
        .tokenize()
        .map_err(|e| e.to_diagnostic())?;
    let program = testlang_parser::Parser::new(tokens)
        .parse()
        .map_err(|e| e.to_diagnostic())?;
    testlang_validate::validate(&program).map_err(|e| e.to_diagnostic())?;
    Ok(testlang_codegen::generate(&program))
}

/// Compile a source document and commit the output to `output_path`.
///
/// The write is atomic; a failed run leaves no partial artifact behind.
pub fn compile_to_file(source: &str, output_path: &Path) -> Result<(), Diagnostic> {
    let generated = compile_source(source)?;
    testlang_codegen::write_file(output_path, &generated).map_err(|e| e.to_diagnostic())
}
