// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # notc-compiler
//!
//! A minimal compiler for NotC, a small C-like language.
//!
//! ## Overview
//!
//! The pipeline is linear and single-threaded:
//! - Line-oriented lexer producing positioned tokens
//! - Recursive descent parser producing a strict AST
//! - Code generator folding the AST into a stack-machine bytecode chunk
//! - Module encoder/decoder for the binary file format
//!
//! Lexical and parse errors are collected rather than thrown, so a single
//! run reports as many of them as possible and still returns partial
//! results.
//!
//! ## Quick Start
//!
//! ```rust
//! use notc_compiler::compile_source;
//!
//! let compilation = compile_source("1 + 2 * 3;");
//! assert!(compilation.diagnostics.is_empty());
//! let chunk = compilation.chunk.unwrap();
//! assert_eq!(chunk.constants, vec![1.0, 2.0, 3.0]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod compiler;
pub mod error;
pub mod lexer;
pub mod module;
pub mod parser;

use std::path::Path;

use tracing::{debug, info};

pub use error::{Error, ErrorKind, Result};

use crate::ast::Root;
use crate::compiler::Chunk;
use crate::lexer::Token;

/// Pipeline switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Stop after the first stage that reports errors
    pub fail_fast: bool,
}

/// Everything one run of the pipeline produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compilation {
    /// Every token the lexer produced
    pub tokens: Vec<Token>,
    /// The (possibly partial) program
    pub root: Root,
    /// The generated (possibly partial) chunk, absent only if fail-fast
    /// skipped code generation
    pub chunk: Option<Chunk>,
    /// Every error reported, in stage order
    pub diagnostics: Vec<Error>,
}

impl Compilation {
    /// Returns true if any stage reported an error.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Runs every stage over `source` with default options.
pub fn compile_source(source: &str) -> Compilation {
    compile_with(source, Options::default())
}

/// Runs every stage over `source`.
///
/// Without `fail_fast` all stages run regardless of earlier errors, so
/// diagnostics from each stage are reported together.
pub fn compile_with(source: &str, options: Options) -> Compilation {
    let mut compilation = Compilation::default();

    let lexed = lexer::lex(source);
    compilation.diagnostics.extend(lexed.errors);
    compilation.tokens = lexed.tokens;
    if options.fail_fast && compilation.has_errors() {
        return compilation;
    }

    let parsed = parser::parse(compilation.tokens.clone());
    compilation.diagnostics.extend(parsed.errors);
    compilation.root = parsed.root;
    if options.fail_fast && compilation.has_errors() {
        return compilation;
    }

    let generated = compiler::generate(&compilation.root);
    compilation.diagnostics.extend(generated.error);
    compilation.chunk = Some(generated.chunk);

    info!(
        tokens = compilation.tokens.len(),
        statements = compilation.root.statements.len(),
        diagnostics = compilation.diagnostics.len(),
        "compiled source"
    );
    compilation
}

/// Reads a whole source file.
pub fn read_source_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|err| Error::io(&err, path.display()))?;
    debug!(path = %path.display(), bytes = text.len(), "read source");
    Ok(text)
}

/// Encodes a chunk as module bytes.
pub fn encode_chunk(chunk: &Chunk) -> Result<Vec<u8>> {
    module::encode(&chunk.constants, &chunk.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_source_clean() {
        let compilation = compile_source("def main() -> int { 1 + 2; }\n-3;");
        assert!(!compilation.has_errors());
        assert_eq!(compilation.root.statements.len(), 2);
        assert_eq!(compilation.chunk.unwrap().constants, vec![3.0]);
    }

    #[test]
    fn test_compile_source_collects_all_stages() {
        let compilation = compile_source("x = \"abc;\n1 +;");
        let kinds: Vec<ErrorKind> = compilation.diagnostics.iter().map(Error::kind).collect();
        assert_eq!(kinds[0], ErrorKind::Lexical);
        assert!(kinds[1..].iter().all(|&k| k == ErrorKind::Parse));
        assert!(kinds.len() > 1);
        assert!(compilation.chunk.is_some());
    }

    #[test]
    fn test_fail_fast_stops_after_lexing() {
        let options = Options { fail_fast: true };
        let compilation = compile_with("x = \"abc;", options);
        assert_eq!(compilation.diagnostics.len(), 1);
        assert_eq!(compilation.tokens.len(), 2);
        assert!(compilation.root.statements.is_empty());
        assert!(compilation.chunk.is_none());
    }

    #[test]
    fn test_fail_fast_stops_after_parsing() {
        let options = Options { fail_fast: true };
        let compilation = compile_with("1 +;", options);
        assert!(compilation.has_errors());
        assert!(compilation.chunk.is_none());
    }

    #[test]
    fn test_too_many_constants_is_a_diagnostic() {
        let compilation = compile_source(&"7;".repeat(300));
        assert!(matches!(compilation.diagnostics[..], [Error::Encoding(_)]));

        let chunk = compilation.chunk.expect("partial chunk");
        assert_eq!(chunk.constants.len(), compiler::MAX_CONSTANTS);
        assert_eq!(chunk.code.last(), Some(&(compiler::OpCode::Return as u8)));
    }

    #[test]
    fn test_read_source_text_missing_file() {
        let err = read_source_text("/definitely/not/here.notc").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert_eq!(err.io_cause(), Some(std::io::ErrorKind::NotFound));
        assert!(err.message().contains("here.notc"));
    }

    #[test]
    fn test_encode_chunk() {
        let chunk = compile_source("true;").chunk.unwrap();
        assert_eq!(encode_chunk(&chunk).unwrap(), vec![0xC0, 0xFF, 0xEE, 3, 14]);
    }
}
