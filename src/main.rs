// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! notc - command-line driver for the NotC bytecode compiler
//!
//! Compiles one source file to a module, or starts an interactive
//! inspector when no file is given.

mod cli;
mod config;
mod diagnostics;
mod repl;

use anyhow::{Context, Result};
use clap::Parser;
use notc_compiler::module::decode;
use notc_compiler::{Options, compile_with, encode_chunk, read_source_text};
use owo_colors::OwoColorize;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}: {err:#}", "Error".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` selects debug output.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(cli);

    match &cli.input {
        Some(input) => {
            let succeeded = compile_file(input, cli.output.as_deref(), &config)?;
            Ok(if succeeded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        None => {
            let mut repl = repl::Repl::new(&config).context("failed to start the inspector")?;
            repl.run().context("inspector failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Compile `input` and write its module. Returns false when diagnostics
/// were reported, in which case nothing is written.
fn compile_file(input: &Path, output: Option<&Path>, config: &Config) -> Result<bool> {
    let source = read_source_text(input)?;
    let file = input.display().to_string();

    let compilation = compile_with(
        &source,
        Options {
            fail_fast: config.fail_fast,
        },
    );

    if config.dump_tokens {
        for token in &compilation.tokens {
            println!("{token}");
        }
    }
    if config.dump_ast {
        print!("{}", compilation.root);
    }

    diagnostics::report_all(&file, &compilation.diagnostics);
    if compilation.has_errors() {
        return Ok(false);
    }
    let Some(chunk) = compilation.chunk else {
        return Ok(false);
    };

    let bytes = match encode_chunk(&chunk) {
        Ok(bytes) => bytes,
        Err(err) => {
            diagnostics::report(&file, &err);
            return Ok(false);
        }
    };

    let output = config.output_path(input, output);
    std::fs::write(&output, &bytes)
        .with_context(|| format!("failed to write module {}", output.display()))?;
    info!(path = %output.display(), bytes = bytes.len(), "wrote module");

    if config.disassemble {
        let module = decode(&bytes)?;
        print!("{}", module.disassemble(&output.display().to_string()));
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_compile_file_writes_module() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("calc.notc");
        fs::write(&input, "1 + 2 * 3;\n").unwrap();

        assert!(compile_file(&input, None, &Config::default()).unwrap());

        let bytes = fs::read(dir.path().join("calc.ncb")).unwrap();
        let module = decode(&bytes).unwrap();
        assert_eq!(module.constants, vec![1.0, 2.0, 3.0]);
        assert_eq!(module.code, vec![0, 0, 0, 1, 0, 2, 10, 8, 14]);
    }

    #[test]
    fn test_compile_file_with_errors_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.notc");
        let output = dir.path().join("bad.out");
        fs::write(&input, "x = \"abc;\n").unwrap();

        assert!(!compile_file(&input, Some(&output), &Config::default()).unwrap());
        assert!(!output.exists());
    }

    #[test]
    fn test_compile_file_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = compile_file(&dir.path().join("nope.notc"), None, &Config::default())
            .unwrap_err();
        assert!(format!("{err}").contains("IO Error"));
    }
}
