// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! CLI argument parsing for notc.

use clap::Parser;
use std::path::PathBuf;

/// notc - compile NotC source files to bytecode modules
#[derive(Parser, Debug, Default)]
#[command(name = "notc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source file to compile; starts the interactive inspector when omitted
    pub input: Option<PathBuf>,

    /// Module path (default: INPUT with the configured extension)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the disassembly of the written module
    #[arg(short, long)]
    pub disassemble: bool,

    /// Print the token list
    #[arg(long)]
    pub dump_tokens: bool,

    /// Print the AST
    #[arg(long)]
    pub dump_ast: bool,

    /// Stop after the first stage that reports errors
    #[arg(long)]
    pub fail_fast: bool,

    /// Configuration file (default: ./notc.toml if present)
    #[arg(short, long, value_name = "PATH", env = "NOTC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "notc",
            "main.notc",
            "-o",
            "out.ncb",
            "-d",
            "--dump-ast",
            "--fail-fast",
        ]);
        assert_eq!(cli.input, Some(PathBuf::from("main.notc")));
        assert_eq!(cli.output, Some(PathBuf::from("out.ncb")));
        assert!(cli.disassemble);
        assert!(cli.dump_ast);
        assert!(!cli.dump_tokens);
        assert!(cli.fail_fast);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_no_input_means_inspector() {
        let cli = Cli::parse_from(["notc", "-v"]);
        assert!(cli.input.is_none());
        assert!(cli.verbose);
    }
}
