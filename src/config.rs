// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Configuration management for notc.
//!
//! Settings come from a TOML file and are then overridden by command-line
//! flags. Flags can only switch an option on.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::Cli;

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "notc.toml";

/// Configuration for notc.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Extension given to module files when no output path is set
    pub output_extension: String,

    /// Print the disassembly of each written module
    pub disassemble: bool,

    /// Print the token list
    pub dump_tokens: bool,

    /// Print the AST
    pub dump_ast: bool,

    /// Stop after the first stage that reports errors
    pub fail_fast: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_extension: "ncb".to_string(),
            disassemble: false,
            dump_tokens: false,
            dump_ast: false,
            fail_fast: false,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise `./notc.toml` is used when
    /// present, and the defaults when it is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Apply command-line flags on top of the file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        self.disassemble |= cli.disassemble;
        self.dump_tokens |= cli.dump_tokens;
        self.dump_ast |= cli.dump_ast;
        self.fail_fast |= cli.fail_fast;
    }

    /// Where the module for `input` is written.
    pub fn output_path(&self, input: &Path, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => input.with_extension(&self.output_extension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output_extension, "ncb");
        assert!(!config.disassemble);
        assert!(!config.fail_fast);
    }

    #[test]
    fn test_from_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notc.toml");
        std::fs::write(&path, "dump_ast = true\noutput_extension = \"bin\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.dump_ast);
        assert!(!config.dump_tokens);
        assert_eq!(config.output_extension, "bin");
    }

    #[test]
    fn test_from_file_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notc.toml");
        std::fs::write(&path, "dissasemble = true\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("invalid config file"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_cli_flags_override() {
        let mut config = Config {
            dump_tokens: true,
            ..Config::default()
        };
        let cli = Cli {
            disassemble: true,
            ..Cli::default()
        };
        config.apply_cli(&cli);
        assert!(config.disassemble);
        assert!(config.dump_tokens);
        assert!(!config.dump_ast);
    }

    #[test]
    fn test_output_path() {
        let config = Config::default();
        let input = Path::new("src/main.notc");
        assert_eq!(config.output_path(input, None), PathBuf::from("src/main.ncb"));
        assert_eq!(
            config.output_path(input, Some(Path::new("out/m.bin"))),
            PathBuf::from("out/m.bin")
        );
    }
}
