// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types shared by every stage of the pipeline.
//!
//! Lexical and parse errors never abort their stage. They are collected
//! next to the partial result (see [`crate::lexer::Lexed`] and
//! [`crate::parser::Parsed`]) so one run can surface several of them.

use std::fmt::Display;
use std::io;

use thiserror::Error;

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling, encoding or decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Unterminated string literal or unrecognized character
    #[error("{line}:{column}: Lexical Error: {message}")]
    Lexical {
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
        /// What went wrong
        message: String,
    },

    /// Unexpected token, unknown type name or malformed expression
    #[error("{line}:{column}: Parse Error: {message}")]
    Parse {
        /// 1-based line
        line: usize,
        /// 1-based column
        column: usize,
        /// What went wrong, including the offending lexeme
        message: String,
    },

    /// Instruction or constant data that cannot be written to or read from
    /// a module file
    #[error("Encoding Error: {0}")]
    Encoding(String),

    /// Reading the source file failed
    #[error("IO Error: {message}")]
    Io {
        /// Category of the underlying I/O failure
        cause: io::ErrorKind,
        /// What went wrong, including the path when known
        message: String,
    },
}

/// The broad category of an [`Error`], used when printing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`Error::Lexical`]
    Lexical,
    /// See [`Error::Parse`]
    Parse,
    /// See [`Error::Encoding`]
    Encoding,
    /// See [`Error::Io`]
    Io,
}

impl ErrorKind {
    /// Human-readable label, e.g. `"Parse Error"`.
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Lexical => "Lexical Error",
            ErrorKind::Parse => "Parse Error",
            ErrorKind::Encoding => "Encoding Error",
            ErrorKind::Io => "IO Error",
        }
    }
}

impl Error {
    /// Creates a lexical error at the given position.
    pub fn lexical(line: usize, column: usize, message: impl Into<String>) -> Self {
        Error::Lexical {
            line,
            column,
            message: message.into(),
        }
    }

    /// Creates a parse error at the given position.
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// Wraps an I/O failure, prefixing its message with `context`.
    pub fn io(err: &io::Error, context: impl Display) -> Self {
        Error::Io {
            cause: err.kind(),
            message: format!("{context}: {err}"),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Lexical { .. } => ErrorKind::Lexical,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::Encoding(_) => ErrorKind::Encoding,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    /// Returns `(line, column)` for errors that point into the source.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Lexical { line, column, .. } | Error::Parse { line, column, .. } => {
                Some((*line, *column))
            }
            Error::Encoding(_) | Error::Io { .. } => None,
        }
    }

    /// Returns the message without position or kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Error::Lexical { message, .. } | Error::Parse { message, .. } => message,
            Error::Encoding(message) | Error::Io { message, .. } => message,
        }
    }

    /// Returns the I/O failure category for [`Error::Io`].
    pub fn io_cause(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Io { cause, .. } => Some(*cause),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io {
            cause: err.kind(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position_and_kind() {
        let err = Error::parse(3, 7, "expected ';', found ')'");
        assert_eq!(err.to_string(), "3:7: Parse Error: expected ';', found ')'");
    }

    #[test]
    fn test_kind_and_position() {
        let err = Error::lexical(1, 5, "unknown character '@'");
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.position(), Some((1, 5)));
        assert_eq!(err.message(), "unknown character '@'");

        let err = Error::Encoding("missing sentinel".into());
        assert_eq!(err.kind().label(), "Encoding Error");
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_from_io_error() {
        let io = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err: Error = io.into();
        assert_eq!(err.io_cause(), Some(io::ErrorKind::NotFound));
        assert_eq!(err.message(), "no such file");
    }

    #[test]
    fn test_io_with_context() {
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io(&io, "main.notc");
        assert_eq!(err.to_string(), "IO Error: main.notc: denied");
        assert_eq!(err.io_cause(), Some(io::ErrorKind::PermissionDenied));
        assert_eq!(Error::Encoding("x".into()).io_cause(), None);
    }
}
