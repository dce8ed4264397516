// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Lexical analysis (tokenization) for NotC source code.
//!
//! The lexer is line-oriented: every line is scanned independently and
//! the results are concatenated. Line comments (`//`) are stripped before
//! a line is scanned, and string literals cannot span lines.
//!
//! ## Structure
//!
//! - `scanner.rs` - `Scanner` (one line) and the `lex` entry point
//! - `token.rs` - `Token` and `TokenKind` definitions
//!
//! ## Usage
//!
//! ```rust
//! use notc_compiler::lexer::{lex, TokenKind};
//!
//! let lexed = lex("1 + 2;");
//! assert!(lexed.errors.is_empty());
//! assert_eq!(lexed.tokens[1].kind, TokenKind::Plus);
//! ```

mod scanner;
mod token;

pub use scanner::{Lexed, Scanner, lex};
pub use token::{Token, TokenKind};
