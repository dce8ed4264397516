// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Parser for NotC source code.
//!
//! Transforms a token sequence into an Abstract Syntax Tree (AST).
//!
//! ## Precedence Table (lowest to highest)
//!
//! | Precedence | Operators | Method |
//! |------------|-----------|--------|
//! | 1 | `==` | `parse_comparison` |
//! | 2 | `+` `-` | `parse_additive` |
//! | 3 | `*` `/` | `parse_multiplicative` |
//! | 4 | `-` `!` (prefix) | `parse_unary` |
//! | 5 | literals, names, `( )` | `parse_primary` |
//!
//! ## Grammar
//!
//! ```text
//! Statement      := FunctionDecl | VariableDecl | CodeBlock | ExpressionStmt
//! FunctionDecl   := "def" Identifier "(" ")" "->" TypeName Statement
//! VariableDecl   := TypeName Identifier ( "=" Expression )? ";"
//! CodeBlock      := "{" Statement* "}"
//! ExpressionStmt := Expression ";"
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use notc_compiler::lexer::lex;
//! use notc_compiler::parser::parse;
//!
//! let parsed = parse(lex("def main() -> int 1;").tokens);
//! assert!(parsed.errors.is_empty());
//! ```

#[allow(clippy::module_inception)]
mod parser;

pub use parser::{MAX_NESTING_DEPTH, Parsed, Parser, parse};
