// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Token definitions for the NotC lexer.

use std::fmt;

/// A token produced by the lexer.
///
/// Punctuation tokens carry their text in `lexeme` too, so the parser can
/// compare any token by text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// 1-based line number
    pub line: usize,
    /// 1-based column of the first character
    pub column: usize,
    /// The raw text (for strings, the text between the quotes)
    pub lexeme: String,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, line: usize, column: usize, lexeme: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            column,
            lexeme: lexeme.into(),
        }
    }

    /// Returns true if this token's text equals `text`.
    pub fn is(&self, text: &str) -> bool {
        self.lexeme == text
    }

    /// Number of source characters the token spans. String lexemes omit
    /// their quotes, so those add two.
    pub fn width(&self) -> usize {
        let quotes = if self.kind == TokenKind::String { 2 } else { 0 };
        self.lexeme.chars().count() + quotes
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Line {}:{} \"{}\">", self.line, self.column, self.lexeme)
    }
}

/// The different kinds of tokens in NotC.
///
/// Keywords (`def`, `true`, `false`, type names) are plain identifiers;
/// the parser recognizes them by text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier or keyword
    Identifier,
    /// Numeric literal (integer or decimal)
    Number,
    /// String literal
    String,
    /// (
    LParen,
    /// )
    RParen,
    /// {
    LBrace,
    /// }
    RBrace,
    /// ->
    Pointer,
    /// ;
    Semicolon,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// !
    Bang,
    /// =
    Equal,
    /// ==
    EqualEqual,
}

impl TokenKind {
    /// Fixed text for punctuation kinds, a description for the others.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Pointer => "->",
            TokenKind::Semicolon => ";",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Bang => "!",
            TokenKind::Equal => "=",
            TokenKind::EqualEqual => "==",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
