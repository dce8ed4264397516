// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The scanner that produces tokens from source text.

use tracing::debug;

use super::{Token, TokenKind};
use crate::Error;

/// Tokens of a whole source text plus every lexical error found on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexed {
    /// Tokens in source order
    pub tokens: Vec<Token>,
    /// Lexical errors in source order
    pub errors: Vec<Error>,
}

impl Lexed {
    /// Returns true if any lexical error was reported.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lexes a whole source text.
///
/// The text is split on `\n` and every line is scanned on its own; no
/// token spans two lines.
pub fn lex(source: &str) -> Lexed {
    let mut lexed = Lexed::default();

    for (index, text) in source.split('\n').enumerate() {
        let mut scanner = Scanner::new(text, index + 1);
        lexed.tokens.extend(scanner.by_ref());
        lexed.errors.extend(scanner.into_errors());
    }

    debug!(
        tokens = lexed.tokens.len(),
        errors = lexed.errors.len(),
        "lexed source"
    );
    lexed
}

/// A scanner over a single source line.
///
/// The cursor lives in the scanner itself; a new scanner is created for
/// every line.
pub struct Scanner {
    chars: Vec<char>,
    idx: usize,
    line: usize,
    errors: Vec<Error>,
}

impl Scanner {
    /// Creates a scanner for one line of text. Everything from the first
    /// `//` onward is dropped before scanning.
    pub fn new(text: &str, line: usize) -> Self {
        let code = match text.find("//") {
            Some(pos) => &text[..pos],
            None => text,
        };
        Self {
            chars: code.chars().collect(),
            idx: 0,
            line,
            errors: Vec::new(),
        }
    }

    /// Returns the next token on this line, or `None` at end of line.
    ///
    /// Lexical errors are recorded and scanning continues after them.
    pub fn next_token(&mut self) -> Option<Token> {
        loop {
            self.skip_whitespace();

            let start = self.idx;
            let column = start + 1;
            let ch = self.advance()?;

            let kind = match ch {
                // Single-character tokens
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                ';' => TokenKind::Semicolon,
                '+' => TokenKind::Plus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '!' => TokenKind::Bang,

                // Possibly two characters
                '-' => self.scan_minus(),
                '=' => self.scan_equal(),

                '"' => match self.scan_string(column) {
                    Some(token) => return Some(token),
                    None => continue,
                },

                _ if ch.is_ascii_digit() => self.scan_number(),
                _ if is_id_start(ch) => self.scan_identifier(),

                _ => {
                    self.errors.push(Error::lexical(
                        self.line,
                        column,
                        format!("unknown character '{ch}'"),
                    ));
                    continue;
                }
            };

            let lexeme: String = self.chars[start..self.idx].iter().collect();
            return Some(Token::new(kind, self.line, column, lexeme));
        }
    }

    /// Consumes the scanner, returning the errors it recorded.
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.idx).copied()?;
        self.idx += 1;
        Some(ch)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.idx).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.idx + 1).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.idx += 1;
        }
    }

    fn scan_minus(&mut self) -> TokenKind {
        if self.peek() == Some('>') {
            self.advance();
            TokenKind::Pointer
        } else {
            TokenKind::Minus
        }
    }

    fn scan_equal(&mut self) -> TokenKind {
        if self.peek() == Some('=') {
            self.advance();
            TokenKind::EqualEqual
        } else {
            TokenKind::Equal
        }
    }

    /// Scans a string literal whose opening quote is already consumed.
    fn scan_string(&mut self, column: usize) -> Option<Token> {
        let content_start = self.idx;

        match self.chars[content_start..].iter().position(|&c| c == '"') {
            Some(len) => {
                let value: String = self.chars[content_start..content_start + len]
                    .iter()
                    .collect();
                // skip the content and the closing quote
                self.idx = content_start + len + 1;
                Some(Token::new(TokenKind::String, self.line, column, value))
            }
            None => {
                self.errors.push(Error::lexical(
                    self.line,
                    column,
                    "expected a '\"' before end of line",
                ));
                self.idx = self.chars.len();
                None
            }
        }
    }

    /// Scans the rest of a number whose first digit is already consumed.
    fn scan_number(&mut self) -> TokenKind {
        self.skip_digits();

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // consume '.'
            self.skip_digits();
        }

        TokenKind::Number
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.idx += 1;
        }
    }

    fn scan_identifier(&mut self) -> TokenKind {
        while self.peek().is_some_and(is_id_continue) {
            self.idx += 1;
        }
        TokenKind::Identifier
    }
}

/// Checks if a character can start an identifier.
fn is_id_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

/// Checks if a character can continue an identifier.
fn is_id_continue(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

impl Iterator for Scanner {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        assert_eq!(
            kinds("( ) { } ; + * / !"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Semicolon,
                TokenKind::Plus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Bang,
            ]
        );
    }

    #[test]
    fn test_arithmetic_statement() {
        let lexed = lex("1 + 2 * 3;");
        assert!(!lexed.has_errors());
        let pairs: Vec<(TokenKind, &str)> = lexed
            .tokens
            .iter()
            .map(|t| (t.kind, t.lexeme.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (TokenKind::Number, "1"),
                (TokenKind::Plus, "+"),
                (TokenKind::Number, "2"),
                (TokenKind::Star, "*"),
                (TokenKind::Number, "3"),
                (TokenKind::Semicolon, ";"),
            ]
        );
    }

    #[test]
    fn test_two_character_tokens() {
        assert_eq!(
            kinds("-> - == = -1"),
            vec![
                TokenKind::Pointer,
                TokenKind::Minus,
                TokenKind::EqualEqual,
                TokenKind::Equal,
                TokenKind::Minus,
                TokenKind::Number,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        let lexed = lex("42 3.14 7.");
        let lexemes: Vec<&str> = lexed.tokens.iter().map(|t| t.lexeme.as_str()).collect();
        // "7." keeps the dot out of the number; the dot itself is unknown
        assert_eq!(lexemes, vec!["42", "3.14", "7"]);
        assert_eq!(lexed.errors.len(), 1);
    }

    #[test]
    fn test_identifiers_are_not_classified() {
        let lexed = lex("def _main2 true int");
        assert!(lexed.tokens.iter().all(|t| t.kind == TokenKind::Identifier));
        assert_eq!(lexed.tokens[1].lexeme, "_main2");
    }

    #[test]
    fn test_strings() {
        let lexed = lex(r#""hello world" "x""#);
        assert_eq!(lexed.tokens.len(), 2);
        assert_eq!(lexed.tokens[0].kind, TokenKind::String);
        assert_eq!(lexed.tokens[0].lexeme, "hello world");
        assert_eq!(lexed.tokens[0].column, 1);
        assert_eq!(lexed.tokens[1].lexeme, "x");
        assert_eq!(lexed.tokens[1].column, 15);
    }

    #[test]
    fn test_unterminated_string_recovers() {
        let lexed = lex("x = \"abc;\ny;");
        assert_eq!(lexed.errors.len(), 1);
        assert_eq!(lexed.errors[0].position(), Some((1, 5)));
        assert_eq!(
            kinds("x = \"abc;\ny;"),
            vec![
                TokenKind::Identifier,
                TokenKind::Equal,
                TokenKind::Identifier,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_unknown_character_is_skipped() {
        let lexed = lex("1 @ 2");
        assert_eq!(lexed.tokens.len(), 2);
        assert_eq!(lexed.errors.len(), 1);
        assert!(lexed.errors[0].message().contains('@'));
        assert_eq!(lexed.errors[0].position(), Some((1, 3)));
    }

    #[test]
    fn test_line_comments() {
        let lexed = lex("42 // this is a comment\n43 // 44");
        let lexemes: Vec<&str> = lexed.tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["42", "43"]);
    }

    #[test]
    fn test_division_vs_comment() {
        assert_eq!(
            kinds("6 / 2"),
            vec![TokenKind::Number, TokenKind::Slash, TokenKind::Number]
        );
    }

    #[test]
    fn test_positions() {
        let lexed = lex("def f()\n  -> int 1;");
        let positions: Vec<(usize, usize)> =
            lexed.tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(
            positions,
            vec![(1, 1), (1, 5), (1, 6), (1, 7), (2, 3), (2, 6), (2, 10), (2, 11)]
        );
    }

    #[test]
    fn test_carriage_return_is_whitespace() {
        assert_eq!(
            kinds("1;\r\n2;\r\n"),
            vec![
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Number,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn test_empty_source() {
        let lexed = lex("");
        assert!(lexed.tokens.is_empty());
        assert!(!lexed.has_errors());
    }
}
