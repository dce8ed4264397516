// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The main parser implementation.

use tracing::debug;

use crate::Error;
use crate::ast::*;
use crate::lexer::{Token, TokenKind};

/// Deepest nesting of groups, code blocks and function bodies accepted.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The AST of a whole token sequence plus every parse error found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    /// The (possibly partial) program
    pub root: Root,
    /// Parse errors in the order they were reported
    pub errors: Vec<Error>,
}

impl Parsed {
    /// Returns true if any parse error was reported.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Parses a complete token sequence.
pub fn parse(tokens: Vec<Token>) -> Parsed {
    Parser::new(tokens).parse_program()
}

/// A recursive descent parser for NotC.
///
/// Errors never stop the parser. A token of the wrong kind is reported and
/// then consumed as if it were the expected one.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    errors: Vec<Error>,
}

impl Parser {
    /// Creates a new parser over the given tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            errors: Vec::new(),
        }
    }

    /// Parses statements until the tokens are exhausted.
    pub fn parse_program(mut self) -> Parsed {
        let mut statements = Vec::new();
        let mut lines = Vec::new();

        while let Some(token) = self.peek() {
            lines.push(token.line);
            statements.push(self.parse_statement());
        }

        debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        Parsed {
            root: Root { statements, lines },
            errors: self.errors,
        }
    }

    /// Parses a single statement.
    pub fn parse_statement(&mut self) -> Node {
        if self.check_text("def") {
            return self.parse_function_declaration();
        }
        if self.check(TokenKind::LBrace) {
            return self.parse_code_block();
        }
        if self.is_variable_declaration() {
            return self.parse_variable_declaration();
        }
        self.parse_expression_statement()
    }

    fn parse_function_declaration(&mut self) -> Node {
        self.advance(); // consume 'def'

        let name = self.expect_identifier();
        self.expect(TokenKind::LParen);
        self.expect(TokenKind::RParen);
        self.expect(TokenKind::Pointer);
        let return_type = self.parse_type_name();

        let body = if self.is_at_end() {
            self.error_at_end("function body");
            Node::Invalid
        } else if self.too_deep() {
            Node::Invalid
        } else {
            self.nested(Self::parse_statement)
        };

        Node::Function(Function {
            return_type,
            name,
            parameters: Vec::new(),
            body: Box::new(body),
        })
    }

    fn parse_code_block(&mut self) -> Node {
        if self.too_deep() {
            self.skip_group(TokenKind::LBrace, TokenKind::RBrace);
            return Node::Invalid;
        }
        self.advance(); // consume '{'

        let statements = self.nested(|parser| {
            let mut statements = Vec::new();
            while !parser.check(TokenKind::RBrace) && !parser.is_at_end() {
                statements.push(parser.parse_statement());
            }
            statements
        });

        self.expect(TokenKind::RBrace);
        Node::CodeBlock(CodeBlock { statements })
    }

    /// A type name followed by an identifier starts a declaration.
    fn is_variable_declaration(&self) -> bool {
        let is_type = self
            .peek()
            .is_some_and(|t| t.kind == TokenKind::Identifier && Type::from_name(&t.lexeme).is_some());
        let names_variable = self
            .tokens
            .get(self.pos + 1)
            .is_some_and(|t| t.kind == TokenKind::Identifier);
        is_type && names_variable
    }

    fn parse_variable_declaration(&mut self) -> Node {
        let declared_type = self.parse_type_name();
        let name = self.expect_identifier();

        let initializer = if self.check(TokenKind::Equal) {
            self.advance();
            Some(Box::new(self.parse_expression()))
        } else {
            None
        };

        self.expect(TokenKind::Semicolon);
        Node::Variable(Variable {
            declared_type,
            name,
            initializer,
        })
    }

    fn parse_expression_statement(&mut self) -> Node {
        let expression = self.parse_expression();
        self.expect(TokenKind::Semicolon);
        expression
    }

    /// Parses an expression.
    pub fn parse_expression(&mut self) -> Node {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Node {
        let mut left = self.parse_additive();

        while let Some(operator) = self.match_binary(&[TokenKind::EqualEqual]) {
            let right = self.parse_additive();
            left = Node::binary(operator, left, right);
        }

        left
    }

    fn parse_additive(&mut self) -> Node {
        let mut left = self.parse_multiplicative();

        while let Some(operator) = self.match_binary(&[TokenKind::Plus, TokenKind::Minus]) {
            let right = self.parse_multiplicative();
            left = Node::binary(operator, left, right);
        }

        left
    }

    fn parse_multiplicative(&mut self) -> Node {
        let mut left = self.parse_unary();

        while let Some(operator) = self.match_binary(&[TokenKind::Star, TokenKind::Slash]) {
            let right = self.parse_unary();
            left = Node::binary(operator, left, right);
        }

        left
    }

    fn parse_unary(&mut self) -> Node {
        let operator = self.peek().and_then(|t| UnaryOperator::from_token(t.kind));

        if let Some(operator) = operator {
            self.advance();
            let operand = self.parse_primary();
            return Node::unary(operator, operand);
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Node {
        let Some(token) = self.peek() else {
            self.error_at_end("expression");
            return Node::Invalid;
        };

        match token.kind {
            TokenKind::Number => {
                let token = self.advance();
                match token.lexeme.parse::<f64>() {
                    Ok(value) => Node::number(value),
                    Err(err) => {
                        self.error_at(&token, format!("invalid number '{}': {err}", token.lexeme));
                        Node::Invalid
                    }
                }
            }
            TokenKind::String => Node::string(self.advance().lexeme),
            TokenKind::Identifier => {
                let token = self.advance();
                match token.lexeme.as_str() {
                    "true" => Node::boolean(true),
                    "false" => Node::boolean(false),
                    _ => Node::symbol(token.lexeme),
                }
            }
            TokenKind::LParen => {
                if self.too_deep() {
                    self.skip_group(TokenKind::LParen, TokenKind::RParen);
                    return Node::Invalid;
                }
                self.advance();
                let expression = self.nested(Self::parse_expression);
                self.expect(TokenKind::RParen);
                expression
            }
            _ => {
                // Left in place; the enclosing `expect` consumes it.
                let token = token.clone();
                self.error_at(&token, format!("expected expression, found '{}'", token.lexeme));
                Node::Invalid
            }
        }
    }

    fn parse_type_name(&mut self) -> Type {
        let Some(token) = self.peek() else {
            self.error_at_end("type name");
            return Type::Void;
        };

        let token = token.clone();
        self.advance();
        match Type::from_name(&token.lexeme) {
            Some(ty) => ty,
            None => {
                self.error_at(&token, format!("unknown type name '{}'", token.lexeme));
                Type::Void
            }
        }
    }

    // Helper methods

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Consumes the current token. Must not be called at end of input.
    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn check_text(&self, text: &str) -> bool {
        self.peek()
            .is_some_and(|t| t.kind == TokenKind::Identifier && t.is(text))
    }

    fn match_binary(&mut self, kinds: &[TokenKind]) -> Option<BinaryOperator> {
        let kind = self.peek()?.kind;
        if !kinds.contains(&kind) {
            return None;
        }
        self.advance();
        BinaryOperator::from_token(kind)
    }

    fn expect(&mut self, kind: TokenKind) {
        let Some(token) = self.peek() else {
            self.error_at_end(&format!("'{kind}'"));
            return;
        };

        if token.kind != kind {
            let token = token.clone();
            self.error_at(&token, format!("expected '{kind}', found '{}'", token.lexeme));
        }
        self.advance();
    }

    fn expect_identifier(&mut self) -> String {
        let Some(token) = self.peek() else {
            self.error_at_end("identifier");
            return String::new();
        };

        let token = token.clone();
        if token.kind != TokenKind::Identifier {
            self.error_at(&token, format!("expected identifier, found '{}'", token.lexeme));
        }
        self.advance();
        token.lexeme
    }

    fn error_at(&mut self, token: &Token, message: String) {
        self.report(token.line, token.column, message);
    }

    fn error_at_end(&mut self, expected: &str) {
        let (line, column) = match self.tokens.last() {
            Some(last) => (last.line, last.column + last.width()),
            None => (1, 1),
        };
        self.report(
            line,
            column,
            format!("unexpected end of input, expected {expected}"),
        );
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> T) -> T {
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Reports the current token if it would open one level too many.
    fn too_deep(&mut self) -> bool {
        if self.depth < MAX_NESTING_DEPTH {
            return false;
        }
        if let Some(token) = self.peek().cloned() {
            self.error_at(
                &token,
                format!("nesting deeper than {MAX_NESTING_DEPTH} levels"),
            );
        }
        true
    }

    /// Consumes a bracketed group up to and including its matching close
    /// without parsing it. The current token must be `open`.
    fn skip_group(&mut self, open: TokenKind, close: TokenKind) {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            let kind = token.kind;
            self.advance();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
        }
    }

    fn report(&mut self, line: usize, column: usize, message: String) {
        // One report per position.
        if self.errors.last().and_then(Error::position) == Some((line, column)) {
            return;
        }
        self.errors.push(Error::parse(line, column, message));
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}
