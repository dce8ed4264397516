// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Abstract Syntax Tree (AST) definitions for NotC.
//!
//! The tree is strict: every child is owned by exactly one parent and
//! nothing is shared. Nodes are never modified after parsing.

mod display;

use crate::lexer::TokenKind;

/// A complete NotC program.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Root {
    /// Top-level statements in source order
    pub statements: Vec<Node>,
    /// Line on which each top-level statement starts
    pub lines: Vec<usize>,
}

/// A statement or expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Bare identifier reference
    Symbol(SymbolExpr),
    /// `true` / `false`
    Boolean(BooleanExpr),
    /// Numeric literal
    Number(NumberExpr),
    /// String literal
    String(StringExpr),
    /// `-x` / `!x`
    Unary(UnaryExpr),
    /// `a + b`, `a == b`, ...
    Binary(BinaryExpr),
    /// `int x = 1;`
    Variable(Variable),
    /// `{ ... }`
    CodeBlock(CodeBlock),
    /// `def f() -> int ...`
    Function(Function),
    /// Placeholder for a node the parser could not build
    Invalid,
}

/// A bare identifier reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolExpr {
    /// The referenced name
    pub name: String,
}

/// A boolean literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanExpr {
    /// The literal value
    pub value: bool,
}

/// A numeric literal, kept at full precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberExpr {
    /// The literal value
    pub value: f64,
}

/// A string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringExpr {
    /// The text between the quotes
    pub value: String,
}

/// A unary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    /// The operator
    pub operator: UnaryOperator,
    /// The operand
    pub operand: Box<Node>,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// -
    Negate,
    /// !
    Not,
}

impl UnaryOperator {
    /// Maps a prefix token kind to its operator.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Minus => Some(UnaryOperator::Negate),
            TokenKind::Bang => Some(UnaryOperator::Not),
            _ => None,
        }
    }

    /// The operator's source text.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::Not => "!",
        }
    }
}

/// A binary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    /// The operator
    pub operator: BinaryOperator,
    /// Left operand, evaluated first
    pub left: Box<Node>,
    /// Right operand
    pub right: Box<Node>,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// +
    Add,
    /// -
    Subtract,
    /// *
    Multiply,
    /// /
    Divide,
    /// ==
    Equal,
}

impl BinaryOperator {
    /// Maps an infix token kind to its operator.
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Minus => Some(BinaryOperator::Subtract),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            TokenKind::EqualEqual => Some(BinaryOperator::Equal),
            _ => None,
        }
    }

    /// The operator's source text.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Equal => "==",
        }
    }
}

/// Declared types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// void
    Void,
    /// int
    Int,
    /// str
    Str,
}

impl Type {
    /// Maps a type-name lexeme to its type.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "void" => Some(Type::Void),
            "int" => Some(Type::Int),
            "str" => Some(Type::Str),
            _ => None,
        }
    }

    /// The type's source name.
    pub fn name(self) -> &'static str {
        match self {
            Type::Void => "void",
            Type::Int => "int",
            Type::Str => "str",
        }
    }
}

/// A variable declaration. Modeled only; it never emits code.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The declared type
    pub declared_type: Type,
    /// The variable name
    pub name: String,
    /// Optional initializer expression
    pub initializer: Option<Box<Node>>,
}

/// A braced statement list. Modeled only; it never emits code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeBlock {
    /// The statements in the block
    pub statements: Vec<Node>,
}

/// A function declaration. Modeled only; it never emits code.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The declared return type
    pub return_type: Type,
    /// The function name
    pub name: String,
    /// The parameters (always empty, parameter lists are not parsed)
    pub parameters: Vec<Variable>,
    /// A single statement or a code block
    pub body: Box<Node>,
}

impl Node {
    /// Creates a symbol reference.
    pub fn symbol(name: impl Into<String>) -> Self {
        Node::Symbol(SymbolExpr { name: name.into() })
    }

    /// Creates a boolean literal.
    pub fn boolean(value: bool) -> Self {
        Node::Boolean(BooleanExpr { value })
    }

    /// Creates a numeric literal.
    pub fn number(value: f64) -> Self {
        Node::Number(NumberExpr { value })
    }

    /// Creates a string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Node::String(StringExpr {
            value: value.into(),
        })
    }

    /// Creates a unary expression.
    pub fn unary(operator: UnaryOperator, operand: Node) -> Self {
        Node::Unary(UnaryExpr {
            operator,
            operand: Box::new(operand),
        })
    }

    /// Creates a binary expression.
    pub fn binary(operator: BinaryOperator, left: Node, right: Node) -> Self {
        Node::Binary(BinaryExpr {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Returns true for the parser's placeholder node.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Node::Invalid)
    }
}
