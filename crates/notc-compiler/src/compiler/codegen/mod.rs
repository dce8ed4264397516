// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Code generation from AST to bytecode.
//!
//! This module contains the `Compiler` which folds a parsed NotC tree into a
//! single [`Chunk`]: one constant pool and one instruction stream for the
//! whole program.


use tracing::debug;

use crate::Error;
use crate::ast::*;
use crate::compiler::bytecode::{Chunk, OpCode};

/// The chunk for a whole program plus the error that cut it short, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generated {
    /// The (possibly partial) chunk, always ending in `RETURN`
    pub chunk: Chunk,
    /// The first code generation error
    pub error: Option<Error>,
}

impl Generated {
    /// Returns the chunk if generation finished without error.
    pub fn into_result(self) -> Result<Chunk, Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.chunk),
        }
    }
}

/// Compiles AST to bytecode.
#[derive(Debug)]
pub struct Compiler {
    /// The chunk being generated
    pub chunk: Chunk,
    line: usize,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    /// Creates a new compiler.
    pub fn new() -> Self {
        Self {
            chunk: Chunk::new(),
            line: 1,
        }
    }

    /// Compiles a program, ending the stream with `RETURN`.
    ///
    /// Generation stops at the first error. The code emitted up to that
    /// point is still returned, terminated like a complete program.
    pub fn compile(&mut self, root: &Root) -> Generated {
        self.chunk = Chunk::new();
        self.line = 1;

        let mut error = None;
        for (index, statement) in root.statements.iter().enumerate() {
            if let Some(&line) = root.lines.get(index) {
                self.line = line;
            }
            if let Err(err) = self.compile_node(statement) {
                error = Some(err);
                break;
            }
        }

        self.emit(OpCode::Return);

        debug!(
            code_bytes = self.chunk.code.len(),
            constants = self.chunk.constants.len(),
            failed = error.is_some(),
            "generated chunk"
        );

        Generated {
            chunk: std::mem::take(&mut self.chunk),
            error,
        }
    }

    fn compile_node(&mut self, node: &Node) -> Result<(), Error> {
        match node {
            Node::Number(num) => {
                self.chunk.emit_constant(num.value, self.line)?;
            }
            Node::Boolean(b) => {
                self.emit(if b.value { OpCode::True } else { OpCode::False });
            }
            Node::Unary(un) => self.compile_unary(un)?,
            Node::Binary(bin) => self.compile_binary(bin)?,
            // No symbol table, string pool or call frames yet
            Node::Symbol(_)
            | Node::String(_)
            | Node::Variable(_)
            | Node::CodeBlock(_)
            | Node::Function(_)
            | Node::Invalid => {}
        }
        Ok(())
    }

    fn compile_unary(&mut self, un: &UnaryExpr) -> Result<(), Error> {
        self.compile_node(&un.operand)?;
        self.emit(match un.operator {
            UnaryOperator::Negate => OpCode::Negate,
            UnaryOperator::Not => OpCode::Not,
        });
        Ok(())
    }

    fn compile_binary(&mut self, bin: &BinaryExpr) -> Result<(), Error> {
        self.compile_node(&bin.left)?;
        self.compile_node(&bin.right)?;
        self.emit(match bin.operator {
            BinaryOperator::Add => OpCode::Add,
            BinaryOperator::Subtract => OpCode::Subtract,
            BinaryOperator::Multiply => OpCode::Multiply,
            BinaryOperator::Divide => OpCode::Divide,
            BinaryOperator::Equal => OpCode::Equal,
        });
        Ok(())
    }

    fn emit(&mut self, opcode: OpCode) -> usize {
        self.chunk.emit(opcode, self.line)
    }
}

/// Compiles a program with a fresh [`Compiler`].
pub fn generate(root: &Root) -> Generated {
    Compiler::new().compile(root)
}
