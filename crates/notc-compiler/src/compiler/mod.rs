// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Bytecode compiler for NotC.
//!
//! Transforms the AST into a flat stack-machine instruction stream.
//!
//! # Module Structure
//!
//! - `bytecode`: Opcodes, chunks and instruction decoding
//! - `codegen`: Code generation from AST

pub mod bytecode;
pub mod codegen;

pub use bytecode::{Chunk, Instruction, MAX_CONSTANTS, OpCode};
pub use codegen::{Compiler, Generated, generate};
