// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Bytecode definitions.

use std::fmt;

use crate::Error;

/// Number of constants addressable by the one-byte `CONSTANT` operand.
pub const MAX_CONSTANTS: usize = 256;

/// A compiled bytecode chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
    /// Opcodes and their operand bytes
    pub code: Vec<u8>,
    /// The constant pool, at full precision
    pub constants: Vec<f64>,
    /// Source line of every byte in `code`
    pub lines: Vec<usize>,
}

impl Chunk {
    /// Creates a new empty chunk.
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&mut self, byte: u8, line: usize) {
        self.code.push(byte);
        self.lines.push(line);
    }

    /// Appends a zero-operand opcode and returns its offset.
    pub fn emit(&mut self, opcode: OpCode, line: usize) -> usize {
        let offset = self.code.len();
        self.write(opcode as u8, line);
        offset
    }

    /// Adds a constant and returns its index.
    ///
    /// The pool is append-only and never deduplicated.
    pub fn add_constant(&mut self, value: f64) -> Result<u8, Error> {
        let index = u8::try_from(self.constants.len()).map_err(|_| {
            Error::Encoding(format!(
                "too many constants: a chunk holds at most {MAX_CONSTANTS}"
            ))
        })?;
        self.constants.push(value);
        Ok(index)
    }

    /// Adds a constant and emits `CONSTANT <index>`. Returns the offset of
    /// the opcode.
    pub fn emit_constant(&mut self, value: f64, line: usize) -> Result<usize, Error> {
        let index = self.add_constant(value)?;
        let offset = self.emit(OpCode::Constant, line);
        self.write(index, line);
        Ok(offset)
    }

    /// Splits the code into instructions.
    pub fn instructions(&self) -> Result<Vec<Instruction>, Error> {
        decode_instructions(&self.code)
    }

    /// Renders a human-readable listing headed by `name`.
    ///
    /// Each instruction shows its source line, or `|` when it shares the
    /// line of the instruction before it.
    pub fn disassemble(&self, name: &str) -> Result<String, Error> {
        let mut out = format!("== {name} ==\n");
        let mut previous = None;
        for instruction in self.instructions()? {
            let line = self.lines.get(instruction.offset).copied();
            let gutter = match line {
                Some(_) if line == previous => "   |".to_string(),
                Some(line) => format!("{line:4}"),
                None => "   ?".to_string(),
            };
            previous = line;

            let value = |index: usize| self.constants.get(index).map(f64::to_string);
            out.push_str(&format!(
                "{:04} {gutter} {}\n",
                instruction.offset,
                instruction.describe(value)
            ));
        }
        Ok(out)
    }
}

/// Operation codes.
///
/// The discriminants are part of the module file format and must never be
/// renumbered. `CONSTANT_LONG`, `NULL`, `GREATER` and `LESS` are reserved:
/// nothing emits them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// Push a constant; one operand byte (pool index)
    Constant = 0,
    /// Reserved for multi-byte constant indices
    ConstantLong = 1,
    /// Reserved: push null
    Null = 2,
    /// Push true
    True = 3,
    /// Push false
    False = 4,
    /// Equality of the top two values
    Equal = 5,
    /// Reserved: greater than
    Greater = 6,
    /// Reserved: less than
    Less = 7,
    /// Add top two values
    Add = 8,
    /// Subtract
    Subtract = 9,
    /// Multiply
    Multiply = 10,
    /// Divide
    Divide = 11,
    /// Logical NOT
    Not = 12,
    /// Negate (unary minus)
    Negate = 13,
    /// Terminate the stream
    Return = 14,
}

impl OpCode {
    /// Every opcode in ordinal order.
    pub const ALL: [OpCode; 15] = [
        OpCode::Constant,
        OpCode::ConstantLong,
        OpCode::Null,
        OpCode::True,
        OpCode::False,
        OpCode::Equal,
        OpCode::Greater,
        OpCode::Less,
        OpCode::Add,
        OpCode::Subtract,
        OpCode::Multiply,
        OpCode::Divide,
        OpCode::Not,
        OpCode::Negate,
        OpCode::Return,
    ];

    /// The listing name, e.g. `"CONSTANT"`.
    pub fn name(self) -> &'static str {
        match self {
            OpCode::Constant => "CONSTANT",
            OpCode::ConstantLong => "CONSTANT_LONG",
            OpCode::Null => "NULL",
            OpCode::True => "TRUE",
            OpCode::False => "FALSE",
            OpCode::Equal => "EQUAL",
            OpCode::Greater => "GREATER",
            OpCode::Less => "LESS",
            OpCode::Add => "ADD",
            OpCode::Subtract => "SUBTRACT",
            OpCode::Multiply => "MULTIPLY",
            OpCode::Divide => "DIVIDE",
            OpCode::Not => "NOT",
            OpCode::Negate => "NEGATE",
            OpCode::Return => "RETURN",
        }
    }

    /// Number of operand bytes following the opcode.
    pub fn operand_count(self) -> usize {
        match self {
            OpCode::Constant => 1,
            _ => 0,
        }
    }
}

impl TryFrom<u8> for OpCode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        OpCode::ALL.get(byte as usize).copied().ok_or(byte)
    }
}

impl From<OpCode> for u8 {
    fn from(opcode: OpCode) -> Self {
        opcode as u8
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Offset of the opcode byte within the instruction stream
    pub offset: usize,
    /// The opcode, or the raw byte if it is not a known opcode
    pub opcode: Result<OpCode, u8>,
    /// The operand byte, for `CONSTANT`
    pub operand: Option<u8>,
}

impl Instruction {
    /// Formats the instruction as one listing line. `constant` resolves a
    /// pool index to the text shown for its value.
    pub fn render(&self, constant: impl Fn(usize) -> Option<String>) -> String {
        format!("{:04} {}", self.offset, self.describe(constant))
    }

    /// The listing line without its offset column.
    fn describe(&self, constant: impl Fn(usize) -> Option<String>) -> String {
        match (self.opcode, self.operand) {
            (Ok(opcode), Some(index)) => {
                let value = constant(index as usize).unwrap_or_else(|| "?".to_string());
                format!("{:<16} {:4} '{}'", opcode.name(), index, value)
            }
            (Ok(opcode), None) => opcode.name().to_string(),
            (Err(byte), _) => format!("UNKNOWN({byte})"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|_| None))
    }
}

/// Splits a raw instruction stream into instructions.
///
/// Unknown opcode bytes are kept as `Err(byte)` records. A `CONSTANT` at the
/// very end, missing its operand, is an error.
pub fn decode_instructions(code: &[u8]) -> Result<Vec<Instruction>, Error> {
    let mut instructions = Vec::new();
    let mut offset = 0;

    while offset < code.len() {
        let opcode = OpCode::try_from(code[offset]);
        let operand = match opcode {
            Ok(op) if op.operand_count() == 1 => {
                let byte = code.get(offset + 1).copied().ok_or_else(|| {
                    Error::Encoding(format!(
                        "truncated instruction: {op} at offset {offset} is missing its operand"
                    ))
                })?;
                Some(byte)
            }
            _ => None,
        };

        instructions.push(Instruction {
            offset,
            opcode,
            operand,
        });
        offset += 1 + usize::from(operand.is_some());
    }

    Ok(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_ordinals_are_stable() {
        let ordinals: Vec<u8> = OpCode::ALL.iter().map(|&op| op as u8).collect();
        assert_eq!(ordinals, (0..15).collect::<Vec<u8>>());
        assert_eq!(OpCode::Constant as u8, 0);
        assert_eq!(OpCode::ConstantLong as u8, 1);
        assert_eq!(OpCode::Greater as u8, 6);
        assert_eq!(OpCode::Less as u8, 7);
        assert_eq!(OpCode::Return as u8, 14);
    }

    #[test]
    fn test_opcode_try_from() {
        for op in OpCode::ALL {
            assert_eq!(OpCode::try_from(u8::from(op)), Ok(op));
        }
        assert_eq!(OpCode::try_from(15), Err(15));
        assert_eq!(OpCode::try_from(255), Err(255));
    }

    #[test]
    fn test_add_constant_indices() {
        let mut chunk = Chunk::new();
        assert_eq!(chunk.add_constant(1.5), Ok(0));
        assert_eq!(chunk.add_constant(1.5), Ok(1));
        assert_eq!(chunk.constants, vec![1.5, 1.5]);
    }

    #[test]
    fn test_constant_pool_limit() {
        let mut chunk = Chunk::new();
        for i in 0..MAX_CONSTANTS {
            chunk.add_constant(i as f64).unwrap();
        }
        let err = chunk.add_constant(0.0).unwrap_err();
        assert!(matches!(err, Error::Encoding(msg) if msg.contains("too many constants")));
        assert_eq!(chunk.constants.len(), MAX_CONSTANTS);
    }

    #[test]
    fn test_emit_constant() {
        let mut chunk = Chunk::new();
        chunk.emit_constant(2.0, 3).unwrap();
        chunk.emit(OpCode::Negate, 4);
        assert_eq!(chunk.code, vec![0, 0, 13]);
        assert_eq!(chunk.lines, vec![3, 3, 4]);
    }

    #[test]
    fn test_decode_instructions() {
        let code = [0, 0, 0, 1, 8, 99, 14];
        let instructions = decode_instructions(&code).unwrap();
        assert_eq!(instructions.len(), 5);
        assert_eq!(instructions[1].offset, 2);
        assert_eq!(instructions[1].operand, Some(1));
        assert_eq!(instructions[2].opcode, Ok(OpCode::Add));
        assert_eq!(instructions[3].opcode, Err(99));
        assert_eq!(instructions[4].offset, 6);
    }

    #[test]
    fn test_decode_truncated_constant() {
        let err = decode_instructions(&[8, 0]).unwrap_err();
        assert!(matches!(err, Error::Encoding(msg) if msg.contains("offset 1")));
    }

    #[test]
    fn test_disassemble_output() {
        let mut chunk = Chunk::new();
        chunk.emit_constant(1.2, 1).unwrap();
        chunk.emit(OpCode::Add, 1);
        chunk.emit(OpCode::Return, 2);
        let listing = chunk.disassemble("test chunk").unwrap();
        assert_eq!(
            listing,
            "== test chunk ==\n\
             0000    1 CONSTANT            0 '1.2'\n\
             0002    | ADD\n\
             0003    2 RETURN\n"
        );
    }

    #[test]
    fn test_disassemble_without_line_table() {
        let chunk = Chunk {
            code: vec![3, 14],
            ..Chunk::default()
        };
        let listing = chunk.disassemble("bare").unwrap();
        assert_eq!(listing, "== bare ==\n0000    ? TRUE\n0001    ? RETURN\n");
    }
}
