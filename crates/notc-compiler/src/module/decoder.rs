// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module decoding and disassembly.

use std::fmt;

use tracing::{debug, warn};

use super::{CONSTANT_WIDTH, SENTINEL};
use crate::Error;
use crate::compiler::bytecode::{Instruction, decode_instructions};

/// A module read back from bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedModule {
    /// The constant section, as stored
    pub constants: Vec<f32>,
    /// The code section, verbatim
    pub code: Vec<u8>,
    /// The code section split into instructions
    pub instructions: Vec<Instruction>,
}

impl DecodedModule {
    /// Renders a human-readable listing headed by `name`.
    pub fn disassemble(&self, name: &str) -> String {
        let mut out = format!("== {name} ==\n");
        for instruction in &self.instructions {
            let value = |index: usize| self.constants.get(index).map(f32::to_string);
            out.push_str(&instruction.render(value));
            out.push('\n');
        }
        out
    }

    /// Number of instructions whose opcode byte is not a known opcode.
    pub fn unknown_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|instruction| instruction.opcode.is_err())
            .count()
    }
}

impl fmt::Display for DecodedModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.disassemble("module"))
    }
}

/// Reads module bytes back into constants and instructions.
pub fn decode(bytes: &[u8]) -> Result<DecodedModule, Error> {
    let split = find_sentinel(bytes).ok_or_else(|| {
        Error::Encoding("missing sentinel: no C0 FF EE marker at a 4-byte offset".into())
    })?;

    let constants = bytes[..split]
        .chunks_exact(CONSTANT_WIDTH)
        .map(|word| f32::from_le_bytes([word[0], word[1], word[2], word[3]]))
        .collect::<Vec<_>>();

    let code = bytes[split + SENTINEL.len()..].to_vec();
    let instructions = decode_instructions(&code)?;

    let module = DecodedModule {
        constants,
        code,
        instructions,
    };

    let unknown = module.unknown_count();
    if unknown > 0 {
        warn!(unknown, "module contains unknown opcodes");
    }
    debug!(
        constants = module.constants.len(),
        instructions = module.instructions.len(),
        "decoded module"
    );
    Ok(module)
}

fn find_sentinel(bytes: &[u8]) -> Option<usize> {
    (0..bytes.len())
        .step_by(CONSTANT_WIDTH)
        .find(|&offset| bytes[offset..].starts_with(&SENTINEL))
}
