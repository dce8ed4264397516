// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module encoding.

use tracing::debug;

use super::{CONSTANT_WIDTH, SENTINEL};
use crate::Error;

/// Serializes a constant pool and instruction stream into module bytes.
///
/// Constants are narrowed to binary32. A constant whose encoding begins with
/// the sentinel would end the constant section early when read back, so it is
/// rejected.
pub fn encode(constants: &[f64], code: &[u8]) -> Result<Vec<u8>, Error> {
    let capacity = constants.len() * CONSTANT_WIDTH + SENTINEL.len() + code.len();
    let mut bytes = Vec::with_capacity(capacity);

    for (index, &value) in constants.iter().enumerate() {
        let word = (value as f32).to_le_bytes();
        if word[..SENTINEL.len()] == SENTINEL {
            return Err(Error::Encoding(format!(
                "constant {index} ({value}) encodes as the section sentinel"
            )));
        }
        bytes.extend_from_slice(&word);
    }

    bytes.extend_from_slice(&SENTINEL);
    bytes.extend_from_slice(code);

    debug!(
        constants = constants.len(),
        code_bytes = code.len(),
        module_bytes = bytes.len(),
        "encoded module"
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_layout() {
        let bytes = encode(&[1.0, 2.0], &[0, 0, 0, 1, 8, 14]).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x00, 0x00, 0x80, 0x3F, // 1.0
                0x00, 0x00, 0x00, 0x40, // 2.0
                0xC0, 0xFF, 0xEE, //
                0, 0, 0, 1, 8, 14,
            ]
        );
    }

    #[test]
    fn test_encode_empty_pool() {
        let bytes = encode(&[], &[3, 4, 5, 14]).unwrap();
        assert_eq!(bytes, vec![0xC0, 0xFF, 0xEE, 3, 4, 5, 14]);
    }

    #[test]
    fn test_encode_narrows_to_binary32() {
        let bytes = encode(&[0.1], &[]).unwrap();
        assert_eq!(&bytes[..4], &0.1f32.to_le_bytes());
    }

    #[test]
    fn test_encode_rejects_sentinel_collision() {
        let colliding = f32::from_bits(0x42EE_FFC0) as f64;
        let err = encode(&[1.0, colliding], &[14]).unwrap_err();
        assert!(matches!(err, Error::Encoding(msg) if msg.starts_with("constant 1")));
    }
}
