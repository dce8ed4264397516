// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The binary module format.
//!
//! A module has no header. It is laid out as:
//!
//! ```text
//! constant section   4 bytes per constant, little-endian IEEE-754 binary32
//! sentinel           C0 FF EE
//! code section       instruction bytes, verbatim, to end of file
//! ```
//!
//! Readers find the sentinel by testing offsets 0, 4, 8, ... so constants are
//! always whole 4-byte words.

mod decoder;
mod encoder;

pub use decoder::{DecodedModule, decode};
pub use encoder::encode;

/// Marks the end of the constant section.
pub const SENTINEL: [u8; 3] = [0xC0, 0xFF, 0xEE];

/// Size in bytes of one encoded constant.
pub const CONSTANT_WIDTH: usize = 4;
