//! Instruction byte layout.
//!
//! Every instruction is a single byte split into two fields:
//!
//! ```text
//!  7   6   5   4   3   2   1   0
//! +-----------+-------------------+
//! |  source   |      opcode       |
//! +-----------+-------------------+
//! ```
//!
//! The top three bits select where the argument comes from (spaced by `0x20`), the
//! bottom five bits select the operation.

use super::opcodes::Opcode;
use super::source::ArgumentSource;

/// Bit mask for extracting the opcode field (bits 0-4).
pub const OPCODE_MASK: u8 = 0x1F;
/// Bit mask for extracting the argument-source field (bits 5-7).
pub const SOURCE_MASK: u8 = 0xE0;

/// Extracts the opcode field of an instruction byte.
#[inline]
pub const fn opcode(byte: u8) -> u8 {
    byte & OPCODE_MASK
}

/// Extracts the argument-source field of an instruction byte (still in place, `0x00..=0xE0`).
#[inline]
pub const fn selector(byte: u8) -> u8 {
    byte & SOURCE_MASK
}

/// Combines an opcode and an argument source into an instruction byte.
#[inline]
pub const fn encode(opcode: Opcode, source: ArgumentSource) -> u8 {
    (opcode as u8) | (source as u8)
}

/// A decoded instruction byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// The raw byte as fetched.
    pub raw: u8,
    /// The opcode, or `None` for reserved/unused codes.
    pub opcode: Option<Opcode>,
    /// Where the argument is read from.
    pub source: ArgumentSource,
}

impl Instruction {
    /// Decodes an instruction byte.
    pub fn decode(raw: u8) -> Self {
        Self {
            raw,
            opcode: Opcode::from_bits(opcode(raw)),
            source: ArgumentSource::from_bits(selector(raw)),
        }
    }

    /// Returns `true` if the argument is the byte following the instruction in the stream.
    pub fn reads_stream(&self) -> bool {
        self.source == ArgumentSource::Source
    }

    /// Encoded length in the instruction stream: two bytes when the argument is inline.
    pub fn len(&self) -> usize {
        if self.reads_stream() { 2 } else { 1 }
    }
}

impl From<u8> for Instruction {
    fn from(raw: u8) -> Self {
        Self::decode(raw)
    }
}
