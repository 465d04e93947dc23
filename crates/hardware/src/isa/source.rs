//! Argument sources (instruction bits 5-7).

use std::fmt;

/// Where an instruction reads its argument from.
///
/// Discriminants are the in-place field values, spaced by `0x20`.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgumentSource {
    /// The byte following the instruction in the program stream.
    Source = 0x00,
    /// Read-bus 1.
    Bread1 = 0x20,
    /// Read-bus 2.
    Bread2 = 0x40,
    /// The ALU result.
    Result = 0x60,
    /// Working RAM at the current RAM address.
    Ram = 0x80,
    /// The SPI port (reserved, reads as 0).
    Spi = 0xA0,
    /// External latch 1, read through the number bus.
    Ext1 = 0xC0,
    /// External latch 2, read through the number bus.
    Ext2 = 0xE0,
}

impl ArgumentSource {
    /// Every source, in encoding order.
    pub const ALL: [Self; 8] = [
        Self::Source,
        Self::Bread1,
        Self::Bread2,
        Self::Result,
        Self::Ram,
        Self::Spi,
        Self::Ext1,
        Self::Ext2,
    ];

    /// Maps the in-place source field; the low five bits are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0xE0 {
            0x00 => Self::Source,
            0x20 => Self::Bread1,
            0x40 => Self::Bread2,
            0x60 => Self::Result,
            0x80 => Self::Ram,
            0xA0 => Self::Spi,
            0xC0 => Self::Ext1,
            _ => Self::Ext2,
        }
    }

    /// Assembler name of the readable bus.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Source => "SOURCE",
            Self::Bread1 => "BREAD1",
            Self::Bread2 => "BREAD2",
            Self::Result => "RESULT",
            Self::Ram => "RAM",
            Self::Spi => "SPI",
            Self::Ext1 => "EXT1",
            Self::Ext2 => "EXT2",
        }
    }
}

impl fmt::Display for ArgumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
