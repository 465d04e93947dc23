//! Processor opcodes (instruction bits 0-4).
//!
//! Codes `0x13..=0x16` and `0x18..=0x1E` are reserved and `0x1F` is unused; the
//! processor treats all of them as no-ops.

use std::fmt;

/// Defined processor opcodes.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Latch the argument onto write-bus 1.
    Bwrite1Clk = 0x00,
    /// Latch the argument onto write-bus 2.
    Bwrite2Clk = 0x01,
    /// Latch the argument onto the peripheral chip-select bus.
    BpcsClk = 0x02,
    /// Write the ALU left operand.
    OpLeftClk = 0x03,
    /// Write the ALU right operand.
    OpRightClk = 0x04,
    /// Select the ALU operation.
    OpChooseClk = 0x05,
    /// Pulse the peripheral clock.
    PeripheralClk = 0x06,
    /// Set bits 16-23 of the jump target.
    Bjmpsrc1Clk = 0x07,
    /// Set bits 8-15 of the jump target.
    Bjmpsrc2Clk = 0x08,
    /// Set bits 0-7 of the jump target.
    Bjmpsrc3Clk = 0x09,
    /// Jump to the latched target.
    JmpsrcClk = 0x0A,
    /// Set the high byte of the RAM address.
    Bramadd1Clk = 0x0B,
    /// Set the low byte of the RAM address.
    Bramadd2Clk = 0x0C,
    /// Clock the SPI port (reserved).
    SpiClk = 0x0D,
    /// Configure the SPI port (reserved).
    BcfgSpiClk = 0x0E,
    /// Short tick delay.
    Stick = 0x0F,
    /// Skip one stream byte if the argument is nonzero.
    If = 0x10,
    /// Skip one stream byte if the argument is zero.
    IfNot = 0x11,
    /// Write the argument to working RAM.
    RamW = 0x12,
    /// Long tick delay.
    Ltick = 0x17,
}

impl Opcode {
    /// Every defined opcode, in encoding order.
    pub const ALL: [Self; 20] = [
        Self::Bwrite1Clk,
        Self::Bwrite2Clk,
        Self::BpcsClk,
        Self::OpLeftClk,
        Self::OpRightClk,
        Self::OpChooseClk,
        Self::PeripheralClk,
        Self::Bjmpsrc1Clk,
        Self::Bjmpsrc2Clk,
        Self::Bjmpsrc3Clk,
        Self::JmpsrcClk,
        Self::Bramadd1Clk,
        Self::Bramadd2Clk,
        Self::SpiClk,
        Self::BcfgSpiClk,
        Self::Stick,
        Self::If,
        Self::IfNot,
        Self::RamW,
        Self::Ltick,
    ];

    /// Maps the 5-bit opcode field to an opcode, `None` for reserved codes.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0x00 => Self::Bwrite1Clk,
            0x01 => Self::Bwrite2Clk,
            0x02 => Self::BpcsClk,
            0x03 => Self::OpLeftClk,
            0x04 => Self::OpRightClk,
            0x05 => Self::OpChooseClk,
            0x06 => Self::PeripheralClk,
            0x07 => Self::Bjmpsrc1Clk,
            0x08 => Self::Bjmpsrc2Clk,
            0x09 => Self::Bjmpsrc3Clk,
            0x0A => Self::JmpsrcClk,
            0x0B => Self::Bramadd1Clk,
            0x0C => Self::Bramadd2Clk,
            0x0D => Self::SpiClk,
            0x0E => Self::BcfgSpiClk,
            0x0F => Self::Stick,
            0x10 => Self::If,
            0x11 => Self::IfNot,
            0x12 => Self::RamW,
            0x17 => Self::Ltick,
            _ => return None,
        })
    }

    /// Assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Bwrite1Clk => "BWRITE1_CLK",
            Self::Bwrite2Clk => "BWRITE2_CLK",
            Self::BpcsClk => "BPCS_CLK",
            Self::OpLeftClk => "OPLEFT_CLK",
            Self::OpRightClk => "OPRIGHT_CLK",
            Self::OpChooseClk => "OPCHOOSE_CLK",
            Self::PeripheralClk => "PERIPHERAL_CLK",
            Self::Bjmpsrc1Clk => "BJMPSRC1_CLK",
            Self::Bjmpsrc2Clk => "BJMPSRC2_CLK",
            Self::Bjmpsrc3Clk => "BJMPSRC3_CLK",
            Self::JmpsrcClk => "JMPSRC_CLK",
            Self::Bramadd1Clk => "BRAMADD1_CLK",
            Self::Bramadd2Clk => "BRAMADD2_CLK",
            Self::SpiClk => "SPI_CLK",
            Self::BcfgSpiClk => "BCFG_SPI_CLK",
            Self::Stick => "STICK",
            Self::If => "IF",
            Self::IfNot => "IFNOT",
            Self::RamW => "RAMW",
            Self::Ltick => "LTICK",
        }
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    /// Decodes the 5-bit opcode field, handing back reserved codes as the error.
    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or(bits)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
