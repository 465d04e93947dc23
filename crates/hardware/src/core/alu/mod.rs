//! Arithmetic Logic Unit (ALU).
//!
//! The ALU is the only combinational block of the machine: its result is recomputed
//! the moment any operand or the operation code is written, with no clock involved.
//! This module defines:
//! 1. **Contract:** The [`Alu`] trait the processor drives through a boxed handle.
//! 2. **Operation table:** [`AluOp`], the 26 operation codes understood by the
//!    built-in unit.
//! 3. **Implementation:** [`aluminium::Aluminium`], the reference 8-bit ALU with its
//!    accumulator routing modes.

/// The reference 8-bit ALU implementation.
pub mod aluminium;

use std::fmt;

pub use aluminium::Aluminium;

/// Interface of a combinational ALU.
///
/// Every setter recomputes [`result`](Alu::result) before returning.
pub trait Alu {
    /// Writes the left operand (or the left accumulator, depending on the routing mode).
    fn set_operation_left(&mut self, value: u8);

    /// Writes the right operand (or the right accumulator, depending on the routing mode).
    fn set_operation_right(&mut self, value: u8);

    /// Selects the operation code.
    fn set_operation(&mut self, code: u8);

    /// Returns the current result.
    fn result(&self) -> u8;

    /// Clears every register and the result.
    fn reset(&mut self);
}

/// Operation codes of the reference ALU.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// `left + right`, wrapping.
    Add = 0x00,
    /// `left - right`, wrapping.
    Sub = 0x01,
    /// Bitwise AND.
    And = 0x02,
    /// Bitwise OR.
    Or = 0x03,
    /// Bitwise XOR.
    Xor = 0x04,
    /// Bitwise NOT of the left operand.
    Inv = 0x05,
    /// Logical AND (0 or 1).
    LogicalAnd = 0x06,
    /// Logical OR (0 or 1).
    LogicalOr = 0x07,
    /// Logical XOR (0 or 1).
    LogicalXor = 0x08,
    /// Logical NOT of the left operand (0 or 1).
    LogicalInv = 0x09,
    /// `left << right`, 0 once the count reaches 8.
    Shl = 0x0A,
    /// `left >> right`, 0 once the count reaches 8.
    Shr = 0x0B,
    /// `left > right`.
    Gt = 0x0C,
    /// `left < right`.
    Lt = 0x0D,
    /// `left >= right`.
    Ge = 0x0E,
    /// `left <= right`.
    Le = 0x0F,
    /// `left == right`.
    Eq = 0x10,
    /// `left * right`, truncated to 8 bits.
    Mul = 0x11,
    /// Two's complement of the left operand.
    Neg = 0x12,
    /// Bit reversal of the left operand.
    Reverse = 0x13,
    /// Rotate left by `right` positions.
    Rol = 0x14,
    /// Rotate right by `right` positions.
    Ror = 0x15,
    /// Operand writes land in the accumulators; output is the left accumulator.
    Aopl = 0x16,
    /// Operand writes land in the accumulators; output is the right accumulator.
    Aopr = 0x17,
    /// Output is the previously latched left accumulator.
    Opal = 0x18,
    /// Output is the previously latched right accumulator.
    Opar = 0x19,
}

impl AluOp {
    /// Maps an operation code, `None` for codes the ALU does not implement.
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x00 => Self::Add,
            0x01 => Self::Sub,
            0x02 => Self::And,
            0x03 => Self::Or,
            0x04 => Self::Xor,
            0x05 => Self::Inv,
            0x06 => Self::LogicalAnd,
            0x07 => Self::LogicalOr,
            0x08 => Self::LogicalXor,
            0x09 => Self::LogicalInv,
            0x0A => Self::Shl,
            0x0B => Self::Shr,
            0x0C => Self::Gt,
            0x0D => Self::Lt,
            0x0E => Self::Ge,
            0x0F => Self::Le,
            0x10 => Self::Eq,
            0x11 => Self::Mul,
            0x12 => Self::Neg,
            0x13 => Self::Reverse,
            0x14 => Self::Rol,
            0x15 => Self::Ror,
            0x16 => Self::Aopl,
            0x17 => Self::Aopr,
            0x18 => Self::Opal,
            0x19 => Self::Opar,
            _ => return None,
        })
    }

    /// Returns `true` for the two modes that redirect operand writes into the accumulators.
    pub const fn routes_to_accumulator(self) -> bool {
        matches!(self, Self::Aopl | Self::Aopr)
    }

    /// Assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Inv => "INV",
            Self::LogicalAnd => "LAND",
            Self::LogicalOr => "LOR",
            Self::LogicalXor => "LXOR",
            Self::LogicalInv => "LINV",
            Self::Shl => "SHL",
            Self::Shr => "SHR",
            Self::Gt => "GT",
            Self::Lt => "LT",
            Self::Ge => "GE",
            Self::Le => "LE",
            Self::Eq => "EQ",
            Self::Mul => "MUL",
            Self::Neg => "NEG",
            Self::Reverse => "REVERSE",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Aopl => "AOPL",
            Self::Aopr => "AOPR",
            Self::Opal => "OPAL",
            Self::Opar => "OPAR",
        }
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
