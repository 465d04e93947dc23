//! Fluent assembler for instruction streams.
//!
//! Emits raw program bytes so tests read like the listing they execute:
//!
//! ```text
//! ProgramBuilder::new()
//!     .imm(Opcode::BpcsClk, 1)
//!     .op(Opcode::PeripheralClk, ArgumentSource::Bread1)
//!     .build()
//! ```

use backplane_sim::isa::{ArgumentSource, Opcode, encode};

/// Accumulates program bytes.
#[derive(Clone, Debug, Default)]
pub struct ProgramBuilder {
    bytes: Vec<u8>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits an instruction whose argument is the inline byte `value`.
    pub fn imm(mut self, opcode: Opcode, value: u8) -> Self {
        self.bytes.push(encode(opcode, ArgumentSource::Source));
        self.bytes.push(value);
        self
    }

    /// Emits a one-byte instruction reading its argument from `source`.
    ///
    /// `source` must not be `Source`; use [`imm`](Self::imm) for inline arguments.
    pub fn op(mut self, opcode: Opcode, source: ArgumentSource) -> Self {
        assert_ne!(source, ArgumentSource::Source, "inline arguments go through imm()");
        self.bytes.push(encode(opcode, source));
        self
    }

    /// Emits an argument-less instruction (encoded with the `BREAD1` selector).
    pub fn bare(self, opcode: Opcode) -> Self {
        self.op(opcode, ArgumentSource::Bread1)
    }

    /// Emits a raw byte.
    pub fn raw(mut self, byte: u8) -> Self {
        self.bytes.push(byte);
        self
    }

    /// Emits the three jump-target bytes (MSB first) followed by the jump.
    pub fn jump(self, target: u32) -> Self {
        let [_, high, mid, low] = target.to_be_bytes();
        self.imm(Opcode::Bjmpsrc1Clk, high)
            .imm(Opcode::Bjmpsrc2Clk, mid)
            .imm(Opcode::Bjmpsrc3Clk, low)
            .bare(Opcode::JmpsrcClk)
    }

    /// Current length in bytes, i.e. the address of the next emitted byte.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}
