//! Program disassembler.
//!
//! Converts a byte-stream program into one line of assembly per instruction for
//! debug tracing, logging, and test diagnostics. Instructions whose argument source is
//! `SOURCE` consume the following byte as an inline immediate.
//!
//! # Usage
//!
//! ```ignore
//! use backplane_sim::isa::disasm::disassemble;
//! let text = disassemble(&[0x00, 0x41, 0x26]);
//! assert_eq!(text, vec!["0000: BWRITE1_CLK SOURCE 0x41", "0002: PERIPHERAL_CLK BREAD1"]);
//! ```

use super::instruction::Instruction;

/// Disassembles a single instruction byte with an optional inline argument.
///
/// Reserved opcodes render as `.byte 0xNN`, followed by the inline argument when their
/// selector is `SOURCE`, since the processor still consumes it.
pub fn disassemble_one(byte: u8, immediate: Option<u8>) -> String {
    let inst = Instruction::decode(byte);
    let Some(op) = inst.opcode else {
        return match (inst.reads_stream(), immediate) {
            (true, Some(arg)) => format!(".byte {byte:#04x} {arg:#04x}"),
            _ => format!(".byte {byte:#04x}"),
        };
    };
    match (inst.reads_stream(), immediate) {
        (true, Some(arg)) => format!("{op} {} {arg:#04x}", inst.source),
        (true, None) => format!("{op} {} <eof>", inst.source),
        (false, _) => format!("{op} {}", inst.source),
    }
}

/// Disassembles a whole program, prefixing each line with its stream offset.
///
/// Offsets advance by [`Instruction::len`], the same step the processor takes.
pub fn disassemble(program: &[u8]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pc = 0;
    while let Some(&byte) = program.get(pc) {
        let inst = Instruction::decode(byte);
        let immediate = if inst.reads_stream() {
            program.get(pc + 1).copied()
        } else {
            None
        };
        lines.push(format!("{pc:04x}: {}", disassemble_one(byte, immediate)));
        pc += inst.len();
    }
    lines
}
