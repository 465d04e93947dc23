/// Disassembler output format.
pub mod disasm;
