//! Instruction Set Architecture (ISA) Definitions.
//!
//! The processor executes a byte stream. Each instruction byte packs an argument
//! source selector (bits 5-7) and an opcode (bits 0-4); when the selector is `SOURCE`
//! the argument is the next byte of the stream.
//!
//! # Modules
//!
//! * `opcodes`: The defined operations and their mnemonics.
//! * `source`: The eight argument sources.
//! * `instruction`: Field extraction, encoding and the decoded form.
//! * `disasm`: Human-readable rendering of programs.

/// Program disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction byte layout and bit extraction utilities.
pub mod instruction;

/// Opcode definitions (instruction bits 0-4).
pub mod opcodes;

/// Argument source definitions (instruction bits 5-7).
pub mod source;

pub use instruction::{Instruction, encode};
pub use opcodes::Opcode;
pub use source::ArgumentSource;
