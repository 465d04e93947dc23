//! # Unit Components
//!
//! Hub for the per-component tests, organized the way the library is: backplane
//! primitives, instruction layout, processor core, sockets and devices, and the
//! simulator facade.

/// Unit tests for buses, signals and the backplane.
pub mod common;


/// Unit tests for the ALU and the processor state machine.
pub mod core;

/// Unit tests for instruction layout and disassembly.
pub mod isa;
