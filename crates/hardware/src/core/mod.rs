//! Core processor implementation.
//!
//! This module contains the processor state machine and the arithmetic unit it
//! drives. The processor owns the backplane wires; everything else on the board talks
//! to it through them.

/// Arithmetic Logic Unit contract and the reference implementation.
pub mod alu;

/// Processor state machine, wiring and working RAM.
pub mod processor;

pub use self::alu::{Alu, AluOp, Aluminium};
pub use self::processor::{Processor, State};
