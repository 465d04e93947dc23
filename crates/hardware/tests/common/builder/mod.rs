//! Test input builders.

/// Instruction-stream builder.
pub mod program;

pub use program::ProgramBuilder;
