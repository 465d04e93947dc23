//! Shared test infrastructure.

/// Fluent builders for test inputs.
pub mod builder;

/// Machine-level test harness.
pub mod harness;
