//! Simulation utilities and program loading.
//!
//! Provides the [`Simulator`] facade an external shell or test harness drives, and
//! the loader that deposits program images into memory modules.

/// Program image loading.
pub mod loader;

/// Top-level simulator facade.
pub mod simulator;

pub use simulator::{MemoryTarget, SimStatus, Simulator, SlotArea, SlotReport};
