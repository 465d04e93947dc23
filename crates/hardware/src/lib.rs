//! Backplane computer simulator library.
//!
//! This crate implements a cycle-accurate simulator of an 8-bit computer wired through
//! shared buses and edge-triggered signals, with the following:
//! 1. **Backplane:** Width-truncating buses and single-subscriber signals.
//! 2. **Core:** The three-phase GP8B processor and its combinational ALU.
//! 3. **ISA:** Instruction byte layout, opcodes, argument sources and disassembly.
//! 4. **Board:** Memory modules, typed socket tables, peripherals, the device catalog
//!    and the GCM-5.1 motherboard that wires it all together.
//! 5. **Simulation:** Loader, facade, configuration and statistics collection.

/// Backplane primitives (buses, signals, wires, errors).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Processor core (state machine, wiring, ALU).
pub mod core;
/// Instruction set (layout, opcodes, sources, disassembly).
pub mod isa;
/// Program loader and simulator facade.
pub mod sim;
/// Board-level components (memory, sockets, peripherals, catalog, motherboard).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Processor type, generic over its signal handler context.
pub use crate::core::Processor;
/// The assembled machine; build with `DeviceCatalog::create_motherboard` or `Motherboard::new`.
pub use crate::soc::Motherboard;
/// Top-level facade for shells and test harnesses.
pub use crate::sim::Simulator;
