//! Board-level components.
//!
//! This module organizes everything that plugs into or is soldered onto the
//! motherboard: memory modules and banks, the generic socket tables, peripherals, the
//! device catalog and the motherboard itself.

/// Device constructors keyed by type name.
pub mod catalog;

/// Built-in peripheral devices.
pub mod devices;

/// Memory modules and memory banks.
pub mod memory;

/// The GCM-5.1 motherboard and its signal handlers.
pub mod motherboard;

/// Peripheral trait definitions.
pub mod peripheral;

/// Typed socket tables.
pub mod slots;

pub use catalog::DeviceCatalog;
pub use motherboard::{Board, Motherboard};
pub use peripheral::{Peripheral, PeripheralKind};
pub use slots::{SlotOccupant, SlotSpec, SlotTable};
