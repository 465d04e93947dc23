//! Backplane primitives shared by every component of the simulated machine.
//!
//! This module provides the wire-level building blocks. It includes:
//! 1. **Buses:** Fixed-width registers that truncate every write to their width.
//! 2. **Signals:** Named single-subscriber control lines driven synchronously.
//! 3. **Wires:** The combined bus/signal namespace lent to handlers and peripherals.
//! 4. **Error Handling:** Wiring errors and high-level simulation errors.

/// Fixed-width buses and the bus registry.
pub mod bus;

/// Error types.
pub mod error;

/// Signals, subscribers and the signal registry.
pub mod signal;

/// The combined backplane namespace.
pub mod wires;

pub use bus::{Bus, BusMap};
pub use error::{SimError, WiringError};
pub use signal::{Signal, SignalLevels, SignalMap, Subscriber};
pub use wires::Wires;
