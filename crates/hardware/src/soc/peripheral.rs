//! Peripheral trait for devices plugged into the board's peripheral sockets.
//!
//! Peripherals follow a broadcast-tick, self-gated protocol:
//! 1. **Broadcast:** On every rising edge of `PERIPHERAL_CLK` the motherboard updates
//!    every occupied socket, marking only the socket whose index equals `BPCS` as
//!    selected.
//! 2. **Self-gating:** An implementation must check [`Peripheral::is_selected`] before
//!    acting; unselected devices leave the read buses alone.
//! 3. **Wired-OR output:** Read buses are pulled to 0 before the broadcast and devices
//!    drive them with [`BusMap::drive`](crate::common::BusMap::drive).
//! 4. **Downcasting:** Optional casts to concrete devices for shell-side inspection.

use std::fmt;

use crate::common::{WiringError, Wires};
use crate::soc::devices::{MemoryController, Uart};
use crate::soc::motherboard::Board;
use crate::soc::slots::SlotOccupant;

/// Device-type tag of peripheral sockets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeripheralKind {
    /// Pluggable expansion card.
    Pp1,
    /// Hardware soldered to the board.
    Hardware,
}

impl fmt::Display for PeripheralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pp1 => f.write_str("PP1"),
            Self::Hardware => f.write_str("HARDWARE"),
        }
    }
}

/// A device clocked by the peripheral clock.
pub trait Peripheral {
    /// Returns a short name for this device (e.g., `"UART_A_1_1"`).
    fn name(&self) -> &'static str;

    /// Device-type tag used for socket compatibility checks.
    fn kind(&self) -> PeripheralKind;

    /// Returns `true` if this device was addressed by the last peripheral tick.
    fn is_selected(&self) -> bool;

    /// Marks this device as addressed (or not) by the chip-select bus.
    fn select(&mut self, selected: bool);

    /// Runs one peripheral tick.
    ///
    /// Called for every occupied socket on every rising edge of `PERIPHERAL_CLK`,
    /// selected or not. Each call is one tick; the clock level is not re-checked.
    ///
    /// Devices get the backplane only, not the motherboard. The board owns every socket
    /// and lends the wires while it iterates them, so a device cannot reach the board
    /// (or its own socket) during a tick.
    ///
    /// # Arguments
    ///
    /// * `wires` - The backplane: buses to read and drive, signal levels to sample.
    fn update(&mut self, wires: &mut Wires<Board>) -> Result<(), WiringError>;

    /// Returns a mutable reference as `Uart` if this device is a UART; otherwise `None`.
    fn as_uart_mut(&mut self) -> Option<&mut Uart> {
        None
    }

    /// Returns a mutable reference as `MemoryController` if this device is one; otherwise `None`.
    fn as_memory_controller_mut(&mut self) -> Option<&mut MemoryController> {
        None
    }
}

impl SlotOccupant for Box<dyn Peripheral> {
    type Kind = PeripheralKind;

    fn kind(&self) -> PeripheralKind {
        Peripheral::kind(self.as_ref())
    }
}
