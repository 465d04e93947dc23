//! Peripheral devices.
//!
//! This module contains the built-in peripherals that plug into the board's
//! peripheral sockets: the UART expansion card and the soldered memory controller.

/// On-board memory controller multiplexed over the write buses.
pub mod memory_controller;

/// Line-oriented UART expansion card.
pub mod uart;

pub use memory_controller::MemoryController;
pub use uart::Uart;

pub use crate::soc::peripheral::Peripheral;
