//! Names and widths of the processor's buses and signals.
//!
//! These are the only names the backplane knows. Components look them up by string
//! through [`Wires`]; a typo is a [`WiringError`], never a silent new wire.

use crate::common::{WiringError, Wires};

/// Bus names.
pub mod bus {
    /// Jump target assembled from three bytes (24 bits).
    pub const BJMPSRC: &str = "BJMPSRC";
    /// Write-bus 1 (8 bits).
    pub const BWRITE1: &str = "BWRITE1";
    /// Write-bus 2 (8 bits).
    pub const BWRITE2: &str = "BWRITE2";
    /// Read-bus 1 (8 bits), driven by peripherals.
    pub const BREAD1: &str = "BREAD1";
    /// Read-bus 2 (8 bits), driven by peripherals.
    pub const BREAD2: &str = "BREAD2";
    /// Shared number bus carrying the decoded argument and external latches (8 bits).
    pub const NUMBER: &str = "NUMBER";
    /// Source-data bus: the byte at the program counter (8 bits).
    pub const BDATASRC: &str = "BDATASRC";
    /// Peripheral chip-select (6 bits).
    pub const BPCS: &str = "BPCS";
}

/// Signal names.
pub mod signal {
    /// Fetch-advance: increment the program counter and refresh `BDATASRC`.
    pub const ADDSRC_CLK: &str = "ADDSRC_CLK";
    /// Jump: load the program counter from `BJMPSRC`.
    pub const JMPSRC_CLK: &str = "JMPSRC_CLK";
    /// Peripheral clock.
    pub const PERIPHERAL_CLK: &str = "PERIPHERAL_CLK";
    /// External latch 1 select: copy `BWRITE1` onto `NUMBER`.
    pub const SELECTING_RBEXT1: &str = "SELECTING_RBEXT1";
    /// External latch 2 select: copy `BWRITE2` onto `NUMBER`.
    pub const SELECTING_RBEXT2: &str = "SELECTING_RBEXT2";
    /// SPI clock, reserved for a future peripheral and left unsubscribed.
    pub const SPI_CLK: &str = "SPI_CLK";
}

/// Every processor bus with its width in bits.
pub const BUSES: [(&str, u8); 8] = [
    (bus::BJMPSRC, 24),
    (bus::BWRITE1, 8),
    (bus::BWRITE2, 8),
    (bus::BREAD1, 8),
    (bus::BREAD2, 8),
    (bus::NUMBER, 8),
    (bus::BDATASRC, 8),
    (bus::BPCS, 6),
];

/// Every processor signal.
pub const SIGNALS: [&str; 6] = [
    signal::ADDSRC_CLK,
    signal::JMPSRC_CLK,
    signal::PERIPHERAL_CLK,
    signal::SELECTING_RBEXT1,
    signal::SELECTING_RBEXT2,
    signal::SPI_CLK,
];

/// Declares every processor bus and signal on `wires`.
pub fn declare<C>(wires: &mut Wires<C>) -> Result<(), WiringError> {
    for (name, width) in BUSES {
        wires.buses.declare(name, width)?;
    }
    for name in SIGNALS {
        wires.signals.declare(name)?;
    }
    Ok(())
}
