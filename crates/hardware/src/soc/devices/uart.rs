//! UART expansion card (`UART_A_1_1`).
//!
//! A line-oriented serial card driven entirely through the write buses:
//! 1. **Control (BWRITE2):** Reset-receive-flag pops one inbound character,
//!    reset-transmit-flag clears the transmit flag, apply-transmit-data latches BWRITE1,
//!    transmit sends the latched character.
//! 2. **Status (BREAD1/BREAD2):** BREAD1 carries the next inbound character (0 when the
//!    input buffer is empty); BREAD2 carries the receive flag (bit 0) and the transmit
//!    flag (bit 1).
//! 3. **Output:** Transmitted characters accumulate until a line feed or until
//!    [`OUTPUT_OVERFLOW`] characters are pending, then the line is logged and kept for
//!    [`Uart::take_lines`].

use std::collections::VecDeque;
use std::fmt::Write as _;

use tracing::{info, trace};

use crate::common::{WiringError, Wires};
use crate::core::processor::wiring::bus;
use crate::soc::motherboard::Board;
use crate::soc::peripheral::{Peripheral, PeripheralKind};

/// Catalog name of this card.
pub const UART_NAME: &str = "UART_A_1_1";

/// BWRITE2: pop one inbound character and refresh the receive flag.
pub const RST_RX_FLAG: u8 = 0x01;
/// BWRITE2: clear the transmit flag.
pub const RST_TX_FLAG: u8 = 0x02;
/// BWRITE2: latch BWRITE1 as the character to transmit.
pub const APPLY_TX_DATA: u8 = 0x04;
/// BWRITE2: transmit the latched character.
pub const TRANSMIT: u8 = 0x08;

/// BREAD2: inbound data available.
pub const STATUS_RX: u8 = 0x01;
/// BREAD2: a character was transmitted.
pub const STATUS_TX: u8 = 0x02;

/// Pending output length at which the line is flushed without a terminator.
pub const OUTPUT_OVERFLOW: usize = 20;

/// UART card state.
#[derive(Clone, Debug, Default)]
pub struct Uart {
    selected: bool,
    input: VecDeque<u8>,
    output: Vec<u8>,
    lines: Vec<String>,
    tx_data: u8,
    rx_flag: bool,
    tx_flag: bool,
}

impl Uart {
    /// Creates an idle card with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the inbound buffer; the receive flag follows its emptiness.
    pub fn set_input(&mut self, input: &str) {
        self.input = input.bytes().collect();
        self.rx_flag = !self.input.is_empty();
    }

    /// Inbound characters not yet popped.
    pub fn input(&self) -> Vec<u8> {
        self.input.iter().copied().collect()
    }

    /// Characters transmitted since the last flush.
    pub fn pending_output(&self) -> &[u8] {
        &self.output
    }

    /// Discards pending output without logging it.
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Drains every completed line.
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    /// Receive flag.
    pub const fn rx_flag(&self) -> bool {
        self.rx_flag
    }

    /// Transmit flag.
    pub const fn tx_flag(&self) -> bool {
        self.tx_flag
    }

    fn flush(&mut self, overflow: bool) {
        let line = escape(&self.output);
        if overflow {
            info!(target: "uart", line = %line, "(overflow) receiving");
        } else {
            info!(target: "uart", line = %line, "receiving");
        }
        self.lines.push(line);
        self.output.clear();
    }

    fn apply_control(&mut self, control: u8, data: u8) {
        if control & RST_RX_FLAG != 0 {
            self.rx_flag = self.input.pop_front().is_some() && !self.input.is_empty();
        }
        if control & RST_TX_FLAG != 0 {
            self.tx_flag = false;
        }
        if control & APPLY_TX_DATA != 0 {
            self.tx_data = data;
        }
        if control & TRANSMIT != 0 {
            if self.tx_data == b'\n' {
                self.flush(false);
            } else {
                self.output.push(self.tx_data);
                if self.output.len() >= OUTPUT_OVERFLOW {
                    self.flush(true);
                }
            }
            self.tx_flag = true;
        }
    }
}

impl Peripheral for Uart {
    fn name(&self) -> &'static str {
        UART_NAME
    }

    fn kind(&self) -> PeripheralKind {
        PeripheralKind::Pp1
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn select(&mut self, selected: bool) {
        self.selected = selected;
    }

    fn update(&mut self, wires: &mut Wires<Board>) -> Result<(), WiringError> {
        if !self.selected {
            return Ok(());
        }
        let data = wires.buses.get(bus::BWRITE1)? as u8;
        let control = wires.buses.get(bus::BWRITE2)? as u8;
        trace!(control, data, "uart tick");
        self.apply_control(control, data);

        let front = self.input.front().copied().unwrap_or(0);
        let mut status = 0;
        if self.rx_flag {
            status |= STATUS_RX;
        }
        if self.tx_flag {
            status |= STATUS_TX;
        }
        wires.buses.drive(bus::BREAD1, u64::from(front))?;
        wires.buses.drive(bus::BREAD2, u64::from(status))
    }

    fn as_uart_mut(&mut self) -> Option<&mut Uart> {
        Some(self)
    }
}

/// Renders bytes as text, escaping non-printable characters as `\xNN`.
pub fn escape(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for &byte in bytes {
        if byte.is_ascii_graphic() || byte == b' ' {
            text.push(char::from(byte));
        } else {
            let _ = write!(text, "\\x{byte:02X}");
        }
    }
    text
}
