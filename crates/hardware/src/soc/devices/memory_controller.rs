//! On-board memory controller (`MEMORY_CONTROLLER`).
//!
//! Soldered into peripheral socket 0, the controller multiplexes a 24-bit address
//! and a data byte over the two write buses. BWRITE1 carries control lines, BWRITE2
//! carries the address byte or data byte being transferred.
//!
//! Every strobe (the three address latches and write-enable) is a level-triggered
//! single-shot: it acts once while asserted and is re-armed only after it is released,
//! so holding a strobe across several peripheral ticks does not repeat the action.

use tracing::{debug, trace};

use crate::common::{WiringError, Wires};
use crate::core::processor::wiring::bus;
use crate::soc::memory::{MemoryModule, Mm1};
use crate::soc::motherboard::Board;
use crate::soc::peripheral::{Peripheral, PeripheralKind};

/// Catalog name of the controller.
pub const MEMORY_CONTROLLER_NAME: &str = "MEMORY_CONTROLLER";

/// BWRITE1: latch BWRITE2 as address bits 0-7.
pub const LATCH_ADDRESS_LOW: u8 = 0x01;
/// BWRITE1: latch BWRITE2 as address bits 8-15.
pub const LATCH_ADDRESS_MID: u8 = 0x02;
/// BWRITE1: latch BWRITE2 as address bits 16-23.
pub const LATCH_ADDRESS_HIGH: u8 = 0x04;
/// BWRITE1: chip enable.
pub const CHIP_ENABLE: u8 = 0x08;
/// BWRITE1: output enable (processor drives data toward memory).
pub const OUTPUT_ENABLE: u8 = 0x10;
/// BWRITE1: write-enable-low strobe.
pub const WRITE_ENABLE: u8 = 0x20;

const ADDRESS_LATCHES: [u8; 3] = [LATCH_ADDRESS_LOW, LATCH_ADDRESS_MID, LATCH_ADDRESS_HIGH];

/// Memory controller state.
#[derive(Clone, Debug)]
pub struct MemoryController {
    selected: bool,
    memory: Mm1,
    address: u32,
    address_armed: [bool; 3],
    write_armed: bool,
}

impl Default for MemoryController {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryController {
    /// Creates a controller over a zeroed 64 KiB MM1 module.
    pub fn new() -> Self {
        Self {
            selected: false,
            memory: Mm1::new_64k(),
            address: 0,
            address_armed: [true; 3],
            write_armed: true,
        }
    }

    /// The 24-bit address assembled from the latched bytes.
    pub const fn address(&self) -> u32 {
        self.address
    }

    /// Backing store.
    pub const fn memory(&self) -> &Mm1 {
        &self.memory
    }

    /// Backing store, for preloading data.
    pub fn memory_mut(&mut self) -> &mut Mm1 {
        &mut self.memory
    }

    fn read_byte(&self) -> u8 {
        self.memory.get(self.address as usize).unwrap_or(0)
    }

    fn apply_control(&mut self, control: u8, data: u8) {
        for (index, line) in ADDRESS_LATCHES.into_iter().enumerate() {
            if control & line == 0 {
                self.address_armed[index] = true;
            } else if self.address_armed[index] {
                let shift = 8 * index as u32;
                self.address = (self.address & !(0xFF << shift)) | (u32::from(data) << shift);
                self.address_armed[index] = false;
                trace!(byte = index, address = self.address, "address latched");
            }
        }

        if control & WRITE_ENABLE == 0 {
            self.write_armed = true;
        } else if self.write_armed && control & CHIP_ENABLE != 0 && control & OUTPUT_ENABLE != 0 {
            let written = self.memory.set(self.address as usize, data);
            debug!(address = self.address, data, written, "memory controller write");
            self.write_armed = false;
        }
    }
}

impl Peripheral for MemoryController {
    fn name(&self) -> &'static str {
        MEMORY_CONTROLLER_NAME
    }

    fn kind(&self) -> PeripheralKind {
        PeripheralKind::Hardware
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
        let control = wires.buses.get(bus::BWRITE1)? as u8;
        let data = wires.buses.get(bus::BWRITE2)? as u8;
        self.apply_control(control, data);
        if control & CHIP_ENABLE != 0 && control & OUTPUT_ENABLE == 0 {
            wires.buses.drive(bus::BREAD1, u64::from(self.read_byte()))?;
        }
        Ok(())
    }

    fn as_memory_controller_mut(&mut self) -> Option<&mut MemoryController> {
        Some(self)
    }
}
