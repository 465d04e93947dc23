//! Simulator: owns the motherboard, the device catalog and the statistics.
//!
//! This is the surface an external command shell or test harness drives. Every
//! operation is addressed by slot index, bus name or catalog name so that a textual
//! front end can map its commands onto it one to one.

use std::fmt;

use tracing::{debug, info};

use crate::common::SimError;
use crate::config::Config;
use crate::core::processor::{RAM_SLOT, State};
use crate::sim::loader::load_image;
use crate::soc::catalog::DeviceCatalog;
use crate::soc::devices::{MemoryController, Uart};
use crate::soc::memory::MemoryModule;
use crate::soc::motherboard::{GCM_5_1_NAME, Motherboard};
use crate::soc::peripheral::Peripheral;
use crate::stats::SimStats;

/// A memory module addressed by the facade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemoryTarget {
    /// A program memory socket of the motherboard.
    Board(usize),
    /// The processor's working RAM.
    ProcessorRam,
}

/// Which socket table a [`SlotReport`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotArea {
    /// Motherboard program memory.
    Memory,
    /// Processor working RAM.
    ProcessorRam,
    /// Motherboard peripheral rack.
    Peripheral,
}

impl fmt::Display for SlotArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::ProcessorRam => f.write_str("ram"),
            Self::Peripheral => f.write_str("peripheral"),
        }
    }
}

/// Printable description of one socket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotReport {
    /// Socket table.
    pub area: SlotArea,
    /// Index within the table.
    pub index: usize,
    /// Accepted device type.
    pub kind: String,
    /// Whether the occupant can be changed.
    pub pluggable: bool,
    /// Whether this is the selected program source.
    pub source: bool,
    /// Occupant description, `None` when empty.
    pub occupant: Option<String>,
}

impl fmt::Display for SlotReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} slot {} [{}", self.area, self.index, self.kind)?;
        if !self.pluggable {
            f.write_str(", fixed")?;
        }
        if self.source {
            f.write_str(", source")?;
        }
        match &self.occupant {
            Some(occupant) => write!(f, "]: {occupant}"),
            None => f.write_str("]: empty"),
        }
    }
}

/// Snapshot of the architectural state, for shells and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimStatus {
    /// Program counter.
    pub program_counter: u64,
    /// Processor state.
    pub state: State,
    /// Last latched instruction byte.
    pub instruction: u8,
    /// Last decoded argument.
    pub argument: u8,
    /// Working-RAM address register.
    pub ram_address: u16,
    /// Selected program source socket.
    pub source_slot: usize,
}

/// Top-level simulator.
#[derive(Debug)]
pub struct Simulator {
    motherboard: Motherboard,
    catalog: DeviceCatalog,
    config: Config,
    stats: SimStats,
}

impl Simulator {
    /// Builds the reference GCM-5.1 machine described by `config` from the built-in catalog.
    pub fn new(config: Config) -> Result<Self, SimError> {
        Self::with_catalog(config, DeviceCatalog::builtin(), GCM_5_1_NAME)
    }

    /// Builds the motherboard named `board` from `catalog`.
    pub fn with_catalog(config: Config, catalog: DeviceCatalog, board: &str) -> Result<Self, SimError> {
        let motherboard = catalog.create_motherboard(board, &config)?;
        info!(board, "machine assembled");
        Ok(Self {
            motherboard,
            catalog,
            config,
            stats: SimStats::default(),
        })
    }

    /// The motherboard.
    pub const fn motherboard(&self) -> &Motherboard {
        &self.motherboard
    }

    /// The motherboard, for direct access.
    pub fn motherboard_mut(&mut self) -> &mut Motherboard {
        &mut self.motherboard
    }

    /// The device catalog.
    pub const fn catalog(&self) -> &DeviceCatalog {
        &self.catalog
    }

    /// The configuration the machine was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Collected statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Architectural state snapshot.
    pub fn status(&self) -> SimStatus {
        let processor = self.motherboard.processor();
        SimStatus {
            program_counter: self.motherboard.program_counter(),
            state: processor.state(),
            instruction: processor.instruction(),
            argument: processor.argument(),
            ram_address: processor.ram_address(),
            source_slot: self.motherboard.board().memory().source(),
        }
    }

    fn module(&self, target: MemoryTarget) -> Option<&dyn MemoryModule> {
        match target {
            MemoryTarget::Board(index) => self.motherboard.board().memory().module(index),
            MemoryTarget::ProcessorRam => self.motherboard.processor().ram().module(RAM_SLOT),
        }
    }

    fn module_mut(&mut self, target: MemoryTarget) -> Option<&mut (dyn MemoryModule + 'static)> {
        match target {
            MemoryTarget::Board(index) => self.motherboard.board_mut().memory_mut().module_mut(index),
            MemoryTarget::ProcessorRam => self.motherboard.processor_mut().ram_mut().module_mut(RAM_SLOT),
        }
    }

    fn touches_source(&self, target: MemoryTarget) -> bool {
        target == MemoryTarget::Board(self.motherboard.board().memory().source())
    }

    /// Deposits `image` at address 0 of a memory module.
    ///
    /// # Returns
    ///
    /// `Ok(false)` if the socket is empty or the image does not fit.
    pub fn load(&mut self, target: MemoryTarget, image: &[u8]) -> Result<bool, SimError> {
        let Some(module) = self.module_mut(target) else {
            return Ok(false);
        };
        let loaded = load_image(module, image);
        if loaded && self.touches_source(target) {
            self.motherboard.refresh_source()?;
        }
        Ok(loaded)
    }

    /// Reads one byte of a memory module.
    pub fn read_memory(&self, target: MemoryTarget, address: usize) -> Option<u8> {
        self.module(target)?.get(address)
    }

    /// Writes one byte of a memory module.
    pub fn write_memory(&mut self, target: MemoryTarget, address: usize, value: u8) -> Result<bool, SimError> {
        let written = self
            .module_mut(target)
            .is_some_and(|module| module.set(address, value));
        if written && self.touches_source(target) {
            self.motherboard.refresh_source()?;
        }
        Ok(written)
    }

    /// Builds a memory module from the catalog and plugs it into a program socket.
    pub fn plug_memory(&mut self, index: usize, name: &str, capacity: usize) -> Result<(), SimError> {
        let module = self.catalog.create_memory(name, capacity)?;
        self.motherboard
            .plug_memory(index, module)
            .map_err(|_| SimError::SlotRejected { index })?;
        if self.touches_source(MemoryTarget::Board(index)) {
            self.motherboard.refresh_source()?;
        }
        Ok(())
    }

    /// Plugs an already built memory module into a program socket.
    pub fn plug_memory_module(&mut self, index: usize, module: Box<dyn MemoryModule>) -> Result<(), SimError> {
        self.motherboard
            .plug_memory(index, module)
            .map_err(|_| SimError::SlotRejected { index })?;
        if self.touches_source(MemoryTarget::Board(index)) {
            self.motherboard.refresh_source()?;
        }
        Ok(())
    }

    /// Removes the module of a program socket.
    pub fn unplug_memory(&mut self, index: usize) -> Result<Box<dyn MemoryModule>, SimError> {
        let module = self
            .motherboard
            .unplug_memory(index)
            .ok_or(SimError::SlotRejected { index })?;
        if self.touches_source(MemoryTarget::Board(index)) {
            self.motherboard.refresh_source()?;
        }
        Ok(module)
    }

    /// Builds a memory module from the catalog and plugs it into any memory socket,
    /// including the processor's working RAM.
    pub fn plug_memory_at(&mut self, target: MemoryTarget, name: &str, capacity: usize) -> Result<(), SimError> {
        let module = self.catalog.create_memory(name, capacity)?;
        self.plug_memory_module_at(target, module)
    }

    /// Plugs an already built memory module into any memory socket.
    pub fn plug_memory_module_at(&mut self, target: MemoryTarget, module: Box<dyn MemoryModule>) -> Result<(), SimError> {
        match target {
            MemoryTarget::Board(index) => self.plug_memory_module(index, module),
            MemoryTarget::ProcessorRam => self
                .motherboard
                .processor_mut()
                .plug_ram(module)
                .map_err(|_| SimError::SlotRejected { index: RAM_SLOT }),
        }
    }

    /// Removes the module of any memory socket.
    pub fn unplug_memory_at(&mut self, target: MemoryTarget) -> Result<Box<dyn MemoryModule>, SimError> {
        match target {
            MemoryTarget::Board(index) => self.unplug_memory(index),
            MemoryTarget::ProcessorRam => self
                .motherboard
                .processor_mut()
                .unplug_ram()
                .ok_or(SimError::SlotRejected { index: RAM_SLOT }),
        }
    }

    /// Builds a peripheral from the catalog and plugs it into a peripheral socket.
    pub fn plug_peripheral(&mut self, index: usize, name: &str) -> Result<(), SimError> {
        let peripheral = self.catalog.create_peripheral(name)?;
        self.plug_peripheral_device(index, peripheral)
    }

    /// Plugs an already built peripheral into a peripheral socket.
    pub fn plug_peripheral_device(&mut self, index: usize, peripheral: Box<dyn Peripheral>) -> Result<(), SimError> {
        self.motherboard
            .plug_peripheral(index, peripheral)
            .map_err(|_| SimError::SlotRejected { index })
    }

    /// Removes the peripheral of a peripheral socket.
    pub fn unplug_peripheral(&mut self, index: usize) -> Result<Box<dyn Peripheral>, SimError> {
        self.motherboard
            .unplug_peripheral(index)
            .ok_or(SimError::SlotRejected { index })
    }

    /// Empties every pluggable socket of the motherboard, discarding the occupants.
    pub fn unplug_all(&mut self) -> Result<(), SimError> {
        let (modules, peripherals) = self.motherboard.unplug_all();
        debug!(modules = modules.len(), peripherals = peripherals.len(), "sockets emptied");
        self.motherboard.refresh_source()?;
        Ok(())
    }

    /// The UART in peripheral socket `index`, if that is what it holds.
    pub fn uart_mut(&mut self, index: usize) -> Option<&mut Uart> {
        self.motherboard
            .board_mut()
            .peripherals_mut()
            .occupant_mut(index)?
            .as_uart_mut()
    }

    /// The memory controller in peripheral socket `index`, if that is what it holds.
    pub fn memory_controller_mut(&mut self, index: usize) -> Option<&mut MemoryController> {
        self.motherboard
            .board_mut()
            .peripherals_mut()
            .occupant_mut(index)?
            .as_memory_controller_mut()
    }

    /// Soft reset.
    pub fn soft_reset(&mut self) -> Result<(), SimError> {
        Ok(self.motherboard.soft_reset()?)
    }

    /// Hard reset. Statistics are kept.
    pub fn hard_reset(&mut self) -> Result<(), SimError> {
        Ok(self.motherboard.hard_reset()?)
    }

    /// Issues one processor sub-clock.
    pub fn clock(&mut self) -> Result<(), SimError> {
        let before = self.motherboard.processor().state();
        self.motherboard.clock()?;
        self.stats.clocks += 1;
        if before == State::Execution {
            self.stats.instructions += 1;
        }
        Ok(())
    }

    /// Runs one full instruction within the configured resync budget.
    ///
    /// # Returns
    ///
    /// The number of sub-clocks issued, or [`SimError::ResyncTimeout`].
    pub fn step(&mut self) -> Result<usize, SimError> {
        match self.motherboard.step(self.config.simulation.resync_limit) {
            Ok(clocks) => {
                self.stats.clocks += clocks as u64;
                self.stats.instructions += 1;
                Ok(clocks)
            }
            Err(SimError::ResyncTimeout { clocks }) => {
                self.stats.clocks += clocks as u64;
                self.stats.resync_timeouts += 1;
                Err(SimError::ResyncTimeout { clocks })
            }
            Err(err) => Err(err),
        }
    }

    /// Runs `count` instructions, stopping at the first failure.
    ///
    /// # Returns
    ///
    /// The total number of sub-clocks issued.
    pub fn run(&mut self, count: usize) -> Result<usize, SimError> {
        let mut clocks = 0;
        for _ in 0..count {
            clocks += self.step()?;
        }
        Ok(clocks)
    }

    /// Reads a named bus.
    pub fn bus(&self, name: &str) -> Result<u64, SimError> {
        Ok(self.motherboard.wires().buses.get(name)?)
    }

    /// Writes a named bus (truncated to its width).
    pub fn set_bus(&mut self, name: &str, value: u64) -> Result<(), SimError> {
        Ok(self.motherboard.processor_mut().wires.buses.set(name, value)?)
    }

    /// Pulses a named signal high then low.
    pub fn pulse(&mut self, name: &str) -> Result<(), SimError> {
        Ok(self.motherboard.pulse(name)?)
    }

    /// Describes every socket of the machine.
    pub fn slots(&self) -> Vec<SlotReport> {
        let board = self.motherboard.board();
        let source = board.memory().source();
        let memory = board.memory().slots().iter().map(|(index, spec, module)| SlotReport {
            area: SlotArea::Memory,
            index,
            kind: spec.kind.to_string(),
            pluggable: spec.pluggable,
            source: index == source,
            occupant: module.map(|module| describe_module(module.as_ref())),
        });
        let ram = self
            .motherboard
            .processor()
            .ram()
            .slots()
            .iter()
            .map(|(index, spec, module)| SlotReport {
                area: SlotArea::ProcessorRam,
                index,
                kind: spec.kind.to_string(),
                pluggable: spec.pluggable,
                source: false,
                occupant: module.map(|module| describe_module(module.as_ref())),
            });
        let peripherals = board.peripherals().iter().map(|(index, spec, peripheral)| SlotReport {
            area: SlotArea::Peripheral,
            index,
            kind: spec.kind.to_string(),
            pluggable: spec.pluggable,
            source: false,
            occupant: peripheral.map(|peripheral| peripheral.name().to_owned()),
        });
        memory.chain(ram).chain(peripherals).collect()
    }
}

fn describe_module(module: &dyn MemoryModule) -> String {
    format!("{} ({} bytes)", module.kind(), module.capacity())
}
