//! GCM-5.1 motherboard: board state, signal handlers and reset logic.
//!
//! This module assembles the machine. It performs:
//! 1. **Sockets:** Source-capable MM1 sockets for the program and a rack of peripheral
//!    sockets, socket 0 optionally holding the soldered memory controller.
//! 2. **Wiring:** Attaches one handler per processor signal. Handlers act on the
//!    rising edge only and run synchronously inside the processor's clock.
//! 3. **Resets:** Soft reset rewinds the program counter; hard reset also clears the
//!    processor and reselects socket 0 as the program source.
//!
//! The processor owns the wires and is generic over the handler context; the board
//! state lives next to it in [`Board`] so a clock can lend the board to the handlers
//! while the processor is borrowed.

use std::fmt;

use tracing::{debug, warn};

use crate::common::{SimError, WiringError, Wires};
use crate::config::BoardConfig;
use crate::core::processor::wiring::{bus, signal};
use crate::core::processor::{Processor, State};
use crate::soc::devices::MemoryController;
use crate::soc::memory::{MemoryBank, MemoryKind, MemoryModule};
use crate::soc::peripheral::{Peripheral, PeripheralKind};
use crate::soc::slots::{SlotSpec, SlotTable};

/// Catalog name of this board.
pub const GCM_5_1_NAME: &str = "GCM_5_1";

/// Peripheral socket reserved for the memory controller.
pub const MEMORY_CONTROLLER_SLOT: usize = 0;

/// Board-side state handed to every signal handler.
pub struct Board {
    program_counter: u64,
    memory: MemoryBank,
    peripherals: SlotTable<Box<dyn Peripheral>>,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("program_counter", &self.program_counter)
            .field("memory", &self.memory)
            .field("peripherals", &self.peripherals)
            .finish()
    }
}

impl Board {
    /// Builds the socket layout described by `config`.
    pub fn new(config: &BoardConfig) -> Self {
        let memory = MemoryBank::new(
            (0..config.source_slots).map(|_| SlotSpec::source(MemoryKind::Mm1)),
            config.address_bits,
        );

        let peripherals = SlotTable::new((0..config.peripheral_slots).map(|index| {
            if index == MEMORY_CONTROLLER_SLOT && config.memory_controller {
                SlotSpec::fixed(PeripheralKind::Hardware)
            } else {
                SlotSpec::pluggable(PeripheralKind::Pp1)
            }
        }));

        let mut board = Self {
            program_counter: 0,
            memory,
            peripherals,
        };
        if config.memory_controller {
            let controller: Box<dyn Peripheral> = Box::new(MemoryController::new());
            if board
                .peripherals
                .install(MEMORY_CONTROLLER_SLOT, controller)
                .is_err()
            {
                warn!("no socket for the memory controller");
            }
        }
        board
    }

    /// Current program counter.
    pub const fn program_counter(&self) -> u64 {
        self.program_counter
    }

    /// Program memory sockets.
    pub const fn memory(&self) -> &MemoryBank {
        &self.memory
    }

    /// Program memory sockets, for plugging and loading.
    pub fn memory_mut(&mut self) -> &mut MemoryBank {
        &mut self.memory
    }

    /// Peripheral sockets.
    pub const fn peripherals(&self) -> &SlotTable<Box<dyn Peripheral>> {
        &self.peripherals
    }

    /// Peripheral sockets, for plugging and inspection.
    pub fn peripherals_mut(&mut self) -> &mut SlotTable<Box<dyn Peripheral>> {
        &mut self.peripherals
    }

    /// Copies the byte at the program counter onto `BDATASRC`.
    ///
    /// An empty source socket or an out-of-range address reads as 0.
    pub fn refresh_source(&self, wires: &mut Wires<Self>) -> Result<(), WiringError> {
        let byte = self.memory.read_source(self.program_counter).unwrap_or(0);
        wires.buses.set(bus::BDATASRC, u64::from(byte))
    }

    /// Loads the program counter (truncated to the address width) and refreshes `BDATASRC`.
    pub fn set_program_counter(&mut self, value: u64, wires: &mut Wires<Self>) -> Result<(), WiringError> {
        self.program_counter = value & self.memory.address_mask();
        self.refresh_source(wires)
    }

    fn on_fetch_advance(board: &mut Self, wires: &mut Wires<Self>, level: bool) -> Result<(), WiringError> {
        if !level {
            return Ok(());
        }
        let next = board.program_counter.wrapping_add(1);
        board.set_program_counter(next, wires)
    }

    fn on_jump(board: &mut Self, wires: &mut Wires<Self>, level: bool) -> Result<(), WiringError> {
        if !level {
            return Ok(());
        }
        let target = wires.buses.get(bus::BJMPSRC)?;
        debug!(from = board.program_counter, to = target, "jump");
        board.set_program_counter(target, wires)
    }

    fn on_peripheral_clock(board: &mut Self, wires: &mut Wires<Self>, level: bool) -> Result<(), WiringError> {
        if !level {
            return Ok(());
        }
        let selected = wires.buses.get(bus::BPCS)? as usize;
        wires.buses.set(bus::BREAD1, 0)?;
        wires.buses.set(bus::BREAD2, 0)?;
        for (index, peripheral) in board.peripherals.occupants_mut() {
            peripheral.select(index == selected);
            peripheral.update(wires)?;
        }
        Ok(())
    }

    fn on_external_1(_board: &mut Self, wires: &mut Wires<Self>, level: bool) -> Result<(), WiringError> {
        if level {
            wires.buses.copy(bus::BWRITE1, bus::NUMBER)?;
        }
        Ok(())
    }

    fn on_external_2(_board: &mut Self, wires: &mut Wires<Self>, level: bool) -> Result<(), WiringError> {
        if level {
            wires.buses.copy(bus::BWRITE2, bus::NUMBER)?;
        }
        Ok(())
    }
}

/// The GCM-5.1 motherboard with its processor.
#[derive(Debug)]
pub struct Motherboard {
    processor: Processor<Board>,
    board: Board,
}

impl Motherboard {
    /// Assembles a board around `processor` and attaches the signal handlers.
    ///
    /// # Arguments
    ///
    /// * `config` - Socket layout.
    /// * `processor` - A freshly built processor; any subscribers it carries are replaced.
    ///
    /// # Returns
    ///
    /// The board in hard-reset state, or a wiring error if the processor lacks a signal.
    pub fn new(config: &BoardConfig, mut processor: Processor<Board>) -> Result<Self, WiringError> {
        let signals = &mut processor.wires.signals;
        signals.attach(signal::ADDSRC_CLK, Board::on_fetch_advance)?;
        signals.attach(signal::JMPSRC_CLK, Board::on_jump)?;
        signals.attach(signal::PERIPHERAL_CLK, Board::on_peripheral_clock)?;
        signals.attach(signal::SELECTING_RBEXT1, Board::on_external_1)?;
        signals.attach(signal::SELECTING_RBEXT2, Board::on_external_2)?;

        let mut motherboard = Self {
            processor,
            board: Board::new(config),
        };
        motherboard.hard_reset()?;
        Ok(motherboard)
    }

    /// Catalog name of the board.
    pub fn name(&self) -> &'static str {
        GCM_5_1_NAME
    }

    /// The processor.
    pub const fn processor(&self) -> &Processor<Board> {
        &self.processor
    }

    /// The processor, for direct register and bus access.
    pub fn processor_mut(&mut self) -> &mut Processor<Board> {
        &mut self.processor
    }

    /// Board state.
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Board state, for socket access.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Buses and signals.
    pub const fn wires(&self) -> &Wires<Board> {
        &self.processor.wires
    }

    /// Current program counter.
    pub const fn program_counter(&self) -> u64 {
        self.board.program_counter
    }

    /// Loads the program counter and refreshes `BDATASRC`.
    pub fn set_program_counter(&mut self, value: u64) -> Result<(), WiringError> {
        self.board.set_program_counter(value, &mut self.processor.wires)
    }

    /// Re-reads `BDATASRC` from the source socket at the program counter.
    pub fn refresh_source(&mut self) -> Result<(), WiringError> {
        self.board.refresh_source(&mut self.processor.wires)
    }

    /// Drives a signal to `level`, running its handler against this board.
    pub fn call(&mut self, name: &str, level: bool) -> Result<(), WiringError> {
        self.processor.wires.call(name, level, &mut self.board)
    }

    /// Pulses a signal high then low, running its handler against this board.
    pub fn pulse(&mut self, name: &str) -> Result<(), WiringError> {
        self.processor.wires.pulse(name, &mut self.board)
    }

    /// Advances the processor by one sub-clock.
    pub fn clock(&mut self) -> Result<(), WiringError> {
        self.processor.clock(&mut self.board)
    }

    /// Clocks at least once and until the processor is back at `SyncBit`.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of sub-clocks to issue.
    ///
    /// # Returns
    ///
    /// The number of sub-clocks issued, or [`SimError::ResyncTimeout`] once `limit` is
    /// spent without resynchronizing.
    pub fn step(&mut self, limit: usize) -> Result<usize, SimError> {
        let mut clocks = 0;
        while clocks < limit {
            self.clock()?;
            clocks += 1;
            if self.processor.state() == State::SyncBit {
                return Ok(clocks);
            }
        }
        warn!(clocks, "processor did not resynchronize");
        Err(SimError::ResyncTimeout { clocks })
    }

    /// Rewinds the program counter and returns the processor to `SyncBit`.
    pub fn soft_reset(&mut self) -> Result<(), WiringError> {
        debug!("soft reset");
        self.set_program_counter(0)?;
        self.processor.soft_reset();
        Ok(())
    }

    /// Clears the processor, reselects socket 0 as the source and rewinds the program counter.
    pub fn hard_reset(&mut self) -> Result<(), WiringError> {
        debug!("hard reset");
        self.processor.hard_reset();
        let _ = self.board.memory.select_source(0);
        self.set_program_counter(0)
    }

    /// Selects the program source socket and refreshes `BDATASRC`.
    pub fn select_source(&mut self, index: usize) -> Result<bool, WiringError> {
        if !self.board.memory.select_source(index) {
            return Ok(false);
        }
        self.refresh_source()?;
        Ok(true)
    }

    /// Plugs a memory module into a program socket, handing it back on rejection.
    ///
    /// `BDATASRC` is not refreshed; follow with [`refresh_source`](Self::refresh_source)
    /// or a reset when plugging into the source socket.
    pub fn plug_memory(&mut self, index: usize, module: Box<dyn MemoryModule>) -> Result<(), Box<dyn MemoryModule>> {
        match self.board.memory.slots_mut().plug(index, module) {
            Ok(()) => {
                debug!(slot = index, "memory plugged");
                Ok(())
            }
            Err(module) => {
                warn!(slot = index, "memory plug rejected");
                Err(module)
            }
        }
    }

    /// Removes the module of a program socket.
    pub fn unplug_memory(&mut self, index: usize) -> Option<Box<dyn MemoryModule>> {
        let module = self.board.memory.slots_mut().unplug(index);
        if module.is_some() {
            debug!(slot = index, "memory unplugged");
        }
        module
    }

    /// Plugs a peripheral into a peripheral socket, handing it back on rejection.
    pub fn plug_peripheral(&mut self, index: usize, peripheral: Box<dyn Peripheral>) -> Result<(), Box<dyn Peripheral>> {
        let name = peripheral.name().to_owned();
        match self.board.peripherals.plug(index, peripheral) {
            Ok(()) => {
                debug!(slot = index, peripheral = %name, "peripheral plugged");
                Ok(())
            }
            Err(peripheral) => {
                warn!(slot = index, peripheral = %name, "peripheral plug rejected");
                Err(peripheral)
            }
        }
    }

    /// Removes the peripheral of a pluggable peripheral socket.
    pub fn unplug_peripheral(&mut self, index: usize) -> Option<Box<dyn Peripheral>> {
        let peripheral = self.board.peripherals.unplug(index);
        if peripheral.is_some() {
            debug!(slot = index, "peripheral unplugged");
        }
        peripheral
    }

    /// Empties every pluggable memory and peripheral socket.
    pub fn unplug_all(&mut self) -> (Vec<Box<dyn MemoryModule>>, Vec<Box<dyn Peripheral>>) {
        debug!("unplugging every socket");
        let modules = self.board.memory.slots_mut().unplug_all();
        let peripherals = self.board.peripherals.unplug_all();
        (modules, peripherals)
    }
}
