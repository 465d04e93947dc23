//! GP8B processor definition and initialization.
//!
//! This module defines the `Processor`, the owner of every bus and signal of the
//! machine. It coordinates the following:
//! 1. **Wiring:** Declares the buses and signals listed in [`wiring`]; the board
//!    attaches its handlers to them after construction.
//! 2. **State machine:** Three sub-clocks per instruction (`SyncBit`,
//!    `InstructionSet`, `Execution`), see [`execution`].
//! 3. **Arithmetic:** A boxed [`Alu`] recomputed on every operand write.
//! 4. **Working RAM:** One pluggable MM1 socket addressed by a 16-bit register built
//!    from two latched bytes.
//!
//! The processor is generic over the context `C` its signal subscribers receive, so a
//! board can own the processor next to its own state and lend itself to the handlers.

/// Fetch, decode and execute.
pub mod execution;

/// Bus and signal names.
pub mod wiring;

use std::fmt;

use tracing::debug;

use crate::common::{WiringError, Wires};
use crate::core::alu::Alu;
use crate::soc::memory::{MemoryBank, MemoryKind, MemoryModule};
use crate::soc::slots::SlotSpec;

/// Width of the working-RAM address register.
pub const RAM_ADDRESS_BITS: u8 = 16;

/// Socket index of the working RAM module.
pub const RAM_SLOT: usize = 0;

/// Position in the three-phase instruction cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// Synchronization edge; the next clock starts an instruction.
    #[default]
    SyncBit,
    /// Fetch and decode.
    InstructionSet,
    /// Dispatch on the opcode.
    Execution,
}

/// The GP8B processor.
pub struct Processor<C> {
    /// Buses and signals of the whole machine.
    pub wires: Wires<C>,
    alu: Box<dyn Alu>,
    ram: MemoryBank,
    state: State,
    instruction: u8,
    argument: u8,
    ram_address: u16,
}

impl<C> fmt::Debug for Processor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processor")
            .field("wires", &self.wires)
            .field("alu_result", &self.alu.result())
            .field("ram", &self.ram)
            .field("state", &self.state)
            .field("instruction", &self.instruction)
            .field("argument", &self.argument)
            .field("ram_address", &self.ram_address)
            .finish()
    }
}

impl<C> Processor<C> {
    /// Creates a processor with its buses and signals declared and no subscribers.
    ///
    /// # Arguments
    ///
    /// * `alu` - Arithmetic unit driven by the `OP*_CLK` opcodes.
    /// * `ram` - Working RAM plugged into the RAM socket, if any.
    ///
    /// # Returns
    ///
    /// A processor in `SyncBit` with every bus at 0.
    pub fn new(alu: Box<dyn Alu>, ram: Option<Box<dyn MemoryModule>>) -> Result<Self, WiringError> {
        let mut wires = Wires::new();
        wiring::declare(&mut wires)?;

        let mut processor = Self {
            wires,
            alu,
            ram: MemoryBank::new([SlotSpec::pluggable(MemoryKind::Mm1)], RAM_ADDRESS_BITS),
            state: State::SyncBit,
            instruction: 0,
            argument: 0,
            ram_address: 0,
        };
        if let Some(module) = ram {
            if processor.plug_ram(module).is_err() {
                debug!("working RAM rejected by its socket");
            }
        }
        Ok(processor)
    }

    /// Current position in the instruction cycle.
    pub const fn state(&self) -> State {
        self.state
    }

    /// Last latched instruction byte.
    pub const fn instruction(&self) -> u8 {
        self.instruction
    }

    /// Last decoded argument.
    pub const fn argument(&self) -> u8 {
        self.argument
    }

    /// Working-RAM address register.
    pub const fn ram_address(&self) -> u16 {
        self.ram_address
    }

    /// The ALU.
    pub fn alu(&self) -> &dyn Alu {
        self.alu.as_ref()
    }

    /// The ALU, for direct register access.
    pub fn alu_mut(&mut self) -> &mut (dyn Alu + 'static) {
        self.alu.as_mut()
    }

    /// Working-RAM socket bank.
    pub const fn ram(&self) -> &MemoryBank {
        &self.ram
    }

    /// Working-RAM socket bank, for plugging and inspection.
    pub fn ram_mut(&mut self) -> &mut MemoryBank {
        &mut self.ram
    }

    /// Plugs a module into the working-RAM socket, handing it back on rejection.
    pub fn plug_ram(&mut self, module: Box<dyn MemoryModule>) -> Result<(), Box<dyn MemoryModule>> {
        self.ram.slots_mut().plug(RAM_SLOT, module)?;
        debug!("working RAM plugged");
        Ok(())
    }

    /// Removes the working-RAM module. `RAM` reads yield 0 and `RAMW` is dropped until
    /// a module is plugged again.
    pub fn unplug_ram(&mut self) -> Option<Box<dyn MemoryModule>> {
        let module = self.ram.slots_mut().unplug(RAM_SLOT);
        if module.is_some() {
            debug!("working RAM unplugged");
        }
        module
    }

    /// Returns to `SyncBit`; registers, buses and memory are untouched.
    pub fn soft_reset(&mut self) {
        self.state = State::SyncBit;
    }

    /// Soft reset plus clearing every latch, bus and ALU register.
    pub fn hard_reset(&mut self) {
        self.soft_reset();
        self.instruction = 0;
        self.argument = 0;
        self.ram_address = 0;
        self.wires.buses.clear();
        self.alu.reset();
    }
}
