//! Instruction cycle.
//!
//! Each instruction takes three clocks:
//! 1. **SyncBit:** No side effect; moves to `InstructionSet`.
//! 2. **InstructionSet:** Latches `BDATASRC` as the instruction, pulses `ADDSRC_CLK` so
//!    the board advances the program counter, decodes the argument from the selected
//!    source and mirrors it onto `NUMBER`.
//! 3. **Execution:** Dispatches on the opcode, then, when the argument was the inline
//!    stream byte, pulses `ADDSRC_CLK` once more to step past it.

use tracing::trace;

use super::wiring::{bus, signal};
use super::{Processor, RAM_SLOT, State};
use crate::common::WiringError;
use crate::isa::disasm::disassemble_one;
use crate::isa::{ArgumentSource, Instruction, Opcode};

impl<C> Processor<C> {
    /// Advances the state machine by one clock.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Context handed to every signal subscriber fired during this clock.
    ///
    /// # Returns
    ///
    /// A wiring error if a bus or signal is missing; the state is left unchanged then.
    pub fn clock(&mut self, ctx: &mut C) -> Result<(), WiringError> {
        trace!(state = ?self.state, "clock");
        match self.state {
            State::SyncBit => {
                self.state = State::InstructionSet;
            }
            State::InstructionSet => {
                self.instruction = self.wires.buses.get(bus::BDATASRC)? as u8;
                self.wires.pulse(signal::ADDSRC_CLK, ctx)?;
                self.argument = self.fetch_argument(ctx)?;
                self.wires.buses.set(bus::NUMBER, u64::from(self.argument))?;
                self.state = State::Execution;
            }
            State::Execution => {
                self.execute(ctx)?;
                self.state = State::SyncBit;
            }
        }
        Ok(())
    }

    fn fetch_argument(&mut self, ctx: &mut C) -> Result<u8, WiringError> {
        let inst = Instruction::decode(self.instruction);
        let value = match inst.source {
            ArgumentSource::Source => self.wires.buses.get(bus::BDATASRC)?,
            ArgumentSource::Bread1 => self.wires.buses.get(bus::BREAD1)?,
            ArgumentSource::Bread2 => self.wires.buses.get(bus::BREAD2)?,
            ArgumentSource::Result => u64::from(self.alu.result()),
            ArgumentSource::Ram => u64::from(
                self.ram
                    .read(RAM_SLOT, u64::from(self.ram_address))
                    .unwrap_or(0),
            ),
            ArgumentSource::Spi => 0,
            ArgumentSource::Ext1 => {
                self.wires.pulse(signal::SELECTING_RBEXT1, ctx)?;
                self.wires.buses.get(bus::NUMBER)?
            }
            ArgumentSource::Ext2 => {
                self.wires.pulse(signal::SELECTING_RBEXT2, ctx)?;
                self.wires.buses.get(bus::NUMBER)?
            }
        };
        Ok(value as u8)
    }

    fn execute(&mut self, ctx: &mut C) -> Result<(), WiringError> {
        let inst = Instruction::decode(self.instruction);
        let arg = self.argument;
        trace!(
            instruction = %disassemble_one(self.instruction, inst.reads_stream().then_some(arg)),
            "execute"
        );

        match inst.opcode {
            Some(Opcode::Bwrite1Clk) => self.wires.buses.set(bus::BWRITE1, u64::from(arg))?,
            Some(Opcode::Bwrite2Clk) => self.wires.buses.set(bus::BWRITE2, u64::from(arg))?,
            Some(Opcode::BpcsClk) => self.wires.buses.set(bus::BPCS, u64::from(arg))?,
            Some(Opcode::OpLeftClk) => self.alu.set_operation_left(arg),
            Some(Opcode::OpRightClk) => self.alu.set_operation_right(arg),
            Some(Opcode::OpChooseClk) => self.alu.set_operation(arg),
            Some(Opcode::PeripheralClk) => self.wires.pulse(signal::PERIPHERAL_CLK, ctx)?,
            Some(Opcode::Bjmpsrc1Clk) => self.set_jump_byte(16, arg)?,
            Some(Opcode::Bjmpsrc2Clk) => self.set_jump_byte(8, arg)?,
            Some(Opcode::Bjmpsrc3Clk) => self.set_jump_byte(0, arg)?,
            Some(Opcode::JmpsrcClk) => self.wires.pulse(signal::JMPSRC_CLK, ctx)?,
            Some(Opcode::Bramadd1Clk) => {
                self.ram_address = (self.ram_address & 0x00FF) | (u16::from(arg) << 8);
            }
            Some(Opcode::Bramadd2Clk) => {
                self.ram_address = (self.ram_address & 0xFF00) | u16::from(arg);
            }
            Some(Opcode::SpiClk) => self.wires.pulse(signal::SPI_CLK, ctx)?,
            Some(Opcode::If) => {
                if arg != 0 {
                    self.wires.pulse(signal::ADDSRC_CLK, ctx)?;
                }
            }
            Some(Opcode::IfNot) => {
                if arg == 0 {
                    self.wires.pulse(signal::ADDSRC_CLK, ctx)?;
                }
            }
            Some(Opcode::RamW) => {
                let written = self.ram.write(RAM_SLOT, u64::from(self.ram_address), arg);
                trace!(address = self.ram_address, value = arg, written, "ram write");
            }
            Some(Opcode::BcfgSpiClk | Opcode::Stick | Opcode::Ltick) | None => {
                trace!(instruction = self.instruction, "no-op");
            }
        }

        if inst.reads_stream() {
            self.wires.pulse(signal::ADDSRC_CLK, ctx)?;
        }
        Ok(())
    }

    fn set_jump_byte(&mut self, shift: u32, value: u8) -> Result<(), WiringError> {
        let target = self.wires.buses.get(bus::BJMPSRC)?;
        let target = (target & !(0xFF << shift)) | (u64::from(value) << shift);
        self.wires.buses.set(bus::BJMPSRC, target)
    }
}
