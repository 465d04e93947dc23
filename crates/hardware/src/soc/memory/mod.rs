//! Addressable memory modules and memory banks.
//!
//! This module provides:
//! 1. **Contract:** The [`MemoryModule`] trait: range-checked byte and block access that
//!    reports failure as `false`/`None` and never panics.
//! 2. **Modules:** [`Mm1`], the fixed-capacity byte array module.
//! 3. **Banks:** [`MemoryBank`], a slot table of memory sockets with an address width
//!    and a selected program-source socket.

/// The MM1 memory module.
pub mod mm1;

use std::fmt;

use tracing::debug;

use crate::soc::slots::{SlotOccupant, SlotSpec, SlotTable};

pub use mm1::Mm1;

/// Device-type tag of memory modules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemoryKind {
    /// MM1 byte-array module (16, 32 or 64 KiB).
    Mm1,
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mm1 => f.write_str("MM1"),
        }
    }
}

/// Byte-addressable storage that can sit in a memory socket.
pub trait MemoryModule {
    /// Device-type tag used for socket compatibility checks.
    fn kind(&self) -> MemoryKind;

    /// Capacity in bytes.
    fn capacity(&self) -> usize;

    /// Reads the byte at `address`, `None` when out of range.
    fn get(&self, address: usize) -> Option<u8>;

    /// Writes the byte at `address`; returns `false` and leaves storage untouched when out of range.
    fn set(&mut self, address: usize, value: u8) -> bool;

    /// Fills `out` from `address` onward.
    ///
    /// Fails on an empty request or when `address + out.len()` is not strictly below the
    /// capacity.
    fn get_block(&self, address: usize, out: &mut [u8]) -> bool;

    /// Writes `data` from `address` onward under the same range rule as
    /// [`get_block`](MemoryModule::get_block).
    fn set_block(&mut self, address: usize, data: &[u8]) -> bool;
}

impl SlotOccupant for Box<dyn MemoryModule> {
    type Kind = MemoryKind;

    fn kind(&self) -> MemoryKind {
        MemoryModule::kind(self.as_ref())
    }
}

/// A set of memory sockets sharing one address width.
pub struct MemoryBank {
    slots: SlotTable<Box<dyn MemoryModule>>,
    source: usize,
    address_bits: u8,
}

impl fmt::Debug for MemoryBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBank")
            .field("slots", &self.slots)
            .field("source", &self.source)
            .field("address_bits", &self.address_bits)
            .finish()
    }
}

impl MemoryBank {
    /// Creates a bank of empty sockets.
    ///
    /// # Arguments
    ///
    /// * `specs` - One spec per socket.
    /// * `address_bits` - Width of addresses presented to this bank (clamped to 1..=64).
    pub fn new(specs: impl IntoIterator<Item = SlotSpec<MemoryKind>>, address_bits: u8) -> Self {
        Self {
            slots: SlotTable::new(specs),
            source: 0,
            address_bits: address_bits.clamp(1, 64),
        }
    }

    /// Width of addresses presented to this bank.
    pub const fn address_bits(&self) -> u8 {
        self.address_bits
    }

    /// Mask applied to every address presented to this bank.
    pub const fn address_mask(&self) -> u64 {
        if self.address_bits >= 64 {
            u64::MAX
        } else {
            (1u64 << self.address_bits) - 1
        }
    }

    /// The socket table.
    pub const fn slots(&self) -> &SlotTable<Box<dyn MemoryModule>> {
        &self.slots
    }

    /// The socket table, for plugging and unplugging.
    pub fn slots_mut(&mut self) -> &mut SlotTable<Box<dyn MemoryModule>> {
        &mut self.slots
    }

    /// Index of the selected program-source socket.
    pub const fn source(&self) -> usize {
        self.source
    }

    /// Selects socket `index` as the program source.
    ///
    /// # Returns
    ///
    /// `false` (selection unchanged) unless the socket exists and is source-capable.
    pub fn select_source(&mut self, index: usize) -> bool {
        match self.slots.spec(index) {
            Some(spec) if spec.source_capable => {
                debug!(slot = index, "source slot selected");
                self.source = index;
                true
            }
            _ => false,
        }
    }

    /// Returns the module in socket `index`.
    pub fn module(&self, index: usize) -> Option<&dyn MemoryModule> {
        self.slots.occupant(index).map(AsRef::as_ref)
    }

    /// Returns the module in socket `index` for mutation.
    pub fn module_mut(&mut self, index: usize) -> Option<&mut (dyn MemoryModule + 'static)> {
        self.slots.occupant_mut(index).map(AsMut::as_mut)
    }

    /// Reads a byte from socket `index`; `None` when empty, above the address width,
    /// or out of the module's range.
    pub fn read(&self, index: usize, address: u64) -> Option<u8> {
        if address & !self.address_mask() != 0 {
            return None;
        }
        self.module(index)?.get(usize::try_from(address).ok()?)
    }

    /// Writes a byte to socket `index`; `false` under the same conditions as [`read`](Self::read).
    pub fn write(&mut self, index: usize, address: u64, value: u8) -> bool {
        if address & !self.address_mask() != 0 {
            return false;
        }
        let Ok(address) = usize::try_from(address) else {
            return false;
        };
        self.module_mut(index)
            .is_some_and(|module| module.set(address, value))
    }

    /// Reads a byte from the selected source socket.
    pub fn read_source(&self, address: u64) -> Option<u8> {
        self.read(self.source, address)
    }
}
