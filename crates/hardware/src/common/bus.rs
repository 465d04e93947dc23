//! Fixed-width buses and the named bus registry.
//!
//! A [`Bus`] models a bundle of wires: whatever is written to it is truncated to its
//! bit width, because the extra bits simply do not exist on a narrower wire. The
//! [`BusMap`] is the shared namespace through which the processor, the motherboard and
//! every peripheral reach the same wires by name.

use std::collections::BTreeMap;

use super::error::WiringError;

/// Widest bus the engine can model.
pub const MAX_BUS_WIDTH: u8 = 64;

/// A fixed-width register modeling a physical wire bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bus {
    width: u8,
    value: u64,
}

impl Bus {
    /// Creates a bus of `width` bits holding zero.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of wires, `1..=64`.
    ///
    /// # Returns
    ///
    /// The bus, or [`WiringError::InvalidBusWidth`] for a width of 0 or above 64.
    pub const fn new(width: u8) -> Result<Self, WiringError> {
        if width == 0 || width > MAX_BUS_WIDTH {
            return Err(WiringError::InvalidBusWidth(width));
        }
        Ok(Self { width, value: 0 })
    }

    /// Returns the bus width in bits.
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Returns the mask of bits that exist on this bus.
    pub const fn mask(&self) -> u64 {
        if self.width == MAX_BUS_WIDTH {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }

    /// Stores `value` truncated to the bus width.
    pub const fn set(&mut self, value: u64) {
        self.value = value & self.mask();
    }

    /// Returns the stored (already truncated) value.
    pub const fn get(&self) -> u64 {
        self.value
    }

    /// Copies another bus onto this one, truncating to this bus's width.
    ///
    /// The source is never widened or truncated: only the destination's width applies.
    pub const fn assign(&mut self, source: &Self) {
        self.set(source.value);
    }

    /// ORs `value` into the bus, modeling several open-collector drivers on one wire.
    pub const fn drive(&mut self, value: u64) {
        self.value = (self.value | value) & self.mask();
    }
}

/// Named collection of buses forming the backplane namespace.
#[derive(Clone, Debug, Default)]
pub struct BusMap {
    buses: BTreeMap<String, Bus>,
}

impl BusMap {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new bus of `width` bits under `name`.
    ///
    /// # Returns
    ///
    /// An error if the width is invalid or the name is already taken.
    pub fn declare(&mut self, name: &str, width: u8) -> Result<(), WiringError> {
        let bus = Bus::new(width)?;
        if self.buses.contains_key(name) {
            return Err(WiringError::DuplicateBus(name.to_owned()));
        }
        let _ = self.buses.insert(name.to_owned(), bus);
        Ok(())
    }

    /// Returns `true` if a bus is declared under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.buses.contains_key(name)
    }

    /// Number of declared buses.
    pub fn len(&self) -> usize {
        self.buses.len()
    }

    /// Returns `true` if no bus is declared.
    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }

    /// Looks up a bus by name.
    pub fn bus(&self, name: &str) -> Result<&Bus, WiringError> {
        self.buses
            .get(name)
            .ok_or_else(|| WiringError::UnknownBus(name.to_owned()))
    }

    /// Looks up a bus by name for writing.
    pub fn bus_mut(&mut self, name: &str) -> Result<&mut Bus, WiringError> {
        self.buses
            .get_mut(name)
            .ok_or_else(|| WiringError::UnknownBus(name.to_owned()))
    }

    /// Reads the value of the named bus.
    pub fn get(&self, name: &str) -> Result<u64, WiringError> {
        Ok(self.bus(name)?.get())
    }

    /// Writes `value` (truncated) to the named bus.
    pub fn set(&mut self, name: &str, value: u64) -> Result<(), WiringError> {
        self.bus_mut(name)?.set(value);
        Ok(())
    }

    /// Wired-OR drive of the named bus.
    pub fn drive(&mut self, name: &str, value: u64) -> Result<(), WiringError> {
        self.bus_mut(name)?.drive(value);
        Ok(())
    }

    /// Copies bus `from` onto bus `to`, truncated to the width of `to`.
    pub fn copy(&mut self, from: &str, to: &str) -> Result<(), WiringError> {
        let source = *self.bus(from)?;
        self.bus_mut(to)?.assign(&source);
        Ok(())
    }

    /// Iterates over `(name, bus)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bus)> {
        self.buses.iter().map(|(name, bus)| (name.as_str(), bus))
    }

    /// Zeroes every bus.
    pub fn clear(&mut self) {
        for bus in self.buses.values_mut() {
            bus.set(0);
        }
    }
}
