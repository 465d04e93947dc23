//! Device catalog: constructors for every device type, keyed by name.
//!
//! The catalog is an explicit value built by whoever assembles the machine, so there
//! is no process-wide registry. It provides:
//! 1. **Memory modules:** Built from a type name and a capacity; a capacity the type is
//!    not made in is rejected.
//! 2. **Peripherals:** Built from a type name.
//! 3. **Motherboards:** Built from a type name and a [`Config`], using the catalog
//!    itself for the processor's working RAM.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::common::SimError;
use crate::config::Config;
use crate::core::alu::Aluminium;
use crate::core::processor::Processor;
use crate::soc::devices::memory_controller::MEMORY_CONTROLLER_NAME;
use crate::soc::devices::uart::UART_NAME;
use crate::soc::devices::{MemoryController, Uart};
use crate::soc::memory::{MemoryModule, Mm1};
use crate::soc::motherboard::{GCM_5_1_NAME, Motherboard};
use crate::soc::peripheral::Peripheral;

/// Catalog name of the MM1 memory module.
pub const MM1_NAME: &str = "MM1";

/// Builds a memory module of the given capacity, `None` if the type is not made in it.
pub type MemoryFactory = fn(usize) -> Option<Box<dyn MemoryModule>>;

/// Builds a peripheral.
pub type PeripheralFactory = fn() -> Box<dyn Peripheral>;

/// Builds a motherboard from a configuration, drawing sub-devices from the catalog.
pub type MotherboardFactory = fn(&Config, &DeviceCatalog) -> Result<Motherboard, SimError>;

/// Registry of device constructors.
#[derive(Clone, Default)]
pub struct DeviceCatalog {
    memories: BTreeMap<String, MemoryFactory>,
    peripherals: BTreeMap<String, PeripheralFactory>,
    motherboards: BTreeMap<String, MotherboardFactory>,
}

impl fmt::Debug for DeviceCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceCatalog")
            .field("memories", &self.memory_names())
            .field("peripherals", &self.peripheral_names())
            .field("motherboards", &self.motherboard_names())
            .finish()
    }
}

impl DeviceCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog holding every built-in device.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        let _ = catalog.register_memory(MM1_NAME, build_mm1);
        let _ = catalog.register_peripheral(UART_NAME, build_uart);
        let _ = catalog.register_peripheral(MEMORY_CONTROLLER_NAME, build_memory_controller);
        let _ = catalog.register_motherboard(GCM_5_1_NAME, build_gcm_5_1);
        catalog
    }

    /// Registers a memory module type; an existing registration is kept and `false` returned.
    pub fn register_memory(&mut self, name: &str, factory: MemoryFactory) -> bool {
        register(&mut self.memories, name, factory)
    }

    /// Registers a peripheral type; an existing registration is kept and `false` returned.
    pub fn register_peripheral(&mut self, name: &str, factory: PeripheralFactory) -> bool {
        register(&mut self.peripherals, name, factory)
    }

    /// Registers a motherboard type; an existing registration is kept and `false` returned.
    pub fn register_motherboard(&mut self, name: &str, factory: MotherboardFactory) -> bool {
        register(&mut self.motherboards, name, factory)
    }

    /// Builds a memory module.
    ///
    /// # Returns
    ///
    /// [`SimError::UnknownDevice`] for an unknown name or an unsupported capacity.
    pub fn create_memory(&self, name: &str, capacity: usize) -> Result<Box<dyn MemoryModule>, SimError> {
        self.memories
            .get(name)
            .and_then(|factory| factory(capacity))
            .ok_or_else(|| SimError::UnknownDevice(format!("{name} ({capacity} bytes)")))
    }

    /// Builds a peripheral.
    pub fn create_peripheral(&self, name: &str) -> Result<Box<dyn Peripheral>, SimError> {
        self.peripherals
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| SimError::UnknownDevice(name.to_owned()))
    }

    /// Builds a motherboard.
    pub fn create_motherboard(&self, name: &str, config: &Config) -> Result<Motherboard, SimError> {
        let factory = self
            .motherboards
            .get(name)
            .ok_or_else(|| SimError::UnknownDevice(name.to_owned()))?;
        factory(config, self)
    }

    /// Registered memory module names, sorted.
    pub fn memory_names(&self) -> Vec<&str> {
        self.memories.keys().map(String::as_str).collect()
    }

    /// Registered peripheral names, sorted.
    pub fn peripheral_names(&self) -> Vec<&str> {
        self.peripherals.keys().map(String::as_str).collect()
    }

    /// Registered motherboard names, sorted.
    pub fn motherboard_names(&self) -> Vec<&str> {
        self.motherboards.keys().map(String::as_str).collect()
    }
}

fn register<F>(map: &mut BTreeMap<String, F>, name: &str, factory: F) -> bool {
    if map.contains_key(name) {
        debug!(device = name, "duplicate registration ignored");
        return false;
    }
    let _ = map.insert(name.to_owned(), factory);
    true
}

fn build_mm1(capacity: usize) -> Option<Box<dyn MemoryModule>> {
    Mm1::with_capacity(capacity).map(|module| Box::new(module) as Box<dyn MemoryModule>)
}

fn build_uart() -> Box<dyn Peripheral> {
    Box::new(Uart::new())
}

fn build_memory_controller() -> Box<dyn Peripheral> {
    Box::new(MemoryController::new())
}

fn build_gcm_5_1(config: &Config, catalog: &DeviceCatalog) -> Result<Motherboard, SimError> {
    let ram = catalog.create_memory(&config.processor.ram_kind, config.processor.ram_capacity)?;
    let processor = Processor::new(Box::new(Aluminium::new()), Some(ram))?;
    Ok(Motherboard::new(&config.board, processor)?)
}
