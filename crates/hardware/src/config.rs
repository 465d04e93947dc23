//! Configuration system for the backplane simulator.
//!
//! This module defines the configuration structures used to assemble a machine. It
//! provides:
//! 1. **Defaults:** The reference GCM-5.1 board with a GP8B processor.
//! 2. **Structures:** Hierarchical config for the board, the processor and the
//!    simulation loop.
//!
//! Every field is optional in JSON; missing fields take the reference value. Use
//! `Config::default()` for the reference machine or [`Config::from_json`] for a
//! document.

use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Number of pluggable, source-capable MM1 sockets on the board.
    pub const SOURCE_SLOTS: usize = 2;

    /// Number of peripheral sockets, including the soldered memory controller.
    pub const PERIPHERAL_SLOTS: usize = 8;

    /// Width of the program counter and of source-memory addresses.
    pub const ADDRESS_BITS: u8 = 24;

    /// Device-type name of the processor's working RAM.
    pub const RAM_KIND: &str = "MM1";

    /// Capacity of the processor's working RAM (64 KiB).
    pub const RAM_CAPACITY: usize = 64 * 1024;

    /// Sub-clocks allowed for one instruction before a resync attempt gives up.
    ///
    /// A well-formed instruction takes exactly three.
    pub const RESYNC_LIMIT: usize = 16;
}

/// Main configuration structure.
///
/// # Examples
///
/// ```
/// use backplane_sim::config::Config;
///
/// let json = r#"{
///     "board": { "source_slots": 3, "memory_controller": false },
///     "simulation": { "resync_limit": 4 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.board.source_slots, 3);
/// assert!(!config.board.memory_controller);
/// assert_eq!(config.board.address_bits, 24);
/// assert_eq!(config.processor.ram_capacity, 65536);
/// assert_eq!(config.simulation.resync_limit, 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Motherboard layout
    #[serde(default)]
    pub board: BoardConfig,
    /// Processor options
    #[serde(default)]
    pub processor: ProcessorConfig,
    /// Simulation loop options
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Config {
    /// Parses a JSON document, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Motherboard layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    /// Number of source-capable memory sockets
    #[serde(default = "BoardConfig::default_source_slots")]
    pub source_slots: usize,

    /// Number of peripheral sockets
    #[serde(default = "BoardConfig::default_peripheral_slots")]
    pub peripheral_slots: usize,

    /// Program counter width in bits
    #[serde(default = "BoardConfig::default_address_bits")]
    pub address_bits: u8,

    /// Solder a memory controller into peripheral socket 0
    #[serde(default = "BoardConfig::default_memory_controller")]
    pub memory_controller: bool,
}

impl BoardConfig {
    fn default_source_slots() -> usize {
        defaults::SOURCE_SLOTS
    }

    fn default_peripheral_slots() -> usize {
        defaults::PERIPHERAL_SLOTS
    }

    fn default_address_bits() -> u8 {
        defaults::ADDRESS_BITS
    }

    fn default_memory_controller() -> bool {
        true
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            source_slots: defaults::SOURCE_SLOTS,
            peripheral_slots: defaults::PERIPHERAL_SLOTS,
            address_bits: defaults::ADDRESS_BITS,
            memory_controller: true,
        }
    }
}

/// Processor options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessorConfig {
    /// Catalog name of the working RAM module
    #[serde(default = "ProcessorConfig::default_ram_kind")]
    pub ram_kind: String,

    /// Working RAM capacity in bytes
    #[serde(default = "ProcessorConfig::default_ram_capacity")]
    pub ram_capacity: usize,
}

impl ProcessorConfig {
    fn default_ram_kind() -> String {
        defaults::RAM_KIND.to_owned()
    }

    fn default_ram_capacity() -> usize {
        defaults::RAM_CAPACITY
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            ram_kind: defaults::RAM_KIND.to_owned(),
            ram_capacity: defaults::RAM_CAPACITY,
        }
    }
}

/// Simulation loop options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Sub-clock budget of one `step`
    #[serde(default = "SimulationConfig::default_resync_limit")]
    pub resync_limit: usize,
}

impl SimulationConfig {
    fn default_resync_limit() -> usize {
        defaults::RESYNC_LIMIT
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            resync_limit: defaults::RESYNC_LIMIT,
        }
    }
}
