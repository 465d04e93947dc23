//! Machine-level test harness.
//!
//! `TestContext` assembles the reference machine, plugs an MM1 module into the program
//! socket, loads a byte stream and clocks it, so processor tests can assert on buses
//! and the program counter without repeating the plumbing.

use backplane_sim::Simulator;
use backplane_sim::config::Config;
use backplane_sim::core::State;
use backplane_sim::sim::MemoryTarget;
use backplane_sim::soc::catalog::MM1_NAME;
use backplane_sim::soc::devices::Uart;
use tracing_subscriber::EnvFilter;

/// Size of the program module plugged by the harness.
pub const PROGRAM_CAPACITY: usize = 64 * 1024;

/// Installs a test-writer subscriber once per process; `RUST_LOG` picks the filter.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug)]
pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        init_tracing();
        let sim = Simulator::new(config).unwrap();
        Self { sim }
    }

    /// Plugs an MM1 module into program socket `slot`.
    pub fn with_memory(mut self, slot: usize) -> Self {
        self.sim.plug_memory(slot, MM1_NAME, PROGRAM_CAPACITY).unwrap();
        self
    }

    /// Loads `program` at address 0 of socket 0 (plugging a module first if needed) and
    /// hard-resets so the first byte is on `BDATASRC`.
    pub fn load_program(mut self, program: &[u8]) -> Self {
        if !self.sim.motherboard().board().memory().slots().is_occupied(0) {
            self = self.with_memory(0);
        }
        assert!(self.sim.load(MemoryTarget::Board(0), program).unwrap());
        self.sim.hard_reset().unwrap();
        self
    }

    /// Plugs a UART into peripheral socket `slot`.
    pub fn with_uart(mut self, slot: usize) -> Self {
        self.sim.plug_peripheral(slot, "UART_A_1_1").unwrap();
        self
    }

    pub fn uart(&mut self, slot: usize) -> &mut Uart {
        self.sim.uart_mut(slot).unwrap()
    }

    /// Issues `n` sub-clocks.
    pub fn clock(&mut self, n: usize) {
        for _ in 0..n {
            self.sim.clock().unwrap();
        }
    }

    /// Runs `n` complete instructions.
    pub fn run(&mut self, n: usize) {
        let clocks = self.sim.run(n).unwrap();
        assert_eq!(clocks, 3 * n);
    }

    /// Runs `n` instructions, recording the program counter after each one.
    pub fn trace(&mut self, n: usize) -> Vec<u64> {
        (0..n)
            .map(|_| {
                let _ = self.sim.step().unwrap();
                self.pc()
            })
            .collect()
    }

    pub fn bus(&self, name: &str) -> u64 {
        self.sim.bus(name).unwrap()
    }

    pub fn pc(&self) -> u64 {
        self.sim.motherboard().program_counter()
    }

    pub fn state(&self) -> State {
        self.sim.motherboard().processor().state()
    }
}
