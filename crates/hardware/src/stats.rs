//! Simulation statistics collection and reporting.
//!
//! This module tracks what the simulator facade has driven. It provides:
//! 1. **Clocks:** Every processor sub-clock issued.
//! 2. **Instructions:** Every completed `SyncBit` return.
//! 3. **Timeouts:** Every `step` that gave up before resynchronizing.

use std::fmt;
use std::time::Instant;

/// Simulation statistics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Processor sub-clocks issued.
    pub clocks: u64,
    /// Instructions completed (returns to `SyncBit`).
    pub instructions: u64,
    /// Resynchronization attempts that ran out of budget.
    pub resync_timeouts: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            clocks: 0,
            instructions: 0,
            resync_timeouts: 0,
        }
    }
}

impl SimStats {
    /// Clears every counter and restarts the host timer.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Host seconds since the statistics were created or reset.
    pub fn host_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Average sub-clocks per completed instruction, 0 before the first one.
    pub fn clocks_per_instruction(&self) -> f64 {
        if self.instructions == 0 {
            0.0
        } else {
            self.clocks as f64 / self.instructions as f64
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "host_seconds             {:.4} s", self.host_seconds())?;
        writeln!(f, "sim_clocks               {}", self.clocks)?;
        writeln!(f, "sim_insts                {}", self.instructions)?;
        writeln!(f, "sim_cpi                  {:.4}", self.clocks_per_instruction())?;
        write!(f, "resync_timeouts          {}", self.resync_timeouts)
    }
}
