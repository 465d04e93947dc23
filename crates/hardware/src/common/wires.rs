//! The backplane: every bus and signal of the machine in one place.
//!
//! [`Wires`] is what gets lent to signal handlers and peripherals. Calling a signal
//! records its level and then runs the subscriber synchronously with the same
//! backplane, so nested bus writes (and nested pulses) are visible to the caller as
//! soon as [`Wires::call`] returns. There is no queue and no deferred delivery.

use std::fmt;

use super::bus::BusMap;
use super::error::WiringError;
use super::signal::{SignalLevels, SignalMap};

/// Shared bus and signal namespace.
pub struct Wires<C> {
    /// Named buses.
    pub buses: BusMap,
    /// Named signals.
    pub signals: SignalMap<C>,
}

impl<C> Default for Wires<C> {
    fn default() -> Self {
        Self {
            buses: BusMap::new(),
            signals: SignalMap::new(),
        }
    }
}

impl<C> fmt::Debug for Wires<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wires")
            .field("buses", &self.buses)
            .field("signals", &self.signals)
            .finish()
    }
}

impl<C> Wires<C> {
    /// Creates an empty backplane.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drives the named signal to `level` and runs its subscriber, if any.
    ///
    /// # Arguments
    ///
    /// * `name` - Signal to drive.
    /// * `level` - Level to drive it to.
    /// * `ctx` - Owner context handed to the subscriber.
    ///
    /// # Returns
    ///
    /// The subscriber's result, or [`WiringError::UnknownSignal`].
    pub fn call(&mut self, name: &str, level: bool, ctx: &mut C) -> Result<(), WiringError> {
        let subscriber = self.signals.signal_mut(name)?.latch(level);
        match subscriber {
            Some(handler) => handler(ctx, self, level),
            None => Ok(()),
        }
    }

    /// Pulses the named signal high then low.
    pub fn pulse(&mut self, name: &str, ctx: &mut C) -> Result<(), WiringError> {
        self.call(name, true, ctx)?;
        self.call(name, false, ctx)
    }

    /// Returns the last level of the named signal.
    pub fn level(&self, name: &str) -> Result<bool, WiringError> {
        self.signals.level(name)
    }
}
