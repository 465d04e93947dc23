//! Error definitions for the simulation engine.
//!
//! Errors come in two tiers:
//! 1. **Wiring errors:** The simulated architecture itself is mis-wired (a bus or signal
//!    looked up under a name that was never declared). These stop construction and are
//!    propagated with `?` through every clock step.
//! 2. **Simulation errors:** Recoverable outcomes of high-level operations driven by an
//!    external shell, such as a resynchronization loop that gave up.
//!
//! Data-path failures (out-of-range memory addresses, full or mismatched slots) are not
//! errors at all; they are reported as `bool`/`Option` on the hot path.

use thiserror::Error;

/// A wiring bug in the simulated machine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WiringError {
    /// A bus was looked up under a name that no component declared.
    #[error("unknown bus: {0}")]
    UnknownBus(String),

    /// A signal was looked up under a name that no component declared.
    #[error("unknown signal: {0}")]
    UnknownSignal(String),

    /// A bus was declared twice under the same name.
    #[error("bus already declared: {0}")]
    DuplicateBus(String),

    /// A signal was declared twice under the same name.
    #[error("signal already declared: {0}")]
    DuplicateSignal(String),

    /// A bus width outside `1..=64` bits was requested.
    #[error("invalid bus width: {0} bits (expected 1..=64)")]
    InvalidBusWidth(u8),
}

/// Failure of a high-level simulator operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// The machine is mis-wired.
    #[error(transparent)]
    Wiring(#[from] WiringError),

    /// The processor did not return to its synchronization state within the clock budget.
    #[error("processor did not resynchronize after {clocks} clocks")]
    ResyncTimeout {
        /// Number of sub-clocks issued before giving up.
        clocks: usize,
    },

    /// The device catalog has no entry under this name (or rejected the requested size).
    #[error("unknown device type: {0}")]
    UnknownDevice(String),

    /// A slot refused a plug or unplug request.
    #[error("slot {index} rejected the request")]
    SlotRejected {
        /// Index of the slot that refused.
        index: usize,
    },
}
