
/// Error display and conversion.
pub mod error;

/// Signal registry and synchronous delivery.
pub mod signal;
