//! Error Display Tests.

use backplane_sim::common::{SimError, WiringError};
use pretty_assertions::assert_eq;

#[test]
fn wiring_errors_name_the_culprit() {
    assert_eq!(WiringError::UnknownBus("BX".into()).to_string(), "unknown bus: BX");
    assert_eq!(
        WiringError::UnknownSignal("CLK".into()).to_string(),
        "unknown signal: CLK"
    );
    assert_eq!(
        WiringError::InvalidBusWidth(0).to_string(),
        "invalid bus width: 0 bits (expected 1..=64)"
    );
}

#[test]
fn wiring_error_converts_transparently() {
    let err: SimError = WiringError::UnknownBus("BX".into()).into();
    assert_eq!(err, SimError::Wiring(WiringError::UnknownBus("BX".into())));
    assert_eq!(err.to_string(), "unknown bus: BX");
}

#[test]
fn simulation_errors_display() {
    assert_eq!(
        SimError::ResyncTimeout { clocks: 16 }.to_string(),
        "processor did not resynchronize after 16 clocks"
    );
    assert_eq!(
        SimError::UnknownDevice("ZX".into()).to_string(),
        "unknown device type: ZX"
    );
    assert_eq!(
        SimError::SlotRejected { index: 3 }.to_string(),
        "slot 3 rejected the request"
    );
}
