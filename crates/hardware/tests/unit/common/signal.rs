//! Signal Tests.
//!
//! Verifies level recording, single-subscriber binding and synchronous delivery
//! through the backplane.

use backplane_sim::common::{SignalMap, WiringError, Wires};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Probe {
    seen: Vec<(&'static str, bool)>,
}

fn first(probe: &mut Probe, _wires: &mut Wires<Probe>, level: bool) -> Result<(), WiringError> {
    probe.seen.push(("first", level));
    Ok(())
}

fn second(probe: &mut Probe, _wires: &mut Wires<Probe>, level: bool) -> Result<(), WiringError> {
    probe.seen.push(("second", level));
    Ok(())
}

fn chain(probe: &mut Probe, wires: &mut Wires<Probe>, level: bool) -> Result<(), WiringError> {
    probe.seen.push(("chain", level));
    if level {
        wires.buses.set("DATA", 0xAB)?;
        wires.pulse("INNER", probe)?;
    }
    Ok(())
}

fn wires() -> Wires<Probe> {
    let mut wires = Wires::new();
    wires.buses.declare("DATA", 8).unwrap();
    wires.signals.declare("CLK").unwrap();
    wires.signals.declare("INNER").unwrap();
    wires
}

// ══════════════════════════════════════════════════════════
// Registry
// ══════════════════════════════════════════════════════════

#[test]
fn unknown_signal_is_reported() {
    let mut wires = wires();
    let mut probe = Probe::default();
    assert_eq!(
        wires.call("NOPE", true, &mut probe),
        Err(WiringError::UnknownSignal("NOPE".into()))
    );
    assert_eq!(wires.level("NOPE"), Err(WiringError::UnknownSignal("NOPE".into())));
}

#[test]
fn duplicate_declaration_is_rejected() {
    let mut signals = SignalMap::<Probe>::new();
    signals.declare("CLK").unwrap();
    assert_eq!(
        signals.declare("CLK"),
        Err(WiringError::DuplicateSignal("CLK".into()))
    );
    assert_eq!(signals.len(), 1);
}

// ══════════════════════════════════════════════════════════
// Delivery
// ══════════════════════════════════════════════════════════

#[test]
fn unsubscribed_signal_records_level() {
    let mut wires = wires();
    let mut probe = Probe::default();
    wires.call("CLK", true, &mut probe).unwrap();
    assert!(wires.level("CLK").unwrap());
    assert!(probe.seen.is_empty());
}

#[test]
fn attach_replaces_previous_subscriber() {
    let mut wires = wires();
    let mut probe = Probe::default();
    wires.signals.attach("CLK", first).unwrap();
    wires.signals.attach("CLK", second).unwrap();
    wires.pulse("CLK", &mut probe).unwrap();
    assert_eq!(probe.seen, vec![("second", true), ("second", false)]);
}

#[test]
fn detach_stops_delivery() {
    let mut wires = wires();
    let mut probe = Probe::default();
    wires.signals.attach("CLK", first).unwrap();
    wires.signals.detach("CLK").unwrap();
    wires.call("CLK", true, &mut probe).unwrap();
    assert!(probe.seen.is_empty());
    assert!(!wires.signals.signal("CLK").unwrap().is_attached());
}

#[test]
fn nested_effects_are_visible_on_return() {
    let mut wires = wires();
    let mut probe = Probe::default();
    wires.signals.attach("CLK", chain).unwrap();
    wires.signals.attach("INNER", first).unwrap();

    wires.call("CLK", true, &mut probe).unwrap();

    assert_eq!(wires.buses.get("DATA").unwrap(), 0xAB);
    assert_eq!(
        probe.seen,
        vec![("chain", true), ("first", true), ("first", false)]
    );
    assert!(!wires.level("INNER").unwrap());
}
