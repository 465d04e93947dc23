//! Motherboard Tests.
//!
//! Covers the peripheral clock broadcast, program-counter handling, source
//! selection and socket management on the assembled board.

use backplane_sim::common::Wires;
use backplane_sim::core::processor::wiring::{bus, signal};
use backplane_sim::sim::MemoryTarget;
use backplane_sim::soc::Board;
use backplane_sim::soc::catalog::MM1_NAME;
use backplane_sim::soc::memory::MemoryModule;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;

use crate::common::harness::TestContext;
use crate::common::mocks::MockPeripheral;

// ══════════════════════════════════════════════════════════
// Peripheral Clock
// ══════════════════════════════════════════════════════════

#[test]
fn rising_edge_updates_every_card_and_selects_one() {
    let mut selected = MockPeripheral::pp1();
    let _ = selected.expect_select().with(eq(true)).times(1).return_const(());
    let _ = selected
        .expect_update()
        .times(1)
        .returning(|wires: &mut Wires<Board>| wires.buses.drive(bus::BREAD1, 0x40));

    let mut idle = MockPeripheral::pp1();
    let _ = idle.expect_select().with(eq(false)).times(1).return_const(());
    let _ = idle
        .expect_update()
        .times(1)
        .returning(|wires: &mut Wires<Board>| wires.buses.drive(bus::BREAD2, 0x01));

    let mut ctx = TestContext::new();
    ctx.sim.plug_peripheral_device(3, Box::new(selected)).unwrap();
    ctx.sim.plug_peripheral_device(5, Box::new(idle)).unwrap();
    ctx.sim.set_bus(bus::BREAD1, 0xFF).unwrap();
    ctx.sim.set_bus(bus::BPCS, 3).unwrap();

    ctx.sim.pulse(signal::PERIPHERAL_CLK).unwrap();

    // Read buses are pulled low before the cards drive them.
    assert_eq!(ctx.bus(bus::BREAD1), 0x40);
    assert_eq!(ctx.bus(bus::BREAD2), 0x01);
}

#[test]
fn falling_edge_is_ignored() {
    let mut card = MockPeripheral::pp1();
    let _ = card.expect_select().never();
    let _ = card.expect_update().never();

    let mut ctx = TestContext::new();
    ctx.sim.plug_peripheral_device(2, Box::new(card)).unwrap();
    ctx.sim.set_bus(bus::BREAD1, 0xFF).unwrap();

    ctx.sim
        .motherboard_mut()
        .call(signal::PERIPHERAL_CLK, false)
        .unwrap();
    assert_eq!(ctx.bus(bus::BREAD1), 0xFF);
}

#[test]
fn external_selects_copy_write_buses() {
    let mut ctx = TestContext::new();
    ctx.sim.set_bus(bus::BWRITE1, 0x11).unwrap();
    ctx.sim.set_bus(bus::BWRITE2, 0x22).unwrap();

    ctx.sim.pulse(signal::SELECTING_RBEXT1).unwrap();
    assert_eq!(ctx.bus(bus::NUMBER), 0x11);
    ctx.sim.pulse(signal::SELECTING_RBEXT2).unwrap();
    assert_eq!(ctx.bus(bus::NUMBER), 0x22);
}

// ══════════════════════════════════════════════════════════
// Program Counter and Source
// ══════════════════════════════════════════════════════════

#[test]
fn program_counter_is_truncated_to_address_width() {
    let mut ctx = TestContext::new().load_program(&[0, 0, 0, 0, 0, 0xAB]);
    ctx.sim.motherboard_mut().set_program_counter(0x100_0005).unwrap();
    assert_eq!(ctx.pc(), 5);
    assert_eq!(ctx.bus(bus::BDATASRC), 0xAB);
}

#[test]
fn fetch_advance_refreshes_data_source() {
    let mut ctx = TestContext::new().load_program(&[0x10, 0x20, 0x30]);
    ctx.sim.pulse(signal::ADDSRC_CLK).unwrap();
    assert_eq!((ctx.pc(), ctx.bus(bus::BDATASRC)), (1, 0x20));
    ctx.sim.pulse(signal::ADDSRC_CLK).unwrap();
    assert_eq!((ctx.pc(), ctx.bus(bus::BDATASRC)), (2, 0x30));
}

#[test]
fn jump_signal_loads_the_target() {
    let mut ctx = TestContext::new().load_program(&[0, 0, 0, 0x99]);
    ctx.sim.set_bus(bus::BJMPSRC, 3).unwrap();
    ctx.sim.pulse(signal::JMPSRC_CLK).unwrap();
    assert_eq!((ctx.pc(), ctx.bus(bus::BDATASRC)), (3, 0x99));
}

#[test]
fn empty_source_socket_reads_zero() {
    let mut ctx = TestContext::new().load_program(&[0x42]);
    assert_eq!(ctx.bus(bus::BDATASRC), 0x42);

    assert!(ctx.sim.motherboard_mut().select_source(1).unwrap());
    assert_eq!(ctx.bus(bus::BDATASRC), 0);
    assert!(!ctx.sim.motherboard_mut().select_source(7).unwrap());
    assert_eq!(ctx.sim.status().source_slot, 1);
}

#[test]
fn hard_reset_reselects_socket_zero() {
    let mut ctx = TestContext::new().load_program(&[0xAB]).with_memory(1);
    assert!(ctx.sim.write_memory(MemoryTarget::Board(1), 0, 0xCD).unwrap());
    assert!(ctx.sim.motherboard_mut().select_source(1).unwrap());
    assert_eq!(ctx.bus(bus::BDATASRC), 0xCD);

    ctx.sim.soft_reset().unwrap();
    assert_eq!(ctx.sim.status().source_slot, 1);

    ctx.sim.hard_reset().unwrap();
    assert_eq!(ctx.sim.status().source_slot, 0);
    assert_eq!(ctx.bus(bus::BDATASRC), 0xAB);
}

// ══════════════════════════════════════════════════════════
// Sockets
// ══════════════════════════════════════════════════════════

#[test]
fn plugging_into_the_source_refreshes_data_source() {
    let mut ctx = TestContext::new();
    assert!(!ctx.sim.load(MemoryTarget::Board(0), &[0x07]).unwrap());

    ctx.sim.plug_memory(0, MM1_NAME, 16 * 1024).unwrap();
    assert!(ctx.sim.load(MemoryTarget::Board(0), &[0x07]).unwrap());
    assert_eq!(ctx.bus(bus::BDATASRC), 0x07);

    let module = ctx.sim.unplug_memory(0).unwrap();
    assert_eq!(module.get(0), Some(0x07));
    assert_eq!(ctx.bus(bus::BDATASRC), 0);
}

#[test]
fn soldered_controller_cannot_be_removed() {
    let mut ctx = TestContext::new().with_uart(1);
    assert!(ctx.sim.unplug_peripheral(0).is_err());

    ctx.sim.unplug_all().unwrap();
    assert!(ctx.sim.memory_controller_mut(0).is_some());
    assert!(ctx.sim.uart_mut(1).is_none());
}
