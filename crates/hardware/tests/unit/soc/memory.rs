//! Memory Module Tests.
//!
//! Covers MM1 capacities, byte and block access, and address masking in a bank.

use backplane_sim::soc::SlotSpec;
use backplane_sim::soc::memory::mm1::MM1_CAPACITIES;
use backplane_sim::soc::memory::{MemoryBank, MemoryKind, MemoryModule, Mm1};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// MM1
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(16 * 1024)]
#[case(32 * 1024)]
#[case(64 * 1024)]
fn mm1_is_made_in_three_sizes(#[case] capacity: usize) {
    let module = Mm1::with_capacity(capacity).unwrap();
    assert_eq!(module.capacity(), capacity);
    assert_eq!(module.kind(), MemoryKind::Mm1);
    assert!(module.as_bytes().iter().all(|&byte| byte == 0));
}

#[test]
fn mm1_rejects_other_sizes() {
    assert!(Mm1::with_capacity(1000).is_none());
    assert!(Mm1::with_capacity(0).is_none());
    assert_eq!(MM1_CAPACITIES.len(), 3);
}

#[test]
fn byte_access_is_bounds_checked() {
    let mut module = Mm1::new_16k();
    assert!(module.set(0x3FFF, 0xAA));
    assert_eq!(module.get(0x3FFF), Some(0xAA));
    assert!(!module.set(0x4000, 0xAA));
    assert_eq!(module.get(0x4000), None);
}

#[test]
fn block_must_end_before_capacity() {
    let mut module = Mm1::new_16k();
    let cap = module.capacity();

    assert!(module.set_block(cap - 3, &[1, 2]));
    assert!(!module.set_block(cap - 2, &[1, 2]));
    assert!(!module.set_block(0, &[]));
    assert!(!module.set_block(usize::MAX, &[1]));

    let mut out = [0; 2];
    assert!(module.get_block(cap - 3, &mut out));
    assert_eq!(out, [1, 2]);
    assert!(!module.get_block(cap - 2, &mut out));
}

// ══════════════════════════════════════════════════════════
// Bank
// ══════════════════════════════════════════════════════════

fn bank(address_bits: u8) -> MemoryBank {
    let mut bank = MemoryBank::new(
        [SlotSpec::source(MemoryKind::Mm1), SlotSpec::pluggable(MemoryKind::Mm1)],
        address_bits,
    );
    assert!(bank.slots_mut().plug(0, Box::new(Mm1::new_16k())).is_ok());
    bank
}

#[test]
fn addresses_above_the_width_are_rejected() {
    let mut bank = bank(8);
    assert_eq!(bank.address_mask(), 0xFF);
    assert!(bank.write(0, 0xFF, 7));
    assert_eq!(bank.read(0, 0xFF), Some(7));
    assert!(!bank.write(0, 0x100, 7));
    assert_eq!(bank.read(0, 0x100), None);
}

#[test]
fn empty_socket_reads_none() {
    let mut bank = bank(16);
    assert_eq!(bank.read(1, 0), None);
    assert!(!bank.write(1, 0, 1));
    assert_eq!(bank.read(9, 0), None);
}

#[test]
fn only_source_capable_sockets_serve_programs() {
    let mut bank = bank(16);
    assert!(!bank.select_source(1));
    assert!(!bank.select_source(2));
    assert!(bank.select_source(0));
    assert_eq!(bank.source(), 0);

    assert!(bank.write(0, 4, 0x42));
    assert_eq!(bank.read_source(4), Some(0x42));
}

#[test]
fn address_width_is_clamped() {
    assert_eq!(MemoryBank::new([], 0).address_bits(), 1);
    assert_eq!(MemoryBank::new([], 200).address_mask(), u64::MAX);
}
