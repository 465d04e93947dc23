//! ALU Tests.
//!
//! Covers every operation code of the reference ALU, accumulator routing, and the
//! combinational update of the result.

use backplane_sim::core::{Alu, AluOp, Aluminium};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn evaluate(op: AluOp, left: u8, right: u8) -> u8 {
    let mut alu = Aluminium::new();
    alu.set_operation(op as u8);
    alu.set_operation_left(left);
    alu.set_operation_right(right);
    alu.result()
}

// ══════════════════════════════════════════════════════════
// Operation Table
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(AluOp::Add, 200, 100, 44)]
#[case(AluOp::Sub, 5, 10, 251)]
#[case(AluOp::And, 0b1100, 0b1010, 0b1000)]
#[case(AluOp::Or, 0b1100, 0b1010, 0b1110)]
#[case(AluOp::Xor, 0b1100, 0b1010, 0b0110)]
#[case(AluOp::Inv, 0x0F, 0x00, 0xF0)]
#[case(AluOp::LogicalAnd, 3, 0, 0)]
#[case(AluOp::LogicalAnd, 3, 9, 1)]
#[case(AluOp::LogicalOr, 0, 7, 1)]
#[case(AluOp::LogicalXor, 3, 4, 0)]
#[case(AluOp::LogicalXor, 0, 4, 1)]
#[case(AluOp::LogicalInv, 0, 9, 1)]
#[case(AluOp::LogicalInv, 2, 0, 0)]
#[case(AluOp::Shl, 0x81, 1, 0x02)]
#[case(AluOp::Shl, 0x01, 8, 0x00)]
#[case(AluOp::Shr, 0x80, 7, 0x01)]
#[case(AluOp::Shr, 0x80, 200, 0x00)]
#[case(AluOp::Gt, 5, 3, 1)]
#[case(AluOp::Lt, 5, 3, 0)]
#[case(AluOp::Ge, 3, 3, 1)]
#[case(AluOp::Le, 4, 3, 0)]
#[case(AluOp::Eq, 9, 9, 1)]
#[case(AluOp::Mul, 16, 17, 16)]
#[case(AluOp::Neg, 1, 0, 0xFF)]
#[case(AluOp::Neg, 0, 0, 0x00)]
#[case(AluOp::Reverse, 0b0000_0001, 0, 0b1000_0000)]
#[case(AluOp::Reverse, 0b1100_1010, 0, 0b0101_0011)]
#[case(AluOp::Rol, 0x81, 1, 0x03)]
#[case(AluOp::Ror, 0x81, 1, 0xC0)]
#[case(AluOp::Rol, 0x12, 12, 0x21)]
fn operation_result(#[case] op: AluOp, #[case] left: u8, #[case] right: u8, #[case] expected: u8) {
    assert_eq!(evaluate(op, left, right), expected, "{op} {left:#04x} {right:#04x}");
}

#[test]
fn codes_are_contiguous() {
    for code in 0x00..=0x19 {
        let op = AluOp::from_code(code).unwrap();
        assert_eq!(op as u8, code);
    }
    assert_eq!(AluOp::from_code(0x1A), None);
}

#[test]
fn unknown_code_yields_zero() {
    let mut alu = Aluminium::new();
    alu.set_operation_left(7);
    alu.set_operation_right(7);
    alu.set_operation(0x42);
    assert_eq!(alu.result(), 0);
}

proptest! {
    #[test]
    fn rotating_by_eight_is_identity(value in any::<u8>()) {
        prop_assert_eq!(evaluate(AluOp::Rol, value, 8), value);
        prop_assert_eq!(evaluate(AluOp::Ror, value, 8), value);
    }

    #[test]
    fn rol_then_ror_restores(value in any::<u8>(), amount in any::<u8>()) {
        let rotated = evaluate(AluOp::Rol, value, amount);
        prop_assert_eq!(evaluate(AluOp::Ror, rotated, amount), value);
    }

    #[test]
    fn comparisons_are_boolean(left in any::<u8>(), right in any::<u8>()) {
        for op in [AluOp::Gt, AluOp::Lt, AluOp::Ge, AluOp::Le, AluOp::Eq] {
            prop_assert!(evaluate(op, left, right) <= 1);
        }
    }
}

// ══════════════════════════════════════════════════════════
// Accumulator Routing
// ══════════════════════════════════════════════════════════

#[test]
fn accumulator_round_trip_leaves_operands_alone() {
    let mut alu = Aluminium::new();
    alu.set_operation_left(9);
    alu.set_operation(AluOp::Aopl as u8);
    alu.set_operation_left(5);
    assert_eq!(alu.accumulator_left(), 5);
    assert_eq!(alu.operation_left(), 9);

    alu.set_operation(AluOp::Opal as u8);
    assert_eq!(alu.result(), 5);
}

#[test]
fn right_accumulator_routes_independently() {
    let mut alu = Aluminium::new();
    alu.set_operation(AluOp::Aopr as u8);
    alu.set_operation_right(0x33);
    alu.set_operation_left(0x44);
    assert_eq!(alu.accumulator_right(), 0x33);
    assert_eq!(alu.accumulator_left(), 0x44);

    alu.set_operation(AluOp::Opar as u8);
    assert_eq!(alu.result(), 0x33);
    alu.set_operation(AluOp::Add as u8);
    assert_eq!(alu.result(), 0);
}

#[test]
fn result_follows_every_write() {
    let mut alu = Aluminium::new();
    alu.set_operation_left(2);
    assert_eq!(alu.result(), 2);
    alu.set_operation_right(3);
    assert_eq!(alu.result(), 5);
    alu.set_operation(AluOp::Mul as u8);
    assert_eq!(alu.result(), 6);
}

#[test]
fn reset_clears_everything() {
    let mut alu = Aluminium::new();
    alu.set_operation(AluOp::Aopl as u8);
    alu.set_operation_left(1);
    alu.reset();
    assert_eq!(alu, Aluminium::new());
    assert_eq!(alu.result(), 0);
}
