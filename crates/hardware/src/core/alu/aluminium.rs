//! Reference 8-bit ALU.
//!
//! Besides the arithmetic, logical, shift, comparison and rotation operations, the
//! unit carries a second register pair, the accumulators. While `AOPL` or `AOPR` is
//! the selected operation, operand writes are routed into the accumulators instead of
//! the operands; `OPAL`/`OPAR` later read them back without disturbing the operands.
//! Routing is decided by the operation selected at the time of the write.

use super::{Alu, AluOp};

/// The reference ALU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Aluminium {
    operation_left: u8,
    operation_right: u8,
    accumulator_left: u8,
    accumulator_right: u8,
    operation: u8,
    result: u8,
}

impl Aluminium {
    /// Creates an ALU with every register cleared (operation `ADD`, result 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Left operand register.
    pub const fn operation_left(&self) -> u8 {
        self.operation_left
    }

    /// Right operand register.
    pub const fn operation_right(&self) -> u8 {
        self.operation_right
    }

    /// Left accumulator register.
    pub const fn accumulator_left(&self) -> u8 {
        self.accumulator_left
    }

    /// Right accumulator register.
    pub const fn accumulator_right(&self) -> u8 {
        self.accumulator_right
    }

    /// Currently selected operation code.
    pub const fn operation(&self) -> u8 {
        self.operation
    }

    fn routes_to_accumulator(&self) -> bool {
        AluOp::from_code(self.operation).is_some_and(AluOp::routes_to_accumulator)
    }

    fn update_result(&mut self) {
        self.result = compute(
            self.operation,
            self.operation_left,
            self.operation_right,
            self.accumulator_left,
            self.accumulator_right,
        );
    }
}

impl Alu for Aluminium {
    fn set_operation_left(&mut self, value: u8) {
        if self.routes_to_accumulator() {
            self.accumulator_left = value;
        } else {
            self.operation_left = value;
        }
        self.update_result();
    }

    fn set_operation_right(&mut self, value: u8) {
        if self.routes_to_accumulator() {
            self.accumulator_right = value;
        } else {
            self.operation_right = value;
        }
        self.update_result();
    }

    fn set_operation(&mut self, code: u8) {
        self.operation = code;
        self.update_result();
    }

    fn result(&self) -> u8 {
        self.result
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Evaluates one operation over the register file.
///
/// # Arguments
///
/// * `code` - Operation code; unknown codes yield 0.
/// * `left`, `right` - Operand registers.
/// * `acc_left`, `acc_right` - Accumulator registers.
///
/// # Returns
///
/// The 8-bit result. Arithmetic wraps; comparisons and logical operations yield 0 or 1.
pub fn compute(code: u8, left: u8, right: u8, acc_left: u8, acc_right: u8) -> u8 {
    let Some(op) = AluOp::from_code(code) else {
        return 0;
    };
    match op {
        AluOp::Add => left.wrapping_add(right),
        AluOp::Sub => left.wrapping_sub(right),
        AluOp::And => left & right,
        AluOp::Or => left | right,
        AluOp::Xor => left ^ right,
        AluOp::Inv => !left,
        AluOp::LogicalAnd => u8::from(left != 0 && right != 0),
        AluOp::LogicalOr => u8::from(left != 0 || right != 0),
        AluOp::LogicalXor => u8::from((left != 0) ^ (right != 0)),
        AluOp::LogicalInv => u8::from(left == 0),
        AluOp::Shl => left.checked_shl(u32::from(right)).unwrap_or(0),
        AluOp::Shr => left.checked_shr(u32::from(right)).unwrap_or(0),
        AluOp::Gt => u8::from(left > right),
        AluOp::Lt => u8::from(left < right),
        AluOp::Ge => u8::from(left >= right),
        AluOp::Le => u8::from(left <= right),
        AluOp::Eq => u8::from(left == right),
        AluOp::Mul => left.wrapping_mul(right),
        AluOp::Neg => left.wrapping_neg(),
        AluOp::Reverse => left.reverse_bits(),
        AluOp::Rol => left.rotate_left(u32::from(right % 8)),
        AluOp::Ror => left.rotate_right(u32::from(right % 8)),
        AluOp::Aopl | AluOp::Opal => acc_left,
        AluOp::Aopr | AluOp::Opar => acc_right,
    }
}
