/// ALU operations and accumulator routing.
pub mod alu;
