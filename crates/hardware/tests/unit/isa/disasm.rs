//! Disassembler Format Tests.

use backplane_sim::isa::disasm::{disassemble, disassemble_one};
use backplane_sim::isa::{ArgumentSource, Opcode};
use pretty_assertions::assert_eq;

use crate::common::builder::ProgramBuilder;
use crate::common::harness::TestContext;

#[test]
fn listing_tracks_stream_offsets() {
    let program = ProgramBuilder::new()
        .imm(Opcode::BpcsClk, 1)
        .op(Opcode::OpLeftClk, ArgumentSource::Bread1)
        .imm(Opcode::OpChooseClk, 0x00)
        .op(Opcode::Bwrite1Clk, ArgumentSource::Result)
        .build();

    assert_eq!(
        disassemble(&program),
        vec![
            "0000: BPCS_CLK SOURCE 0x01",
            "0002: OPLEFT_CLK BREAD1",
            "0003: OPCHOOSE_CLK SOURCE 0x00",
            "0005: BWRITE1_CLK RESULT",
        ]
    );
}

#[test]
fn reserved_source_byte_consumes_argument() {
    assert_eq!(
        disassemble(&[0x18, 0x00, 0x07]),
        vec!["0000: .byte 0x18 0x00", "0002: BJMPSRC1_CLK SOURCE <eof>"]
    );
    assert_eq!(
        disassemble(&[0x38, 0x00, 0x07]),
        vec!["0000: .byte 0x38", "0001: BWRITE1_CLK SOURCE 0x07"]
    );
}

#[test]
fn listing_offsets_follow_execution() {
    let program = [0x13, 0xEE, 0x33, 0x17, 0x00];
    let lines = disassemble(&program);
    assert_eq!(
        lines,
        vec!["0000: .byte 0x13 0xee", "0002: .byte 0x33", "0003: LTICK SOURCE 0x00"]
    );

    let offsets: Vec<u64> = lines
        .iter()
        .map(|line| u64::from_str_radix(&line[..4], 16).unwrap())
        .collect();

    let mut ctx = TestContext::new().load_program(&program);
    let trace = ctx.trace(lines.len());

    // Each instruction ends where the next listed one starts.
    assert_eq!(&offsets[1..], &trace[..trace.len() - 1]);
    assert_eq!(trace.last().copied(), Some(program.len() as u64));
}

#[test]
fn single_instruction_forms() {
    assert_eq!(disassemble_one(0xCA, None), "JMPSRC_CLK EXT1");
    assert_eq!(disassemble_one(0x12, Some(0xFF)), "RAMW SOURCE 0xff");
    assert_eq!(disassemble_one(0x1F, Some(1)), ".byte 0x1f 0x01");
    assert_eq!(disassemble_one(0x3F, Some(1)), ".byte 0x3f");
}
