// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{Block, Function, Instruction, Operand};
use expect_test::expect;

#[test]
fn constant_pointers_have_ids() {
    assert_eq!(Operand::Qubit(Some(3)).id(), Some(3));
    assert_eq!(Operand::Result(Some(0)).id(), Some(0));
    assert_eq!(Operand::Pointer(Some(7)).id(), Some(7));
}

#[test]
fn dynamic_pointers_and_values_have_no_id() {
    assert_eq!(Operand::Qubit(None).id(), None);
    assert_eq!(Operand::Integer(1).id(), None);
    assert_eq!(Operand::Variable("q".into()).id(), None);
}

#[test]
fn operands_display_for_diagnostics() {
    let rendered = [
        Operand::Qubit(Some(1)),
        Operand::Result(None),
        Operand::Pointer(Some(2)),
        Operand::Integer(-4),
        Operand::Double(1.5),
        Operand::Bool(true),
        Operand::Variable("0".into()),
        Operand::Raw("label %exit".into()),
    ]
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(", ");
    expect!["Qubit(1), Result(?), ptr(2), -4, 1.5, true, %0, label %exit"].assert_eq(&rendered);
}

#[test]
fn block_of_intrinsic_calls_is_circuit_like() {
    let block = Block::new(
        "entry",
        vec![
            Instruction::new("__quantum__qis__h__body", vec![Operand::Qubit(Some(0))]),
            Instruction::new("__quantum__qir__read_result", vec![Operand::Result(Some(0))])
                .with_output("0"),
        ],
    );
    assert!(block.is_circuit_like());
}

#[test]
fn block_with_classical_instruction_is_not_circuit_like() {
    let block = Block::new(
        "entry",
        vec![
            Instruction::new("__quantum__qis__h__body", vec![Operand::Qubit(Some(0))]),
            Instruction::new(
                "add",
                vec![Operand::Variable("0".into()), Operand::Integer(1)],
            )
            .with_output("1"),
        ],
    );
    assert!(!block.is_circuit_like());
}

#[test]
fn block_with_runtime_call_is_not_circuit_like() {
    let block = Block::new(
        "entry",
        vec![
            Instruction::new("__quantum__qis__h__body", vec![Operand::Qubit(Some(0))]),
            Instruction::new("__quantum__rt__array_create_1d", vec![Operand::Integer(8)])
                .with_output("0"),
        ],
    );
    assert!(!block.is_circuit_like());
}

#[test]
fn runtime_result_readout_is_circuit_like() {
    let block = Block::new(
        "entry",
        vec![
            Instruction::new(
                "__quantum__qis__mz__body",
                vec![Operand::Qubit(Some(0)), Operand::Result(Some(0))],
            ),
            Instruction::new("__quantum__rt__read_result", vec![Operand::Result(Some(0))])
                .with_output("0"),
        ],
    );
    assert!(block.is_circuit_like());
}

#[test]
fn empty_block_is_circuit_like() {
    assert!(Block::new("entry", vec![]).is_circuit_like());
}

#[test]
fn function_finds_block_by_name() {
    let function = Function {
        name: "main".into(),
        blocks: vec![Block::new("entry", vec![]), Block::new("exit", vec![])],
    };
    assert_eq!(function.block("exit").map(|b| b.name.as_str()), Some("exit"));
    assert!(function.block("missing").is_none());
}
