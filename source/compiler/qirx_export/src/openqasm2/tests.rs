// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::OpenQasm2Exporter;
use crate::{CircuitExporter, Error, OperandId};
use expect_test::{Expect, expect};
use qirx_block::{Block, Instruction, Operand, parse_functions};

fn q(id: u64) -> Operand {
    Operand::Qubit(Some(id))
}

fn r(id: u64) -> Operand {
    Operand::Result(Some(id))
}

fn export(block: &Block) -> String {
    OpenQasm2Exporter::new(block)
        .expect("block should translate")
        .export()
        .expect("export should succeed")
}

fn check(instructions: Vec<Instruction>, expect: &Expect) {
    expect.assert_eq(&export(&Block::new("entry", instructions)));
}

#[test]
fn gates_and_measurement() {
    check(
        vec![
            Instruction::new("__quantum__qis__x__body", vec![q(0)]),
            Instruction::new("__quantum__qis__cnot__body", vec![q(0), q(1)]),
            Instruction::new("__quantum__qis__mz__body", vec![q(1), r(0)]),
        ],
        &expect![[r#"
            // Generated from QIR block entry.
            OPENQASM 2.0;
            include "qelib1.inc";

            qreg q[2];
            creg c[1];
            x q[0];
            CX q[0], q[1];
            measure q[1] -> c[0];"#]],
    );
}

#[test]
fn reset_is_flagged_as_nonstandard() {
    check(
        vec![Instruction::new("__quantum__qis__reset__body", vec![q(0)])],
        &expect![[r#"
            // Generated from QIR block entry.
            OPENQASM 2.0;
            include "qelib1.inc";

            qreg q[1];
            // Requires nonstandard reset gate:
            reset q[0];"#]],
    );
}

#[test]
fn unknown_opcode_still_declares_its_qubits() {
    check(
        vec![Instruction::new("FOO", vec![q(0)])],
        &expect![[r#"
            // Generated from QIR block entry.
            OPENQASM 2.0;
            include "qelib1.inc";

            qreg q[1];
            // Unsupported QIS operation:
            // FOO q[0]"#]],
    );
}

#[test]
fn empty_block_is_header_only() {
    check(
        vec![],
        &expect![[r#"
            // Generated from QIR block entry.
            OPENQASM 2.0;
            include "qelib1.inc";
        "#]],
    );
}

#[test]
fn readout_comment_names_binding() {
    check(
        vec![
            Instruction::new("__quantum__qis__mz__body", vec![q(3), r(5)]),
            Instruction::new("__quantum__qir__read_result", vec![r(5)]).with_output("0"),
        ],
        &expect![[r#"
            // Generated from QIR block entry.
            OPENQASM 2.0;
            include "qelib1.inc";

            qreg q[1];
            creg c[1];
            measure q[0] -> c[0];
            // %0 = c[0]"#]],
    );
}

#[test]
fn adjoint_and_multi_qubit_gates() {
    check(
        vec![
            Instruction::new("__quantum__qis__s__adj", vec![q(0)]),
            Instruction::new("__quantum__qis__t__adj", vec![q(1)]),
            Instruction::new("__quantum__qis__cz__body", vec![q(1), q(0)]),
            Instruction::new("__quantum__qis__swap__body", vec![q(0), q(2)]),
            Instruction::new("__quantum__qis__ccx__body", vec![q(0), q(1), q(2)]),
        ],
        &expect![[r#"
            // Generated from QIR block entry.
            OPENQASM 2.0;
            include "qelib1.inc";

            qreg q[3];
            sdg q[0];
            tdg q[1];
            cz q[1], q[0];
            swap q[0], q[2];
            ccx q[0], q[1], q[2];"#]],
    );
}

#[test]
fn multi_line_comment_is_split() {
    let mut exporter =
        OpenQasm2Exporter::new(&Block::new("entry", vec![])).expect("block should translate");
    exporter.comment("first\nsecond");
    assert_eq!(exporter.lines(), ["// first", "// second"]);
}

#[test]
fn comment_does_not_resolve_operands() {
    let mut exporter =
        OpenQasm2Exporter::new(&Block::new("entry", vec![])).expect("block should translate");
    exporter.comment("q[7]");
    assert!(exporter.qubits().is_empty());
    assert!(exporter.results().is_empty());
}

#[test]
fn declaration_counts_match_distinct_identities() {
    let block = Block::new(
        "entry",
        vec![
            Instruction::new("__quantum__qis__h__body", vec![q(8)]),
            Instruction::new("__quantum__qis__h__body", vec![q(3)]),
            Instruction::new("__quantum__qis__cnot__body", vec![q(8), q(3)]),
            Instruction::new("__quantum__qis__mz__body", vec![q(8), r(2)]),
            Instruction::new("__quantum__qis__mz__body", vec![q(3), r(2)]),
        ],
    );
    let exporter = OpenQasm2Exporter::new(&block).expect("block should translate");
    assert_eq!(exporter.qubits().len(), 2);
    assert_eq!(exporter.qubits().get(OperandId::Id(8)), Some(0));
    assert_eq!(exporter.qubits().get(OperandId::Id(3)), Some(1));
    assert_eq!(exporter.results().len(), 1);
    let text = exporter.export().expect("export should succeed");
    assert!(text.contains("qreg q[2];"));
    assert!(text.contains("creg c[1];"));
}

#[test]
fn dynamic_qubits_share_one_register_slot() {
    check(
        vec![
            Instruction::new("__quantum__qis__h__body", vec![Operand::Qubit(None)]),
            Instruction::new("__quantum__qis__x__body", vec![Operand::Qubit(None)]),
        ],
        &expect![[r#"
            // Generated from QIR block entry.
            OPENQASM 2.0;
            include "qelib1.inc";

            qreg q[1];
            h q[0];
            x q[0];"#]],
    );
}

#[test]
fn translation_is_deterministic() {
    let block = Block::new(
        "entry",
        vec![
            Instruction::new("__quantum__qis__h__body", vec![q(2)]),
            Instruction::new("__quantum__qis__cnot__body", vec![q(2), q(0)]),
            Instruction::new("BAR", vec![q(5), r(1)]),
            Instruction::new("__quantum__qis__mz__body", vec![q(0), r(1)]),
        ],
    );
    assert_eq!(export(&block), export(&block));
}

#[test]
fn wrong_arity_fails_construction() {
    let block = Block::new(
        "entry",
        vec![Instruction::new("__quantum__qis__cnot__body", vec![q(0)])],
    );
    let err = OpenQasm2Exporter::new(&block).expect_err("cnot needs two qubits");
    assert_eq!(
        err,
        Error::Arity {
            name: "CX".into(),
            expected: 2,
            found: 1,
        }
    );
}

#[test]
fn block_read_from_text() {
    let functions = parse_functions(
        r#"
define void @main() #0 {
body:
  call void @__quantum__qis__h__body(%Qubit* inttoptr (i64 1 to %Qubit*))
  call void @__quantum__qis__cnot__body(%Qubit* inttoptr (i64 1 to %Qubit*), %Qubit* null)
  call void @__quantum__qis__mz__body(%Qubit* null, %Result* inttoptr (i64 1 to %Result*))
  %0 = call i1 @__quantum__qir__read_result(%Result* inttoptr (i64 1 to %Result*))
  ret void
}
"#,
    )
    .expect("program should parse");
    expect![[r#"
        // Generated from QIR block body.
        OPENQASM 2.0;
        include "qelib1.inc";

        qreg q[2];
        creg c[1];
        h q[0];
        CX q[0], q[1];
        measure q[1] -> c[0];
        // %0 = c[0]"#]]
    .assert_eq(&export(&functions[0].blocks[0]));
}

#[test]
fn unknown_opcode_on_opaque_pointer_declares_its_qubit() {
    let functions = parse_functions(
        r#"
define void @main() #0 {
entry:
  call void @__quantum__qis__foo__body(ptr null)
  ret void
}
"#,
    )
    .expect("program should parse");
    expect![[r#"
        // Generated from QIR block entry.
        OPENQASM 2.0;
        include "qelib1.inc";

        qreg q[1];
        // Unsupported QIS operation:
        // __quantum__qis__foo__body q[0]"#]]
    .assert_eq(&export(&functions[0].blocks[0]));
}

#[test]
fn measure_and_reset_from_opaque_pointers() {
    let functions = parse_functions(
        r#"
define i64 @ENTRYPOINT__main() #0 {
block_0:
  call void @__quantum__qis__h__body(ptr inttoptr (i64 1 to ptr))
  call void @__quantum__qis__mresetz__body(ptr inttoptr (i64 1 to ptr), ptr null) #1
  ret i64 0
}
"#,
    )
    .expect("program should parse");
    expect![[r#"
        // Generated from QIR block block_0.
        OPENQASM 2.0;
        include "qelib1.inc";

        qreg q[1];
        creg c[1];
        h q[0];
        measure q[0] -> c[0];
        // Requires nonstandard reset gate:
        reset q[0];"#]]
    .assert_eq(&export(&functions[0].blocks[0]));
}
