// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{
    Error,
    gates::{Gate, GateTable, MEASURE_RESETS, MEASUREMENTS, READOUTS, RESET},
};
use log::debug;
use qirx_block::{Instruction, Operand};

/// The operations a back end must provide to receive a translated block.
///
/// Calls arrive in instruction order. Operand rendering goes through
/// `qubit_expr`/`result_expr`, which assign back-end-local indices.
pub trait CircuitExporter {
    type Output;
    type Error: From<Error>;

    /// The back end's fixed opcode-to-gate mapping.
    fn gate_table(&self) -> &GateTable;

    /// Applies `gate` to `qubits`, in the order given.
    ///
    /// Fails if the number of qubits does not match the gate's arity.
    fn apply_gate(&mut self, gate: Gate, qubits: &[Operand]) -> Result<(), Error>;

    fn measure(&mut self, qubit: &Operand, result: &Operand);

    /// Records an annotation in the output. Does not resolve any operand.
    fn comment(&mut self, text: &str);

    fn qubit_expr(&mut self, qubit: &Operand) -> String;

    fn result_expr(&mut self, result: &Operand) -> String;

    /// Finishes the translation and returns the artifact.
    fn export(self) -> Result<Self::Output, Self::Error>
    where
        Self: Sized;
}

/// Returns an error unless exactly `gate.arity` qubits are given.
pub fn check_arity(gate: Gate, qubits: &[Operand]) -> Result<(), Error> {
    if qubits.len() == gate.arity {
        Ok(())
    } else {
        Err(Error::Arity {
            name: gate.symbol.to_string(),
            expected: gate.arity,
            found: qubits.len(),
        })
    }
}

/// Drives `exporter` through `instructions` in a single pass.
///
/// Instructions the back end has no mapping for are kept as comments rather
/// than dropped; only malformed instructions fail the pass.
pub fn export_instructions<E>(exporter: &mut E, instructions: &[Instruction]) -> Result<(), Error>
where
    E: CircuitExporter + ?Sized,
{
    for instruction in instructions {
        export_instruction(exporter, instruction)?;
    }
    Ok(())
}

fn export_instruction<E>(exporter: &mut E, instruction: &Instruction) -> Result<(), Error>
where
    E: CircuitExporter + ?Sized,
{
    let opcode = instruction.opcode.as_str();
    let operands = instruction.operands.as_slice();

    if let Some(gate) = exporter.gate_table().lookup(opcode) {
        return exporter.apply_gate(gate, operands);
    }

    if opcode == RESET {
        return apply_reset(exporter, operands);
    }

    if MEASUREMENTS.contains(&opcode) || MEASURE_RESETS.contains(&opcode) {
        let [qubit, result] = operands else {
            return Err(operand_count_error(opcode, 2, operands));
        };
        exporter.measure(qubit, result);
        if MEASURE_RESETS.contains(&opcode) {
            return apply_reset(exporter, std::slice::from_ref(qubit));
        }
        return Ok(());
    }

    if READOUTS.contains(&opcode) {
        let [result] = operands else {
            return Err(operand_count_error(opcode, 1, operands));
        };
        let expr = exporter.result_expr(result);
        let binding = instruction.output.as_deref().unwrap_or("_");
        exporter.comment(&format!("%{binding} = {expr}"));
        return Ok(());
    }

    debug!("no mapping for `{opcode}`, emitting it as a comment");
    let args = operands
        .iter()
        .map(|operand| operand_expr(exporter, operand))
        .collect::<Vec<_>>()
        .join(", ");
    let binding = instruction
        .output
        .as_deref()
        .map(|name| format!("%{name} = "))
        .unwrap_or_default();
    exporter.comment("Unsupported QIS operation:");
    exporter.comment(format!("{binding}{opcode} {args}").trim_end());
    Ok(())
}

fn apply_reset<E>(exporter: &mut E, operands: &[Operand]) -> Result<(), Error>
where
    E: CircuitExporter + ?Sized,
{
    exporter.comment("Requires nonstandard reset gate:");
    let reset = exporter.gate_table().reset();
    exporter.apply_gate(reset, operands)
}

/// Renders an operand of an unmapped instruction. `%Result*` operands go to
/// the result table and every other pointer, typed or opaque, to the qubit
/// table; values are shown as written.
fn operand_expr<E>(exporter: &mut E, operand: &Operand) -> String
where
    E: CircuitExporter + ?Sized,
{
    match operand {
        Operand::Result(_) => exporter.result_expr(operand),
        Operand::Qubit(_) | Operand::Pointer(_) => exporter.qubit_expr(operand),
        _ => operand.to_string(),
    }
}

fn operand_count_error(opcode: &str, expected: usize, operands: &[Operand]) -> Error {
    Error::Arity {
        name: opcode.to_string(),
        expected,
        found: operands.len(),
    }
}
