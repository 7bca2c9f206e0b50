// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(test)]
mod tests;

use crate::{
    Error,
    exporter::{CircuitExporter, check_arity, export_instructions},
    gates::{Gate, GateTable},
    resolve::{IdTable, resolve},
};
use qirx_block::{Block, Operand};

const GATES: GateTable = GateTable::new(
    &[
        ("__quantum__qis__x__body", Gate::new("x", 1)),
        ("__quantum__qis__y__body", Gate::new("y", 1)),
        ("__quantum__qis__z__body", Gate::new("z", 1)),
        ("__quantum__qis__h__body", Gate::new("h", 1)),
        ("__quantum__qis__s__body", Gate::new("s", 1)),
        ("__quantum__qis__s__adj", Gate::new("sdg", 1)),
        ("__quantum__qis__t__body", Gate::new("t", 1)),
        ("__quantum__qis__t__adj", Gate::new("tdg", 1)),
        ("__quantum__qis__cnot__body", Gate::new("CX", 2)),
        ("__quantum__qis__cx__body", Gate::new("cx", 2)),
        ("__quantum__qis__cy__body", Gate::new("cy", 2)),
        ("__quantum__qis__cz__body", Gate::new("cz", 2)),
        ("__quantum__qis__swap__body", Gate::new("swap", 2)),
        ("__quantum__qis__ccx__body", Gate::new("ccx", 3)),
    ],
    Gate::new("reset", 1),
);

/// Exports a block as OpenQASM 2.0 source.
///
/// The whole block is translated on construction. Register declarations
/// depend on how many distinct qubits and results were seen, so they are
/// only written out by [`CircuitExporter::export`].
#[derive(Debug)]
pub struct OpenQasm2Exporter {
    block_name: String,
    lines: Vec<String>,
    qubits: IdTable,
    results: IdTable,
}

impl OpenQasm2Exporter {
    pub const QREG: &'static str = "q";
    pub const CREG: &'static str = "c";

    pub fn new(block: &Block) -> Result<Self, Error> {
        let mut exporter = Self {
            block_name: block.name.clone(),
            lines: Vec::new(),
            qubits: IdTable::default(),
            results: IdTable::default(),
        };
        export_instructions(&mut exporter, &block.instructions)?;
        Ok(exporter)
    }

    #[must_use]
    pub fn qubits(&self) -> &IdTable {
        &self.qubits
    }

    #[must_use]
    pub fn results(&self) -> &IdTable {
        &self.results
    }

    /// The body lines emitted so far, without header or declarations.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn header(&self) -> Vec<String> {
        vec![
            format!("// Generated from QIR block {}.", self.block_name),
            "OPENQASM 2.0;".to_string(),
            r#"include "qelib1.inc";"#.to_string(),
            String::new(),
        ]
    }

    fn declarations(&self) -> Vec<String> {
        let mut declarations = Vec::new();
        if !self.qubits.is_empty() {
            declarations.push(format!("qreg {}[{}];", Self::QREG, self.qubits.len()));
        }
        if !self.results.is_empty() {
            declarations.push(format!("creg {}[{}];", Self::CREG, self.results.len()));
        }
        declarations
    }
}

impl CircuitExporter for OpenQasm2Exporter {
    type Output = String;
    type Error = Error;

    fn gate_table(&self) -> &GateTable {
        &GATES
    }

    fn apply_gate(&mut self, gate: Gate, qubits: &[Operand]) -> Result<(), Error> {
        check_arity(gate, qubits)?;
        let args = qubits
            .iter()
            .map(|qubit| self.qubit_expr(qubit))
            .collect::<Vec<_>>()
            .join(", ");
        self.lines.push(format!("{} {args};", gate.symbol));
        Ok(())
    }

    fn measure(&mut self, qubit: &Operand, result: &Operand) {
        let qubit = self.qubit_expr(qubit);
        let result = self.result_expr(result);
        self.lines.push(format!("measure {qubit} -> {result};"));
    }

    fn comment(&mut self, text: &str) {
        for line in text.split('\n') {
            self.lines
                .push(format!("// {}", line.trim_end_matches('\r')));
        }
    }

    fn qubit_expr(&mut self, qubit: &Operand) -> String {
        format!("{}[{}]", Self::QREG, resolve(qubit, &mut self.qubits))
    }

    fn result_expr(&mut self, result: &Operand) -> String {
        format!("{}[{}]", Self::CREG, resolve(result, &mut self.results))
    }

    fn export(self) -> Result<String, Error> {
        let mut output = self.header();
        output.extend(self.declarations());
        output.extend(self.lines);
        Ok(output.join("\n"))
    }
}
