// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{Circuit, Error};
use qirx_block::{Block, Operand};
use qirx_export::{
    CircuitExporter, Gate, GateTable, IdTable, check_arity, export_instructions, resolve,
};

const GATES: GateTable = GateTable::new(
    &[
        ("__quantum__qis__x__body", Gate::new("X", 1)),
        ("__quantum__qis__y__body", Gate::new("Y", 1)),
        ("__quantum__qis__z__body", Gate::new("Z", 1)),
        ("__quantum__qis__h__body", Gate::new("H", 1)),
        ("__quantum__qis__s__body", Gate::new("S", 1)),
        ("__quantum__qis__s__adj", Gate::new("Sadj", 1)),
        ("__quantum__qis__t__body", Gate::new("T", 1)),
        ("__quantum__qis__t__adj", Gate::new("Tadj", 1)),
        ("__quantum__qis__cnot__body", Gate::new("CNOT", 2)),
        ("__quantum__qis__cx__body", Gate::new("CX", 2)),
        ("__quantum__qis__cy__body", Gate::new("CY", 2)),
        ("__quantum__qis__cz__body", Gate::new("CZ", 2)),
        ("__quantum__qis__swap__body", Gate::new("SWAP", 2)),
        ("__quantum__qis__ccx__body", Gate::new("CCX", 3)),
    ],
    Gate::new("Reset", 1),
);

/// An operation recorded during the pass, replayed once the circuit size is known.
#[derive(Clone, Debug)]
enum Action {
    Gate {
        name: &'static str,
        targets: Vec<usize>,
    },
    Measurement {
        qubit: usize,
        result: usize,
    },
    Annotation(String),
}

/// Builds a [`Circuit`] directly from a block.
///
/// The circuit's wire counts are only known once every operand has been
/// resolved, so operations are recorded as actions and applied on export.
#[derive(Debug)]
pub struct CircuitBuilder {
    actions: Vec<Action>,
    qubits: IdTable,
    results: IdTable,
}

impl CircuitBuilder {
    pub fn new(block: &Block) -> Result<Self, qirx_export::Error> {
        let mut builder = Self {
            actions: Vec::new(),
            qubits: IdTable::default(),
            results: IdTable::default(),
        };
        export_instructions(&mut builder, &block.instructions)?;
        Ok(builder)
    }

    #[must_use]
    pub fn qubits(&self) -> &IdTable {
        &self.qubits
    }

    #[must_use]
    pub fn results(&self) -> &IdTable {
        &self.results
    }
}

impl CircuitExporter for CircuitBuilder {
    type Output = Circuit;
    type Error = Error;

    fn gate_table(&self) -> &GateTable {
        &GATES
    }

    fn apply_gate(&mut self, gate: Gate, qubits: &[Operand]) -> Result<(), qirx_export::Error> {
        check_arity(gate, qubits)?;
        let targets = qubits
            .iter()
            .map(|qubit| resolve(qubit, &mut self.qubits))
            .collect();
        self.actions.push(Action::Gate {
            name: gate.symbol,
            targets,
        });
        Ok(())
    }

    fn measure(&mut self, qubit: &Operand, result: &Operand) {
        let qubit = resolve(qubit, &mut self.qubits);
        let result = resolve(result, &mut self.results);
        self.actions.push(Action::Measurement { qubit, result });
    }

    fn comment(&mut self, text: &str) {
        for line in text.split('\n') {
            self.actions
                .push(Action::Annotation(line.trim_end_matches('\r').to_string()));
        }
    }

    fn qubit_expr(&mut self, qubit: &Operand) -> String {
        resolve(qubit, &mut self.qubits).to_string()
    }

    fn result_expr(&mut self, result: &Operand) -> String {
        resolve(result, &mut self.results).to_string()
    }

    fn export(self) -> Result<Circuit, Error> {
        let mut circuit = Circuit::new(self.qubits.len(), self.results.len());
        for action in self.actions {
            match action {
                Action::Gate { name, targets } => circuit.add_gate(name, targets)?,
                Action::Measurement { qubit, result } => circuit.add_measurement(qubit, result)?,
                Action::Annotation(text) => circuit.add_annotation(text),
            }
        }
        Ok(circuit)
    }
}
