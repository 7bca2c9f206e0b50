// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Representation of a quantum circuit over a fixed number of qubit wires
/// and classical result slots.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Circuit {
    #[serde(rename = "numQubits")]
    pub num_qubits: usize,
    #[serde(rename = "numResults")]
    pub num_results: usize,
    pub operations: Vec<Operation>,
}

/// Union type for operations.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Operation {
    #[serde(rename = "gate")]
    Gate { gate: String, targets: Vec<usize> },
    #[serde(rename = "measurement")]
    Measurement { qubit: usize, result: usize },
    #[serde(rename = "annotation")]
    Annotation { text: String },
}

impl Circuit {
    #[must_use]
    pub fn new(num_qubits: usize, num_results: usize) -> Self {
        Self {
            num_qubits,
            num_results,
            operations: Vec::new(),
        }
    }

    pub fn add_gate(&mut self, gate: impl Into<String>, targets: Vec<usize>) -> Result<(), Error> {
        for &qubit in &targets {
            self.check_qubit(qubit)?;
        }
        self.operations.push(Operation::Gate {
            gate: gate.into(),
            targets,
        });
        Ok(())
    }

    pub fn add_measurement(&mut self, qubit: usize, result: usize) -> Result<(), Error> {
        self.check_qubit(qubit)?;
        if result >= self.num_results {
            return Err(Error::ResultOutOfRange {
                result,
                num_results: self.num_results,
            });
        }
        self.operations
            .push(Operation::Measurement { qubit, result });
        Ok(())
    }

    pub fn add_annotation(&mut self, text: impl Into<String>) {
        self.operations
            .push(Operation::Annotation { text: text.into() });
    }

    /// Operations that act on the circuit, skipping annotations.
    pub fn instructions(&self) -> impl Iterator<Item = &Operation> {
        self.operations
            .iter()
            .filter(|op| !matches!(op, Operation::Annotation { .. }))
    }

    fn check_qubit(&self, qubit: usize) -> Result<(), Error> {
        if qubit < self.num_qubits {
            Ok(())
        } else {
            Err(Error::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            })
        }
    }
}

impl Display for Circuit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "qubits: {}, results: {}", self.num_qubits, self.num_results)?;
        for op in &self.operations {
            writeln!(f, "{op}")?;
        }
        Ok(())
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Gate { gate, targets } => {
                let targets = targets
                    .iter()
                    .map(|q| format!("q_{q}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{gate} {targets}")
            }
            Operation::Measurement { qubit, result } => write!(f, "M q_{qubit} -> c_{result}"),
            Operation::Annotation { text } => write!(f, "# {text}"),
        }
    }
}
