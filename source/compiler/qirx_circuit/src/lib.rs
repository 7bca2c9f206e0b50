// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Circuit objects and the back ends that build them from QIR blocks.

mod builder;
mod circuit;
mod qasm;

pub use builder::CircuitBuilder;
pub use circuit::{Circuit, Operation};
pub use qasm::{QasmCircuitExporter, parse_openqasm2};

use miette::Diagnostic;
use thiserror::Error;

#[derive(Clone, Debug, Diagnostic, Eq, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] qirx_export::Error),
    #[error("OpenQASM syntax error on line {line}: {message}")]
    #[diagnostic(code("Qirx.Circuit.QasmSyntax"))]
    QasmSyntax { line: usize, message: String },
    #[error("qubit {qubit} is outside of a circuit with {num_qubits} qubit(s)")]
    #[diagnostic(code("Qirx.Circuit.QubitOutOfRange"))]
    QubitOutOfRange { qubit: usize, num_qubits: usize },
    #[error("result {result} is outside of a circuit with {num_results} result(s)")]
    #[diagnostic(code("Qirx.Circuit.ResultOutOfRange"))]
    ResultOutOfRange { result: usize, num_results: usize },
}
