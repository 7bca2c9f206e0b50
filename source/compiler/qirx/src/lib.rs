// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Exports basic blocks of QIR programs to OpenQASM 2.0 or circuit objects.


pub use qirx_block::{Block, Function, Instruction, Operand, parse_functions};
pub use qirx_circuit::{Circuit, CircuitBuilder, Operation, QasmCircuitExporter};
pub use qirx_export::{CircuitExporter, OpenQasm2Exporter};

use clap::ValueEnum;
use miette::Diagnostic;
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Read(#[from] qirx_block::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] qirx_export::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Circuit(#[from] qirx_circuit::Error),
    #[error("the program does not define any function")]
    #[diagnostic(code("Qirx.NoFunctions"))]
    NoFunctions,
    #[error("no function named `{0}`")]
    #[diagnostic(code("Qirx.FunctionNotFound"))]
    FunctionNotFound(String),
    #[error("function `{0}` has no blocks")]
    #[diagnostic(code("Qirx.EmptyFunction"))]
    EmptyFunction(String),
    #[error("function `{function}` has no block named `{block}`")]
    #[diagnostic(code("Qirx.BlockNotFound"))]
    BlockNotFound { function: String, block: String },
    #[error("could not serialize the artifact as JSON")]
    #[diagnostic(code("Qirx.Json"))]
    Json(#[source] serde_json::Error),
}

/// The available back ends.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Target {
    /// OpenQASM 2.0 source text.
    #[value(name = "openqasm2")]
    OpenQasm2,
    /// A circuit built directly from the block.
    #[value(name = "circuit")]
    Circuit,
    /// A circuit read back from the OpenQASM 2.0 translation.
    #[value(name = "qasm-circuit")]
    QasmCircuit,
}

/// The result of exporting a block.
#[derive(Clone, Debug, PartialEq)]
pub enum Artifact {
    Text(String),
    Circuit(Circuit),
}

impl Artifact {
    pub fn to_json(&self) -> Result<String, Error> {
        match self {
            Artifact::Text(text) => serde_json::to_string(text),
            Artifact::Circuit(circuit) => serde_json::to_string_pretty(circuit),
        }
        .map_err(Error::Json)
    }
}

impl Display for Artifact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Artifact::Text(text) => write!(f, "{text}"),
            Artifact::Circuit(circuit) => write!(f, "{circuit}"),
        }
    }
}

/// Translates `block` with the back end selected by `target`.
pub fn export_block(block: &Block, target: Target) -> Result<Artifact, Error> {
    let artifact = match target {
        Target::OpenQasm2 => Artifact::Text(OpenQasm2Exporter::new(block)?.export()?),
        Target::Circuit => Artifact::Circuit(CircuitBuilder::new(block)?.export()?),
        Target::QasmCircuit => Artifact::Circuit(QasmCircuitExporter::new(block)?.export()?),
    };
    Ok(artifact)
}

/// Picks a block by function and block name. Without a name, the first
/// function or the first block of the function is used.
pub fn select_block<'a>(
    functions: &'a [Function],
    function: Option<&str>,
    block: Option<&str>,
) -> Result<&'a Block, Error> {
    let function = match function {
        Some(name) => functions
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| Error::FunctionNotFound(name.to_string()))?,
        None => functions.first().ok_or(Error::NoFunctions)?,
    };
    match block {
        Some(name) => function.block(name).ok_or_else(|| Error::BlockNotFound {
            function: function.name.clone(),
            block: name.to_string(),
        }),
        None => function
            .blocks
            .first()
            .ok_or_else(|| Error::EmptyFunction(function.name.clone())),
    }
}
