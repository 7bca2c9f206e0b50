// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Translation of a single QIR basic block into a circuit representation.
//!
//! A back end implements [`CircuitExporter`]; [`export_instructions`] walks the
//! block once and drives it. [`OpenQasm2Exporter`] is the reference back end,
//! producing OpenQASM 2.0 text.

mod exporter;
pub mod gates;
mod openqasm2;
pub mod resolve;

pub use exporter::{CircuitExporter, check_arity, export_instructions};
pub use gates::{Gate, GateTable};
pub use openqasm2::OpenQasm2Exporter;
pub use resolve::{IdTable, OperandId, resolve};

use miette::Diagnostic;
use thiserror::Error;

#[derive(Clone, Debug, Diagnostic, Eq, Error, PartialEq)]
pub enum Error {
    #[error("`{name}` expects {expected} operand(s) but was given {found}")]
    #[diagnostic(code("Qirx.Export.Arity"))]
    #[diagnostic(help(
        "the instruction does not match the signature of the intrinsic it calls"
    ))]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },
}
