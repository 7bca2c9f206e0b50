// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{Circuit, Error};
use log::debug;
use qirx_block::{Block, Operand};
use qirx_export::{CircuitExporter, Gate, GateTable, OpenQasm2Exporter};
use regex_lite::Regex;
use std::sync::LazyLock;

/// Builds a [`Circuit`] by translating a block to OpenQASM 2.0 and reading
/// the text back.
///
/// Every exporter call is forwarded to the owned [`OpenQasm2Exporter`], so
/// gate names in the circuit are the OpenQASM symbols.
#[derive(Debug)]
pub struct QasmCircuitExporter {
    qasm: OpenQasm2Exporter,
}

impl QasmCircuitExporter {
    pub fn new(block: &Block) -> Result<Self, qirx_export::Error> {
        Ok(Self {
            qasm: OpenQasm2Exporter::new(block)?,
        })
    }

    /// The exporter producing the intermediate text.
    #[must_use]
    pub fn qasm(&self) -> &OpenQasm2Exporter {
        &self.qasm
    }
}

impl CircuitExporter for QasmCircuitExporter {
    type Output = Circuit;
    type Error = Error;

    fn gate_table(&self) -> &GateTable {
        self.qasm.gate_table()
    }

    fn apply_gate(&mut self, gate: Gate, qubits: &[Operand]) -> Result<(), qirx_export::Error> {
        self.qasm.apply_gate(gate, qubits)
    }

    fn measure(&mut self, qubit: &Operand, result: &Operand) {
        self.qasm.measure(qubit, result);
    }

    fn comment(&mut self, text: &str) {
        self.qasm.comment(text);
    }

    fn qubit_expr(&mut self, qubit: &Operand) -> String {
        self.qasm.qubit_expr(qubit)
    }

    fn result_expr(&mut self, result: &Operand) -> String {
        self.qasm.result_expr(result)
    }

    fn export(self) -> Result<Circuit, Error> {
        let text = self.qasm.export()?;
        parse_openqasm2(&text)
    }
}

static REGISTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(qreg|creg)\s+([A-Za-z_]\w*)\s*\[\s*(\d+)\s*\]\s*;$")
        .expect("register regex should be valid")
});

static MEASURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^measure\s+([A-Za-z_]\w*)\s*\[\s*(\d+)\s*\]\s*->\s*([A-Za-z_]\w*)\s*\[\s*(\d+)\s*\]\s*;$")
        .expect("measure regex should be valid")
});

static GATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]\w*)\s+([^;]+);$").expect("gate regex should be valid")
});

static ARGUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_]\w*)\s*\[\s*(\d+)\s*\]$").expect("argument regex should be valid")
});

/// Reads OpenQASM 2.0 in the form written by [`OpenQasm2Exporter`] into a circuit.
///
/// Supported are the version line, `include`, at most one `qreg` and one
/// `creg`, applications of parameter-free gates to single register elements,
/// `measure`, and `//` comments. Comments before the version line are dropped;
/// later ones become annotations.
pub fn parse_openqasm2(text: &str) -> Result<Circuit, Error> {
    let mut reader = QasmReader::default();
    for (idx, line) in text.lines().enumerate() {
        let statement = reader
            .read_line(line.trim())
            .map_err(|message| Error::QasmSyntax {
                line: idx + 1,
                message,
            })?;
        if let Some(statement) = statement {
            reader.apply(statement)?;
        }
    }
    Ok(reader.circuit)
}

#[derive(Default)]
struct QasmReader {
    circuit: Circuit,
    seen_version: bool,
    qreg: Option<String>,
    creg: Option<String>,
}

enum Statement {
    Gate(String, Vec<usize>),
    Measure(usize, usize),
    Annotation(String),
}

impl QasmReader {
    fn read_line(&mut self, line: &str) -> Result<Option<Statement>, String> {
        if line.is_empty() {
            return Ok(None);
        }

        if let Some(comment) = line.strip_prefix("//") {
            if !self.seen_version {
                debug!("dropping preamble comment: {comment}");
                return Ok(None);
            }
            let text = comment.strip_prefix(' ').unwrap_or(comment);
            return Ok(Some(Statement::Annotation(text.to_string())));
        }

        if !self.seen_version {
            return match line {
                "OPENQASM 2.0;" => {
                    self.seen_version = true;
                    Ok(None)
                }
                _ => Err(format!("expected `OPENQASM 2.0;`, found `{line}`")),
            };
        }

        if line.starts_with("include ") {
            return Ok(None);
        }

        if let Some(captures) = REGISTER.captures(line) {
            let name = captures[2].to_string();
            let size = parse_index(&captures[3])?;
            let (slot, count) = if &captures[1] == "qreg" {
                (&mut self.qreg, &mut self.circuit.num_qubits)
            } else {
                (&mut self.creg, &mut self.circuit.num_results)
            };
            if slot.is_some() {
                return Err(format!("only one `{}` declaration is supported", &captures[1]));
            }
            *slot = Some(name);
            *count = size;
            return Ok(None);
        }

        if let Some(captures) = MEASURE.captures(line) {
            let qubit = element(self.qreg.as_deref(), &captures[1], &captures[2])?;
            let result = element(self.creg.as_deref(), &captures[3], &captures[4])?;
            return Ok(Some(Statement::Measure(qubit, result)));
        }

        if let Some(captures) = GATE.captures(line) {
            let targets = captures[2]
                .split(',')
                .map(|arg| {
                    let arg = arg.trim();
                    let parts = ARGUMENT
                        .captures(arg)
                        .ok_or_else(|| format!("expected a register element, found `{arg}`"))?;
                    element(self.qreg.as_deref(), &parts[1], &parts[2])
                })
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Some(Statement::Gate(captures[1].to_string(), targets)));
        }

        Err(format!("unsupported statement `{line}`"))
    }

    fn apply(&mut self, statement: Statement) -> Result<(), Error> {
        match statement {
            Statement::Gate(name, targets) => self.circuit.add_gate(name, targets),
            Statement::Measure(qubit, result) => self.circuit.add_measurement(qubit, result),
            Statement::Annotation(text) => {
                self.circuit.add_annotation(text);
                Ok(())
            }
        }
    }
}

/// Resolves `name[index]` against the declared register `declared`.
fn element(declared: Option<&str>, name: &str, index: &str) -> Result<usize, String> {
    match declared {
        Some(declared) if declared == name => parse_index(index),
        _ => Err(format!("undeclared register `{name}`")),
    }
}

fn parse_index(text: &str) -> Result<usize, String> {
    text.parse()
        .map_err(|_| format!("`{text}` is not a valid index"))
}
