// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Opcode of the qubit reset intrinsic.
pub const RESET: &str = "__quantum__qis__reset__body";

/// Opcodes of the Z-basis measurement intrinsics, taking `(qubit, result)`.
pub const MEASUREMENTS: &[&str] = &["__quantum__qis__mz__body", "__quantum__qis__m__body"];

/// Opcodes of measurements that also reset the qubit, taking `(qubit, result)`.
pub const MEASURE_RESETS: &[&str] = &["__quantum__qis__mresetz__body"];

/// Opcodes that read back a previously measured result. These have no effect
/// on the quantum state.
pub const READOUTS: &[&str] = &["__quantum__qir__read_result", "__quantum__rt__read_result"];

/// A parameter-free gate as a back end names it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Gate {
    pub symbol: &'static str,
    /// The number of qubits the gate acts on.
    pub arity: usize,
}

impl Gate {
    #[must_use]
    pub const fn new(symbol: &'static str, arity: usize) -> Self {
        Self { symbol, arity }
    }
}

/// A back end's fixed mapping from opcode to gate.
#[derive(Debug)]
pub struct GateTable {
    gates: &'static [(&'static str, Gate)],
    reset: Gate,
}

impl GateTable {
    #[must_use]
    pub const fn new(gates: &'static [(&'static str, Gate)], reset: Gate) -> Self {
        Self { gates, reset }
    }

    #[must_use]
    pub fn lookup(&self, opcode: &str) -> Option<Gate> {
        self.gates
            .iter()
            .find_map(|(name, gate)| (*name == opcode).then_some(*gate))
    }

    /// The gate the back end emits for a qubit reset.
    #[must_use]
    pub fn reset(&self) -> Gate {
        self.reset
    }

    /// Iterates over the table's `(opcode, gate)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Gate)> + '_ {
        self.gates.iter().copied()
    }
}
