// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(test)]
mod tests;

use std::fmt::{self, Display, Formatter};

/// Prefixes of the quantum instruction set and of the QIR result intrinsics.
/// Runtime (`__quantum__rt__`) calls other than result readout do not qualify.
const CIRCUIT_PREFIXES: &[&str] = &["__quantum__qis__", "__quantum__qir__"];

const RUNTIME_READ_RESULT: &str = "__quantum__rt__read_result";

/// A function body as a list of basic blocks, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Function {
    pub name: String,
    pub blocks: Vec<Block>,
}

impl Function {
    #[must_use]
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.name == name)
    }
}

/// A straight-line sequence of instructions. Terminators are not kept.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Block {
    pub name: String,
    pub instructions: Vec<Instruction>,
}

impl Block {
    #[must_use]
    pub fn new(name: impl Into<String>, instructions: Vec<Instruction>) -> Self {
        Self {
            name: name.into(),
            instructions,
        }
    }

    /// Returns true if every instruction in the block calls a quantum
    /// instruction set or result intrinsic, i.e. the block can be expressed as
    /// a circuit without classical computation or runtime calls.
    #[must_use]
    pub fn is_circuit_like(&self) -> bool {
        self.instructions.iter().all(|instr| {
            instr.opcode == RUNTIME_READ_RESULT
                || CIRCUIT_PREFIXES
                    .iter()
                    .any(|prefix| instr.opcode.starts_with(prefix))
        })
    }
}

/// A single instruction. For calls, `opcode` is the callee name; for any other
/// instruction it is the LLVM opcode (`add`, `icmp`, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub opcode: String,
    pub operands: Vec<Operand>,
    /// The SSA name the instruction's value is bound to, without the leading `%`.
    pub output: Option<String>,
}

impl Instruction {
    #[must_use]
    pub fn new(opcode: impl Into<String>, operands: Vec<Operand>) -> Self {
        Self {
            opcode: opcode.into(),
            operands,
            output: None,
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// An instruction operand.
///
/// Pointer operands carry an identity only when they are constants: `null` is
/// id 0 and `inttoptr (i64 N to ...)` is id N. Dynamic pointers have none.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A `%Qubit*` pointer.
    Qubit(Option<u64>),
    /// A `%Result*` pointer.
    Result(Option<u64>),
    /// An opaque `ptr`, whose kind is only known from the call it appears in.
    Pointer(Option<u64>),
    Integer(i64),
    Double(f64),
    Bool(bool),
    /// A named SSA value of a non-pointer type, without the leading `%`.
    Variable(String),
    /// Operand text that was not recognized.
    Raw(String),
}

impl Operand {
    /// The identity of a pointer operand, if it has one.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        match self {
            Operand::Qubit(id) | Operand::Result(id) | Operand::Pointer(id) => *id,
            _ => None,
        }
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Qubit(id) => fmt_pointer(f, "Qubit", *id),
            Operand::Result(id) => fmt_pointer(f, "Result", *id),
            Operand::Pointer(id) => fmt_pointer(f, "ptr", *id),
            Operand::Integer(i) => write!(f, "{i}"),
            Operand::Double(d) => write!(f, "{d}"),
            Operand::Bool(b) => write!(f, "{b}"),
            Operand::Variable(name) => write!(f, "%{name}"),
            Operand::Raw(text) => write!(f, "{text}"),
        }
    }
}

fn fmt_pointer(f: &mut Formatter<'_>, kind: &str, id: Option<u64>) -> fmt::Result {
    match id {
        Some(id) => write!(f, "{kind}({id})"),
        None => write!(f, "{kind}(?)"),
    }
}
