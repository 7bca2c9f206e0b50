// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Basic blocks of QIR programs, as consumed by the exporters, and a reader
//! that builds them from textual LLVM IR.

mod block;
pub mod reader;

pub use block::{Block, Function, Instruction, Operand};
pub use reader::{Error, parse_functions};
