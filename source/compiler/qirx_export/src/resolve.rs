// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use qirx_block::Operand;
use rustc_hash::FxHashMap;
use std::fmt::{self, Display, Formatter};

/// The identity an operand resolves to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperandId {
    Id(u64),
    /// Shared bucket for every operand without an identity of its own.
    Unsupported,
}

impl From<&Operand> for OperandId {
    fn from(operand: &Operand) -> Self {
        operand.id().map_or(OperandId::Unsupported, OperandId::Id)
    }
}

impl Display for OperandId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OperandId::Id(id) => write!(f, "{id}"),
            OperandId::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// Dense, insertion-ordered numbering of operand identities.
///
/// Indices are handed out on first sight and never change or get reused.
#[derive(Clone, Debug, Default)]
pub struct IdTable {
    indices: FxHashMap<OperandId, usize>,
    order: Vec<OperandId>,
}

impl IdTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Looks up the index of `id` without assigning one.
    #[must_use]
    pub fn get(&self, id: OperandId) -> Option<usize> {
        self.indices.get(&id).copied()
    }

    /// Iterates over the identities in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, OperandId)> + '_ {
        self.order.iter().copied().enumerate()
    }

    fn index_of(&mut self, id: OperandId) -> usize {
        if let Some(index) = self.indices.get(&id) {
            return *index;
        }
        let index = self.order.len();
        self.indices.insert(id, index);
        self.order.push(id);
        index
    }
}

/// Returns the index of `operand` in `table`, assigning the next free index
/// if its identity has not been seen yet.
///
/// The table decides the namespace; the operand's own kind is not consulted.
pub fn resolve(operand: &Operand, table: &mut IdTable) -> usize {
    table.index_of(OperandId::from(operand))
}
