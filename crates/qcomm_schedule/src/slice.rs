//! Slice: operations sharing one time step
//!
//! Every operation of a slice acts on qubits no other operation of the same
//! slice touches, so the whole slice can run concurrently.

use qcomm_core::{GateOp, QubitId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Ordered group of resource-disjoint operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slice {
    ops: Vec<GateOp>,
}

impl Slice {
    /// Create an empty slice
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create from operations, as read back from an external rendering
    pub fn from_ops(ops: Vec<GateOp>) -> Self {
        Self { ops }
    }

    /// Append an operation (insertion order is kept)
    pub(crate) fn push(&mut self, op: GateOp) {
        self.ops.push(op);
    }

    /// Operations in insertion order
    pub fn ops(&self) -> &[GateOp] {
        &self.ops
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if slice holds no operation
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of qubits busy during this step
    pub fn busy_qubits(&self) -> usize {
        self.ops.iter().map(GateOp::arity).sum()
    }

    /// Check if any operation touches a qubit
    pub fn touches(&self, qubit: QubitId) -> bool {
        self.ops.iter().any(|op| op.touches(qubit))
    }

    /// First qubit referenced twice within the slice, if any
    pub fn conflict(&self) -> Option<QubitId> {
        let mut seen = HashSet::new();
        self.ops
            .iter()
            .flat_map(|op| op.qubits.iter().copied())
            .find(|&q| !seen.insert(q))
    }
}

impl fmt::Display for Slice {
    /// Operations separated by one space
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
