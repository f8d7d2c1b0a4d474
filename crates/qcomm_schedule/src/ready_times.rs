//! Per-qubit ready times
//!
//! Scheduler-private map from qubit to the next slice at which it is free.
//! Indices below `dense_limit` are kept in a growable arena; anything above
//! falls back to a sparse map so huge, sparse numbering never forces a huge
//! allocation.

use qcomm_core::{QubitId, SliceIndex};
use std::collections::BTreeMap;

/// Qubit -> next free slice index (0 for never-seen qubits)
#[derive(Debug, Clone)]
pub(crate) struct QubitReadyTimes {
    dense: Vec<SliceIndex>,
    sparse: BTreeMap<QubitId, SliceIndex>,
    dense_limit: usize,
}

impl QubitReadyTimes {
    /// Create an empty map
    pub(crate) fn new(dense_limit: usize) -> Self {
        Self {
            dense: Vec::new(),
            sparse: BTreeMap::new(),
            dense_limit,
        }
    }

    /// Create with the dense arena pre-sized for a known register width
    pub(crate) fn with_width(dense_limit: usize, width: usize) -> Self {
        let mut times = Self::new(dense_limit);
        times.dense.reserve(width.min(dense_limit));
        times
    }

    /// Ready time of a qubit
    pub(crate) fn get(&self, qubit: QubitId) -> SliceIndex {
        if qubit < self.dense_limit {
            self.dense.get(qubit).copied().unwrap_or(0)
        } else {
            self.sparse.get(&qubit).copied().unwrap_or(0)
        }
    }

    /// Earliest slice at which all given qubits are free
    pub(crate) fn earliest(&self, qubits: &[QubitId]) -> SliceIndex {
        qubits.iter().map(|&q| self.get(q)).max().unwrap_or(0)
    }

    /// Mark a qubit as busy until `ready`
    pub(crate) fn set(&mut self, qubit: QubitId, ready: SliceIndex) {
        if qubit < self.dense_limit {
            if qubit >= self.dense.len() {
                self.dense.resize(qubit + 1, 0);
            }
            self.dense[qubit] = ready;
        } else {
            self.sparse.insert(qubit, ready);
        }
    }

    /// Number of qubits stored in the sparse overflow
    #[cfg(test)]
    pub(crate) fn sparse_len(&self) -> usize {
        self.sparse.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
