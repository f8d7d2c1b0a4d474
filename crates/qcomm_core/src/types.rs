//! Core types for QCOMM
//!
//! Qubit identifiers and the qubit remapping used when a stream is
//! compacted to a contiguous index range.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed, possibly sparse)
pub type QubitId = usize;

/// Slice index inside a schedule (discrete time step)
pub type SliceIndex = usize;

// ============================================================================
// QubitMap
// ============================================================================

/// Mapping from original qubit indices to a dense 0..N-1 range
///
/// Dense indices are assigned in ascending order of the original index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QubitMap {
    forward: BTreeMap<QubitId, QubitId>,
}

impl QubitMap {
    /// Build a map from any collection of used qubits
    pub fn from_qubits(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        let mut used: Vec<QubitId> = qubits.into_iter().collect();
        used.sort_unstable();
        used.dedup();

        let forward = used
            .into_iter()
            .enumerate()
            .map(|(dense, original)| (original, dense))
            .collect();

        Self { forward }
    }

    /// Dense index for an original qubit
    pub fn dense(&self, original: QubitId) -> Option<QubitId> {
        self.forward.get(&original).copied()
    }

    /// Original qubit for a dense index
    pub fn original(&self, dense: QubitId) -> Option<QubitId> {
        self.forward.keys().nth(dense).copied()
    }

    /// Number of mapped qubits
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Check if no qubit is mapped
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Check if the map is the identity (already contiguous from 0)
    pub fn is_identity(&self) -> bool {
        self.forward.iter().all(|(orig, dense)| orig == dense)
    }
}

// ============================================================================
// Tests
// ============================================================================
