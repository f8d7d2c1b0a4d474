//! Instruction stream for QCOMM
//!
//! The ordered, already-flattened sequence of elementary gate operations
//! handed over by the upstream lowering step. Program order is preserved
//! exactly; nothing in this module reorders operations.

use crate::error::{QcommError, QcommResult};
use crate::gate_op::GateOp;
use crate::types::{QubitId, QubitMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Ordered sequence of gate operations in program order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstructionStream {
    ops: Vec<GateOp>,
}

impl InstructionStream {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an empty stream
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create from a vector of operations
    pub fn from_ops(ops: Vec<GateOp>) -> Self {
        Self { ops }
    }

    /// Parse the flat text form
    ///
    /// Every line holds zero or more `NAME(q0 q1 ...)` tokens, read left to
    /// right, top to bottom. Text after `#` is ignored.
    pub fn parse(text: &str) -> QcommResult<Self> {
        let mut ops = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let content = line.split('#').next().unwrap_or("");
            let parsed = parse_line(content).map_err(|err| match err {
                QcommError::UpstreamIngestion(msg) => {
                    QcommError::UpstreamIngestion(format!("line {}: {}", line_no + 1, msg))
                }
                other => other,
            })?;
            ops.extend(parsed);
        }

        log::debug!("parsed instruction stream with {} operations", ops.len());
        Ok(Self { ops })
    }

    /// Deserialize from a JSON array of `{name, qubits}` records
    pub fn from_json(json: &str) -> QcommResult<Self> {
        serde_json::from_str(json)
            .map_err(|err| QcommError::UpstreamIngestion(format!("invalid JSON stream: {}", err)))
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QcommResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Append an operation
    pub fn push(&mut self, op: GateOp) {
        self.ops.push(op);
    }

    /// Get operations
    pub fn ops(&self) -> &[GateOp] {
        &self.ops
    }

    /// Consume into operations
    pub fn into_ops(self) -> Vec<GateOp> {
        self.ops
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Check if stream is empty
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    // ========================================================================
    // Qubit Analysis
    // ========================================================================

    /// Sorted set of qubits referenced by the stream
    pub fn qubits(&self) -> BTreeSet<QubitId> {
        self.ops
            .iter()
            .flat_map(|op| op.qubits.iter().copied())
            .collect()
    }

    /// Width needed for a dense register (max index + 1)
    ///
    /// Saturates at `usize::MAX` when the stream uses the largest index.
    pub fn num_qubits(&self) -> usize {
        self.ops
            .iter()
            .filter_map(GateOp::max_qubit)
            .max()
            .map_or(0, |q| q.saturating_add(1))
    }

    /// Check if referenced qubits form the range 0..N-1
    pub fn is_contiguous(&self) -> bool {
        self.qubits().len() == self.num_qubits()
    }

    /// Mapping that would compact this stream
    pub fn qubit_map(&self) -> QubitMap {
        QubitMap::from_qubits(self.qubits())
    }

    /// Reindex qubits to the dense range 0..N-1
    ///
    /// Relative order of the original indices is kept.
    pub fn compacted(&self) -> Self {
        let map = self.qubit_map();
        if map.is_identity() {
            return self.clone();
        }

        let ops = self
            .ops
            .iter()
            .map(|op| op.remap(|q| map.dense(q).unwrap_or(q)))
            .collect();

        Self { ops }
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate every operation; the first invalid one is reported
    pub fn validate(&self) -> QcommResult<()> {
        self.ops
            .iter()
            .enumerate()
            .try_for_each(|(position, op)| op.validate(position))
    }
}

impl From<Vec<GateOp>> for InstructionStream {
    fn from(ops: Vec<GateOp>) -> Self {
        Self::from_ops(ops)
    }
}

impl FromIterator<GateOp> for InstructionStream {
    fn from_iter<I: IntoIterator<Item = GateOp>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a InstructionStream {
    type Item = &'a GateOp;
    type IntoIter = std::slice::Iter<'a, GateOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

impl fmt::Display for InstructionStream {
    /// One operation per line
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            writeln!(f, "{}", op)?;
        }
        Ok(())
    }
}

// ============================================================================
// Line Parsing
// ============================================================================

/// Parse one line of `NAME(q0 q1 ...)` tokens separated by whitespace
///
/// A token whose qubit list contains spaces is reassembled until its
/// closing parenthesis.
pub fn parse_line(line: &str) -> QcommResult<Vec<GateOp>> {
    let mut ops = Vec::new();
    let mut words = line.split_whitespace();

    while let Some(word) = words.next() {
        let mut token = word.to_string();
        while !token.ends_with(')') {
            match words.next() {
                Some(next) => {
                    token.push(' ');
                    token.push_str(next);
                }
                None => break,
            }
        }
        ops.push(token.parse::<GateOp>()?);
    }

    Ok(ops)
}

// ============================================================================
// Tests
// ============================================================================
