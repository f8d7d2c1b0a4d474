//! Instruction stream builder for QCOMM
//!
//! Fluent builder over the elementary basis the upstream lowering step
//! targets. Names are emitted upper-case, matching the reference output.

use crate::gate_op::GateOp;
use crate::stream::InstructionStream;
use crate::types::QubitId;

/// Elementary basis gate names produced by the upstream lowering step
pub const BASIS_GATES: [&str; 10] = ["U3", "CX", "X", "Y", "Z", "H", "S", "SDG", "T", "TDG"];

/// Fluent stream builder (consuming self pattern)
#[derive(Debug, Clone, Default)]
pub struct StreamBuilder {
    stream: InstructionStream,
}

impl StreamBuilder {
    /// Create a new, empty builder
    pub fn new() -> Self {
        Self {
            stream: InstructionStream::new(),
        }
    }

    // ========================================================================
    // Generic
    // ========================================================================

    /// Add an arbitrary operation
    pub fn op(mut self, name: impl Into<String>, qubits: impl Into<Vec<QubitId>>) -> Self {
        self.stream.push(GateOp::new(name, qubits));
        self
    }

    /// Add an already-built operation
    pub fn push(mut self, op: GateOp) -> Self {
        self.stream.push(op);
        self
    }

    // ========================================================================
    // Single-Qubit Basis Gates
    // ========================================================================

    /// Add generic single-qubit rotation
    pub fn u3(self, qubit: QubitId) -> Self {
        self.op("U3", [qubit])
    }

    /// Add Pauli-X gate
    pub fn x(self, qubit: QubitId) -> Self {
        self.op("X", [qubit])
    }

    /// Add Pauli-Y gate
    pub fn y(self, qubit: QubitId) -> Self {
        self.op("Y", [qubit])
    }

    /// Add Pauli-Z gate
    pub fn z(self, qubit: QubitId) -> Self {
        self.op("Z", [qubit])
    }

    /// Add Hadamard gate
    pub fn h(self, qubit: QubitId) -> Self {
        self.op("H", [qubit])
    }

    /// Add S gate
    pub fn s(self, qubit: QubitId) -> Self {
        self.op("S", [qubit])
    }

    /// Add S-dagger gate
    pub fn sdg(self, qubit: QubitId) -> Self {
        self.op("SDG", [qubit])
    }

    /// Add T gate
    pub fn t(self, qubit: QubitId) -> Self {
        self.op("T", [qubit])
    }

    /// Add T-dagger gate
    pub fn tdg(self, qubit: QubitId) -> Self {
        self.op("TDG", [qubit])
    }

    // ========================================================================
    // Two-Qubit Basis Gates
    // ========================================================================

    /// Add CNOT gate
    pub fn cx(self, control: QubitId, target: QubitId) -> Self {
        self.op("CX", [control, target])
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// Hadamard on qubits 0..n
    pub fn h_layer(mut self, num_qubits: usize) -> Self {
        for q in 0..num_qubits {
            self = self.h(q);
        }
        self
    }

    /// CNOT chain 0->1, 1->2, ..., (n-2)->(n-1)
    pub fn cx_chain(mut self, num_qubits: usize) -> Self {
        for q in 0..num_qubits.saturating_sub(1) {
            self = self.cx(q, q + 1);
        }
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Number of operations added so far
    pub fn len(&self) -> usize {
        self.stream.len()
    }

    /// Check if nothing was added yet
    pub fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// Finish and return the stream
    pub fn build(self) -> InstructionStream {
        self.stream
    }
}

// ============================================================================
// Tests
// ============================================================================
