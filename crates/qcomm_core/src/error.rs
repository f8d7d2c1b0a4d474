//! Error types for QCOMM
//!
//! One error enum shared by ingestion, scheduling and emission.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use crate::types::QubitId;
use std::fmt;
use thiserror::Error;

/// What is wrong with a rejected gate operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionDefect {
    /// The operation names no qubit at all
    EmptyQubits,
    /// The operation names the same qubit more than once
    DuplicateQubit(QubitId),
}

impl fmt::Display for InstructionDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructionDefect::EmptyQubits => write!(f, "operation touches no qubits"),
            InstructionDefect::DuplicateQubit(q) => write!(f, "qubit {} is referenced twice", q),
        }
    }
}

/// Main error type for QCOMM
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QcommError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Operation rejected before it reached the scheduler state
    #[error("Invalid instruction #{position} '{name}': {defect}")]
    InvalidInstruction {
        position: usize,
        name: String,
        defect: InstructionDefect,
    },

    /// Invalid configuration or generator parameter
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Ingestion Errors
    // ========================================================================
    /// Malformed input handed over by the upstream collaborator
    #[error("Upstream ingestion failure: {0}")]
    UpstreamIngestion(String),

    // ========================================================================
    // Schedule Errors
    // ========================================================================
    /// Two operations of one slice share a qubit
    #[error("Slice {slice} uses qubit {qubit} more than once")]
    SliceConflict { slice: usize, qubit: QubitId },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type alias for QCOMM operations
pub type QcommResult<T> = Result<T, QcommError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QcommError {
    fn from(err: serde_json::Error) -> Self {
        QcommError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for QcommError {
    fn from(err: std::io::Error) -> Self {
        QcommError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QcommError {
    /// Shorthand for an `InvalidInstruction` error
    pub fn invalid_instruction(
        position: usize,
        name: impl Into<String>,
        defect: InstructionDefect,
    ) -> Self {
        QcommError::InvalidInstruction {
            position,
            name: name.into(),
            defect,
        }
    }

    /// Check if error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QcommError::InvalidInstruction { .. } | QcommError::InvalidConfig(_)
        )
    }

    /// Check if error originates upstream of the scheduler
    pub fn is_ingestion_error(&self) -> bool {
        matches!(
            self,
            QcommError::UpstreamIngestion(_) | QcommError::JsonError(_) | QcommError::FileError(_)
        )
    }

    /// Input position of the offending operation, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            QcommError::InvalidInstruction { position, .. } => Some(*position),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
