//! Elementary gate operation for QCOMM
//!
//! A `GateOp` is a flat value record: an opaque gate name plus the ordered
//! list of qubits it touches. Gate semantics never matter for slicing, only
//! the qubit set does.

use crate::error::{InstructionDefect, QcommError, QcommResult};
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One elementary gate operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateOp {
    /// Gate mnemonic, opaque to the scheduler
    pub name: String,

    /// Qubits touched, in the order they were written
    pub qubits: Vec<QubitId>,
}

impl GateOp {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new gate operation
    pub fn new(name: impl Into<String>, qubits: impl Into<Vec<QubitId>>) -> Self {
        Self {
            name: name.into(),
            qubits: qubits.into(),
        }
    }

    /// Single-qubit operation
    pub fn single(name: impl Into<String>, qubit: QubitId) -> Self {
        Self::new(name, vec![qubit])
    }

    /// Two-qubit operation
    pub fn pair(name: impl Into<String>, a: QubitId, b: QubitId) -> Self {
        Self::new(name, vec![a, b])
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Number of qubits touched (fan-in)
    pub fn arity(&self) -> usize {
        self.qubits.len()
    }

    /// Check if this operation touches a qubit
    pub fn touches(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }

    /// Check if two operations act on disjoint qubit sets
    pub fn is_disjoint(&self, other: &GateOp) -> bool {
        !self.qubits.iter().any(|q| other.touches(*q))
    }

    /// Largest qubit index touched
    pub fn max_qubit(&self) -> Option<QubitId> {
        self.qubits.iter().copied().max()
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Find the first defect of this operation, if any
    pub fn defect(&self) -> Option<InstructionDefect> {
        if self.qubits.is_empty() {
            return Some(InstructionDefect::EmptyQubits);
        }

        let mut seen = self.qubits.clone();
        seen.sort_unstable();
        seen.windows(2)
            .find(|w| w[0] == w[1])
            .map(|w| InstructionDefect::DuplicateQubit(w[0]))
    }

    /// Validate this operation as the `position`-th element of a stream
    pub fn validate(&self, position: usize) -> QcommResult<()> {
        match self.defect() {
            Some(defect) => Err(QcommError::invalid_instruction(
                position,
                self.name.clone(),
                defect,
            )),
            None => Ok(()),
        }
    }

    /// Apply a qubit relabelling
    pub fn remap(&self, f: impl Fn(QubitId) -> QubitId) -> GateOp {
        GateOp {
            name: self.name.clone(),
            qubits: self.qubits.iter().map(|&q| f(q)).collect(),
        }
    }
}

impl fmt::Display for GateOp {
    /// Renders as `NAME(q0 q1 ...)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, q) in self.qubits.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", q)?;
        }
        write!(f, ")")
    }
}

impl FromStr for GateOp {
    type Err = QcommError;

    /// Parse a `NAME(q0 q1 ...)` token
    ///
    /// The name may be empty. Qubit validity is not checked here.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        let malformed = || QcommError::UpstreamIngestion(format!("invalid gate format: {}", token));

        let open = token.find('(').ok_or_else(malformed)?;
        let close = token.rfind(')').ok_or_else(malformed)?;
        if close < open || close != token.len() - 1 {
            return Err(malformed());
        }

        let name = token[..open].trim();
        if name.chars().any(|c| c.is_whitespace() || c == ')') {
            return Err(malformed());
        }

        let qubits = token[open + 1..close]
            .split_whitespace()
            .map(|arg| {
                arg.parse::<QubitId>().map_err(|_| {
                    QcommError::UpstreamIngestion(format!(
                        "invalid qubit index '{}' in {}",
                        arg, token
                    ))
                })
            })
            .collect::<QcommResult<Vec<_>>>()?;

        Ok(GateOp::new(name, qubits))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(GateOp::single("H", 0).to_string(), "H(0)");
        assert_eq!(GateOp::pair("CX", 0, 1).to_string(), "CX(0 1)");
        assert_eq!(GateOp::new("G3", vec![4, 2, 9]).to_string(), "G3(4 2 9)");
    }

    #[test]
    fn test_parse_token() {
        let op: GateOp = "CX(3 1)".parse().unwrap();
        assert_eq!(op.name, "CX");
        assert_eq!(op.qubits, vec![3, 1]);

        let unnamed: GateOp = "(0 1)".parse().unwrap();
        assert_eq!(unnamed.name, "");
        assert_eq!(unnamed.qubits, vec![0, 1]);

        let empty: GateOp = "H()".parse().unwrap();
        assert!(empty.qubits.is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        assert!("H0".parse::<GateOp>().is_err());
        assert!("H(0".parse::<GateOp>().is_err());
        assert!("H)0(".parse::<GateOp>().is_err());
        assert!("H(a)".parse::<GateOp>().is_err());
        assert!("H(-1)".parse::<GateOp>().is_err());
        assert!("H(0)X".parse::<GateOp>().is_err());
        // a stray parenthesis ahead of the qubit list belongs to the name
        assert!("H)(0)".parse::<GateOp>().is_err());
    }

    #[test]
    fn test_validate() {
        assert!(GateOp::pair("CX", 0, 1).validate(0).is_ok());

        let err = GateOp::new("H", vec![]).validate(4).unwrap_err();
        assert_eq!(
            err,
            QcommError::invalid_instruction(4, "H", InstructionDefect::EmptyQubits)
        );

        let err = GateOp::new("CCX", vec![2, 5, 2]).validate(1).unwrap_err();
        assert_eq!(
            err,
            QcommError::invalid_instruction(1, "CCX", InstructionDefect::DuplicateQubit(2))
        );
    }

    #[test]
    fn test_disjoint() {
        let a = GateOp::pair("CX", 0, 1);
        let b = GateOp::pair("CX", 2, 3);
        let c = GateOp::single("H", 1);
        assert!(a.is_disjoint(&b));
        assert!(!a.is_disjoint(&c));
    }

    #[test]
    fn test_remap() {
        let op = GateOp::pair("CX", 10, 20).remap(|q| q / 10);
        assert_eq!(op.qubits, vec![1, 2]);
        assert_eq!(op.max_qubit(), Some(2));
    }
}
