//! Slicer configuration
//!
//! Serializable knobs for the scheduler, in the builder style used across
//! the workspace.

use qcomm_core::{QcommError, QcommResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default bound of the dense ready-time arena
pub const DEFAULT_DENSE_LIMIT: usize = 4096;

/// How qubit indices of the input are presented in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QubitNumbering {
    /// Keep the original, possibly sparse, indices
    #[default]
    Preserve,
    /// Reindex to 0..N-1 in ascending order of the original index
    Compact,
}

/// Scheduler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
    /// Qubit numbering policy applied by `Scheduler::schedule_stream`
    pub numbering: QubitNumbering,

    /// Qubits below this index live in the dense ready-time arena
    pub dense_limit: usize,

    /// Re-check slice exclusivity after scheduling
    pub verify_slices: bool,
}

impl SliceConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Configuration matching the reference tool (dense renumbering)
    pub fn reference() -> Self {
        Self {
            numbering: QubitNumbering::Compact,
            ..Self::default()
        }
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> QcommResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate().map_err(QcommError::InvalidConfig)?;
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QcommResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set numbering policy
    pub fn with_numbering(mut self, numbering: QubitNumbering) -> Self {
        self.numbering = numbering;
        self
    }

    /// Set dense arena bound
    pub fn with_dense_limit(mut self, limit: usize) -> Self {
        self.dense_limit = limit;
        self
    }

    /// Enable or disable post-verification
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify_slices = verify;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.dense_limit == 0 {
            return Err("dense_limit must be >= 1".to_string());
        }

        Ok(())
    }
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            numbering: QubitNumbering::Preserve,
            dense_limit: DEFAULT_DENSE_LIMIT,
            verify_slices: false,
        }
    }
}

impl fmt::Display for SliceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SliceConfig({:?}, dense_limit={}, verify={})",
            self.numbering, self.dense_limit, self.verify_slices
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
