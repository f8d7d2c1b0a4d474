//! Schedule statistics
//!
//! Summary figures of a sliced circuit, printed in the YAML-like layout the
//! downstream simulator reports use.

use crate::schedule::Schedule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const IND: &str = "  ";

/// Summary of a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    /// Span of used qubit indices (max - min + 1), 0 when no qubit is used
    ///
    /// Saturates at `usize::MAX` for a span covering every index.
    pub number_of_qubits: usize,

    /// Total operations
    pub number_of_gates: usize,

    /// Number of slices
    pub number_of_stages: usize,

    /// Fan-in -> share of all gates, in percent
    pub distribution_of_gates: BTreeMap<usize, f64>,

    /// Largest slice
    pub max_width: usize,

    /// Gates per stage
    pub parallelism: f64,
}

impl ScheduleStats {
    /// Compute statistics of a schedule
    pub fn from_schedule(schedule: &Schedule) -> Self {
        let ops = || schedule.slices().iter().flat_map(|s| s.ops().iter());

        let qubits = || ops().flat_map(|op| op.qubits.iter().copied());
        let number_of_qubits = match (qubits().min(), qubits().max()) {
            (Some(min), Some(max)) => (max - min).saturating_add(1),
            _ => 0,
        };

        let number_of_gates = schedule.num_ops();

        let mut histogram: BTreeMap<usize, usize> = BTreeMap::new();
        for op in ops() {
            *histogram.entry(op.arity()).or_insert(0) += 1;
        }
        let distribution_of_gates = histogram
            .into_iter()
            .map(|(fanin, count)| (fanin, count as f64 * 100.0 / number_of_gates as f64))
            .collect();

        Self {
            number_of_qubits,
            number_of_gates,
            number_of_stages: schedule.makespan(),
            distribution_of_gates,
            max_width: schedule.max_width(),
            parallelism: schedule.parallelism_factor(),
        }
    }

    /// Share of gates with the given fan-in, in percent
    pub fn share(&self, fanin: usize) -> f64 {
        self.distribution_of_gates.get(&fanin).copied().unwrap_or(0.0)
    }
}

impl fmt::Display for ScheduleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit:")?;
        writeln!(f, "{}number_of_qubits: {}", IND, self.number_of_qubits)?;
        writeln!(f, "{}number_of_gates: {}", IND, self.number_of_gates)?;
        writeln!(f, "{}number_of_stages: {}", IND, self.number_of_stages)?;
        writeln!(f, "{}distribution_of_gates:", IND)?;
        for (fanin, share) in &self.distribution_of_gates {
            writeln!(f, "{}{}'{}-input': {} # %", IND, IND, fanin, share)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
