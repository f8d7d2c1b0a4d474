//! Schedule: ordered sequence of slices
//!
//! Built once by the scheduler, then read-only. Besides the slices it
//! remembers which slice every input position landed in.

use crate::slice::Slice;
use qcomm_core::{GateOp, QcommError, QcommResult, QubitId, SliceIndex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sliced gate stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct Schedule {
    /// Slices in execution order
    slices: Vec<Slice>,

    /// Slice index of each input operation, by input position
    placements: Vec<SliceIndex>,
}

impl Schedule {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an empty schedule (zero slices)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a schedule expecting `num_ops` placements
    pub(crate) fn with_capacity(num_ops: usize) -> Self {
        Self {
            slices: Vec::new(),
            placements: Vec::with_capacity(num_ops),
        }
    }

    /// Rebuild from externally produced slices
    ///
    /// Input positions are taken to be the emission order (slice by slice,
    /// left to right).
    pub fn from_slices(slices: Vec<Slice>) -> Self {
        let placements = slices
            .iter()
            .enumerate()
            .flat_map(|(idx, slice)| std::iter::repeat(idx).take(slice.len()))
            .collect();

        Self { slices, placements }
    }

    /// Append `op` to slice `index`, creating slices up to it if needed
    pub(crate) fn place(&mut self, op: GateOp, index: SliceIndex) {
        while self.slices.len() <= index {
            self.slices.push(Slice::new());
        }
        self.slices[index].push(op);
        self.placements.push(index);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Slices in execution order
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Consume into slices
    pub fn into_slices(self) -> Vec<Slice> {
        self.slices
    }

    /// Get a slice by index
    pub fn get(&self, index: SliceIndex) -> Option<&Slice> {
        self.slices.get(index)
    }

    /// Number of slices (makespan)
    pub fn makespan(&self) -> usize {
        self.slices.len()
    }

    /// Check if schedule has no slice
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Total number of scheduled operations
    pub fn num_ops(&self) -> usize {
        self.placements.len()
    }

    /// Slice index of the operation at input `position`
    pub fn placement(&self, position: usize) -> Option<SliceIndex> {
        self.placements.get(position).copied()
    }

    /// Slice index of every input operation
    pub fn placements(&self) -> &[SliceIndex] {
        &self.placements
    }

    // ========================================================================
    // Analysis
    // ========================================================================

    /// Indices of the slices that use a qubit, ascending
    pub fn slices_on_qubit(&self, qubit: QubitId) -> Vec<SliceIndex> {
        self.slices
            .iter()
            .enumerate()
            .filter(|(_, slice)| slice.touches(qubit))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Largest number of operations in one slice
    pub fn max_width(&self) -> usize {
        self.slices.iter().map(Slice::len).max().unwrap_or(0)
    }

    /// Average operations per slice (1.0 = fully sequential)
    pub fn parallelism_factor(&self) -> f64 {
        if self.slices.is_empty() {
            return 1.0;
        }
        self.num_ops() as f64 / self.slices.len() as f64
    }

    /// Check that no slice uses a qubit twice
    pub fn verify(&self) -> QcommResult<()> {
        for (idx, slice) in self.slices.iter().enumerate() {
            if let Some(qubit) = slice.conflict() {
                return Err(QcommError::SliceConflict { slice: idx, qubit });
            }
        }
        Ok(())
    }
}

/// Unchecked serde form of `Schedule`
#[derive(Deserialize)]
struct RawSchedule {
    slices: Vec<Slice>,
    placements: Vec<SliceIndex>,
}

impl TryFrom<RawSchedule> for Schedule {
    type Error = QcommError;

    /// Placements must account for every operation of every slice
    fn try_from(raw: RawSchedule) -> QcommResult<Self> {
        let mut counts = vec![0usize; raw.slices.len()];
        for &idx in &raw.placements {
            match counts.get_mut(idx) {
                Some(count) => *count += 1,
                None => {
                    return Err(QcommError::UpstreamIngestion(format!(
                        "placement refers to slice {} of {}",
                        idx,
                        raw.slices.len()
                    )))
                }
            }
        }

        if let Some((idx, slice)) = raw
            .slices
            .iter()
            .enumerate()
            .find(|(idx, slice)| slice.len() != counts[*idx])
        {
            return Err(QcommError::UpstreamIngestion(format!(
                "slice {} holds {} operations but {} are placed in it",
                idx,
                slice.len(),
                counts[idx]
            )));
        }

        Ok(Self {
            slices: raw.slices,
            placements: raw.placements,
        })
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Slice;
    type IntoIter = std::slice::Iter<'a, Slice>;

    fn into_iter(self) -> Self::IntoIter {
        self.slices.iter()
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schedule:")?;
        writeln!(f, "  Slices: {}", self.makespan())?;
        writeln!(f, "  Operations: {}", self.num_ops())?;
        writeln!(f, "  Max width: {}", self.max_width())?;
        writeln!(f, "  Parallelism: {:.2}x", self.parallelism_factor())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_test_schedule_named(name: &str) -> Schedule {
        let mut schedule = Schedule::with_capacity(3);
        schedule.place(GateOp::single(name, 0), 0);
        schedule.place(GateOp::single(name, 1), 0);
        schedule.place(GateOp::pair("CX", 0, 1), 1);
        schedule
    }

    fn make_test_schedule() -> Schedule {
        make_test_schedule_named("X")
    }

    #[test]
    fn test_place() {
        let schedule = make_test_schedule();
        assert_eq!(schedule.makespan(), 2);
        assert_eq!(schedule.num_ops(), 3);
        assert_eq!(schedule.placements(), &[0, 0, 1]);
        assert_eq!(schedule.placement(2), Some(1));
        assert_eq!(schedule.placement(3), None);
    }

    #[test]
    fn test_place_extends() {
        let mut schedule = Schedule::empty();
        schedule.place(GateOp::single("H", 0), 2);
        assert_eq!(schedule.makespan(), 3);
        assert!(schedule.slices()[0].is_empty());
        assert_eq!(schedule.get(2).map(Slice::len), Some(1));
    }

    #[test]
    fn test_analysis() {
        let schedule = make_test_schedule();
        assert_eq!(schedule.slices_on_qubit(0), vec![0, 1]);
        assert!(schedule.slices_on_qubit(9).is_empty());
        assert_eq!(schedule.max_width(), 2);
        assert_relative_eq!(schedule.parallelism_factor(), 1.5);
    }

    #[test]
    fn test_empty() {
        let schedule = Schedule::empty();
        assert!(schedule.is_empty());
        assert_eq!(schedule.max_width(), 0);
        assert_relative_eq!(schedule.parallelism_factor(), 1.0);
        assert!(schedule.verify().is_ok());
    }

    #[test]
    fn test_from_slices() {
        let schedule = Schedule::from_slices(vec![
            Slice::from_ops(vec![GateOp::single("H", 0), GateOp::single("H", 1)]),
            Slice::from_ops(vec![GateOp::pair("CX", 0, 1)]),
        ]);
        assert_eq!(schedule, make_test_schedule_named("H"));
    }

    #[test]
    fn test_verify_conflict() {
        let schedule = Schedule::from_slices(vec![
            Slice::from_ops(vec![GateOp::single("H", 0)]),
            Slice::from_ops(vec![GateOp::pair("CX", 0, 1), GateOp::single("X", 1)]),
        ]);
        assert_eq!(
            schedule.verify().unwrap_err(),
            QcommError::SliceConflict { slice: 1, qubit: 1 }
        );
    }

    #[test]
    fn test_json_keeps_placements() {
        let mut schedule = Schedule::empty();
        schedule.place(GateOp::single("H", 0), 0);
        schedule.place(GateOp::pair("CX", 0, 1), 1);
        schedule.place(GateOp::single("H", 2), 0);

        let json = serde_json::to_string(&schedule).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
        assert_eq!(back.placements(), &[0, 1, 0]);
    }

    #[test]
    fn test_json_rejects_inconsistent_placements() {
        let missing = r#"{"slices":[[{"name":"H","qubits":[0]}]],"placements":[]}"#;
        assert!(serde_json::from_str::<Schedule>(missing).is_err());

        let out_of_range = r#"{"slices":[[{"name":"H","qubits":[0]}]],"placements":[3]}"#;
        assert!(serde_json::from_str::<Schedule>(out_of_range).is_err());

        let misplaced = r#"{"slices":[[{"name":"H","qubits":[0]}],[{"name":"X","qubits":[1]}]],"placements":[0,0]}"#;
        assert!(serde_json::from_str::<Schedule>(misplaced).is_err());
    }

    #[test]
    fn test_display_summary() {
        let text = make_test_schedule().to_string();
        assert!(text.contains("Slices: 2"));
        assert!(text.contains("Operations: 3"));
        assert!(text.contains("Parallelism: 1.50x"));
    }
}
