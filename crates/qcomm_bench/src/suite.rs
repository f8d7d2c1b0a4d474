//! Benchmark suite for the slicer
//!
//! Runs generated streams through the scheduler and records how close each
//! one comes to full parallelism.

use crate::generators::StreamGenerator;
use qcomm_core::{InstructionStream, QcommResult};
use qcomm_schedule::{critical_path_length, Scheduler};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Single benchmark result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Benchmark name
    pub name: String,

    /// Register width
    pub qubits: usize,

    /// Input operations
    pub gates: usize,

    /// Slices produced
    pub slices: usize,

    /// Critical path length of the input
    pub critical_path: usize,

    /// Gates per slice
    pub parallelism: f64,

    /// Scheduling time (microseconds)
    pub time_us: u64,
}

/// Benchmark suite
pub struct BenchmarkSuite {
    scheduler: Scheduler,
    cases: Vec<(String, InstructionStream)>,
}

impl BenchmarkSuite {
    /// Create an empty suite
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            cases: Vec::new(),
        }
    }

    /// Standard set of structured and random workloads
    pub fn standard(seed: u64) -> QcommResult<Self> {
        let gen = StreamGenerator::with_seed(seed);
        let mut suite = Self::new(Scheduler::default());

        suite.add("ghz_16", gen.ghz(16));
        suite.add("qft_pattern_12", gen.qft_pattern(12));
        suite.add("brickwork_16x8", gen.brickwork(16, 8));
        suite.add("h_layer_32", gen.layer(32, "H"));
        suite.add("random_32x500", gen.random(32, 500, &[0.6, 0.3, 0.1])?);

        Ok(suite)
    }

    /// Add a named workload
    pub fn add(&mut self, name: impl Into<String>, stream: InstructionStream) {
        self.cases.push((name.into(), stream));
    }

    /// Number of workloads
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Check if suite has no workload
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Run every workload
    pub fn run(&self) -> QcommResult<Vec<BenchmarkResult>> {
        self.cases
            .iter()
            .map(|(name, stream)| -> QcommResult<BenchmarkResult> {
                let start = Instant::now();
                let schedule = self.scheduler.schedule_stream(stream)?;
                let time_us = start.elapsed().as_micros() as u64;

                Ok(BenchmarkResult {
                    name: name.clone(),
                    qubits: stream.num_qubits(),
                    gates: stream.len(),
                    slices: schedule.makespan(),
                    critical_path: critical_path_length(stream.ops())?,
                    parallelism: schedule.parallelism_factor(),
                    time_us,
                })
            })
            .collect()
    }
}

// ============================================================================
// Reporting
// ============================================================================

/// Markdown table of results
pub fn to_markdown(results: &[BenchmarkResult]) -> String {
    let mut output = String::new();

    output.push_str("| Name | Qubits | Gates | Slices | Critical | Parallelism | Time(us) |\n");
    output.push_str("|------|--------|-------|--------|----------|-------------|----------|\n");
    for r in results {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {:.2} | {} |\n",
            r.name, r.qubits, r.gates, r.slices, r.critical_path, r.parallelism, r.time_us
        ));
    }

    output
}

/// JSON array of results
pub fn to_json(results: &[BenchmarkResult]) -> QcommResult<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_suite() {
        let suite = BenchmarkSuite::standard(42).unwrap();
        assert_eq!(suite.len(), 5);

        let results = suite.run().unwrap();
        assert_eq!(results.len(), 5);
        for r in &results {
            assert_eq!(r.slices, r.critical_path, "{} is not minimal", r.name);
        }

        let ghz = &results[0];
        assert_eq!(ghz.slices, 16);
        let layer = &results[3];
        assert_eq!(layer.slices, 1);
        assert_relative_eq!(layer.parallelism, 32.0);
    }

    #[test]
    fn test_markdown() {
        let suite = BenchmarkSuite::standard(1).unwrap();
        let table = to_markdown(&suite.run().unwrap());
        assert!(table.starts_with("| Name |"));
        assert!(table.contains("| ghz_16 | 16 | 16 | 16 | 16 |"));
    }

    #[test]
    fn test_json() {
        let mut suite = BenchmarkSuite::new(Scheduler::default());
        suite.add("empty", InstructionStream::new());
        let json = to_json(&suite.run().unwrap()).unwrap();
        assert!(json.contains("\"slices\": 0"));
    }
}
