//! # QCOMM Bench
//!
//! Synthetic workloads and a small benchmark suite for the slicer.
//!
//! ```rust
//! use qcomm_bench::{BenchmarkSuite, to_markdown};
//!
//! let results = BenchmarkSuite::standard(42).unwrap().run().unwrap();
//! println!("{}", to_markdown(&results));
//! ```

#![warn(missing_docs)]

/// Gate stream generators
pub mod generators;

/// Benchmark suite and reporting
pub mod suite;

pub use generators::StreamGenerator;
pub use suite::{to_json, to_markdown, BenchmarkResult, BenchmarkSuite};

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qcomm_schedule::{
        critical_path_length, parse_slices, render_text, ScheduleStats, Scheduler,
    };

    #[test]
    fn test_random_stream_is_minimal() {
        let gen = StreamGenerator::with_seed(2024);
        for probs in [&[1.0][..], &[0.5, 0.5], &[0.2, 0.3, 0.5]] {
            let stream = gen.random(10, 300, probs).unwrap();
            let schedule = Scheduler::default().schedule_stream(&stream).unwrap();

            assert_eq!(schedule.num_ops(), 300);
            assert!(schedule.verify().is_ok());
            assert_eq!(schedule.makespan(), critical_path_length(stream.ops()).unwrap());
        }
    }

    #[test]
    fn test_qft_pattern_text_roundtrip() {
        let stream = StreamGenerator::new().qft_pattern(5);
        let schedule = Scheduler::default().schedule_stream(&stream).unwrap();

        let back = parse_slices(&render_text(&schedule)).unwrap();
        let stats = ScheduleStats::from_schedule(&back);

        assert_eq!(stats.number_of_qubits, 5);
        assert_eq!(stats.number_of_gates, 15);
        assert_eq!(stats.number_of_stages, schedule.makespan());
    }
}
