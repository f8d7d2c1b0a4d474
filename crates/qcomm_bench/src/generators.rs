//! Workload generators for benchmarking
//!
//! Synthetic gate streams for exercising the slicer.

use qcomm_core::{GateOp, InstructionStream, QcommError, QcommResult, StreamBuilder};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;

/// Gate stream generator
pub struct StreamGenerator {
    /// Random seed
    seed: Option<u64>,
}

impl StreamGenerator {
    /// Create new generator
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Create generator with seed
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    // ========================================================================
    // Random Streams
    // ========================================================================

    /// Random stream of `num_gates` operations on `num_qubits` qubits
    ///
    /// `fanin_probs[k]` is the probability of a gate touching `k + 1`
    /// qubits. Qubits of one gate are distinct and listed in ascending
    /// order; gates are named `G<fan-in>`.
    pub fn random(
        &self,
        num_qubits: usize,
        num_gates: usize,
        fanin_probs: &[f64],
    ) -> QcommResult<InstructionStream> {
        Self::check_fanin_probs(num_qubits, fanin_probs)?;

        let fanin_dist = WeightedIndex::new(fanin_probs)
            .map_err(|err| QcommError::InvalidConfig(format!("fan-in probabilities: {}", err)))?;
        let mut rng = self.get_rng();

        let ops = (0..num_gates)
            .map(|_| {
                let fanin = fanin_dist.sample(&mut rng) + 1;
                let mut qubits = rand::seq::index::sample(&mut rng, num_qubits, fanin).into_vec();
                qubits.sort_unstable();
                GateOp::new(format!("G{}", fanin), qubits)
            })
            .collect();

        Ok(ops)
    }

    fn check_fanin_probs(num_qubits: usize, fanin_probs: &[f64]) -> QcommResult<()> {
        if fanin_probs.is_empty() {
            return Err(QcommError::InvalidConfig(
                "fan-in probabilities must not be empty".to_string(),
            ));
        }

        if fanin_probs.len() > num_qubits {
            return Err(QcommError::InvalidConfig(format!(
                "fan-in up to {} needs at least that many qubits, got {}",
                fanin_probs.len(),
                num_qubits
            )));
        }

        if fanin_probs.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(QcommError::InvalidConfig(
                "fan-in probabilities must be finite and non-negative".to_string(),
            ));
        }

        let total: f64 = fanin_probs.iter().sum();
        if (total - 1.0).abs() > 1e-6 {
            return Err(QcommError::InvalidConfig(format!(
                "fan-in probabilities must sum to 1, got {}",
                total
            )));
        }

        Ok(())
    }

    // ========================================================================
    // Structured Streams
    // ========================================================================

    /// QFT interaction pattern: `G1(i)` then `G2(i j)` for every `j > i`
    pub fn qft_pattern(&self, num_qubits: usize) -> InstructionStream {
        let mut builder = StreamBuilder::new();

        for i in 0..num_qubits {
            builder = builder.op("G1", [i]);
            for j in (i + 1)..num_qubits {
                builder = builder.op("G2", [i, j]);
            }
        }

        builder.build()
    }

    /// GHZ preparation: `H(0)` then a CX chain
    pub fn ghz(&self, num_qubits: usize) -> InstructionStream {
        if num_qubits == 0 {
            return InstructionStream::new();
        }
        StreamBuilder::new().h(0).cx_chain(num_qubits).build()
    }

    /// One single-qubit gate on every qubit
    pub fn layer(&self, num_qubits: usize, name: &str) -> InstructionStream {
        (0..num_qubits).map(|q| GateOp::single(name, q)).collect()
    }

    /// Alternating single-qubit layers and CX bricks, `depth` times
    pub fn brickwork(&self, num_qubits: usize, depth: usize) -> InstructionStream {
        let mut builder = StreamBuilder::new();

        for d in 0..depth {
            for q in 0..num_qubits {
                builder = builder.u3(q);
            }
            let offset = d % 2;
            for q in (offset..num_qubits.saturating_sub(1)).step_by(2) {
                builder = builder.cx(q, q + 1);
            }
        }

        builder.build()
    }

    // ========================================================================
    // Utility
    // ========================================================================

    /// Get RNG with optional seed
    fn get_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for StreamGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qcomm_schedule::form_slices;

    #[test]
    fn test_random_shape() {
        let gen = StreamGenerator::with_seed(42);
        let stream = gen.random(8, 100, &[0.5, 0.3, 0.2]).unwrap();

        assert_eq!(stream.len(), 100);
        assert!(stream.validate().is_ok());
        for op in stream.ops() {
            assert!((1..=3).contains(&op.arity()));
            assert_eq!(op.name, format!("G{}", op.arity()));
            assert!(op.qubits.windows(2).all(|w| w[0] < w[1]));
            assert!(op.qubits.iter().all(|&q| q < 8));
        }
    }

    #[test]
    fn test_random_reproducibility() {
        let a = StreamGenerator::with_seed(7).random(5, 40, &[0.6, 0.4]).unwrap();
        let b = StreamGenerator::with_seed(7).random(5, 40, &[0.6, 0.4]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_only_single_qubit() {
        let stream = StreamGenerator::with_seed(1).random(4, 20, &[1.0]).unwrap();
        assert!(stream.ops().iter().all(|op| op.arity() == 1));
    }

    #[test]
    fn test_random_rejects_bad_probs() {
        let gen = StreamGenerator::with_seed(1);
        assert!(gen.random(4, 10, &[]).is_err());
        assert!(gen.random(4, 10, &[0.5, 0.4]).is_err());
        assert!(gen.random(4, 10, &[1.2, -0.2]).is_err());
        assert!(gen.random(2, 10, &[0.2, 0.3, 0.5]).is_err());
    }

    #[test]
    fn test_qft_pattern() {
        let stream = StreamGenerator::new().qft_pattern(4);
        // n single-qubit + n(n-1)/2 pairs
        assert_eq!(stream.len(), 4 + 6);
        assert_eq!(stream.ops()[1], GateOp::pair("G2", 0, 1));
    }

    #[test]
    fn test_ghz_is_sequential() {
        let stream = StreamGenerator::new().ghz(5);
        let schedule = form_slices(stream.ops()).unwrap();
        assert_eq!(schedule.makespan(), 5);
        assert!(StreamGenerator::new().ghz(0).is_empty());
    }

    #[test]
    fn test_layer_is_one_slice() {
        let stream = StreamGenerator::new().layer(6, "H");
        let schedule = form_slices(stream.ops()).unwrap();
        assert_eq!(schedule.makespan(), 1);
        assert_eq!(schedule.max_width(), 6);
    }

    #[test]
    fn test_brickwork_depth() {
        let stream = StreamGenerator::new().brickwork(4, 3);
        let schedule = form_slices(stream.ops()).unwrap();
        // each round is a U3 slice then a CX slice
        assert_eq!(schedule.makespan(), 6);
    }
}
