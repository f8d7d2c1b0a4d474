//! ASAP slice scheduler
//!
//! Single forward pass over the gate stream. Each operation goes to the
//! earliest slice at which all of its qubits are free; its qubits then stay
//! busy until the following slice. With unit latency this is the
//! earliest-start time in the per-qubit dependency DAG, so the number of
//! slices equals the critical path length and cannot be reduced.

use crate::config::{QubitNumbering, SliceConfig};
use crate::ready_times::QubitReadyTimes;
use crate::schedule::Schedule;
use qcomm_core::{GateOp, InstructionStream, QcommError, QcommResult, QubitId};
use std::collections::HashMap;

/// Slice scheduler
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SliceConfig,
}

impl Scheduler {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a scheduler with a validated configuration
    pub fn new(config: SliceConfig) -> QcommResult<Self> {
        config.validate().map_err(QcommError::InvalidConfig)?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &SliceConfig {
        &self.config
    }

    // ========================================================================
    // ASAP Slicing
    // ========================================================================

    /// Slice an ordered operation sequence
    ///
    /// Fails on the first operation with no qubits or a repeated qubit; no
    /// partial schedule is returned in that case.
    pub fn form_slices(&self, ops: &[GateOp]) -> QcommResult<Schedule> {
        self.run(ops, 0)
    }

    /// Slice an instruction stream, applying the numbering policy first
    pub fn schedule_stream(&self, stream: &InstructionStream) -> QcommResult<Schedule> {
        match self.config.numbering {
            QubitNumbering::Preserve => self.run(stream.ops(), stream.num_qubits()),
            QubitNumbering::Compact => {
                // reject before remapping so errors name the caller's qubits
                if let Err(err) = stream.validate() {
                    log::warn!("slicing aborted: {}", err);
                    return Err(err);
                }
                let compact = stream.compacted();
                self.run(compact.ops(), compact.num_qubits())
            }
        }
    }

    fn run(&self, ops: &[GateOp], width_hint: usize) -> QcommResult<Schedule> {
        let mut ready = QubitReadyTimes::with_width(self.config.dense_limit, width_hint);
        let mut schedule = Schedule::with_capacity(ops.len());

        for (position, op) in ops.iter().enumerate() {
            if let Err(err) = op.validate(position) {
                log::warn!("slicing aborted: {}", err);
                return Err(err);
            }

            let earliest = ready.earliest(&op.qubits);
            log::trace!("op #{} {} -> slice {}", position, op, earliest);

            schedule.place(op.clone(), earliest);
            for &q in &op.qubits {
                ready.set(q, earliest + 1);
            }
        }

        if self.config.verify_slices {
            schedule.verify().map_err(|err| {
                QcommError::InternalError(format!("scheduler produced an invalid slice: {}", err))
            })?;
        }

        log::debug!(
            "sliced {} operations into {} slices",
            schedule.num_ops(),
            schedule.makespan()
        );

        Ok(schedule)
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Slice with the default configuration
pub fn form_slices(ops: &[GateOp]) -> QcommResult<Schedule> {
    Scheduler::default().form_slices(ops)
}

/// Longest chain of operations linked by qubit reuse, as input positions
///
/// Each operation depends on the previous user of every qubit it touches.
/// The returned chain runs from the first to the last operation of one
/// longest path; its length is the lower bound on the number of slices.
pub fn critical_path(ops: &[GateOp]) -> QcommResult<Vec<usize>> {
    let mut last_user: HashMap<QubitId, usize> = HashMap::new();
    let mut depth = vec![0usize; ops.len()];
    let mut parent: Vec<Option<usize>> = vec![None; ops.len()];

    for (position, op) in ops.iter().enumerate() {
        op.validate(position)?;

        for q in &op.qubits {
            if let Some(&pred) = last_user.get(q) {
                if parent[position].map_or(true, |p| depth[pred] > depth[p]) {
                    parent[position] = Some(pred);
                }
            }
        }
        depth[position] = parent[position].map_or(1, |p| depth[p] + 1);

        for &q in &op.qubits {
            last_user.insert(q, position);
        }
    }

    let Some(mut tail) = (0..ops.len()).max_by_key(|&i| (depth[i], std::cmp::Reverse(i))) else {
        return Ok(Vec::new());
    };

    let mut chain = vec![tail];
    while let Some(p) = parent[tail] {
        chain.push(p);
        tail = p;
    }
    chain.reverse();
    Ok(chain)
}

/// Length of the critical path
pub fn critical_path_length(ops: &[GateOp]) -> QcommResult<usize> {
    Ok(critical_path(ops)?.len())
}

// ============================================================================
// Tests
// ============================================================================
