//! # QCOMM Schedule
//!
//! Groups an ordered stream of elementary gate operations into the smallest
//! number of slices whose operations act on disjoint qubits.
//!
//! ## Quick Start
//!
//! ```rust
//! use qcomm_schedule::prelude::*;
//! use qcomm_core::StreamBuilder;
//!
//! let stream = StreamBuilder::new()
//!     .x(0)
//!     .x(1)
//!     .cx(0, 1)
//!     .build();
//!
//! let schedule = Scheduler::default().schedule_stream(&stream).unwrap();
//!
//! assert_eq!(schedule.makespan(), 2);
//! assert_eq!(render_text(&schedule), "X(0) X(1)\nCX(0 1)\n");
//! ```
//!
//! ## Statistics
//!
//! ```rust
//! use qcomm_schedule::prelude::*;
//!
//! let schedule = parse_slices("H(0) H(1)\nCX(0 1)\n").unwrap();
//! let stats = ScheduleStats::from_schedule(&schedule);
//! println!("{}", stats);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Scheduler configuration
pub mod config;

/// Per-qubit ready times
mod ready_times;

/// Slice of concurrent operations
pub mod slice;

/// Ordered slice sequence
pub mod schedule;

/// ASAP scheduler
pub mod scheduler;

/// Rendering and read-back
pub mod emitter;

/// Summary statistics
pub mod stats;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{QubitNumbering, SliceConfig};
pub use emitter::{
    parse_json_slices, parse_slices, render_text, JsonEmitter, SliceEmitter, TextEmitter,
};
pub use schedule::Schedule;
pub use scheduler::{critical_path, critical_path_length, form_slices, Scheduler};
pub use slice::Slice;
pub use stats::ScheduleStats;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qcomm_schedule::prelude::*;
    //! ```

    pub use crate::config::{QubitNumbering, SliceConfig};
    pub use crate::emitter::{
        parse_json_slices, parse_slices, render_text, JsonEmitter, SliceEmitter, TextEmitter,
    };
    pub use crate::schedule::Schedule;
    pub use crate::scheduler::{critical_path, critical_path_length, form_slices, Scheduler};
    pub use crate::slice::Slice;
    pub use crate::stats::ScheduleStats;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use qcomm_core::{GateOp, InstructionStream, QcommError, StreamBuilder};

    #[test]
    fn test_text_pipeline() {
        let stream = InstructionStream::parse("H(0)\nCX(0 1)\nH(1)\nCX(1 2)\n").unwrap();
        let schedule = Scheduler::default().schedule_stream(&stream).unwrap();

        assert_eq!(
            render_text(&schedule),
            "H(0)\nCX(0 1)\nH(1)\nCX(1 2)\n"
        );
        assert_eq!(critical_path_length(stream.ops()).unwrap(), 4);
    }

    #[test]
    fn test_rendered_schedule_reads_back() {
        let stream = StreamBuilder::new()
            .h_layer(4)
            .cx(0, 1)
            .cx(2, 3)
            .cx(1, 2)
            .t(0)
            .build();
        let schedule = form_slices(stream.ops()).unwrap();

        let back = parse_slices(&render_text(&schedule)).unwrap();
        assert_eq!(back.slices(), schedule.slices());
        assert!(back.verify().is_ok());
    }

    #[test]
    fn test_invalid_text_op_aborts_scheduling() {
        let stream = InstructionStream::parse("H(0) H(1)\nX()\nCX(0 1)\n").unwrap();
        let err = Scheduler::default().schedule_stream(&stream).unwrap_err();
        assert!(matches!(err, QcommError::InvalidInstruction { position: 2, .. }));
    }

    #[test]
    fn test_reference_config_on_sparse_stream() {
        let stream = InstructionStream::from_ops(vec![
            GateOp::single("H", 5),
            GateOp::pair("CX", 5, 9),
        ]);
        let scheduler = Scheduler::new(SliceConfig::reference()).unwrap();
        let schedule = scheduler.schedule_stream(&stream).unwrap();
        assert_eq!(render_text(&schedule), "H(0)\nCX(0 1)\n");

        let stats = ScheduleStats::from_schedule(&schedule);
        assert_eq!(stats.number_of_qubits, 2);
        assert_eq!(stats.number_of_stages, 2);
    }

    #[test]
    fn test_deterministic() {
        let stream = StreamBuilder::new().h_layer(6).cx_chain(6).h_layer(6).build();
        let a = form_slices(stream.ops()).unwrap();
        let b = form_slices(stream.ops()).unwrap();
        assert_eq!(a, b);
        assert_eq!(render_text(&a), render_text(&b));
    }
}
