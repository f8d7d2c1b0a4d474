//! # QCOMM Core
//!
//! Gate operations, instruction streams and error types for the QCOMM
//! parallel slicer.
//!
//! ## Quick Start
//!
//! ```rust
//! use qcomm_core::prelude::*;
//!
//! let stream = StreamBuilder::new()
//!     .h(0)
//!     .cx(0, 1)
//!     .cx(1, 2)
//!     .build();
//!
//! assert_eq!(stream.len(), 3);
//! assert_eq!(stream.num_qubits(), 3);
//! assert!(stream.validate().is_ok());
//! ```
//!
//! ## Text Ingestion
//!
//! ```rust
//! use qcomm_core::prelude::*;
//!
//! let stream = InstructionStream::parse("H(0) H(1)\nCX(0 1)\n").unwrap();
//! assert_eq!(stream.ops()[2], GateOp::pair("CX", 0, 1));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types
pub mod types;

/// Error types
pub mod error;

/// Elementary gate operation
pub mod gate_op;

/// Ordered instruction stream
pub mod stream;

/// Stream builder
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::{StreamBuilder, BASIS_GATES};
pub use error::{InstructionDefect, QcommError, QcommResult};
pub use gate_op::GateOp;
pub use stream::InstructionStream;
pub use types::{QubitId, QubitMap, SliceIndex};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qcomm_core::prelude::*;
    //! ```

    pub use crate::builder::{StreamBuilder, BASIS_GATES};
    pub use crate::error::{InstructionDefect, QcommError, QcommResult};
    pub use crate::gate_op::GateOp;
    pub use crate::stream::InstructionStream;
    pub use crate::types::{QubitId, QubitMap, SliceIndex};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
