//! Commonly used imports for convenience.
//!
//! ```
//! use strand_sim::prelude::*;
//!
//! assert!(validate(">seq1\nACGT\n").is_ok());
//! ```

pub use crate::base::{Codon, Nucleotide, Sequence};
pub use crate::errors::{self, SimulationError, TraceError, ValidationError, ValidationErrors};
pub use crate::graph::PathwayGraph;
pub use crate::simulation::{
    Configuration, Scalar, Simulation, SimulationBuilder, SimulationConfig, SimulationRequest,
    SimulationRunner, SimulationState, VirusLibrary,
};
pub use crate::trace::{OutputShape, RenderOptions, Trace, emit, final_state_json, tick_log_json};
pub use crate::validation::{ValidatedSequence, validate, validate_raw};
