//! # Strand Simulation Crate
//!
//! The `sim` crate interprets DNA text as a small genetic program. It
//! validates FASTA input, runs a deterministic tick simulation that derives
//! proteins, environment variables and viruses, and serializes the resulting
//! trace as JSON.
//!
//! ```
//! use strand_sim::prelude::*;
//!
//! let trace = SimulationBuilder::new()
//!     .fasta(">demo\nATGACCTAA\n")
//!     .build()
//!     .unwrap()
//!     .run()
//!     .unwrap();
//!
//! let json = final_state_json(&trace, false).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"Proteins":["Protein_X"],"Environment":{"ENERGY":"MEDIUM","TEMP":"NEUTRAL"},"Viruses":[]}"#
//! );
//! ```

pub mod base;
pub mod errors;
pub mod graph;
pub mod prelude;
pub mod simulation;
pub mod trace;
pub mod validation;

pub use base::{Codon, Nucleotide, Sequence};
pub use simulation::{Simulation, SimulationState};
pub use trace::Trace;
