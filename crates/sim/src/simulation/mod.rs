//! Simulation engine and its inputs.
//!
//! - `Simulation`: the tick engine that turns a validated sequence into a
//!   trace.
//! - `SimulationBuilder`: fluent construction with validation.
//! - `SimulationRunner`: bounded, timed execution of many simulations.
//! - `VirusLibrary`: viruses injected into runs at fixed ticks.

pub mod builder;
pub mod configs;
pub mod engine;
pub mod environment;
pub mod program;
pub mod runner;
pub mod state;
pub mod virus;

pub use builder::SimulationBuilder;
pub use configs::{Configuration, GraphConfig, RunnerConfig, SimulationConfig};
pub use engine::{Simulation, StepOutcome};
pub use program::{Program, Segment};
pub use runner::{SimulationRequest, SimulationRunner};
pub use state::{Environment, Scalar, SimulationState};
pub use virus::{Virus, VirusLibrary};
