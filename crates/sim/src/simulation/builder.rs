//! Builder pattern for creating simulations.
//!
//! Provides a fluent API over [`SimulationConfig`] with validation at
//! `build()` time.

pub use crate::errors::BuilderError;
use crate::simulation::{Scalar, Simulation, SimulationConfig, VirusLibrary};
use std::sync::Arc;

/// Where the sequence comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SequenceInput {
    Fasta(String),
    Raw(String),
}

/// Builder for constructing Simulation instances with a fluent API.
///
/// # Examples
///
/// ```
/// use strand_sim::simulation::SimulationBuilder;
///
/// let trace = SimulationBuilder::new()
///     .fasta(">demo\nGGGATGGATCCGTAA\n")
///     .max_ticks(50)
///     .build()
///     .unwrap()
///     .run()
///     .unwrap();
///
/// assert_eq!(
///     trace.final_state().unwrap().proteins,
///     vec!["Transport", "Synthesis"]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    input: Option<SequenceInput>,
    config: SimulationConfig,
    library: Arc<VirusLibrary>,
}

impl SimulationBuilder {
    /// Create a new simulation builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// FASTA text to simulate (required, or use `raw_sequence`).
    pub fn fasta(mut self, text: impl Into<String>) -> Self {
        self.input = Some(SequenceInput::Fasta(text.into()));
        self
    }

    /// Bare nucleotide text with no header.
    pub fn raw_sequence(mut self, text: impl Into<String>) -> Self {
        self.input = Some(SequenceInput::Raw(text.into()));
        self
    }

    /// Replace every simulation parameter at once.
    pub fn config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the tick budget (default: 1000).
    pub fn max_ticks(mut self, max_ticks: u64) -> Self {
        self.config.max_ticks = max_ticks;
        self
    }

    /// Set the tick of the initial state (default: 0).
    pub fn tick_origin(mut self, origin: u64) -> Self {
        self.config.tick_origin = origin;
        self
    }

    /// Set the transcription error rate (default: 0.0). Needs a seed.
    pub fn mutation_rate(mut self, rate: f64) -> Self {
        self.config.mutation_rate = rate;
        self
    }

    /// Set the random seed for transcription errors.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Add an initial environment variable. Environment codons in the
    /// sequence still take precedence.
    pub fn environment(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.config
            .initial_environment
            .insert(key.into(), value.into());
        self
    }

    /// Share a virus library with this run.
    pub fn viruses(mut self, library: Arc<VirusLibrary>) -> Self {
        self.library = library;
        self
    }

    /// Build and validate the simulation.
    pub fn build(self) -> Result<Simulation, BuilderError> {
        let input = self.input.ok_or(BuilderError::MissingRequired("sequence"))?;
        self.config
            .validate()
            .map_err(|e| BuilderError::InvalidParameter(e.to_string()))?;

        let sim = match input {
            SequenceInput::Fasta(text) => Simulation::from_text(&text, self.config, self.library)?,
            SequenceInput::Raw(text) => Simulation::from_raw(&text, self.config, self.library)?,
        };
        Ok(sim)
    }
}
