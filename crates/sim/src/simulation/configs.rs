//! Simulation configuration.
//!
//! `Configuration` is the file-level struct: it can be loaded from TOML or
//! JSON to fully reproduce a run. Every field has a default, so a config file
//! only needs the values it changes.

use crate::errors::ConfigError;
use crate::simulation::state::Environment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// The master configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    pub simulation: SimulationConfig,
    pub graph: GraphConfig,
    pub runner: RunnerConfig,
}

impl Configuration {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        log::debug!("Loading configuration from {}", path.display());
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(format!("TOML error: {e}")))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        self.runner.validate()?;
        Ok(())
    }
}

/// Parameters for a single simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Maximum number of ticks before the run is declared diverged
    pub max_ticks: u64,
    /// Tick number of the initial state
    pub tick_origin: u64,
    /// Per-codon probability of a transcription error (0.0 disables)
    pub mutation_rate: f64,
    /// RNG seed; required when `mutation_rate > 0`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Extra environment variables present from the first tick
    pub initial_environment: Environment,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_ticks: 1000,
            tick_origin: 0,
            mutation_rate: 0.0,
            seed: None,
            initial_environment: Environment::new(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ticks == 0 {
            return Err(ConfigError::InvalidParameter(
                "max_ticks must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidParameter(format!(
                "mutation_rate {} must be between 0.0 and 1.0",
                self.mutation_rate
            )));
        }
        if self.mutation_rate > 0.0 && self.seed.is_none() {
            return Err(ConfigError::InvalidParameter(
                "a seed is required when mutation_rate > 0".to_string(),
            ));
        }
        if self.tick_origin.checked_add(self.max_ticks).is_none() {
            return Err(ConfigError::InvalidParameter(format!(
                "tick_origin {} plus max_ticks {} exceeds the largest tick",
                self.tick_origin, self.max_ticks
            )));
        }
        // NaN never equals itself, so a run holding one could never settle.
        if let Some((key, value)) = self
            .initial_environment
            .iter()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(ConfigError::InvalidParameter(format!(
                "initial_environment.{key} must be finite, got {value}"
            )));
        }
        Ok(())
    }
}

/// How a final state is laid out as a pathway graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Index of the protein environment and virus nodes attach to
    pub root_node_index: usize,
    /// Set to false to emit no root edges at all
    pub connect_root: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            root_node_index: 0,
            connect_root: true,
        }
    }
}

impl GraphConfig {
    /// Root index to use, if root edges are enabled.
    pub fn root(&self) -> Option<usize> {
        self.connect_root.then_some(self.root_node_index)
    }
}

/// Limits for running many simulations at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Maximum number of simulations running at the same time
    pub max_concurrent: usize,
    /// Wall-clock limit per simulation, in milliseconds
    pub timeout_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            timeout_ms: 30_000,
        }
    }
}

impl RunnerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrent == 0 {
            return Err(ConfigError::InvalidParameter(
                "max_concurrent must be at least 1".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidParameter(
                "timeout_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
