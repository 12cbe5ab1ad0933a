//! Simulation state snapshots.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single environment value.
///
/// Serialized as the bare JSON/TOML scalar, so `37`, `"HIGH"` and `true` all
/// round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// False only for NaN and infinite floats.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float(x) => x.is_finite(),
            _ => true,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Environment variables by name. Sorted so serialized output is stable.
pub type Environment = BTreeMap<String, Scalar>;

/// Snapshot of everything derived from the sequence at one tick.
///
/// Field names serialize as `Proteins`, `Environment` and `Viruses`, the
/// shape graph renderers consume directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct SimulationState {
    /// Protein labels in synthesis order. Repeated synthesis appends again.
    pub proteins: Vec<String>,
    pub environment: Environment,
    /// Viruses present, in injection order.
    pub viruses: Vec<String>,
}

impl SimulationState {
    pub fn new(environment: Environment) -> Self {
        Self {
            proteins: Vec::new(),
            environment,
            viruses: Vec::new(),
        }
    }

    /// The protein other nodes hang off when rendered as a graph.
    pub fn root_protein(&self, index: usize) -> Option<&str> {
        self.proteins.get(index).map(String::as_str)
    }

    pub fn has_protein(&self, label: &str) -> bool {
        self.proteins.iter().any(|p| p == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_state() -> SimulationState {
        let mut environment = Environment::new();
        environment.insert("temp".to_string(), Scalar::Integer(37));
        SimulationState {
            proteins: vec!["P0".to_string(), "P1".to_string()],
            environment,
            viruses: vec!["V0".to_string()],
        }
    }

    #[test]
    fn test_state_serializes_with_pascal_case_keys() {
        let json = serde_json::to_string(&example_state()).unwrap();
        assert_eq!(
            json,
            r#"{"Proteins":["P0","P1"],"Environment":{"temp":37},"Viruses":["V0"]}"#
        );
    }

    #[test]
    fn test_scalar_variants_deserialize() {
        let env: Environment =
            serde_json::from_str(r#"{"a":true,"b":-3,"c":1.5,"d":"HIGH"}"#).unwrap();
        assert_eq!(env["a"], Scalar::Bool(true));
        assert_eq!(env["b"], Scalar::Integer(-3));
        assert_eq!(env["c"], Scalar::Float(1.5));
        assert_eq!(env["d"], Scalar::Text("HIGH".to_string()));
    }

    #[test]
    fn test_non_scalar_environment_is_rejected() {
        let result: Result<SimulationState, _> = serde_json::from_str(
            r#"{"Proteins":[],"Environment":{"nested":{"x":1}},"Viruses":[]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: Result<SimulationState, _> = serde_json::from_str(
            r#"{"Proteins":[],"Environment":{},"Viruses":[],"Extra":1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_root_protein() {
        let state = example_state();
        assert_eq!(state.root_protein(0), Some("P0"));
        assert_eq!(state.root_protein(5), None);
        assert_eq!(SimulationState::default().root_protein(0), None);
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::from("HIGH").to_string(), "HIGH");
        assert_eq!(Scalar::from(37i64).to_string(), "37");
        assert_eq!(Scalar::from(false).to_string(), "false");
    }
}
