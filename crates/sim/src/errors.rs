use std::fmt;
use thiserror::Error;

/// Error returned when attempting to convert an invalid byte/character into
/// a `Nucleotide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidNucleotide(pub u8);

impl fmt::Display for InvalidNucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid nucleotide byte: {} ('{}')", self.0, self.0 as char)
    }
}

impl std::error::Error for InvalidNucleotide {}

/// Error type for failures when constructing a `Sequence` or `Codon`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSequence {
    /// A character was not recognized as a valid nucleotide.
    #[error("Invalid character in sequence: '{0}'")]
    InvalidChar(char),

    /// A codon literal did not have exactly three bases.
    #[error("Codon must have exactly 3 bases, got {0}")]
    CodonLength(usize),
}

/// What went wrong on a single line of FASTA input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The first line does not start with `>`.
    MissingHeader,
    /// A body line contains a character outside `{A, C, G, T}` and whitespace.
    InvalidSymbol {
        /// First offending character on the line.
        symbol: char,
        /// Full text of the offending line.
        content: String,
    },
}

/// A single validation finding.
///
/// `line` is the 0-based line index; `Display` renders it 1-based the way an
/// editor would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub line: usize,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn missing_header() -> Self {
        Self {
            line: 0,
            kind: ValidationErrorKind::MissingHeader,
        }
    }

    pub fn invalid_symbol(line: usize, symbol: char, content: impl Into<String>) -> Self {
        Self {
            line,
            kind: ValidationErrorKind::InvalidSymbol {
                symbol,
                content: content.into(),
            },
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ValidationErrorKind::MissingHeader => {
                write!(f, "Invalid FASTA file: First line must start with \">\".")
            }
            ValidationErrorKind::InvalidSymbol { symbol, .. } => write!(
                f,
                "Invalid DNA sequence on line {}: found '{symbol}', only A, C, T, G are allowed.",
                self.line + 1
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Every finding produced by one validation pass, in line order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Why a simulation stopped before reaching a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceReason {
    /// The configured tick budget ran out.
    TickBudget,
    /// The runner's wall-clock timeout elapsed.
    Timeout,
    /// The caller raised the abort flag.
    Aborted,
}

impl fmt::Display for DivergenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TickBudget => write!(f, "tick budget exhausted"),
            Self::Timeout => write!(f, "timed out"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

/// Errors that can occur while running a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// The input did not pass validation; the simulation refuses to run.
    #[error("Malformed sequence: {0}")]
    MalformedSequence(ValidationErrors),

    /// Raw input contained no nucleotides at all.
    #[error("Malformed sequence: input contains no nucleotides")]
    EmptySequence,

    /// No terminal state was reached.
    #[error("Simulation diverged after {ticks} tick(s): {reason}")]
    SimulationDiverged {
        ticks: u64,
        reason: DivergenceReason,
    },

    /// The simulation parameters are unusable.
    #[error("Invalid simulation config: {0}")]
    InvalidConfig(String),

    /// The worker running the simulation failed.
    #[error("Simulation worker failed: {0}")]
    Worker(String),
}

/// Errors produced while assembling or emitting a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Trace is empty; there is no state to serialize")]
    EmptyTrace,

    #[error("Trace ticks must strictly increase (tick {next} follows {previous})")]
    TickOrder { previous: u64, next: u64 },

    #[error("Serialization failure: {0}")]
    SerializationFailure(String),
}

impl From<serde_json::Error> for TraceError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationFailure(e.to_string())
    }
}

impl From<std::io::Error> for TraceError {
    fn from(e: std::io::Error) -> Self {
        Self::SerializationFailure(e.to_string())
    }
}

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(format!("TOML error: {e}"))
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {e}"))
    }
}

/// Errors that can occur during simulation building.
#[derive(Debug, Error)]
pub enum BuilderError {
    /// A required parameter is missing
    #[error("Missing required parameter: {0}")]
    MissingRequired(&'static str),

    /// An invalid parameter value was provided
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

impl From<ConfigError> for BuilderError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidParameter(e.to_string())
    }
}

impl From<ConfigError> for SimulationError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfig(e.to_string())
    }
}

impl From<BuilderError> for SimulationError {
    fn from(e: BuilderError) -> Self {
        match e {
            BuilderError::Simulation(inner) => inner,
            other => Self::InvalidConfig(other.to_string()),
        }
    }
}

/// Errors raised while reading a virus library.
#[derive(Debug, Error)]
pub enum VirusLibraryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record on line {} has an empty header", .line + 1)]
    EmptyHeader { line: usize },

    #[error("Invalid attribute '{attribute}' for virus '{name}'")]
    InvalidAttribute { name: String, attribute: String },

    #[error("Virus '{0}' is defined more than once")]
    Duplicate(String),

    #[error("Invalid virus sequence: {0}")]
    Validation(ValidationErrors),
}
