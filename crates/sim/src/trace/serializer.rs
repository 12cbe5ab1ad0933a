//! JSON shapes handed to consumers.
//!
//! - final state: `{"Proteins":[..],"Environment":{..},"Viruses":[..]}`
//! - tick log: `[{"Tick":0,"State":{..}}, ..]`
//! - graph: `{"nodes":[..],"edges":[..]}` built from the final state
//!
//! Documents are rendered fully in memory before anything is written, so a
//! failure never leaves half a document behind.

use super::{Trace, TraceEntry};
use crate::errors::TraceError;
use crate::graph::PathwayGraph;
use crate::simulation::{GraphConfig, SimulationState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Which document to produce from a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputShape {
    /// The last state only.
    #[default]
    Final,
    /// Every recorded tick.
    Ticks,
    /// Node/edge list of the last state.
    Graph,
}

impl fmt::Display for OutputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Final => write!(f, "final"),
            Self::Ticks => write!(f, "ticks"),
            Self::Graph => write!(f, "graph"),
        }
    }
}

impl FromStr for OutputShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "final" => Ok(Self::Final),
            "ticks" => Ok(Self::Ticks),
            "graph" => Ok(Self::Graph),
            other => Err(format!("unknown output shape '{other}'")),
        }
    }
}

/// Rendering options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub shape: OutputShape,
    pub pretty: bool,
    pub graph: GraphConfig,
}

impl RenderOptions {
    pub fn new(shape: OutputShape) -> Self {
        Self {
            shape,
            ..Default::default()
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn graph(mut self, graph: GraphConfig) -> Self {
        self.graph = graph;
        self
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, TraceError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Serialize the last state of `trace`.
pub fn final_state_json(trace: &Trace, pretty: bool) -> Result<String, TraceError> {
    to_json(trace.final_state()?, pretty)
}

/// Serialize every entry of `trace`.
pub fn tick_log_json(trace: &Trace, pretty: bool) -> Result<String, TraceError> {
    if trace.is_empty() {
        return Err(TraceError::EmptyTrace);
    }
    to_json(trace, pretty)
}

/// Render `trace` in the requested shape.
pub fn render(trace: &Trace, options: &RenderOptions) -> Result<String, TraceError> {
    match options.shape {
        OutputShape::Final => final_state_json(trace, options.pretty),
        OutputShape::Ticks => tick_log_json(trace, options.pretty),
        OutputShape::Graph => {
            let graph = PathwayGraph::from_state(trace.final_state()?, &options.graph);
            to_json(&graph, options.pretty)
        }
    }
}

/// Render and write one document followed by a newline.
///
/// The document is written with a single `write_all` and flushed; any I/O
/// failure is reported as `SerializationFailure`.
pub fn emit<W: Write>(
    trace: &Trace,
    options: &RenderOptions,
    writer: &mut W,
) -> Result<(), TraceError> {
    let mut document = render(trace, options)?;
    document.push('\n');
    writer.write_all(document.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Parse and check a final-state document.
pub fn parse_final_state(json: &str) -> Result<SimulationState, TraceError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse and check a tick-log document.
pub fn parse_tick_log(json: &str) -> Result<Trace, TraceError> {
    let entries: Vec<TraceEntry> = serde_json::from_str(json)?;
    if entries.is_empty() {
        return Err(TraceError::EmptyTrace);
    }
    Trace::from_entries(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{Environment, Scalar};
    use std::io;

    fn example_trace() -> Trace {
        let mut environment = Environment::new();
        environment.insert("temp".to_string(), Scalar::Integer(37));

        let mut trace = Trace::new();
        trace
            .push(
                0,
                SimulationState {
                    environment: environment.clone(),
                    ..Default::default()
                },
            )
            .unwrap();
        trace
            .push(
                1,
                SimulationState {
                    proteins: vec!["P0".to_string(), "P1".to_string()],
                    environment,
                    viruses: vec!["V0".to_string()],
                },
            )
            .unwrap();
        trace
    }

    #[test]
    fn test_final_state_shape() {
        let json = final_state_json(&example_trace(), false).unwrap();
        assert_eq!(
            json,
            r#"{"Proteins":["P0","P1"],"Environment":{"temp":37},"Viruses":["V0"]}"#
        );
    }

    #[test]
    fn test_tick_log_shape() {
        let json = tick_log_json(&example_trace(), false).unwrap();
        assert!(json.starts_with(r#"[{"Tick":0,"State":{"Proteins":[],"#));
        assert!(json.contains(r#"{"Tick":1,"State":{"Proteins":["P0","P1"]"#));
    }

    #[test]
    fn test_empty_trace_is_rejected_for_every_shape() {
        let trace = Trace::new();
        for shape in [OutputShape::Final, OutputShape::Ticks, OutputShape::Graph] {
            let err = render(&trace, &RenderOptions::new(shape)).unwrap_err();
            assert!(matches!(err, TraceError::EmptyTrace), "{shape}");
        }
    }

    #[test]
    fn test_final_state_round_trip() {
        let trace = example_trace();
        let json = final_state_json(&trace, true).unwrap();
        let parsed = parse_final_state(&json).unwrap();
        assert_eq!(&parsed, trace.final_state().unwrap());
    }

    #[test]
    fn test_tick_log_round_trip() {
        let trace = example_trace();
        let parsed = parse_tick_log(&tick_log_json(&trace, false).unwrap()).unwrap();
        assert_eq!(parsed, trace);
    }

    #[test]
    fn test_parse_tick_log_rejects_bad_order_and_empty() {
        let json = r#"[{"Tick":1,"State":{"Proteins":[],"Environment":{},"Viruses":[]}},
                       {"Tick":1,"State":{"Proteins":[],"Environment":{},"Viruses":[]}}]"#;
        assert!(matches!(
            parse_tick_log(json),
            Err(TraceError::TickOrder { .. })
        ));
        assert!(matches!(parse_tick_log("[]"), Err(TraceError::EmptyTrace)));
    }

    #[test]
    fn test_parse_final_state_rejects_wrong_shape() {
        let err = parse_final_state(r#"{"Proteins":"P0","Environment":{},"Viruses":[]}"#);
        assert!(matches!(err, Err(TraceError::SerializationFailure(_))));
    }

    #[test]
    fn test_emit_writes_document_and_newline() {
        let mut out = Vec::new();
        emit(&example_trace(), &RenderOptions::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        assert_eq!(text.matches('\n').count(), 1);
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_emit_reports_write_failure() {
        let err = emit(&example_trace(), &RenderOptions::default(), &mut FailingWriter).unwrap_err();
        assert!(matches!(err, TraceError::SerializationFailure(_)));
    }

    #[test]
    fn test_output_shape_from_str() {
        assert_eq!("TICKS".parse::<OutputShape>(), Ok(OutputShape::Ticks));
        assert!("html".parse::<OutputShape>().is_err());
    }
}
