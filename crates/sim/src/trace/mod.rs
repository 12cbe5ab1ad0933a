//! Simulation traces and their JSON serialization.

mod serializer;

pub use serializer::{
    OutputShape, RenderOptions, emit, final_state_json, parse_final_state, parse_tick_log, render,
    tick_log_json,
};

use crate::errors::TraceError;
use crate::simulation::SimulationState;
use serde::{Deserialize, Serialize};

/// One recorded tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceEntry {
    #[serde(rename = "Tick")]
    pub tick: u64,
    #[serde(rename = "State")]
    pub state: SimulationState,
}

/// Ordered history of states. Ticks strictly increase.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trace from existing entries, checking tick order.
    pub fn from_entries(entries: Vec<TraceEntry>) -> Result<Self, TraceError> {
        let mut trace = Self::new();
        for entry in entries {
            trace.push(entry.tick, entry.state)?;
        }
        Ok(trace)
    }

    /// Append a state. Fails if `tick` does not follow the last recorded tick.
    pub fn push(&mut self, tick: u64, state: SimulationState) -> Result<(), TraceError> {
        if let Some(last) = self.entries.last()
            && tick <= last.tick
        {
            return Err(TraceError::TickOrder {
                previous: last.tick,
                next: tick,
            });
        }
        self.entries.push(TraceEntry { tick, state });
        Ok(())
    }

    /// Append a state whose tick the caller already knows is in order.
    pub(crate) fn record(&mut self, tick: u64, state: SimulationState) {
        debug_assert!(self.last_tick().is_none_or(|last| tick > last));
        self.entries.push(TraceEntry { tick, state });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceEntry> {
        self.entries.iter()
    }

    pub fn first_tick(&self) -> Option<u64> {
        self.entries.first().map(|e| e.tick)
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.entries.last().map(|e| e.tick)
    }

    /// The state the run ended in.
    pub fn final_state(&self) -> Result<&SimulationState, TraceError> {
        self.entries
            .last()
            .map(|e| &e.state)
            .ok_or(TraceError::EmptyTrace)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a TraceEntry;
    type IntoIter = std::slice::Iter<'a, TraceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(proteins: &[&str]) -> SimulationState {
        SimulationState {
            proteins: proteins.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_push_requires_increasing_ticks() {
        let mut trace = Trace::new();
        trace.push(0, state(&[])).unwrap();
        trace.push(2, state(&["P0"])).unwrap();

        let err = trace.push(2, state(&["P0"])).unwrap_err();
        assert!(matches!(err, TraceError::TickOrder { previous: 2, next: 2 }));
        assert_eq!(trace.len(), 2);
        assert_eq!(trace.first_tick(), Some(0));
        assert_eq!(trace.last_tick(), Some(2));
    }

    #[test]
    fn test_from_entries_rejects_out_of_order() {
        let entries = vec![
            TraceEntry {
                tick: 1,
                state: state(&[]),
            },
            TraceEntry {
                tick: 0,
                state: state(&[]),
            },
        ];
        assert!(Trace::from_entries(entries).is_err());
    }

    #[test]
    fn test_final_state() {
        assert!(matches!(
            Trace::new().final_state(),
            Err(TraceError::EmptyTrace)
        ));

        let mut trace = Trace::new();
        trace.push(0, state(&[])).unwrap();
        trace.push(1, state(&["P0"])).unwrap();
        assert_eq!(trace.final_state().unwrap().proteins, vec!["P0"]);
    }
}
