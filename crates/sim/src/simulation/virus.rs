//! Virus libraries.
//!
//! A library is a multi-record FASTA file. Each record is one virus whose
//! header id names it and whose optional `tick=N` attribute sets the tick at
//! which it is injected:
//!
//! ```text
//! >Virus_Addition tick=2
//! ATGCCGTAA
//! ```

use crate::base::Sequence;
use crate::errors::VirusLibraryError;
use crate::simulation::program::{Segment, extract_segments};
use crate::validation::{FastaRecord, validate};
use std::path::Path;

/// A virus definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Virus {
    pub name: String,
    /// Injection tick. `None` means the first tick after the origin.
    pub inject_tick: Option<u64>,
    pub sequence: Sequence,
    segments: Vec<Segment>,
}

impl Virus {
    pub fn new(name: impl Into<String>, sequence: Sequence, inject_tick: Option<u64>) -> Self {
        let segments = extract_segments(sequence.codons());
        Self {
            name: name.into(),
            inject_tick,
            sequence,
            segments,
        }
    }

    fn from_record(record: FastaRecord) -> Result<Self, VirusLibraryError> {
        if record.id.is_empty() {
            return Err(VirusLibraryError::EmptyHeader { line: record.line });
        }

        let mut inject_tick = None;
        for (key, value) in record.attributes() {
            if key == "tick" {
                let tick = value
                    .parse::<u64>()
                    .map_err(|_| VirusLibraryError::InvalidAttribute {
                        name: record.id.clone(),
                        attribute: format!("{key}={value}"),
                    })?;
                inject_tick = Some(tick);
            }
        }

        Ok(Self::new(record.id, record.sequence, inject_tick))
    }

    /// Program segments the virus hijacks translation with.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Tick at which the virus enters a run whose ticks start at `origin`.
    /// `None` when the default tick would overflow.
    pub fn injection_tick(&self, origin: u64) -> Option<u64> {
        self.inject_tick.or_else(|| origin.checked_add(1))
    }
}

/// Read-only collection of viruses, shared between concurrent runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirusLibrary {
    viruses: Vec<Virus>,
}

impl VirusLibrary {
    pub fn new(viruses: Vec<Virus>) -> Result<Self, VirusLibraryError> {
        for (i, virus) in viruses.iter().enumerate() {
            if viruses[..i].iter().any(|v| v.name == virus.name) {
                return Err(VirusLibraryError::Duplicate(virus.name.clone()));
            }
        }
        Ok(Self { viruses })
    }

    /// Parse a library from FASTA text.
    pub fn from_fasta_str(text: &str) -> Result<Self, VirusLibraryError> {
        let validated = validate(text).map_err(VirusLibraryError::Validation)?;
        let viruses = validated
            .into_records()
            .into_iter()
            .map(Virus::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Loaded virus library with {} virus(es)", viruses.len());
        Self::new(viruses)
    }

    /// Read and parse a library file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VirusLibraryError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_fasta_str(&text)
    }

    pub fn len(&self) -> usize {
        self.viruses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viruses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Virus> {
        self.viruses.iter()
    }

    /// Viruses injected exactly at `tick`, in library order.
    pub fn injections_at(&self, tick: u64, origin: u64) -> impl Iterator<Item = &Virus> {
        self.viruses
            .iter()
            .filter(move |v| v.injection_tick(origin) == Some(tick))
    }

    /// Whether any virus is still due after `tick`.
    pub fn has_pending_after(&self, tick: u64, origin: u64) -> bool {
        self.viruses.iter().any(|v| v.injection_tick(origin).is_some_and(|due| due > tick))
    }
}
