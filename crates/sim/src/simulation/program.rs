//! Reading a sequence as a genetic program.
//!
//! The first three codons are reserved for the environment. The remaining
//! behaviour comes from segments: runs of codons opened by a start codon and
//! closed by a stop codon, each translated into proteins.

use crate::base::{Codon, Nucleotide, Sequence};
use crate::simulation::environment::{self, ENERGY, TEMP};
use crate::simulation::state::{Environment, Scalar};
use std::str::FromStr;

use Nucleotide::{A, C, G, T};

/// Protein labels produced by translation.
pub mod proteins {
    pub const PROTEIN_X: &str = "Protein_X";
    pub const TRANSPORT: &str = "Transport";
    pub const TRANSPORT_BLOCKED: &str = "Transport Blocked";
    pub const SYNTHESIS: &str = "Synthesis";
}

/// Number of leading codons that configure the environment.
pub const ENVIRONMENT_CODONS: usize = 3;

/// A program segment: the codons between a start codon and the stop codon
/// that closed it (inclusive of the stop, exclusive of the start).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment(Vec<Codon>);

impl Segment {
    pub fn new(codons: Vec<Codon>) -> Self {
        Self(codons)
    }

    pub fn codons(&self) -> &[Codon] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Translate every codon against `env`, in order.
    pub fn translate(&self, env: &Environment) -> Vec<String> {
        self.0
            .iter()
            .filter_map(|codon| translate_codon(*codon, env))
            .map(str::to_string)
            .collect()
    }
}

/// A compiled sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    environment_codons: Vec<Codon>,
    segments: Vec<Segment>,
}

impl Program {
    pub fn compile(sequence: &Sequence) -> Self {
        let codons: Vec<Codon> = sequence.codons().collect();
        if sequence.trailing_bases() > 0 {
            log::warn!(
                "Ignoring {} trailing base(s) that do not form a complete codon",
                sequence.trailing_bases()
            );
        }

        let environment_codons = codons.iter().take(ENVIRONMENT_CODONS).copied().collect();
        let segments = extract_segments(codons);
        log::debug!("Compiled program with {} segment(s)", segments.len());

        Self {
            environment_codons,
            segments,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Environment at the tick origin: defaults, then `overrides`, then the
    /// reserved environment codons in order.
    pub fn initial_environment(&self, overrides: &Environment) -> Environment {
        let mut env = environment::defaults();
        env.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

        for codon in &self.environment_codons {
            if let Some((key, level)) = environment_codon(*codon) {
                env.insert(key.to_string(), Scalar::from(level));
            }
        }
        env
    }
}

/// Split codons into segments.
///
/// A start codon opens a segment (closing any open one), a stop codon closes
/// the open segment and belongs to it, codons outside a segment are skipped,
/// and an unterminated final segment is kept.
pub fn extract_segments(codons: impl IntoIterator<Item = Codon>) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Option<Vec<Codon>> = None;

    for codon in codons {
        if codon.is_start() {
            if let Some(open) = current.take() {
                segments.push(Segment(open));
            }
            current = Some(Vec::new());
        } else if let Some(mut open) = current.take() {
            open.push(codon);
            if codon.is_stop() {
                segments.push(Segment(open));
            } else {
                current = Some(open);
            }
        }
    }

    if let Some(open) = current {
        segments.push(Segment(open));
    }
    segments
}

/// Environment setting encoded by one of the reserved leading codons.
fn environment_codon(codon: Codon) -> Option<(&'static str, &'static str)> {
    match codon.bases() {
        [A, A, A] => Some((TEMP, "HIGH")),
        [T, T, T] => Some((TEMP, "LOW")),
        [G, G, G] => Some((ENERGY, "HIGH")),
        [C, C, C] => Some((ENERGY, "LOW")),
        _ => None,
    }
}

/// Protein produced by `codon`, if any. `GAT` depends on available energy.
fn translate_codon(codon: Codon, env: &Environment) -> Option<&'static str> {
    match codon.bases() {
        [A, C, C] => Some(proteins::PROTEIN_X),
        [G, A, T] => {
            let energised = env.get(ENERGY).and_then(Scalar::as_text) == Some("HIGH");
            Some(if energised {
                proteins::TRANSPORT
            } else {
                proteins::TRANSPORT_BLOCKED
            })
        }
        [C, C, G] => Some(proteins::SYNTHESIS),
        _ => None,
    }
}

/// Parse a contiguous codon string such as `"ATGACCTAA"` into segments.
/// Convenience for tests and virus definitions.
pub fn segments_from_str(s: &str) -> Result<Vec<Segment>, crate::errors::InvalidSequence> {
    let sequence = Sequence::from_str(s)?;
    Ok(extract_segments(sequence.codons()))
}
