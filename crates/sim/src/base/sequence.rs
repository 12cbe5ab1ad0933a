use super::{Codon, Nucleotide};
use crate::errors::InvalidSequence;
use std::fmt;
use std::str::FromStr;

/// Ordered run of nucleotides, read as non-overlapping codons from position 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Sequence(Vec<Nucleotide>);

impl Sequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_nucleotides(nucleotides: Vec<Nucleotide>) -> Self {
        Self(nucleotides)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Nucleotide> {
        self.0.get(index).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Nucleotide] {
        &self.0
    }

    #[inline]
    pub fn push(&mut self, base: Nucleotide) {
        self.0.push(base);
    }

    /// Append every nucleotide in `line`, skipping whitespace.
    ///
    /// Fails on the first character that is neither whitespace nor a base.
    pub fn extend_from_line(&mut self, line: &str) -> Result<(), InvalidSequence> {
        for c in line.chars().filter(|c| !c.is_whitespace()) {
            let base = Nucleotide::from_char(c).ok_or(InvalidSequence::InvalidChar(c))?;
            self.0.push(base);
        }
        Ok(())
    }

    /// Iterate over complete codons. A trailing partial codon is not yielded.
    pub fn codons(&self) -> impl Iterator<Item = Codon> + '_ {
        self.0
            .chunks_exact(3)
            .map(|chunk| Codon::new(chunk[0], chunk[1], chunk[2]))
    }

    /// Number of bases left over after the last complete codon.
    pub fn trailing_bases(&self) -> usize {
        self.0.len() % 3
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &nuc in &self.0 {
            write!(f, "{}", nuc.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Sequence {
    type Err = InvalidSequence;

    /// Parse a contiguous base string such as `"ATGACC"`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data: Result<Vec<Nucleotide>, _> = s
            .chars()
            .map(|c| Nucleotide::from_char(c).ok_or(InvalidSequence::InvalidChar(c)))
            .collect();

        Ok(Self(data?))
    }
}
