use super::Nucleotide;
use crate::errors::InvalidSequence;
use std::fmt;
use std::str::FromStr;

use Nucleotide::{A, C, G, T};

/// Three consecutive nucleotides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codon([Nucleotide; 3]);

impl Codon {
    /// Start codon; opens a program segment.
    pub const START: Codon = Codon([A, T, G]);
    /// Stop codons; close the open program segment.
    pub const STOPS: [Codon; 3] = [Codon([T, A, A]), Codon([T, A, G]), Codon([T, G, A])];

    pub const fn new(first: Nucleotide, second: Nucleotide, third: Nucleotide) -> Self {
        Self([first, second, third])
    }

    #[inline]
    pub fn bases(&self) -> [Nucleotide; 3] {
        self.0
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        *self == Self::START
    }

    #[inline]
    pub fn is_stop(&self) -> bool {
        Self::STOPS.contains(self)
    }

    /// Copy of this codon with the base at `position` replaced.
    ///
    /// Positions outside `0..3` leave the codon unchanged.
    pub fn with_base(mut self, position: usize, base: Nucleotide) -> Self {
        if let Some(slot) = self.0.get_mut(position) {
            *slot = base;
        }
        self
    }
}

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for nuc in self.0 {
            write!(f, "{nuc}")?;
        }
        Ok(())
    }
}

impl FromStr for Codon {
    type Err = InvalidSequence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bases: Vec<Nucleotide> = s
            .chars()
            .map(|c| Nucleotide::from_char(c).ok_or(InvalidSequence::InvalidChar(c)))
            .collect::<Result<_, _>>()?;

        match bases.as_slice() {
            &[first, second, third] => Ok(Self([first, second, third])),
            other => Err(InvalidSequence::CodonLength(other.len())),
        }
    }
}
