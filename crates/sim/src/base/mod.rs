//! Base types for sequence representation.
//!
//! Nucleotides, nucleotide sequences and the codons a sequence is read as.

mod codon;
mod nucleotide;
mod sequence;

pub use codon::Codon;
pub use nucleotide::Nucleotide;
pub use sequence::Sequence;
