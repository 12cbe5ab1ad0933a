//! Sequence validation.
//!
//! Checks FASTA-style text for a header on the first line and a
//! nucleotide-only body, collecting every violation in a single pass.

mod fasta;
mod validator;

pub use fasta::{FastaRecord, ValidatedSequence};
pub use validator::{RAW_RECORD_ID, validate, validate_raw};
