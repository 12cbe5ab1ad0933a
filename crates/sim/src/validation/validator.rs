use super::fasta::{FastaRecord, ValidatedSequence};
use crate::base::Sequence;
use crate::errors::{InvalidSequence, ValidationError, ValidationErrors};

/// Identifier given to input validated without a header.
pub const RAW_RECORD_ID: &str = "raw";

/// Validate FASTA text.
///
/// Line 0 must start with `>`. Every later line must hold only `ACGT` (either
/// case) and whitespace, except lines starting with `>`, which open a further
/// record. All violations are reported, in line order; `MissingHeader` is
/// reported at most once.
pub fn validate(text: &str) -> Result<ValidatedSequence, ValidationErrors> {
    let mut errors = Vec::new();
    let mut records: Vec<FastaRecord> = Vec::new();
    // Body lines seen before any header still get checked, then discarded.
    let mut orphan = Sequence::new();

    for (idx, line) in text.split('\n').enumerate() {
        if let Some(header) = line.strip_prefix('>') {
            records.push(FastaRecord::from_header(header, idx));
            continue;
        }

        if idx == 0 {
            errors.push(ValidationError::missing_header());
            continue;
        }

        let target = match records.last_mut() {
            Some(record) => &mut record.sequence,
            None => &mut orphan,
        };
        check_line(target, idx, line, &mut errors);
    }

    finish(records, errors)
}

/// Validate a bare sequence with no header, the form accepted on the command
/// line (`strand ATGACC...`). Every line is checked against the alphabet.
pub fn validate_raw(text: &str) -> Result<ValidatedSequence, ValidationErrors> {
    let mut errors = Vec::new();
    let mut record = FastaRecord::from_header(RAW_RECORD_ID, 0);

    for (idx, line) in text.split('\n').enumerate() {
        check_line(&mut record.sequence, idx, line, &mut errors);
    }

    finish(vec![record], errors)
}

fn check_line(target: &mut Sequence, idx: usize, line: &str, errors: &mut Vec<ValidationError>) {
    if let Err(InvalidSequence::InvalidChar(symbol)) = target.extend_from_line(line) {
        errors.push(ValidationError::invalid_symbol(idx, symbol, line));
    }
}

fn finish(
    records: Vec<FastaRecord>,
    errors: Vec<ValidationError>,
) -> Result<ValidatedSequence, ValidationErrors> {
    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }
    // A clean pass always saw a header on line 0 (or synthesized one).
    ValidatedSequence::new(records)
        .ok_or_else(|| ValidationErrors(vec![ValidationError::missing_header()]))
}
