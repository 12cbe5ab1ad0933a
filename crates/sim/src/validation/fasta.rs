use crate::base::Sequence;

/// One FASTA record: a `>` header followed by nucleotide lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// First whitespace-delimited token after `>`.
    pub id: String,
    /// Remainder of the header line, trimmed.
    pub description: String,
    /// 0-based index of the header line in the source text.
    pub line: usize,
    pub sequence: Sequence,
}

impl FastaRecord {
    /// Build an empty record from header text (without the leading `>`).
    pub fn from_header(header: &str, line: usize) -> Self {
        let header = header.trim();
        let (id, description) = match header.split_once(char::is_whitespace) {
            Some((id, rest)) => (id, rest.trim()),
            None => (header, ""),
        };
        Self {
            id: id.to_string(),
            description: description.to_string(),
            line,
            sequence: Sequence::new(),
        }
    }

    /// Iterate over `key=value` pairs in the description. Tokens without `=`
    /// are skipped.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.description
            .split_whitespace()
            .filter_map(|token| token.split_once('='))
    }
}

/// Text that passed validation.
///
/// Holds at least one record; only the validator constructs it, so holding a
/// `ValidatedSequence` is proof the input is well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSequence {
    records: Vec<FastaRecord>,
}

impl ValidatedSequence {
    pub(crate) fn new(records: Vec<FastaRecord>) -> Option<Self> {
        if records.is_empty() {
            None
        } else {
            Some(Self { records })
        }
    }

    /// The record a simulation runs.
    pub fn primary(&self) -> &FastaRecord {
        &self.records[0]
    }

    pub fn records(&self) -> &[FastaRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FastaRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header_splits_id_and_description() {
        let record = FastaRecord::from_header("seq1 basic protein synthesis", 0);
        assert_eq!(record.id, "seq1");
        assert_eq!(record.description, "basic protein synthesis");
        assert!(record.sequence.is_empty());
    }

    #[test]
    fn test_from_header_without_description() {
        let record = FastaRecord::from_header("  seq1\r", 4);
        assert_eq!(record.id, "seq1");
        assert_eq!(record.description, "");
        assert_eq!(record.line, 4);
    }

    #[test]
    fn test_attributes() {
        let record = FastaRecord::from_header("Virus_Addition tick=3 lytic host=ecoli", 0);
        let attrs: Vec<_> = record.attributes().collect();
        assert_eq!(attrs, vec![("tick", "3"), ("host", "ecoli")]);
    }

    #[test]
    fn test_validated_sequence_requires_a_record() {
        assert!(ValidatedSequence::new(Vec::new()).is_none());
    }
}
