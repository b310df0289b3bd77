//! FASTA interpreter
//!
//! Header ids are either plain (`>NM_011739.3 Ywhab mRNA`) or NCBI style
//! (`>gi|6756041|ref|NM_011739.3| Ywhab mRNA`).

use super::{accession, default_source, seeded_input, split_version, truncate_description, Interpreter};
use crate::config::SequenceLoadConfig;
use crate::error::FormatError;
use crate::input::SequenceInput;

const NAME: &str = "fasta";

pub struct FastaInterpreter {
    config: SequenceLoadConfig,
}

impl FastaInterpreter {
    pub fn new(config: SequenceLoadConfig) -> Self {
        Self { config }
    }
}

impl Interpreter for FastaInterpreter {
    type Output = SequenceInput;

    fn name(&self) -> &'static str {
        NAME
    }

    fn is_valid(&self, record: &str) -> bool {
        record.starts_with('>')
    }

    fn interpret(&self, record: &str) -> Result<SequenceInput, FormatError> {
        let mut lines = record.lines();
        let header = lines
            .next()
            .and_then(|line| line.strip_prefix('>'))
            .ok_or_else(|| FormatError::missing_section(NAME, "header", record))?;

        let (id_field, description) = header
            .trim()
            .split_once(char::is_whitespace)
            .unwrap_or((header.trim(), ""));
        let seq_id = header_id(id_field)
            .ok_or_else(|| FormatError::new(NAME, format!("no sequence id in header '{}'", header), record))?;

        let residues = lines
            .flat_map(|line| line.chars())
            .filter(|c| !c.is_whitespace() && *c != '*')
            .count();

        let (stripped, version) = split_version(seq_id);

        let mut input = seeded_input(&self.config, record);
        input.primary_acc = accession(&self.config, stripped, true);
        input.sequence.version = version.map(str::to_string);
        input.sequence.length = Some(residues as u64);
        input.sequence.description = Some(truncate_description(description));
        input.sources = vec![default_source(&self.config, None)];

        if let Some(date) = self.config.release_date {
            input.sequence.seq_date = Some(date);
            input.sequence.seq_record_date = Some(date);
        }

        Ok(input)
    }
}

/// Accession from a header id field
///
/// `gi|6756041|ref|NM_011739.3|` yields `NM_011739.3`; a plain id is returned as is.
fn header_id(field: &str) -> Option<&str> {
    let field = field.trim();
    if field.is_empty() {
        return None;
    }
    if !field.starts_with("gi|") {
        return Some(field);
    }
    field.split('|').nth(3).filter(|id| !id.is_empty())
}
