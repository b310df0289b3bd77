//! MGS assembly interpreter
//!
//! One tab-delimited line per sequence:
//! `seqid  chromosome  start  end  strand  description`.

use super::{
    accession, default_source, is_comment_or_blank, seeded_input, split_version,
    truncate_description, Interpreter,
};
use crate::config::SequenceLoadConfig;
use crate::error::FormatError;
use crate::input::SequenceInput;

const NAME: &str = "mgs_assembly";

const EXPECTED_COLUMNS: usize = 6;

pub struct MgsAssemblyInterpreter {
    config: SequenceLoadConfig,
}

impl MgsAssemblyInterpreter {
    pub fn new(config: SequenceLoadConfig) -> Self {
        Self { config }
    }
}

impl Interpreter for MgsAssemblyInterpreter {
    type Output = SequenceInput;

    fn name(&self) -> &'static str {
        NAME
    }

    fn is_valid(&self, record: &str) -> bool {
        !is_comment_or_blank(record)
    }

    fn interpret(&self, record: &str) -> Result<SequenceInput, FormatError> {
        let columns: Vec<&str> = record.trim_end_matches(['\r', '\n']).split('\t').collect();
        if columns.len() != EXPECTED_COLUMNS {
            return Err(FormatError::new(
                NAME,
                format!(
                    "expected {} tab-delimited columns, found {}",
                    EXPECTED_COLUMNS,
                    columns.len()
                ),
                record,
            ));
        }

        let seq_id = columns[0].trim();
        let start = parse_position(columns[2], "start", record)?;
        let end = parse_position(columns[3], "end", record)?;
        if end < start {
            return Err(FormatError::new(
                NAME,
                format!("end {} precedes start {}", end, start),
                record,
            ));
        }

        let length = (end - start)
            .checked_add(1)
            .ok_or_else(|| FormatError::new(NAME, format!("span {}..{} is too long", start, end), record))?;

        let mut input = seeded_input(&self.config, record);
        input.sequence.length = Some(length);
        input.sequence.description = Some(truncate_description(columns[5]));
        input.sources = vec![default_source(&self.config, None)];

        input.primary_acc = accession(&self.config, seq_id, true);
        if self.config.version_from_config {
            input.sequence.version = self.config.release_version.clone();
        } else if let (stripped, Some(version)) = split_version(seq_id) {
            input.sequence.version = Some(version.to_string());
            input.secondary_accs.push(accession(&self.config, stripped, false));
        }

        if let Some(date) = self.config.release_date {
            input.sequence.seq_date = Some(date);
            input.sequence.seq_record_date = Some(date);
        }

        Ok(input)
    }
}

fn parse_position(value: &str, column: &str, record: &str) -> Result<u64, FormatError> {
    value
        .trim()
        .parse()
        .map_err(|_| FormatError::new(NAME, format!("invalid {} coordinate '{}'", column, value), record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn interpreter() -> MgsAssemblyInterpreter {
        MgsAssemblyInterpreter::new(SequenceLoadConfig::new("NCBI Gene Model", "NCBI Gene Model"))
    }

    #[test]
    fn test_interpret_gene_model_line() {
        let input = interpreter().interpret("240677\t1\t3068294\t3069180\t+\tGENE").unwrap();
        assert_eq!(input.sequence.length, Some(887));
        assert_eq!(input.sequence.description.as_deref(), Some("GENE"));
        assert_eq!(input.primary_acc_id(), "240677");
        assert!(input.secondary_accs.is_empty());
        assert_eq!(input.sources.len(), 1);
    }

    #[test]
    fn test_versioned_seqid_adds_secondary() {
        let input = interpreter()
            .interpret("NM_011739.3\t11\t100\t199\t-\tYwhab")
            .unwrap();
        assert_eq!(input.primary_acc_id(), "NM_011739.3");
        assert_eq!(input.sequence.version.as_deref(), Some("3"));
        assert_eq!(input.secondary_accs.len(), 1);
        assert_eq!(input.secondary_accs[0].acc_id(), Some("NM_011739"));
        assert!(!input.secondary_accs[0].is_preferred);
    }

    #[test]
    fn test_version_from_config() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let config = SequenceLoadConfig::new("Ensembl Gene Model", "Ensembl Gene Model")
            .with_release("111", date)
            .with_version_from_config(true);
        let input = MgsAssemblyInterpreter::new(config)
            .interpret("ENSMUSG00000000001.5\t3\t10\t20\t+\tGnai3")
            .unwrap();
        assert_eq!(input.sequence.version.as_deref(), Some("111"));
        assert!(input.secondary_accs.is_empty());
        assert_eq!(input.sequence.seq_record_date, Some(date));
    }

    #[test]
    fn test_wrong_column_count_names_expected() {
        let err = interpreter().interpret("240677\t1\t3068294\t3069180\t+").unwrap_err();
        assert!(err.message.contains('6'));
        assert_eq!(err.record, "240677\t1\t3068294\t3069180\t+");

        assert!(interpreter().interpret("a\tb\tc\td\te\tf\tg").is_err());
    }

    #[test]
    fn test_non_numeric_start() {
        assert!(interpreter().interpret("240677\t1\tabc\t3069180\t+\tGENE").is_err());
    }

    #[test]
    fn test_full_width_span_is_format_error() {
        let record = "x\t1\t0\t18446744073709551615\t+\tGENE";
        let err = interpreter().interpret(record).unwrap_err();
        assert!(err.message.contains("too long"));
        assert_eq!(err.record, record);

        let input = interpreter().interpret("x\t1\t1\t18446744073709551615\t+\tGENE").unwrap();
        assert_eq!(input.sequence.length, Some(u64::MAX));
    }

    #[test]
    fn test_is_valid_skips_comments() {
        assert!(!interpreter().is_valid("# seqid\tchromosome\tstart"));
        assert!(!interpreter().is_valid("   "));
        assert!(interpreter().is_valid("240677\t1\t3068294\t3069180\t+\tGENE"));
    }
}
