//! EMBL / UniProt flat-file interpreter
//!
//! Records are two-letter tagged lines ending with `//`:
//!
//! ```text
//! ID   1433B_MOUSE             Reviewed;         246 AA.
//! AC   Q9CQV8; O70455; Q3TY33;
//! DT   27-JUN-2001, integrated into UniProtKB/Swiss-Prot.
//! DT   27-JUN-2001, sequence version 3.
//! DT   24-JAN-2024, entry version 180.
//! DE   RecName: Full=14-3-3 protein beta/alpha;
//! OS   Mus musculus (Mouse).
//! OC   Eukaryota; Metazoa; Chordata; Craniata; Vertebrata; Euteleostomi;
//! RX   MEDLINE=98216412; PubMed=9548713;
//! //
//! ```

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use super::{
    accession, default_source, parse_record_date, ref_assoc, seeded_input, truncate_description,
    Interpreter,
};
use crate::config::SequenceLoadConfig;
use crate::decider::{Organism, OrganismChecker};
use crate::error::FormatError;
use crate::input::{RefAssociation, SeqRefAssocPair, SequenceInput};

const NAME: &str = "embl";

const MANDATORY_SECTIONS: [&str; 5] = ["ID", "AC", "DT", "DE", "OS"];

/// Separators between organisms on a joined OS section, most specific first
const ORGANISM_SEPARATORS: [(&str, &str); 4] =
    [("), and ", ")\n"), ("), ", ")\n"), (", and ", "\n"), (" and ", "\n")];

pub struct EmblInterpreter {
    config: SequenceLoadConfig,
    checker: OrganismChecker,
}

impl EmblInterpreter {
    pub fn new(config: SequenceLoadConfig) -> Self {
        let checker = OrganismChecker::new(&config.organisms);
        Self { config, checker }
    }

    fn parse_id(&self, lines: &[&str], input: &mut SequenceInput, record: &str) -> Result<(), FormatError> {
        let line = lines.join(" ");
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let length = tokens
            .windows(2)
            .find(|pair| {
                let unit = pair[1].trim_end_matches(['.', ';']);
                unit == "AA" || unit == "BP"
            })
            .and_then(|pair| pair[0].trim_end_matches(';').parse::<u64>().ok())
            .ok_or_else(|| FormatError::new(NAME, "ID line has no sequence length", record))?;
        input.sequence.length = Some(length);

        // SV only appears on nucleotide entries: "ID   X56734; SV 1; linear; mRNA; STD; PLN; 1859 BP."
        if let Some(pair) = tokens.windows(2).find(|pair| pair[0] == "SV") {
            input.sequence.version = Some(pair[1].trim_end_matches(';').to_string());
        }

        let fields: Vec<&str> = line.split(';').map(str::trim).collect();
        if fields.len() >= 7 {
            input.sequence.division = Some(fields[5].to_string());
        }

        Ok(())
    }

    fn parse_accessions(&self, lines: &[&str], input: &mut SequenceInput) {
        let mut ids = lines
            .iter()
            .flat_map(|line| line.split([';', ' ']))
            .map(str::trim)
            .filter(|id| !id.is_empty());

        if let Some(primary) = ids.next() {
            input.primary_acc = accession(&self.config, primary, true);
        }
        input.secondary_accs = ids.map(|id| accession(&self.config, id, false)).collect();
    }

    fn parse_dates(&self, lines: &[&str], input: &mut SequenceInput, record: &str) -> Result<(), FormatError> {
        let mut created = None;
        let mut sequence_update = None;
        let mut annotation_update = None;

        for line in lines {
            let Some(date) = line.split_whitespace().next().and_then(parse_record_date) else {
                continue;
            };
            let text = line.to_lowercase();

            if text.contains("last sequence update") || text.contains("sequence version") {
                sequence_update = Some(date);
                if input.sequence.version.is_none() {
                    input.sequence.version = trailing_number(&text, "sequence version");
                }
            } else if text.contains("last annotation update")
                || text.contains("entry version")
                || text.contains("last updated")
            {
                annotation_update = Some(date);
            } else if text.contains("created") || text.contains("integrated into") {
                created = Some(date);
            }
        }

        let Some(seq_date) = sequence_update.or(created) else {
            return Err(FormatError::missing_section(NAME, "DT", record));
        };
        let annotation_date = annotation_update.unwrap_or(seq_date);

        input.sequence.seq_date = Some(seq_date);
        input.sequence.seq_record_date = Some(record_date(seq_date, annotation_date));
        Ok(())
    }

    fn parse_organisms(&self, lines: &[&str], input: &mut SequenceInput) {
        let raw = lines.join(" ");
        let raw = raw.trim().trim_end_matches('.').to_string();

        let names = split_organisms(&raw);
        let mut classified: Vec<Organism> = Vec::new();
        let mut other_count = 0;
        for name in &names {
            match Organism::classify(name) {
                Organism::Other => other_count += 1,
                organism if !classified.contains(&organism) => classified.push(organism),
                _ => {},
            }
        }

        input.sources = classified
            .iter()
            .map(|organism| default_source(&self.config, Some(*organism)))
            .collect();
        if other_count > 0 {
            input.sources.push(default_source(&self.config, Some(Organism::Other)));
        }

        debug!(organisms = %raw, other_count, "Classified OS section");
        input.sequence.raw_organisms = Some(raw);
        input.sequence.organism_count = names.len();
        input.sequence.other_organism_count = other_count;
    }

    fn parse_citations(&self, lines: &[&str], input: &mut SequenceInput) {
        for line in lines {
            let mut pair = SeqRefAssocPair::default();
            for token in line.split(';').map(str::trim) {
                if let Some(id) = token.strip_prefix("MEDLINE=") {
                    pair.medline = Some(ref_assoc(&self.config, id.trim()));
                } else if let Some(id) = token.strip_prefix("PubMed=") {
                    pair.pubmed = Some(ref_assoc(&self.config, id.trim()));
                }
            }
            if !pair.is_empty() {
                input.references.push(RefAssociation::Citation(pair));
            }
        }
    }
}

impl Interpreter for EmblInterpreter {
    type Output = SequenceInput;

    fn name(&self) -> &'static str {
        NAME
    }

    fn is_valid(&self, record: &str) -> bool {
        self.checker.check_organism(classification(record).as_deref())
    }

    fn interpret(&self, record: &str) -> Result<SequenceInput, FormatError> {
        let sections = sections(record);
        for tag in MANDATORY_SECTIONS {
            if !sections.contains_key(tag) {
                return Err(FormatError::missing_section(NAME, tag, record));
            }
        }
        let section = |tag: &str| sections.get(tag).map(Vec::as_slice).unwrap_or_default();

        let mut input = seeded_input(&self.config, record);
        self.parse_id(section("ID"), &mut input, record)?;
        self.parse_accessions(section("AC"), &mut input);
        self.parse_dates(section("DT"), &mut input, record)?;
        input.sequence.description = Some(truncate_description(&section("DE").join(" ")));
        self.parse_organisms(section("OS"), &mut input);
        self.parse_citations(section("RX"), &mut input);

        Ok(input)
    }

    fn organism(&self, record: &str) -> Option<Organism> {
        classification(record).and_then(|text| self.checker.matching(&text))
    }
}

/// Section contents keyed by line tag, in record order
fn sections(record: &str) -> HashMap<&str, Vec<&str>> {
    let mut sections: HashMap<&str, Vec<&str>> = HashMap::new();
    for line in record.lines() {
        let Some(tag) = line.get(..2) else {
            continue;
        };
        if tag == "//" || tag.starts_with(' ') {
            continue;
        }
        let content = line.get(5..).unwrap_or_default().trim();
        sections.entry(tag).or_default().push(content);
    }
    sections
}

/// OS and OC lines joined; `None` when the record has neither
fn classification(record: &str) -> Option<String> {
    let lines: Vec<&str> = record
        .lines()
        .filter(|line| line.starts_with("OS") || line.starts_with("OC"))
        .map(|line| line.get(5..).unwrap_or_default().trim())
        .collect();
    (!lines.is_empty()).then(|| lines.join(" "))
}

fn split_organisms(text: &str) -> Vec<String> {
    let mut text = text.to_string();
    for (separator, replacement) in ORGANISM_SEPARATORS {
        text = text.replace(separator, replacement);
    }
    text.split('\n')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// The record date is whichever update came last
pub(crate) fn record_date(sequence_update: NaiveDate, annotation_update: NaiveDate) -> NaiveDate {
    sequence_update.max(annotation_update)
}

fn trailing_number(text: &str, keyword: &str) -> Option<String> {
    let after = &text[text.find(keyword)? + keyword.len()..];
    let digits: String = after
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    (!digits.is_empty()).then_some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RECORD: &str = "\
ID   1433B_MOUSE             Reviewed;         246 AA.
AC   Q9CQV8; O70455; Q3TY33;
AC   Q3UAN6;
DT   27-JUN-2001, integrated into UniProtKB/Swiss-Prot.
DT   27-JUN-2001, sequence version 3.
DT   24-JAN-2024, entry version 180.
DE   RecName: Full=14-3-3 protein beta/alpha;
DE   AltName: Full=Protein kinase C inhibitor protein 1;
OS   Mus musculus (Mouse).
OC   Eukaryota; Metazoa; Chordata; Craniata; Vertebrata; Euteleostomi;
OC   Mammalia; Eutheria; Euarchontoglires; Glires; Rodentia; Myomorpha;
RX   MEDLINE=98216412; PubMed=9548713;
RX   PubMed=15489334; DOI=10.1101/gr.2596504;
SQ   SEQUENCE   246 AA;  28086 MW;  2D2B3B5F5D9C0F4E CRC64;
     MTMDKSELVQ KAKLAEQAER YDDMAAAMKA VTEQGHELSN EERNLLSVAY KNVVGARRSS
//
";

    fn interpreter() -> EmblInterpreter {
        EmblInterpreter::new(
            SequenceLoadConfig::new("SWISS-PROT", "SWISS-PROT")
                .with_organisms(&[Organism::Mouse, Organism::Human, Organism::Rat]),
        )
    }

    #[test]
    fn test_interpret_swissprot_record() {
        let input = interpreter().interpret(RECORD).unwrap();

        assert_eq!(input.sequence.length, Some(246));
        assert_eq!(input.sequence.version.as_deref(), Some("3"));
        assert_eq!(input.primary_acc_id(), "Q9CQV8");
        assert!(input.primary_acc.is_preferred);
        let secondaries: Vec<_> = input.secondary_accs.iter().filter_map(|a| a.acc_id()).collect();
        assert_eq!(secondaries, vec!["O70455", "Q3TY33", "Q3UAN6"]);
        assert!(input.secondary_accs.iter().all(|a| !a.is_preferred));
        assert_eq!(
            input.sequence.description.as_deref(),
            Some("RecName: Full=14-3-3 protein beta/alpha; AltName: Full=Protein kinase C inhibitor protein 1;")
        );
        assert_eq!(input.sources.len(), 1);
        assert_eq!(input.sources[0].organism.as_deref(), Some("mouse, laboratory"));
        assert_eq!(input.primary_acc.logical_db.as_deref(), Some("SWISS-PROT"));
    }

    #[test]
    fn test_dt_dates() {
        let input = interpreter().interpret(RECORD).unwrap();
        assert_eq!(input.sequence.seq_date, NaiveDate::from_ymd_opt(2001, 6, 27));
        assert_eq!(input.sequence.seq_record_date, NaiveDate::from_ymd_opt(2024, 1, 24));
    }

    #[test]
    fn test_sequence_update_after_annotation_update() {
        let record = RECORD.replace(
            "DT   27-JUN-2001, sequence version 3.",
            "DT   10-MAR-2025, sequence version 3.",
        );
        let input = interpreter().interpret(&record).unwrap();
        assert_eq!(input.sequence.seq_date, NaiveDate::from_ymd_opt(2025, 3, 10));
        assert_eq!(input.sequence.seq_record_date, NaiveDate::from_ymd_opt(2025, 3, 10));
    }

    #[test]
    fn test_sequence_and_annotation_update_same_day() {
        let record = RECORD.replace(
            "DT   27-JUN-2001, sequence version 3.",
            "DT   24-JAN-2024, sequence version 3.",
        );
        let input = interpreter().interpret(&record).unwrap();
        assert_eq!(input.sequence.seq_date, NaiveDate::from_ymd_opt(2024, 1, 24));
        assert_eq!(input.sequence.seq_record_date, NaiveDate::from_ymd_opt(2024, 1, 24));
    }

    #[test]
    fn test_dt_legacy_keywords() {
        let record = RECORD
            .replace(
                "DT   27-JUN-2001, sequence version 3.",
                "DT   01-NOV-1997 (Rel. 35, Last sequence update)",
            )
            .replace(
                "DT   24-JAN-2024, entry version 180.",
                "DT   15-JUL-1999 (Rel. 38, Last annotation update)",
            );
        let input = interpreter().interpret(&record).unwrap();
        assert_eq!(input.sequence.seq_date, NaiveDate::from_ymd_opt(1997, 11, 1));
        assert_eq!(input.sequence.seq_record_date, NaiveDate::from_ymd_opt(1999, 7, 15));
    }

    #[test]
    fn test_dt_without_any_date_is_missing() {
        let record: String = RECORD
            .lines()
            .map(|line| if line.starts_with("DT") { "DT   no date here" } else { line })
            .collect::<Vec<_>>()
            .join("\n");
        let err = interpreter().interpret(&record).unwrap_err();
        assert!(err.message.contains("DT"));
        assert_eq!(err.record, record);
    }

    #[test]
    fn test_rx_pairs() {
        let input = interpreter().interpret(RECORD).unwrap();
        let pairs: Vec<_> = input.citations().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].pubmed.as_ref().and_then(|r| r.ref_id.as_deref()), Some("9548713"));
        assert_eq!(pairs[0].medline.as_ref().and_then(|r| r.ref_id.as_deref()), Some("98216412"));
        assert_eq!(pairs[1].pubmed.as_ref().and_then(|r| r.ref_id.as_deref()), Some("15489334"));
        assert!(pairs[1].medline.is_none());
    }

    #[test]
    fn test_rx_medline_only() {
        let record = RECORD.replace("RX   PubMed=15489334; DOI=10.1101/gr.2596504;", "RX   MEDLINE=20001;");
        let input = interpreter().interpret(&record).unwrap();
        let pair = input.citations().nth(1).unwrap();
        assert!(pair.pubmed.is_none());
        assert_eq!(pair.medline.as_ref().and_then(|r| r.ref_id.as_deref()), Some("20001"));
    }

    #[test]
    fn test_missing_mandatory_section() {
        let record: String = RECORD
            .lines()
            .filter(|line| !line.starts_with("DE"))
            .collect::<Vec<_>>()
            .join("\n");
        let err = interpreter().interpret(&record).unwrap_err();
        assert_eq!(err.interpreter, "embl");
        assert!(err.message.contains("DE"));
    }

    #[test]
    fn test_duplicate_organisms_give_one_source() {
        let record = RECORD.replace(
            "OS   Mus musculus (Mouse).",
            "OS   Mus musculus (Mouse), Mus musculus domesticus (house mouse), and\nOS   Bos taurus (Bovine).",
        );
        let input = interpreter().interpret(&record).unwrap();
        assert_eq!(input.sources.len(), 2);
        assert_eq!(input.sources[1].organism.as_deref(), Some("Not Specified"));
        assert_eq!(input.sequence.organism_count, 3);
        assert_eq!(input.sequence.other_organism_count, 1);
    }

    #[test]
    fn test_multiple_organisms_split() {
        assert_eq!(
            split_organisms("Homo sapiens (Human), Mus musculus (Mouse), and Rattus norvegicus (Rat)"),
            vec!["Homo sapiens (Human)", "Mus musculus (Mouse)", "Rattus norvegicus (Rat)"]
        );
        assert_eq!(split_organisms("Homo sapiens and Mus musculus"), vec!["Homo sapiens", "Mus musculus"]);
    }

    #[test]
    fn test_description_truncated() {
        let record = RECORD.replace(
            "DE   AltName: Full=Protein kinase C inhibitor protein 1;",
            &format!("DE   {}", "y".repeat(300)),
        );
        let input = interpreter().interpret(&record).unwrap();
        assert_eq!(input.sequence.description.unwrap().chars().count(), 255);
    }

    #[test]
    fn test_nucleotide_id_line() {
        let record = RECORD.replace(
            "ID   1433B_MOUSE             Reviewed;         246 AA.",
            "ID   X56734; SV 1; linear; mRNA; STD; ROD; 1859 BP.",
        );
        let input = interpreter().interpret(&record).unwrap();
        assert_eq!(input.sequence.length, Some(1859));
        assert_eq!(input.sequence.version.as_deref(), Some("1"));
        assert_eq!(input.sequence.division.as_deref(), Some("ROD"));
    }

    #[test]
    fn test_is_valid_uses_enabled_deciders() {
        let mouse_only = EmblInterpreter::new(SequenceLoadConfig::new("SWISS-PROT", "SWISS-PROT"));
        assert!(mouse_only.is_valid(RECORD));
        assert_eq!(mouse_only.organism(RECORD), Some(Organism::Mouse));

        let human = RECORD.replace("Mus musculus (Mouse)", "Homo sapiens (Human)");
        assert!(!mouse_only.is_valid(&human));
        assert!(interpreter().is_valid(&human));
    }

    #[test]
    fn test_is_valid_without_classification() {
        let record: String = RECORD
            .lines()
            .filter(|line| !line.starts_with("OS") && !line.starts_with("OC"))
            .collect::<Vec<_>>()
            .join("\n");
        assert!(!interpreter().is_valid(&record));
    }

    #[test]
    fn test_load_reference_attached() {
        let config = SequenceLoadConfig::new("SWISS-PROT", "SWISS-PROT").with_jnumber("J:53168");
        let input = EmblInterpreter::new(config).interpret(RECORD).unwrap();
        assert!(input
            .references
            .iter()
            .any(|r| matches!(r, RefAssociation::JNumber(raw) if raw.ref_id.as_deref() == Some("J:53168"))));
    }

    proptest! {
        #[test]
        fn prop_record_date_is_latest_update(a in 0i64..20000, b in 0i64..20000) {
            let base = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
            let d1 = base + chrono::Duration::days(a);
            let d2 = base + chrono::Duration::days(b);
            let date = record_date(d1, d2);
            prop_assert!(date >= d1 && date >= d2);
            prop_assert!(date == d1 || date == d2);
        }
    }
}
