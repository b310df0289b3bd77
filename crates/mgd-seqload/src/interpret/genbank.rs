//! GenBank / RefSeq flat-file interpreter

use std::collections::HashMap;

use super::{
    accession, default_source, parse_record_date, ref_assoc, seeded_input, split_version,
    truncate_description, Interpreter,
};
use crate::config::SequenceLoadConfig;
use crate::decider::{Organism, OrganismChecker};
use crate::error::FormatError;
use crate::input::{RefAssociation, SeqRefAssocPair, SequenceInput};
use crate::raw::MSRawAttributes;

const NAME: &str = "genbank";

/// Column where continuation text starts
const CONTINUATION_INDENT: &str = "            ";

/// Column where feature qualifiers start
const QUALIFIER_INDENT: &str = "                     ";

pub struct GenbankInterpreter {
    config: SequenceLoadConfig,
    checker: OrganismChecker,
}

impl GenbankInterpreter {
    pub fn new(config: SequenceLoadConfig) -> Self {
        let checker = OrganismChecker::new(&config.organisms);
        Self { config, checker }
    }

    /// Parse LOCUS line
    /// Format: LOCUS       AB000123                1234 bp    mRNA    linear   ROD 12-SEP-2006
    fn parse_locus(&self, line: &str, input: &mut SequenceInput, record: &str) -> Result<(), FormatError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 5 {
            return Err(FormatError::new(NAME, format!("invalid LOCUS line: {}", line), record));
        }

        let length = parts[2]
            .parse::<u64>()
            .map_err(|_| FormatError::new(NAME, format!("invalid sequence length '{}'", parts[2]), record))?;
        input.sequence.length = Some(length);
        input.sequence.seq_type = Some(molecule_type(parts[3], parts[4]).to_string());

        if let Some(date) = parts.last().and_then(|token| parse_record_date(token)) {
            input.sequence.seq_date = Some(date);
            input.sequence.seq_record_date = Some(date);
            if parts.len() > 6 {
                input.sequence.division = Some(parts[parts.len() - 2].to_string());
            }
        }

        Ok(())
    }

    /// Parse ACCESSION (can span multiple lines)
    fn parse_accession(&self, lines: &[&str], start: usize, input: &mut SequenceInput) -> usize {
        let (text, end) = continued(lines, start, "ACCESSION");
        let mut ids = text.split_whitespace();
        if let Some(primary) = ids.next() {
            input.primary_acc = accession(&self.config, primary, true);
        }
        input
            .secondary_accs
            .extend(ids.map(|id| accession(&self.config, id, false)));
        end
    }

    /// Parse VERSION line
    /// Format: VERSION     AB000123.1  GI:1234
    fn parse_version(&self, line: &str, input: &mut SequenceInput) {
        if let Some(versioned) = line.split_whitespace().nth(1) {
            if let (_, Some(version)) = split_version(versioned) {
                input.sequence.version = Some(version.to_string());
            }
        }
    }

    /// Parse one REFERENCE block into a pubmed/medline pair
    fn parse_reference(&self, lines: &[&str], start: usize, input: &mut SequenceInput) -> usize {
        let mut pair = SeqRefAssocPair::default();
        let mut i = start + 1;

        while i < lines.len() && lines[i].starts_with(' ') {
            let mut parts = lines[i].split_whitespace();
            match (parts.next(), parts.next()) {
                (Some("PUBMED"), Some(id)) => pair.pubmed = Some(ref_assoc(&self.config, id)),
                (Some("MEDLINE"), Some(id)) => pair.medline = Some(ref_assoc(&self.config, id)),
                _ => {},
            }
            i += 1;
        }

        if !pair.is_empty() {
            input.references.push(RefAssociation::Citation(pair));
        }
        i - 1
    }

    fn source(&self, organism: &str, qualifiers: &HashMap<String, String>) -> MSRawAttributes {
        let mut source = default_source(&self.config, Some(Organism::classify(organism)));
        let overrides = [
            ("strain", &mut source.strain),
            ("tissue_type", &mut source.tissue),
            ("sex", &mut source.gender),
            ("cell_line", &mut source.cell_line),
            ("dev_stage", &mut source.age),
        ];
        for (qualifier, field) in overrides {
            if let Some(value) = qualifiers.get(qualifier) {
                *field = Some(value.clone());
            }
        }
        source
    }
}

impl Interpreter for GenbankInterpreter {
    type Output = SequenceInput;

    fn name(&self) -> &'static str {
        NAME
    }

    fn is_valid(&self, record: &str) -> bool {
        self.checker.check_organism(classification(record).as_deref())
    }

    fn interpret(&self, record: &str) -> Result<SequenceInput, FormatError> {
        let lines: Vec<&str> = record.lines().collect();
        let mut input = seeded_input(&self.config, record);

        let mut seen_locus = false;
        let mut seen_accession = false;
        let mut organism: Option<String> = None;
        let mut definition = String::new();
        let mut qualifiers = HashMap::new();

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];

            if line.starts_with("LOCUS") {
                self.parse_locus(line, &mut input, record)?;
                seen_locus = true;
            } else if line.starts_with("DEFINITION") {
                let (text, end) = continued(&lines, i, "DEFINITION");
                definition = text;
                i = end;
            } else if line.starts_with("ACCESSION") {
                i = self.parse_accession(&lines, i, &mut input);
                seen_accession = true;
            } else if line.starts_with("VERSION") {
                self.parse_version(line, &mut input);
            } else if let Some(name) = line.strip_prefix("  ORGANISM") {
                organism = Some(name.trim().to_string());
            } else if line.starts_with("REFERENCE") {
                i = self.parse_reference(&lines, i, &mut input);
            } else if line.starts_with("FEATURES") {
                qualifiers = source_qualifiers(&lines, i);
            } else if line.starts_with("ORIGIN") {
                break;
            }

            i += 1;
        }

        if !seen_locus {
            return Err(FormatError::missing_section(NAME, "LOCUS", record));
        }
        if !seen_accession {
            return Err(FormatError::missing_section(NAME, "ACCESSION", record));
        }
        let Some(organism) = organism else {
            return Err(FormatError::missing_section(NAME, "ORGANISM", record));
        };

        input.sequence.description = Some(truncate_description(definition.trim_end_matches('.')));
        input.sequence.organism_count = 1;
        input.sequence.other_organism_count = usize::from(Organism::classify(&organism) == Organism::Other);
        input.sources = vec![self.source(&organism, &qualifiers)];
        input.sequence.raw_organisms = Some(organism);

        Ok(input)
    }

    fn organism(&self, record: &str) -> Option<Organism> {
        classification(record).and_then(|text| self.checker.matching(&text))
    }
}

/// `DNA`, `RNA` or `Polypeptide` from the LOCUS length unit and molecule columns
fn molecule_type(unit: &str, molecule: &str) -> &'static str {
    if unit.eq_ignore_ascii_case("aa") {
        "Polypeptide"
    } else if molecule.to_uppercase().contains("RNA") {
        "RNA"
    } else {
        "DNA"
    }
}

/// Text of a keyword line plus its indented continuation lines, and the index of the last line used
fn continued(lines: &[&str], start: usize, keyword: &str) -> (String, usize) {
    let mut parts = vec![lines[start].trim_start_matches(keyword).trim()];
    let mut i = start + 1;
    while i < lines.len() && lines[i].starts_with(CONTINUATION_INDENT) {
        parts.push(lines[i].trim());
        i += 1;
    }
    (parts.join(" "), i - 1)
}

/// ORGANISM line plus its lineage; `None` when the record has no ORGANISM
fn classification(record: &str) -> Option<String> {
    let lines: Vec<&str> = record.lines().collect();
    let start = lines.iter().position(|line| line.starts_with("  ORGANISM"))?;
    let (text, _) = continued(&lines, start, "  ORGANISM");
    Some(text)
}

/// Qualifiers of the `source` feature in a FEATURES table
fn source_qualifiers(lines: &[&str], features_start: usize) -> HashMap<String, String> {
    let mut qualifiers = HashMap::new();
    let mut in_source = false;

    for line in &lines[features_start + 1..] {
        if !line.starts_with(' ') {
            break;
        }
        if !line.starts_with(QUALIFIER_INDENT) {
            // A new feature header; only the first source feature is read
            if in_source {
                break;
            }
            in_source = line.trim_start().starts_with("source");
            continue;
        }
        if !in_source {
            continue;
        }
        if let Some((key, value)) = line.trim().trim_start_matches('/').split_once('=') {
            qualifiers.insert(key.to_string(), value.trim_matches('"').to_string());
        }
    }

    qualifiers
}
