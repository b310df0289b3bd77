//! Format interpreters
//!
//! Each interpreter understands one fixed record grammar and turns a single
//! raw record into an input aggregate. The run driver always asks
//! [`Interpreter::is_valid`] first; `interpret` assumes it answered `true`.
//!
//! Interpreters are chosen at startup from [`InterpreterKind`], which replaces
//! loading an implementation by class name.

pub mod coordinate;
pub mod delete;
pub mod embl;
pub mod fasta;
pub mod genbank;
pub mod mgs;

use chrono::NaiveDate;
use mgd_common::{MgdError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::SequenceLoadConfig;
use crate::decider::Organism;
use crate::error::FormatError;
use crate::input::{RefAssociation, SequenceInput};
use crate::raw::{AccessionRawAttributes, MSRawAttributes, RefAssocRawAttributes};
use crate::reader::RecordDelimiter;

pub use coordinate::CoordinateInterpreter;
pub use delete::DeleteInterpreter;
pub use embl::EmblInterpreter;
pub use fasta::FastaInterpreter;
pub use genbank::GenbankInterpreter;
pub use mgs::MgsAssemblyInterpreter;

/// Longest description MGD stores
pub const MAX_DESCRIPTION_LENGTH: usize = 255;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Parses one raw record of a fixed format
pub trait Interpreter {
    type Output;

    /// Short format name used in errors and logs
    fn name(&self) -> &'static str;

    /// Whether the record should be interpreted at all
    fn is_valid(&self, record: &str) -> bool;

    fn interpret(&self, record: &str) -> std::result::Result<Self::Output, FormatError>;

    /// Enabled organism the record was accepted for, when the format filters on one
    fn organism(&self, _record: &str) -> Option<Organism> {
        None
    }
}

pub type SequenceInterpreter = dyn Interpreter<Output = SequenceInput>;

/// Every record format the loader knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpreterKind {
    Embl,
    Genbank,
    Fasta,
    MgsAssembly,
    Coordinate,
    Delete,
}

impl InterpreterKind {
    /// How the input file is cut into records for this format
    pub fn record_delimiter(self) -> RecordDelimiter {
        match self {
            InterpreterKind::Embl | InterpreterKind::Genbank => RecordDelimiter::Terminator("//"),
            InterpreterKind::Fasta => RecordDelimiter::Header('>'),
            InterpreterKind::MgsAssembly | InterpreterKind::Coordinate | InterpreterKind::Delete => {
                RecordDelimiter::Line
            },
        }
    }
}

impl fmt::Display for InterpreterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterpreterKind::Embl => "embl",
            InterpreterKind::Genbank => "genbank",
            InterpreterKind::Fasta => "fasta",
            InterpreterKind::MgsAssembly => "mgs_assembly",
            InterpreterKind::Coordinate => "coordinate",
            InterpreterKind::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for InterpreterKind {
    type Err = MgdError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "embl" | "swissprot" | "trembl" | "uniprot" => Ok(InterpreterKind::Embl),
            "genbank" | "refseq" => Ok(InterpreterKind::Genbank),
            "fasta" => Ok(InterpreterKind::Fasta),
            "mgs" | "mgs_assembly" => Ok(InterpreterKind::MgsAssembly),
            "coordinate" | "coord" => Ok(InterpreterKind::Coordinate),
            "delete" => Ok(InterpreterKind::Delete),
            other => Err(MgdError::config(format!("unknown interpreter '{}'", other))),
        }
    }
}

/// Build the sequence interpreter for `kind`
///
/// Coordinate and delete records do not produce a [`SequenceInput`] and are
/// built directly from their own types.
pub fn build_sequence_interpreter(
    kind: InterpreterKind,
    config: &SequenceLoadConfig,
) -> Result<Box<SequenceInterpreter>> {
    let interpreter: Box<SequenceInterpreter> = match kind {
        InterpreterKind::Embl => Box::new(EmblInterpreter::new(config.clone())),
        InterpreterKind::Genbank => Box::new(GenbankInterpreter::new(config.clone())),
        InterpreterKind::Fasta => Box::new(FastaInterpreter::new(config.clone())),
        InterpreterKind::MgsAssembly => Box::new(MgsAssemblyInterpreter::new(config.clone())),
        InterpreterKind::Coordinate | InterpreterKind::Delete => {
            return Err(MgdError::config(format!(
                "'{}' records are not sequence records",
                kind
            )))
        },
    };
    Ok(interpreter)
}

/// A sequence input pre-filled with the run's configured defaults
pub(crate) fn seeded_input(config: &SequenceLoadConfig, record: &str) -> SequenceInput {
    let mut input = SequenceInput::default();

    let sequence = &mut input.sequence;
    sequence.seq_type = Some(config.seq_type.clone());
    sequence.quality = Some(config.quality.clone());
    sequence.status = Some(config.status.clone());
    sequence.provider = Some(config.provider.clone());
    sequence.is_virtual = config.is_virtual;
    sequence.record = Some(record.to_string());

    if let Some(ref jnumber) = config.jnumber {
        input
            .references
            .push(RefAssociation::JNumber(ref_assoc(config, jnumber)));
    }

    input
}

pub(crate) fn accession(config: &SequenceLoadConfig, acc_id: &str, preferred: bool) -> AccessionRawAttributes {
    let mut raw = AccessionRawAttributes::new(acc_id);
    raw.logical_db = Some(config.logical_db.clone());
    raw.mgi_type = Some(config.mgi_type.clone());
    raw.created_by = Some(config.created_by.clone());
    raw.is_preferred = preferred;
    raw
}

pub(crate) fn ref_assoc(config: &SequenceLoadConfig, ref_id: &str) -> RefAssocRawAttributes {
    RefAssocRawAttributes {
        ref_id: Some(ref_id.to_string()),
        ref_assoc_type: Some(config.ref_assoc_type.clone()),
        mgi_type: Some(config.mgi_type.clone()),
    }
}

/// Source with the configured defaults; `organism` overrides the configured organism
pub(crate) fn default_source(config: &SequenceLoadConfig, organism: Option<Organism>) -> MSRawAttributes {
    let defaults = &config.source;
    MSRawAttributes {
        organism: Some(
            organism
                .map(|o| o.mgi_name().to_string())
                .unwrap_or_else(|| defaults.organism.clone()),
        ),
        strain: Some(defaults.strain.clone()),
        tissue: Some(defaults.tissue.clone()),
        age: Some(defaults.age.clone()),
        gender: Some(defaults.gender.clone()),
        cell_line: Some(defaults.cell_line.clone()),
    }
}

/// Parse a flat-file date such as `01-JAN-1990`
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.trim().trim_end_matches([',', '.']).split('-');
    let day: u32 = parts.next()?.parse().ok()?;
    let month = parts.next()?.to_uppercase();
    let month = MONTHS.iter().position(|m| *m == month)? as u32 + 1;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Split `"NM_000001.2"` into `("NM_000001", Some("2"))`
pub fn split_version(seq_id: &str) -> (&str, Option<&str>) {
    match seq_id.rsplit_once('.') {
        Some((id, version)) if !id.is_empty() && !version.is_empty() => (id, Some(version)),
        _ => (seq_id, None),
    }
}

pub fn truncate_description(description: &str) -> String {
    description
        .trim()
        .chars()
        .take(MAX_DESCRIPTION_LENGTH)
        .collect()
}

/// Blank lines and `#` comments are never records
pub(crate) fn is_comment_or_blank(record: &str) -> bool {
    record.trim().is_empty() || record.starts_with('#')
}
