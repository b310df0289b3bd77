//! Load run driver
//!
//! Records flow reader → `is_valid` → `interpret` → resolvers → sink, one at
//! a time. A record that fails to interpret or resolve is logged with its
//! text, counted, and skipped; only I/O and sink failures stop the run.

use mgd_common::Result;
use std::io;
use tracing::{debug, warn};

use crate::error::{RecordError, ResolveError};
use crate::input::SequenceInput;
use crate::interpret::{CoordinateInterpreter, DeleteInterpreter, Interpreter, SequenceInterpreter};
use crate::lookup::{Key, LookupSet};
use crate::resolve::{
    AccAttributeResolver, RefAssocAttributeResolver, SeqRefAssocProcessor, SequenceAttributeResolver,
};
use crate::sink::{LoadRow, ResolvedCoordinate, ResolvedDelete, ResolvedSequence, Sink};
use crate::stats::LoadStats;

/// One kind of load: how to accept and turn a record into a row
pub trait RecordLoader {
    fn name(&self) -> &'static str;

    fn is_valid(&self, record: &str) -> bool;

    fn load(&mut self, record: &str, stats: &mut LoadStats) -> std::result::Result<LoadRow, RecordError>;
}

/// Feed every record through `loader` into `sink`
pub fn run_load<L, I>(loader: &mut L, records: I, sink: &mut dyn Sink) -> Result<LoadStats>
where
    L: RecordLoader + ?Sized,
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut stats = LoadStats::new();

    for record in records {
        let record = record?;
        stats.records_read += 1;

        if !loader.is_valid(&record) {
            stats.records_skipped += 1;
            continue;
        }

        match loader.load(&record, &mut stats) {
            Ok(row) => {
                sink.write(&row)?;
                stats.records_loaded += 1;
            },
            Err(RecordError::Format(e)) => {
                stats.format_errors += 1;
                warn!(load = loader.name(), error = %e, record = %e.record, "Skipping malformed record");
            },
            Err(RecordError::Resolve(e)) => {
                stats.resolve_errors += 1;
                warn!(load = loader.name(), error = %e, %record, "Skipping unresolvable record");
            },
        }
    }

    sink.finish()?;
    stats.log_summary(loader.name());
    Ok(stats)
}

/// Sequence loads: EMBL, GenBank, FASTA and MGS records
pub struct SequenceLoader<'a> {
    interpreter: Box<SequenceInterpreter>,
    lookups: &'a LookupSet,
    next_key: Key,
}

impl<'a> SequenceLoader<'a> {
    pub fn new(interpreter: Box<SequenceInterpreter>, lookups: &'a LookupSet, start_key: Key) -> Self {
        Self {
            interpreter,
            lookups,
            next_key: start_key,
        }
    }

    fn resolve(&self, input: &SequenceInput, stats: &mut LoadStats) -> std::result::Result<ResolvedSequence, ResolveError> {
        let sequence = SequenceAttributeResolver::from_lookups(self.lookups).resolve(&input.sequence)?;

        let accessions = AccAttributeResolver::new(&self.lookups.logical_db);
        let primary_acc = accessions.resolve(&input.primary_acc, self.next_key)?;
        let secondary_accs = input
            .secondary_accs
            .iter()
            .map(|raw| accessions.resolve(raw, self.next_key))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let processor = SeqRefAssocProcessor::new(RefAssocAttributeResolver::from_lookups(self.lookups));
        let summary = processor.process_all(&input.references, self.next_key);
        stats.references_associated += summary.states.len();
        stats.references_unresolved += summary.unresolved;
        stats.references_duplicate += summary.duplicates;

        Ok(ResolvedSequence {
            sequence_key: self.next_key,
            sequence,
            primary_acc,
            secondary_accs,
            sources: input.sources.clone(),
            references: summary.states,
        })
    }
}

impl RecordLoader for SequenceLoader<'_> {
    fn name(&self) -> &'static str {
        self.interpreter.name()
    }

    fn is_valid(&self, record: &str) -> bool {
        self.interpreter.is_valid(record)
    }

    fn load(&mut self, record: &str, stats: &mut LoadStats) -> std::result::Result<LoadRow, RecordError> {
        if let Some(organism) = self.interpreter.organism(record) {
            stats.record_organism(organism);
        }

        let input = self.interpreter.interpret(record)?;
        let resolved = self.resolve(&input, stats)?;

        debug!(
            acc_id = input.primary_acc_id(),
            sequence_key = resolved.sequence_key,
            "Resolved sequence"
        );
        self.next_key += 1;
        Ok(LoadRow::Sequence(resolved))
    }
}

/// Coordinate loads
pub struct CoordinateLoader {
    interpreter: CoordinateInterpreter,
    next_key: Key,
}

impl CoordinateLoader {
    pub fn new(interpreter: CoordinateInterpreter, start_key: Key) -> Self {
        Self {
            interpreter,
            next_key: start_key,
        }
    }
}

impl RecordLoader for CoordinateLoader {
    fn name(&self) -> &'static str {
        self.interpreter.name()
    }

    fn is_valid(&self, record: &str) -> bool {
        self.interpreter.is_valid(record)
    }

    fn load(&mut self, record: &str, _stats: &mut LoadStats) -> std::result::Result<LoadRow, RecordError> {
        let coordinate = self.interpreter.interpret(record)?;
        let row = LoadRow::Coordinate(ResolvedCoordinate {
            feature_key: self.next_key,
            coordinate,
        });
        self.next_key += 1;
        Ok(row)
    }
}

/// Sequence deletes by accession
pub struct DeleteLoader<'a> {
    interpreter: DeleteInterpreter,
    lookups: &'a LookupSet,
}

impl<'a> DeleteLoader<'a> {
    pub fn new(interpreter: DeleteInterpreter, lookups: &'a LookupSet) -> Self {
        Self { interpreter, lookups }
    }
}

impl RecordLoader for DeleteLoader<'_> {
    fn name(&self) -> &'static str {
        self.interpreter.name()
    }

    fn is_valid(&self, record: &str) -> bool {
        self.interpreter.is_valid(record)
    }

    fn load(&mut self, record: &str, _stats: &mut LoadStats) -> std::result::Result<LoadRow, RecordError> {
        let input = self.interpreter.interpret(record)?;
        let accession = AccAttributeResolver::new(&self.lookups.logical_db).resolve_unattached(&input.accession)?;
        Ok(LoadRow::Delete(ResolvedDelete { accession }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CoordinateLoadConfig, SequenceLoadConfig};
    use crate::interpret::{build_sequence_interpreter, InterpreterKind};
    use crate::sink::MemorySink;

    fn lookups() -> LookupSet {
        let mut lookups = LookupSet::default();
        lookups.logical_db.insert("NCBI Gene Model", 59);
        lookups.seq_type.insert("Not Loaded", 316348);
        lookups.seq_quality.insert("Not Specified", 316338);
        lookups.seq_status.insert("ACTIVE", 316342);
        lookups.seq_provider.insert("NCBI Gene Model", 706915);
        lookups.jnumber.insert("J:90438", 91000);
        lookups
    }

    fn records(lines: &[&str]) -> Vec<io::Result<String>> {
        lines.iter().map(|line| Ok(line.to_string())).collect()
    }

    #[test]
    fn test_sequence_run_counts_and_continues() {
        let config = SequenceLoadConfig::new("NCBI Gene Model", "NCBI Gene Model").with_jnumber("J:90438");
        let interpreter = build_sequence_interpreter(InterpreterKind::MgsAssembly, &config).unwrap();
        let lookups = lookups();
        let mut loader = SequenceLoader::new(interpreter, &lookups, 1000);
        let mut sink = MemorySink::default();

        let stats = run_load(
            &mut loader,
            records(&[
                "# seqid\tchr\tstart\tend\tstrand\tdescription",
                "240677\t1\t3068294\t3069180\t+\tGENE",
                "240678\t1\t10",
                "240679\t2\t100\t199\t-\tOTHER",
            ]),
            &mut sink,
        )
        .unwrap();

        assert_eq!(stats.records_read, 4);
        assert_eq!(stats.records_skipped, 1);
        assert_eq!(stats.format_errors, 1);
        assert_eq!(stats.records_loaded, 2);
        assert_eq!(stats.references_associated, 2);

        let keys: Vec<Key> = sink
            .rows
            .iter()
            .filter_map(|row| match row {
                LoadRow::Sequence(seq) => Some(seq.sequence_key),
                _ => None,
            })
            .collect();
        assert_eq!(keys, vec![1000, 1001]);
    }

    #[test]
    fn test_unknown_logical_db_is_resolve_error() {
        let config = SequenceLoadConfig::new("NCBI Gene Model", "Unknown DB");
        let interpreter = build_sequence_interpreter(InterpreterKind::MgsAssembly, &config).unwrap();
        let lookups = lookups();
        let mut loader = SequenceLoader::new(interpreter, &lookups, 1);
        let mut sink = MemorySink::default();

        let stats = run_load(&mut loader, records(&["240677\t1\t1\t2\t+\tGENE"]), &mut sink).unwrap();
        assert_eq!(stats.resolve_errors, 1);
        assert!(sink.rows.is_empty());
    }

    #[test]
    fn test_coordinate_run() {
        let mut loader =
            CoordinateLoader::new(CoordinateInterpreter::new(CoordinateLoadConfig::new("NCBI Gene Model")), 5);
        let mut sink = MemorySink::default();

        let stats = run_load(
            &mut loader,
            records(&["240677\t1\t3068294\t3069180\t+", "short\t1"]),
            &mut sink,
        )
        .unwrap();
        assert_eq!(stats.records_loaded, 1);
        assert_eq!(stats.format_errors, 1);
        assert!(matches!(&sink.rows[0], LoadRow::Coordinate(c) if c.feature_key == 5));
    }

    #[test]
    fn test_delete_run() {
        let lookups = lookups();
        let config = SequenceLoadConfig::new("NCBI Gene Model", "NCBI Gene Model");
        let mut loader = DeleteLoader::new(DeleteInterpreter::new(config), &lookups);
        let mut sink = MemorySink::default();

        let stats = run_load(&mut loader, records(&["240677", "", "# done"]), &mut sink).unwrap();
        assert_eq!(stats.records_loaded, 1);
        assert_eq!(stats.records_skipped, 2);
        assert!(matches!(&sink.rows[0], LoadRow::Delete(d) if d.accession.logical_db_key == 59));
    }

    #[test]
    fn test_io_error_stops_run() {
        let config = SequenceLoadConfig::new("NCBI Gene Model", "NCBI Gene Model");
        let interpreter = build_sequence_interpreter(InterpreterKind::MgsAssembly, &config).unwrap();
        let lookups = lookups();
        let mut loader = SequenceLoader::new(interpreter, &lookups, 1);
        let mut sink = MemorySink::default();

        let records = vec![Err(io::Error::new(io::ErrorKind::InvalidData, "bad gzip"))];
        assert!(run_load(&mut loader, records, &mut sink).is_err());
    }
}
