//! Output of resolved rows
//!
//! The loader hands every resolved record to a [`Sink`]. The JSON-lines sink
//! writes one tagged object per row for the bulk-copy step to pick up.

use mgd_common::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::input::CoordinateInput;
use crate::lookup::Key;
use crate::raw::MSRawAttributes;
use crate::resolve::{AccessionState, ReferenceAssocState, SequenceState};

/// One sequence with everything attached to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSequence {
    pub sequence_key: Key,
    pub sequence: SequenceState,
    pub primary_acc: AccessionState,
    pub secondary_accs: Vec<AccessionState>,
    pub sources: Vec<MSRawAttributes>,
    pub references: Vec<ReferenceAssocState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCoordinate {
    pub feature_key: Key,
    #[serde(flatten)]
    pub coordinate: CoordinateInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDelete {
    pub accession: AccessionState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "row", rename_all = "snake_case")]
pub enum LoadRow {
    Sequence(ResolvedSequence),
    Coordinate(ResolvedCoordinate),
    Delete(ResolvedDelete),
}

/// Destination for resolved rows
pub trait Sink {
    fn write(&mut self, row: &LoadRow) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes one JSON object per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
    rows: usize,
}

impl JsonLinesSink<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0 }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for JsonLinesSink<W> {
    fn write(&mut self, row: &LoadRow) -> Result<()> {
        serde_json::to_writer(&mut self.writer, row)?;
        self.writer.write_all(b"\n")?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps rows in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub rows: Vec<LoadRow>,
}

impl Sink for MemorySink {
    fn write(&mut self, row: &LoadRow) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }
}
