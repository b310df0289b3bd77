//! MGD sequence load
//!
//! Turns external sequence feeds into key-bearing rows for MGD.
//!
//! A load run reads records from one input file, filters them with the
//! format's `is_valid`, interprets each into raw attribute bundles, resolves
//! ids and vocabulary terms to MGD keys, and writes the result to a sink:
//!
//! ```text
//! RecordReader ─► Interpreter ─► resolvers ─► Sink
//!                  (embl, genbank, fasta,    (accession, reference,
//!                   mgs_assembly, coordinate, sequence vocabulary)
//!                   delete)
//! ```
//!
//! Citations are resolved PubMed first, falling back to MEDLINE only when the
//! PubMed id is absent or unknown.

pub mod config;
pub mod decider;
pub mod error;
pub mod input;
pub mod interpret;
pub mod loader;
pub mod lookup;
pub mod raw;
pub mod reader;
pub mod resolve;
pub mod sink;
pub mod stats;

pub use config::{CoordinateLoadConfig, SequenceLoadConfig};
pub use error::{FormatError, KeyNotFound, RecordError, ResolveError};
pub use interpret::{build_sequence_interpreter, Interpreter, InterpreterKind};
pub use loader::{run_load, CoordinateLoader, DeleteLoader, RecordLoader, SequenceLoader};
pub use lookup::{Key, KeyLookup, LookupSet};
pub use stats::LoadStats;
