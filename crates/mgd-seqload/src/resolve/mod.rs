//! Attribute resolvers
//!
//! Resolvers turn raw attribute bundles into key-bearing states by running
//! their terms through the run's lookups. Accession and vocabulary misses fail
//! the record; a reference id that is not in MGI is simply not associated.

mod accession;
mod reference;
pub mod seq_ref_assoc;
mod sequence;

pub use accession::{AccAttributeResolver, AccessionState};
pub use reference::{RefAssocAttributeResolver, RefSource, ReferenceAssocState};
pub use seq_ref_assoc::{RefAssocSummary, SeqRefAssocProcessor};
pub use sequence::{SequenceAttributeResolver, SequenceState};
