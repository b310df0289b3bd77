//! Raw attribute bundles
//!
//! Plain values filled in by the interpreters, one bundle per database
//! concept. Every type keeps a `reset()` that returns all fields to their
//! documented defaults (`is_private = false`, `is_preferred = true`, all
//! optional values unset).

pub mod accession;
pub mod coord;
pub mod ref_assoc;
pub mod sequence;
pub mod source;

pub use accession::AccessionRawAttributes;
pub use coord::{CoordMapFeatureRawAttributes, CoordMapRawAttributes};
pub use ref_assoc::RefAssocRawAttributes;
pub use sequence::SequenceRawAttributes;
pub use source::MSRawAttributes;
