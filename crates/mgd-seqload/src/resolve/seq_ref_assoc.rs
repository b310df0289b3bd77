//! Sequence-to-reference association
//!
//! A citation may carry a PubMed id, a MEDLINE id, or both. PubMed is
//! preferred: MEDLINE is consulted only when the pair has no PubMed id or the
//! PubMed id is not in MGI.

use std::collections::HashSet;

use super::reference::{RefAssocAttributeResolver, RefSource, ReferenceAssocState};
use crate::input::{RefAssociation, SeqRefAssocPair};
use crate::lookup::Key;

pub struct SeqRefAssocProcessor<'a> {
    resolver: RefAssocAttributeResolver<'a>,
}

impl<'a> SeqRefAssocProcessor<'a> {
    pub fn new(resolver: RefAssocAttributeResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Resolve one citation of `object_key`, PubMed first
    pub fn process(&self, pair: &SeqRefAssocPair, object_key: Key) -> Option<ReferenceAssocState> {
        pair.pubmed
            .as_ref()
            .and_then(|raw| self.resolver.resolve(raw, RefSource::PubMed, object_key))
            .or_else(|| {
                pair.medline
                    .as_ref()
                    .and_then(|raw| self.resolver.resolve(raw, RefSource::Medline, object_key))
            })
    }

    /// Resolve every association of a sequence
    ///
    /// Unresolved citations are dropped, and a reference reached through more
    /// than one citation is associated once.
    pub fn process_all(&self, references: &[RefAssociation], object_key: Key) -> RefAssocSummary {
        let mut seen: HashSet<Key> = HashSet::new();
        let mut summary = RefAssocSummary::default();

        for assoc in references {
            let state = match assoc {
                RefAssociation::Citation(pair) => self.process(pair, object_key),
                RefAssociation::JNumber(raw) => self.resolver.resolve(raw, RefSource::JNumber, object_key),
            };
            match state {
                Some(state) if seen.insert(state.refs_key) => summary.states.push(state),
                Some(_) => summary.duplicates += 1,
                None => summary.unresolved += 1,
            }
        }

        summary
    }
}

/// Associations of one sequence, with the citations that did not make it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefAssocSummary {
    pub states: Vec<ReferenceAssocState>,
    /// Associations that matched no MGI reference
    pub unresolved: usize,
    /// Associations whose reference was already reached by an earlier one
    pub duplicates: usize,
}
