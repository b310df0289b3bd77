//! Per-record input aggregates
//!
//! An interpreter turns one raw record into one of these; resolvers then
//! consume the raw attribute bundles inside.

use serde::{Deserialize, Serialize};

use crate::raw::{
    AccessionRawAttributes, CoordMapFeatureRawAttributes, CoordMapRawAttributes, MSRawAttributes,
    RefAssocRawAttributes, SequenceRawAttributes,
};

/// The PubMed and MEDLINE ids of one citation
///
/// Either side may be missing; a pair with only one id is still a valid pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeqRefAssocPair {
    pub pubmed: Option<RefAssocRawAttributes>,
    pub medline: Option<RefAssocRawAttributes>,
}

impl SeqRefAssocPair {
    pub fn is_empty(&self) -> bool {
        self.pubmed.is_none() && self.medline.is_none()
    }
}

/// One reference to associate with the sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefAssociation {
    /// A citation from the record itself
    Citation(SeqRefAssocPair),
    /// The run's load reference, e.g. `J:90438`
    JNumber(RefAssocRawAttributes),
}

/// Everything one sequence record contributes to the database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceInput {
    pub sequence: SequenceRawAttributes,
    pub sources: Vec<MSRawAttributes>,
    pub references: Vec<RefAssociation>,
    pub primary_acc: AccessionRawAttributes,
    pub secondary_accs: Vec<AccessionRawAttributes>,
}

impl SequenceInput {
    pub fn reset(&mut self) {
        self.sequence.reset();
        self.sources.clear();
        self.references.clear();
        self.primary_acc.reset();
        self.secondary_accs.clear();
    }

    pub fn citations(&self) -> impl Iterator<Item = &SeqRefAssocPair> {
        self.references.iter().filter_map(|assoc| match assoc {
            RefAssociation::Citation(pair) => Some(pair),
            RefAssociation::JNumber(_) => None,
        })
    }

    pub fn primary_acc_id(&self) -> &str {
        self.primary_acc.acc_id().unwrap_or_default()
    }
}

/// One feature located on one coordinate map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinateInput {
    pub collection_name: String,
    pub map: CoordMapRawAttributes,
    pub feature: CoordMapFeatureRawAttributes,
}

impl CoordinateInput {
    pub fn reset(&mut self) {
        self.collection_name.clear();
        self.map.reset();
        self.feature.reset();
    }
}

/// A sequence to remove, named by accession
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteInput {
    pub accession: AccessionRawAttributes,
}
